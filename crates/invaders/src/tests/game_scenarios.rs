//! Whole-game scenarios driven through `Game::step`

use crate::components::{EnemyProjectileTag, EnemyTag, PlayerProjectileTag, Shoots};
use crate::config::GameConfig;
use crate::context::MarchDirection;
use crate::game::{Game, GameStatus};
use crate::input::{Buttons, IdleInput, ScriptedInput};
use crate::render::{DrawKind, RecordingSink};
use arcade_engine::ecs::components::Position;
use arcade_engine::ecs::Query;
use arcade_engine::foundation::logging;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Seeded, invaders effectively never fire
    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.seed = Some(11);
        config.difficulty.shoot_odds = 1_000_000;
        config.difficulty.min_shoot_odds = 1_000_000;
        config.timing.realtime = false;
        config
    }

    fn count<T: arcade_engine::ecs::Component>(game: &Game) -> usize {
        game.world().query(&Query::new().with::<T>()).len()
    }

    fn invader_positions(game: &Game) -> Vec<Position> {
        game.world()
            .query(&Query::new().with::<EnemyTag>())
            .into_iter()
            .map(|e| *game.world().component::<Position>(e))
            .collect()
    }

    #[test]
    fn test_null_entity_is_reserved() {
        let game = Game::new(quiet_config()).unwrap();
        assert_eq!(game.player().id(), 1);
        assert_eq!(game.status(), GameStatus::Playing);
        // player + 15 invaders + 4 walls
        assert_eq!(game.world().entity_count(), 20);
    }

    #[test]
    fn test_single_bullet_admission() {
        logging::init_for_tests();
        let mut game = Game::new(quiet_config()).unwrap();

        game.step(Buttons::FIRE).unwrap();
        game.step(Buttons::empty()).unwrap();
        game.step(Buttons::FIRE).unwrap();

        assert_eq!(count::<PlayerProjectileTag>(&game), 1);
    }

    #[test]
    fn test_holding_fire_does_not_refire() {
        let mut config = quiet_config();
        config.projectiles.single_player_projectile = false;
        let mut game = Game::new(config).unwrap();

        for _ in 0..5 {
            game.step(Buttons::FIRE).unwrap();
        }
        assert_eq!(count::<PlayerProjectileTag>(&game), 1);
    }

    #[test]
    fn test_spawned_projectile_is_drawn_same_frame() {
        let mut game = Game::new(quiet_config()).unwrap();
        let mut input = ScriptedInput::new().hold(0..1, Buttons::FIRE);
        let mut sink = RecordingSink::default();

        game.run_frame(&mut input, &mut sink).unwrap();

        assert_eq!(sink.frame, 1);
        assert!(sink
            .commands
            .iter()
            .any(|command| command.kind == DrawKind::PlayerProjectile));
    }

    #[test]
    fn test_player_moves_with_input() {
        let mut game = Game::new(quiet_config()).unwrap();
        let player = game.player();

        for _ in 0..10 {
            game.step(Buttons::LEFT).unwrap();
        }
        assert_relative_eq!(game.world().component::<Position>(player).x, 370.0 - 60.0);

        for _ in 0..100 {
            game.step(Buttons::LEFT).unwrap();
        }
        assert_relative_eq!(game.world().component::<Position>(player).x, 0.0);
    }

    #[test]
    fn test_formation_reverses_together() {
        let mut config = quiet_config();
        config.difficulty.move_interval = 1;
        let mut game = Game::new(config).unwrap();
        let start = invader_positions(&game);

        // Rightmost invader sits at x = 740 after 18 steps; the 19th tick drops
        for _ in 0..18 {
            game.step(Buttons::empty()).unwrap();
        }
        assert_eq!(game.context().direction, MarchDirection::Right);
        game.step(Buttons::empty()).unwrap();
        assert_eq!(game.context().direction, MarchDirection::Left);

        for (before, after) in start.iter().zip(invader_positions(&game)) {
            assert_relative_eq!(after.x, before.x + 18.0 * 20.0);
            assert_relative_eq!(after.y, before.y + 40.0);
        }
    }

    #[test]
    fn test_enemy_shoot_flags_cleared_each_frame() {
        let mut config = quiet_config();
        config.difficulty.shoot_odds = 1;
        config.difficulty.min_shoot_odds = 1;
        let mut game = Game::new(config).unwrap();

        game.step(Buttons::empty()).unwrap();

        assert_eq!(count::<EnemyProjectileTag>(&game), 15);
        let raised = game
            .world()
            .query(&Query::new().with::<EnemyTag>().with::<Shoots>())
            .into_iter()
            .filter(|&e| game.world().component::<Shoots>(e).value)
            .count();
        assert_eq!(raised, 0);
    }

    #[test]
    fn test_kill_ramps_difficulty_and_scores() {
        let mut game = Game::new(quiet_config()).unwrap();
        let target = game.world().query(&Query::new().with::<EnemyTag>())[0];
        let at = *game.world().component::<Position>(target);
        let factory = *game.factory();
        factory
            .create_projectile(game.world_mut(), at.x + 10.0, at.y + 18.0, 0.0, -8.0, true)
            .unwrap();

        game.step(Buttons::empty()).unwrap();

        assert!(!game.world().is_alive(target));
        // The explosion reuses the invader's slot
        assert!(game.world().entities().any(|e| e.id() == target.id()));
        assert_eq!(game.score(), 10);
        assert_eq!(game.context().kills, 1);
        assert_eq!(game.context().move_interval(), 29);
        assert_eq!(game.context().shoot_odds, 1_000_000);
        assert_eq!(count::<EnemyTag>(&game), 14);
    }

    #[test]
    fn test_last_kill_wins_then_finishes_after_delay() {
        let mut config = quiet_config();
        config.formation.rows = 1;
        config.formation.cols = 1;
        let mut game = Game::new(config).unwrap();
        let factory = *game.factory();
        factory
            .create_projectile(game.world_mut(), 110.0, 78.0, 0.0, -8.0, true)
            .unwrap();

        assert_eq!(game.step(Buttons::empty()).unwrap(), GameStatus::Won);
        assert!(!game.is_finished());

        // 1300 ms at 16 ms per frame
        for _ in 0..81 {
            game.step(Buttons::empty()).unwrap();
        }
        assert!(!game.is_finished());
        game.step(Buttons::empty()).unwrap();
        assert!(game.is_finished());
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_invaders_landing_loses() {
        let mut game = Game::new(quiet_config()).unwrap();
        let invader = game.world().query(&Query::new().with::<EnemyTag>())[0];
        game.world_mut().component_mut::<Position>(invader).y = 520.0;

        assert_eq!(game.step(Buttons::empty()).unwrap(), GameStatus::Lost);
        assert!(game.world().is_alive(game.player()));
    }

    #[test]
    fn test_player_death_loses() {
        let mut config = quiet_config();
        config.player.start_hp = 1;
        let mut game = Game::new(config).unwrap();
        let factory = *game.factory();
        factory
            .create_projectile(game.world_mut(), 390.0, 530.0, 0.0, 4.0, false)
            .unwrap();

        assert_eq!(game.step(Buttons::empty()).unwrap(), GameStatus::Lost);
        assert!(!game.world().is_alive(game.player()));
    }

    #[test]
    fn test_player_death_loses_while_invaders_fire() {
        let mut config = quiet_config();
        config.player.start_hp = 1;
        config.difficulty.shoot_odds = 1;
        config.difficulty.min_shoot_odds = 1;
        let mut game = Game::new(config).unwrap();
        let player = game.player();
        let factory = *game.factory();
        factory
            .create_projectile(game.world_mut(), 390.0, 530.0, 0.0, 4.0, false)
            .unwrap();

        assert_eq!(game.step(Buttons::empty()).unwrap(), GameStatus::Lost);
        assert!(!game.world().is_alive(player));
        assert!(count::<EnemyProjectileTag>(&game) > 0);
        // The freed slot went straight to a new shot in the same flush
        assert!(game.world().entities().any(|e| e.id() == player.id()));

        for _ in 0..30 {
            game.step(Buttons::empty()).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Lost);
    }

    #[test]
    fn test_idle_game_keeps_playing() {
        let mut game = Game::new(quiet_config()).unwrap();
        let mut sink = RecordingSink::default();
        for _ in 0..120 {
            game.run_frame(&mut IdleInput, &mut sink).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(sink.presented, 120);
        assert_eq!(game.frame(), 120);
    }
}
