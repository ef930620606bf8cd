//! Death side effects and the destruction sweep

use crate::components::{EnemyTag, PlayerTag, WallTag};
use crate::context::SimulationContext;
use crate::factories::EntityFactory;
use crate::systems::score_system::ScoreSystem;
use arcade_engine::ecs::components::{Dead, Position};
use arcade_engine::ecs::{EcsError, Query, System, SystemPhase, World};

/// Destroys every entity marked [`Dead`]
///
/// Before an invader goes, the game speeds up and an explosion is requested
/// where it stood. Runs after scoring so points are never lost.
#[derive(Debug)]
pub struct HealthSystem {
    factory: EntityFactory,
}

impl HealthSystem {
    /// System name in schedules
    pub const NAME: &'static str = "health";

    /// Create the system
    pub const fn new(factory: EntityFactory) -> Self {
        Self { factory }
    }

    /// Apply death effects and destroy; returns how many entities went
    pub fn sweep(&self, world: &mut World, context: &mut SimulationContext) -> usize {
        let dead = world.query(&Query::new().with::<Dead>());
        for &entity in &dead {
            if world.has_component::<EnemyTag>(entity) {
                context.ramp_difficulty();
                if let Some(position) = world.get_component::<Position>(entity).copied() {
                    self.factory.request_explosion(world, position.x, position.y);
                }
                log::debug!("Invader {} destroyed, score {}", entity, context.score);
            } else if world.has_component::<PlayerTag>(entity) {
                log::info!("Player {} destroyed", entity);
            } else if world.has_component::<WallTag>(entity) {
                log::debug!("Wall {} destroyed", entity);
            }
            world.destroy_entity(entity);
        }
        dead.len()
    }
}

impl System<SimulationContext> for HealthSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PostUpdate
    }

    fn dependencies(&self) -> &[&'static str] {
        &[ScoreSystem::NAME]
    }

    fn run(&mut self, world: &mut World, context: &mut SimulationContext) -> Result<(), EcsError> {
        self.sweep(world, context);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ExplosionTag;
    use crate::config::GameConfig;
    use arcade_engine::ecs::components::mark_dead;

    #[test]
    fn test_enemy_death_ramps_and_explodes() {
        let config = GameConfig::default();
        let factory = EntityFactory::new(config);
        let mut world = World::new();
        let mut context = SimulationContext::new(&config);
        let enemy = factory.create_enemy(&mut world, 100.0, 60.0, 10).unwrap();
        let survivor = factory.create_enemy(&mut world, 200.0, 60.0, 10).unwrap();

        mark_dead(&mut world, enemy).unwrap();
        let system = HealthSystem::new(factory);
        assert_eq!(system.sweep(&mut world, &mut context), 1);

        assert!(!world.is_alive(enemy));
        assert!(world.is_alive(survivor));
        assert_eq!(context.kills, 1);
        assert_eq!(context.move_interval(), 29);

        world.flush_commands().unwrap();
        let explosions = world.query(&Query::new().with::<ExplosionTag>());
        assert_eq!(explosions.len(), 1);
        assert_eq!(*world.component::<Position>(explosions[0]), Position::new(100.0, 60.0));
    }

    #[test]
    fn test_player_death_leaves_difficulty_alone() {
        let config = GameConfig::default();
        let factory = EntityFactory::new(config);
        let mut world = World::new();
        let mut context = SimulationContext::new(&config);
        let player = factory.spawn_player(&mut world).unwrap();

        mark_dead(&mut world, player).unwrap();
        HealthSystem::new(factory).sweep(&mut world, &mut context);

        assert!(!world.is_alive(player));
        assert_eq!(context.kills, 0);
        assert_eq!(world.pending_commands(), 0);
    }
}
