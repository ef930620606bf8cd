//! Player control systems
//!
//! Input flows through three steps: intent turns held buttons into a
//! velocity, action turns a fire press into a [`Shoots`] intent, and shooting
//! decides whether that intent becomes a projectile.

use crate::components::{FireLatch, Input, PlayerProjectileTag, PlayerTag, Shoots};
use crate::config::{PlayerConfig, ProjectileConfig, WindowConfig};
use crate::context::SimulationContext;
use crate::factories::EntityFactory;
use arcade_engine::ecs::components::{is_dead, Collider, Position, Velocity};
use arcade_engine::ecs::{EcsError, Query, System, SystemPhase, World};

/// Converts held direction buttons into horizontal velocity
///
/// Both or neither direction held gives zero. The velocity is shortened so
/// the next movement step stops the ship at the playfield edge.
#[derive(Debug)]
pub struct PlayerIntentSystem {
    speed: f32,
    field_width: f32,
}

impl PlayerIntentSystem {
    /// System name in schedules
    pub const NAME: &'static str = "player_intent";

    /// Create the system
    pub const fn new(player: PlayerConfig, window: WindowConfig) -> Self {
        Self {
            speed: player.speed,
            field_width: window.width,
        }
    }

    fn steer(&self, world: &mut World) {
        let query = Query::new()
            .with::<PlayerTag>()
            .with::<Input>()
            .with::<Velocity>()
            .with::<Position>();
        for entity in world.query(&query) {
            let input = *world.component::<Input>(entity);
            let x = world.component::<Position>(entity).x;
            let width = world.get_component::<Collider>(entity).map_or(0.0, |c| c.width);

            let vx = match (input.left_pressed, input.right_pressed) {
                (true, false) => -self.speed,
                (false, true) => self.speed,
                _ => 0.0,
            };
            let room_right = (self.field_width - width - x).max(0.0);
            let room_left = -(x.max(0.0));
            let velocity = world.component_mut::<Velocity>(entity);
            velocity.x = vx.max(room_left).min(room_right);
        }
    }
}

impl System<SimulationContext> for PlayerIntentSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PreUpdate
    }

    fn run(&mut self, world: &mut World, _context: &mut SimulationContext) -> Result<(), EcsError> {
        self.steer(world);
        Ok(())
    }
}

/// Raises [`Shoots`] on the frame fire goes down
#[derive(Debug, Default)]
pub struct PlayerActionSystem;

impl PlayerActionSystem {
    /// System name in schedules
    pub const NAME: &'static str = "player_action";

    /// Create the system
    pub const fn new() -> Self {
        Self
    }

    fn trigger(world: &mut World) {
        let query = Query::new().with::<Input>().with::<FireLatch>().with::<Shoots>();
        for entity in world.query(&query) {
            let fire = world.component::<Input>(entity).fire_pressed;
            let latch = world.component_mut::<FireLatch>(entity);
            let pressed = fire && !latch.held;
            latch.held = fire;
            if pressed {
                world.component_mut::<Shoots>(entity).value = true;
            }
        }
    }
}

impl System<SimulationContext> for PlayerActionSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PreUpdate
    }

    fn dependencies(&self) -> &[&'static str] {
        &[PlayerIntentSystem::NAME]
    }

    fn run(&mut self, world: &mut World, _context: &mut SimulationContext) -> Result<(), EcsError> {
        Self::trigger(world);
        Ok(())
    }
}

/// Turns the player's [`Shoots`] intent into a projectile
///
/// With `single_player_projectile` on, the shot is refused while a live
/// player projectile exists. The intent is cleared either way.
#[derive(Debug)]
pub struct PlayerShootingSystem {
    factory: EntityFactory,
    projectiles: ProjectileConfig,
}

impl PlayerShootingSystem {
    /// System name in schedules
    pub const NAME: &'static str = "player_shooting";

    /// Create the system
    pub fn new(factory: EntityFactory) -> Self {
        Self {
            projectiles: factory.config().projectiles,
            factory,
        }
    }

    fn projectile_in_flight(world: &World) -> bool {
        world
            .query(&Query::new().with::<PlayerProjectileTag>())
            .into_iter()
            .any(|entity| !is_dead(world, entity))
    }

    /// Fire for every player that asked to; returns projectiles requested
    pub fn fire(&self, world: &mut World) -> usize {
        let query = Query::new()
            .with::<PlayerTag>()
            .with::<Shoots>()
            .with::<Position>()
            .with::<Collider>();
        let mut fired = 0;
        for entity in world.query(&query) {
            if !world.component::<Shoots>(entity).value {
                continue;
            }
            world.component_mut::<Shoots>(entity).value = false;

            if self.projectiles.single_player_projectile && (fired > 0 || Self::projectile_in_flight(world)) {
                log::debug!("Player {} shot refused: projectile already in flight", entity);
                continue;
            }

            let position = *world.component::<Position>(entity);
            let collider = *world.component::<Collider>(entity);
            let x = position.x + collider.width / 2.0 - self.projectiles.width / 2.0;
            let y = position.y - self.projectiles.height;
            self.factory
                .request_projectile(world, x, y, 0.0, -self.projectiles.player_speed, true);
            fired += 1;
        }
        fired
    }
}

impl System<SimulationContext> for PlayerShootingSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PreUpdate
    }

    fn dependencies(&self) -> &[&'static str] {
        &[PlayerActionSystem::NAME]
    }

    fn run(&mut self, world: &mut World, _context: &mut SimulationContext) -> Result<(), EcsError> {
        self.fire(world);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use approx::assert_relative_eq;

    fn setup() -> (World, EntityFactory, arcade_engine::ecs::Entity) {
        let mut world = World::new();
        let factory = EntityFactory::new(GameConfig::default());
        let player = factory.spawn_player(&mut world).unwrap();
        (world, factory, player)
    }

    fn press(world: &mut World, player: arcade_engine::ecs::Entity, left: bool, right: bool, fire: bool) {
        *world.component_mut::<Input>(player) = Input {
            left_pressed: left,
            right_pressed: right,
            fire_pressed: fire,
        };
    }

    #[test]
    fn test_intent_directions() {
        let (mut world, factory, player) = setup();
        let intent = PlayerIntentSystem::new(factory.config().player, factory.config().window);

        press(&mut world, player, true, false, false);
        intent.steer(&mut world);
        assert_relative_eq!(world.component::<Velocity>(player).x, -6.0);

        press(&mut world, player, false, true, false);
        intent.steer(&mut world);
        assert_relative_eq!(world.component::<Velocity>(player).x, 6.0);

        press(&mut world, player, true, true, false);
        intent.steer(&mut world);
        assert_relative_eq!(world.component::<Velocity>(player).x, 0.0);
    }

    #[test]
    fn test_intent_stops_at_edges() {
        let (mut world, factory, player) = setup();
        let intent = PlayerIntentSystem::new(factory.config().player, factory.config().window);

        world.component_mut::<Position>(player).x = 2.0;
        press(&mut world, player, true, false, false);
        intent.steer(&mut world);
        assert_relative_eq!(world.component::<Velocity>(player).x, -2.0);

        world.component_mut::<Position>(player).x = 738.0;
        press(&mut world, player, false, true, false);
        intent.steer(&mut world);
        assert_relative_eq!(world.component::<Velocity>(player).x, 2.0);
    }

    #[test]
    fn test_action_fires_on_press_edge_only() {
        let (mut world, _, player) = setup();

        press(&mut world, player, false, false, true);
        PlayerActionSystem::trigger(&mut world);
        assert!(world.component::<Shoots>(player).value);

        world.component_mut::<Shoots>(player).value = false;
        PlayerActionSystem::trigger(&mut world);
        assert!(!world.component::<Shoots>(player).value);

        press(&mut world, player, false, false, false);
        PlayerActionSystem::trigger(&mut world);
        press(&mut world, player, false, false, true);
        PlayerActionSystem::trigger(&mut world);
        assert!(world.component::<Shoots>(player).value);
    }

    #[test]
    fn test_shooting_spawns_above_ship_and_clears_intent() {
        let (mut world, factory, player) = setup();
        let shooting = PlayerShootingSystem::new(factory);

        world.component_mut::<Shoots>(player).value = true;
        assert_eq!(shooting.fire(&mut world), 1);
        assert!(!world.component::<Shoots>(player).value);

        world.flush_commands().unwrap();
        let shots = world.query(&Query::new().with::<PlayerProjectileTag>());
        assert_eq!(shots.len(), 1);
        let p = world.component::<Position>(shots[0]);
        assert_relative_eq!(p.x, 370.0 + 30.0 - 3.0);
        assert_relative_eq!(p.y, 540.0 - 16.0);
        assert_relative_eq!(world.component::<Velocity>(shots[0]).y, -8.0);
    }

    #[test]
    fn test_second_shot_refused_while_first_in_flight() {
        let (mut world, factory, player) = setup();
        let shooting = PlayerShootingSystem::new(factory);

        world.component_mut::<Shoots>(player).value = true;
        shooting.fire(&mut world);
        world.flush_commands().unwrap();

        world.component_mut::<Shoots>(player).value = true;
        assert_eq!(shooting.fire(&mut world), 0);
        assert!(!world.component::<Shoots>(player).value);
        assert_eq!(world.pending_commands(), 0);
    }

    #[test]
    fn test_admission_off_allows_volleys() {
        let mut config = GameConfig::default();
        config.projectiles.single_player_projectile = false;
        let factory = EntityFactory::new(config);
        let mut world = World::new();
        let player = factory.spawn_player(&mut world).unwrap();
        let shooting = PlayerShootingSystem::new(factory);

        for _ in 0..3 {
            world.component_mut::<Shoots>(player).value = true;
            shooting.fire(&mut world);
            world.flush_commands().unwrap();
        }
        assert_eq!(world.query(&Query::new().with::<PlayerProjectileTag>()).len(), 3);
    }
}
