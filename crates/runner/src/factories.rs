//! Runner entity factories

use crate::components::{
    Animation, CollectableTag, CollectorTag, DamageTag, EnemyTag, GravityTag, Input, Intent, MovementAbility,
    ObstacleTag, Patrol, PlayerTag, PowerupGrant, PowerupKind, RingCount, RingTag, TemporaryPowerup,
};
use crate::config::RunnerConfig;
use arcade_engine::ecs::components::{Collider, CollisionInfo, Health, Position, Velocity};
use arcade_engine::ecs::{EcsError, Entity, World};

/// Builds runner entities with sizes taken from the configuration
#[derive(Debug, Clone, Copy)]
pub struct RunnerFactory {
    config: RunnerConfig,
}

impl RunnerFactory {
    /// Create a factory for `config`
    pub const fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Creates the player character
    pub fn create_sonic(&self, world: &mut World, x: f32, y: f32) -> Result<Entity, EcsError> {
        let player = self.config.player;
        let sonic = world.create_entity();
        world.add_component(sonic, Position::new(x, y))?;
        world.add_component(sonic, Velocity::zero())?;
        world.add_component(sonic, Collider::new(player.width, player.height))?;
        world.add_component(sonic, MovementAbility)?;
        world.add_component(sonic, Animation::default())?;
        world.add_component(sonic, Health::new(player.start_hp))?;
        world.add_component(sonic, PlayerTag)?;
        world.add_component(sonic, CollectorTag)?;
        world.add_component(sonic, RingCount::default())?;
        world.add_component(sonic, CollisionInfo::default())?;
        world.add_component(sonic, TemporaryPowerup::default())?;
        world.add_component(sonic, GravityTag)?;
        world.add_component(sonic, Intent::default())?;
        world.add_component(sonic, Input::default())?;
        log::info!("Created Sonic {} at ({}, {})", sonic, x, y);
        Ok(sonic)
    }

    /// Creates a badnik patrolling around its start position
    pub fn create_enemy(&self, world: &mut World, x: f32, y: f32) -> Result<Entity, EcsError> {
        let enemy = self.config.enemy;
        let entity = world.create_entity();
        world.add_component(entity, Position::new(x, y))?;
        world.add_component(entity, Velocity::zero())?;
        world.add_component(entity, Collider::new(enemy.width, enemy.height))?;
        world.add_component(entity, MovementAbility)?;
        world.add_component(entity, Animation::default())?;
        world.add_component(entity, Health::new(enemy.hp))?;
        world.add_component(entity, EnemyTag)?;
        world.add_component(entity, CollisionInfo::default())?;
        world.add_component(entity, DamageTag)?;
        world.add_component(entity, GravityTag)?;
        world.add_component(
            entity,
            Patrol {
                left: x - enemy.patrol_range,
                right: x + enemy.patrol_range,
                speed: enemy.patrol_speed,
                moving_right: true,
            },
        )?;
        log::debug!("Created enemy {} at ({}, {})", entity, x, y);
        Ok(entity)
    }

    fn create_pickup(&self, world: &mut World, x: f32, y: f32) -> Result<Entity, EcsError> {
        let size = self.config.props.pickup_size;
        let entity = world.create_entity();
        world.add_component(entity, Position::new(x, y))?;
        world.add_component(entity, Collider::new(size, size))?;
        world.add_component(entity, CollisionInfo::default())?;
        world.add_component(entity, CollectableTag)?;
        Ok(entity)
    }

    /// Creates a ring
    pub fn create_ring(&self, world: &mut World, x: f32, y: f32) -> Result<Entity, EcsError> {
        let ring = self.create_pickup(world, x, y)?;
        world.add_component(ring, RingTag)?;
        world.add_component(ring, Animation::default())?;
        log::debug!("Created ring {} at ({}, {})", ring, x, y);
        Ok(ring)
    }

    /// Creates a power-up box granting `kind`
    pub fn create_powerup(&self, world: &mut World, x: f32, y: f32, kind: PowerupKind) -> Result<Entity, EcsError> {
        let powerup = self.create_pickup(world, x, y)?;
        world.add_component(powerup, PowerupGrant { kind })?;
        log::debug!("Created {:?} power-up {} at ({}, {})", kind, powerup, x, y);
        Ok(powerup)
    }

    fn create_solid(&self, world: &mut World, x: f32, y: f32, width: f32, height: f32) -> Result<Entity, EcsError> {
        let entity = world.create_entity();
        world.add_component(entity, Position::new(x, y))?;
        world.add_component(entity, Collider::new(width, height))?;
        world.add_component(entity, CollisionInfo::default())?;
        world.add_component(entity, ObstacleTag)?;
        Ok(entity)
    }

    /// Creates a solid block
    pub fn create_obstacle(&self, world: &mut World, x: f32, y: f32) -> Result<Entity, EcsError> {
        let size = self.config.props.obstacle_size;
        let obstacle = self.create_solid(world, x, y, size, size)?;
        log::debug!("Created obstacle {} at ({}, {})", obstacle, x, y);
        Ok(obstacle)
    }

    /// Creates a platform to stand on
    pub fn create_platform(&self, world: &mut World, x: f32, y: f32) -> Result<Entity, EcsError> {
        let props = self.config.props;
        let platform = self.create_solid(world, x, y, props.platform_width, props.platform_height)?;
        log::debug!("Created platform {} at ({}, {})", platform, x, y);
        Ok(platform)
    }

    /// Creates a strip of spikes
    pub fn create_spikes(&self, world: &mut World, x: f32, y: f32) -> Result<Entity, EcsError> {
        let props = self.config.props;
        let spikes = self.create_solid(world, x, y, props.spikes_width, props.spikes_height)?;
        world.add_component(spikes, DamageTag)?;
        log::debug!("Created spikes {} at ({}, {})", spikes, x, y);
        Ok(spikes)
    }

    /// Lays out a short demo stretch: Sonic, a row of rings, a badnik,
    /// spikes, a platform and a power-up
    pub fn spawn_demo_level(&self, world: &mut World) -> Result<Entity, EcsError> {
        let ground = self.config.level.ground_y;
        let player = self.config.player;
        let sonic = self.create_sonic(world, 100.0, ground - player.height)?;
        for i in 0..5u8 {
            self.create_ring(world, 200.0 + f32::from(i) * 60.0, ground - 40.0)?;
        }
        self.create_enemy(world, 500.0, ground - self.config.enemy.height)?;
        self.create_spikes(world, 680.0, ground - self.config.props.spikes_height)?;
        self.create_platform(world, 560.0, ground - 140.0)?;
        self.create_powerup(world, 600.0, ground - 180.0, PowerupKind::Invincibility)?;
        log::info!("Demo level ready with {} entities", world.entity_count());
        Ok(sonic)
    }
}
