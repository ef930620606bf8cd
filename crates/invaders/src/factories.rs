//! Entity factories
//!
//! Each archetype is a fixed bundle of components attached in one go. The
//! `create_*` methods build the entity immediately and are meant for setup
//! code. Systems that need a new entity mid-frame use the `request_*`
//! methods, which queue the same constructor for the next command flush.

use crate::components::{
    EnemyPath, EnemyProjectileTag, EnemyTag, ExplosionTag, FireLatch, Input, PlayerProjectileTag,
    PlayerTag, PostureChanger, ProjectileTag, RenderData, ScoreValue, Shoots, WallTag,
};
use crate::config::GameConfig;
use arcade_engine::ecs::components::{Collider, CollisionInfo, Health, Lifetime, Position, Velocity};
use arcade_engine::ecs::{EcsError, Entity, World};

/// Sprite slots understood by renderers
pub mod sprites {
    /// Player ship
    pub const PLAYER: u32 = 0;
    /// First invader sprite; invaders use `INVADER..INVADER + variants`
    pub const INVADER: u32 = 10;
    /// Bullets
    pub const PROJECTILE: u32 = 2;
    /// Explosion
    pub const EXPLOSION: u32 = 3;
    /// Shield
    pub const WALL: u32 = 4;
}

/// Builds game entities with sizes taken from the configuration
#[derive(Debug, Clone, Copy)]
pub struct EntityFactory {
    config: GameConfig,
}

impl EntityFactory {
    /// Create a factory for `config`
    pub const fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Creates the player entity
    pub fn create_player(&self, world: &mut World, x: f32, y: f32) -> Result<Entity, EcsError> {
        let player = self.config.player;
        let entity = world.create_entity();
        world.add_component(entity, Position::new(x, y))?;
        world.add_component(entity, Velocity::zero())?;
        world.add_component(entity, Collider::new(player.width, player.height))?;
        world.add_component(entity, RenderData::new(sprites::PLAYER, player.width, player.height))?;
        world.add_component(entity, PlayerTag)?;
        world.add_component(entity, Health::new(player.start_hp))?;
        world.add_component(entity, Shoots::default())?;
        world.add_component(entity, FireLatch::default())?;
        world.add_component(entity, Input::default())?;
        world.add_component(entity, CollisionInfo::default())?;
        log::info!("Created player {} at ({}, {})", entity, x, y);
        Ok(entity)
    }

    /// Creates the player at the bottom centre of the playfield
    pub fn spawn_player(&self, world: &mut World) -> Result<Entity, EcsError> {
        let window = self.config.window;
        let player = self.config.player;
        self.create_player(
            world,
            window.width / 2.0 - player.width / 2.0,
            window.height - player.bottom_offset,
        )
    }

    /// Creates an invader
    pub fn create_enemy(&self, world: &mut World, x: f32, y: f32, score: u32) -> Result<Entity, EcsError> {
        let formation = self.config.formation;
        let entity = world.create_entity();
        world.add_component(entity, Position::new(x, y))?;
        world.add_component(entity, Velocity::zero())?;
        world.add_component(entity, Collider::new(formation.invader_width, formation.invader_height))?;
        world.add_component(
            entity,
            RenderData::new(sprites::INVADER, formation.invader_width, formation.invader_height),
        )?;
        world.add_component(entity, EnemyTag)?;
        world.add_component(entity, Health::new(formation.invader_hp))?;
        world.add_component(entity, ScoreValue { value: score })?;
        world.add_component(entity, Shoots::default())?;
        world.add_component(entity, PostureChanger::default())?;
        world.add_component(entity, EnemyPath::default())?;
        log::debug!("Created enemy {} at ({}, {})", entity, x, y);
        Ok(entity)
    }

    /// Lays out the invader grid
    ///
    /// Invader `(row, col)` gets sprite `(row + col) % sprite_variants`.
    pub fn spawn_formation(&self, world: &mut World) -> Result<Vec<Entity>, EcsError> {
        let formation = self.config.formation;
        let mut invaders = Vec::new();
        for row in 0..formation.rows {
            for col in 0..formation.cols {
                let x = formation.start_x + col as f32 * (formation.invader_width + formation.gap_x);
                let y = formation.start_y + row as f32 * (formation.invader_height + formation.gap_y);
                let entity = self.create_enemy(world, x, y, formation.score_per_invader)?;
                world.add_component(entity, EnemyPath { row, col })?;
                world.component_mut::<RenderData>(entity).sprite_id =
                    sprites::INVADER + (row + col) % formation.sprite_variants.max(1);
                invaders.push(entity);
            }
        }
        log::info!("Spawned formation of {} invaders", invaders.len());
        Ok(invaders)
    }

    /// Creates a projectile
    pub fn create_projectile(
        &self,
        world: &mut World,
        x: f32,
        y: f32,
        vx: f32,
        vy: f32,
        player_owned: bool,
    ) -> Result<Entity, EcsError> {
        let projectiles = self.config.projectiles;
        let entity = world.create_entity();
        world.add_component(entity, Position::new(x, y))?;
        world.add_component(entity, Velocity::new(vx, vy))?;
        world.add_component(entity, Collider::new(projectiles.width, projectiles.height))?;
        world.add_component(
            entity,
            RenderData::new(sprites::PROJECTILE, projectiles.width, projectiles.height),
        )?;
        world.add_component(entity, ProjectileTag)?;
        if player_owned {
            world.add_component(entity, PlayerProjectileTag)?;
        } else {
            world.add_component(entity, EnemyProjectileTag)?;
        }
        log::debug!(
            "Created {} projectile {} at ({}, {})",
            if player_owned { "player" } else { "enemy" },
            entity,
            x,
            y
        );
        Ok(entity)
    }

    /// Creates an explosion effect
    pub fn create_explosion(&self, world: &mut World, x: f32, y: f32) -> Result<Entity, EcsError> {
        let formation = self.config.formation;
        let entity = world.create_entity();
        world.add_component(entity, Position::new(x, y))?;
        world.add_component(
            entity,
            RenderData::new(sprites::EXPLOSION, formation.invader_width, formation.invader_height),
        )?;
        world.add_component(entity, ExplosionTag)?;
        world.add_component(entity, Lifetime::frames(self.config.timing.explosion_frames))?;
        log::debug!("Created explosion {} at ({}, {})", entity, x, y);
        Ok(entity)
    }

    /// Creates a shield
    pub fn create_wall(
        &self,
        world: &mut World,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        hp: i32,
    ) -> Result<Entity, EcsError> {
        let entity = world.create_entity();
        world.add_component(entity, Position::new(x, y))?;
        world.add_component(entity, Collider::new(width, height))?;
        world.add_component(entity, Health::new(hp))?;
        world.add_component(entity, RenderData::new(sprites::WALL, width, height))?;
        world.add_component(entity, WallTag)?;
        log::debug!("Created wall {} at ({}, {})", entity, x, y);
        Ok(entity)
    }

    /// Places the configured shields evenly across the playfield
    pub fn spawn_walls(&self, world: &mut World) -> Result<Vec<Entity>, EcsError> {
        let walls = self.config.walls;
        let spacing = self.config.window.width / (walls.count + 1) as f32;
        (1..=walls.count)
            .map(|i| {
                let x = i as f32 * spacing - walls.width / 2.0;
                self.create_wall(world, x, walls.y, walls.width, walls.height, walls.hp)
            })
            .collect()
    }

    /// Queue a projectile for the next command flush
    pub fn request_projectile(&self, world: &mut World, x: f32, y: f32, vx: f32, vy: f32, player_owned: bool) {
        let factory = *self;
        world.commands().spawn("projectile", move |world| {
            factory.create_projectile(world, x, y, vx, vy, player_owned)
        });
    }

    /// Queue an explosion for the next command flush
    pub fn request_explosion(&self, world: &mut World, x: f32, y: f32) {
        let factory = *self;
        world
            .commands()
            .spawn("explosion", move |world| factory.create_explosion(world, x, y));
    }
}
