//! Game systems
//!
//! Engine systems (movement, bounds culling, collision detection, lifetimes)
//! are configured here alongside the invader-specific ones, and
//! [`build_schedule`] assembles the frame pipeline.

pub mod collision_rules;
pub mod enemy_system;
pub mod health_system;
pub mod player_system;
pub mod posture_system;
pub mod score_system;

pub use collision_rules::{invader_collision_system, invader_layers, invader_rules};
pub use enemy_system::{EnemyLogicSystem, EnemyShootingSystem, MarchOutcome};
pub use health_system::HealthSystem;
pub use player_system::{PlayerActionSystem, PlayerIntentSystem, PlayerShootingSystem};
pub use posture_system::PostureSystem;
pub use score_system::ScoreSystem;

use crate::components::ProjectileTag;
use crate::context::SimulationContext;
use crate::factories::EntityFactory;
use arcade_engine::ecs::systems::{BoundsCullSystem, LifetimeSystem, MovementSystem};
use arcade_engine::ecs::{Query, Schedule, ScheduleError, SystemScheduler};
use arcade_engine::physics::Aabb;

/// Assemble and validate the frame pipeline
pub fn build_schedule(factory: EntityFactory) -> Result<Schedule<SimulationContext>, ScheduleError> {
    let config = *factory.config();
    let playfield = Aabb::new(0.0, 0.0, config.window.width, config.window.height);

    SystemScheduler::<SimulationContext>::new()
        .with_system(PlayerIntentSystem::new(config.player, config.window))?
        .with_system(PlayerActionSystem::new())?
        .with_system(EnemyLogicSystem::new(config.formation, config.window))?
        .with_system(EnemyShootingSystem::new(factory))?
        .with_system(PlayerShootingSystem::new(factory))?
        .with_system(MovementSystem::new())?
        .with_system(
            BoundsCullSystem::new(playfield, Query::new().with::<ProjectileTag>()).after(MovementSystem::NAME),
        )?
        .with_system(LifetimeSystem::new())?
        .with_system(
            invader_collision_system()
                .after(MovementSystem::NAME)
                .after(BoundsCullSystem::NAME),
        )?
        .with_system(ScoreSystem::new())?
        .with_system(HealthSystem::new(factory))?
        .with_system(PostureSystem::new(config.formation))?
        .build()
}
