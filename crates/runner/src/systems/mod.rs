//! Runner systems
//!
//! [`build_schedule`] assembles the frame pipeline from these and the
//! engine's movement and collision systems.

pub mod animation_system;
pub mod collision_rules;
pub mod control_system;
pub mod effects_system;
pub mod gravity_system;
pub mod health_system;
pub mod item_system;
pub mod patrol_system;

pub use animation_system::AnimationSystem;
pub use collision_rules::{rest_against, runner_collision_system, runner_layers, runner_rules};
pub use control_system::{ActionSystem, IntentSystem};
pub use effects_system::TemporaryEffectsSystem;
pub use gravity_system::GravitySystem;
pub use health_system::HealthSystem;
pub use item_system::ItemCollectionSystem;
pub use patrol_system::PatrolSystem;

use crate::config::RunnerConfig;
use crate::context::RunnerContext;
use arcade_engine::ecs::systems::MovementSystem;
use arcade_engine::ecs::{Schedule, ScheduleError, SystemScheduler};

/// Assemble and validate the frame pipeline
pub fn build_schedule(config: &RunnerConfig) -> Result<Schedule<RunnerContext>, ScheduleError> {
    SystemScheduler::<RunnerContext>::new()
        .with_system(IntentSystem::new())?
        .with_system(ActionSystem::new(config.player, config.powerups))?
        .with_system(PatrolSystem::new())?
        .with_system(MovementSystem::new())?
        .with_system(GravitySystem::new(config.physics, config.level))?
        .with_system(runner_collision_system(config.player.mercy_frames).after(GravitySystem::NAME))?
        .with_system(ItemCollectionSystem::new(config.powerups))?
        .with_system(TemporaryEffectsSystem::new())?
        .with_system(HealthSystem::new())?
        .with_system(AnimationSystem::new())?
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_engine::ecs::systems::CollisionSystem;

    #[test]
    fn test_pipeline_order() {
        let schedule = build_schedule(&RunnerConfig::default()).unwrap();
        assert_eq!(
            schedule.order(),
            vec![
                "intent",
                "action",
                "patrol",
                "movement",
                "gravity",
                CollisionSystem::<RunnerContext>::NAME,
                "item_collection",
                "temporary_effects",
                "health",
                "animation",
            ]
        );
    }
}
