//! Animation state selection

use crate::components::{Animation, AnimationState, JumpingTag, PowerupKind, RollingTag, TemporaryPowerup};
use crate::context::RunnerContext;
use arcade_engine::ecs::components::Velocity;
use arcade_engine::ecs::{EcsError, Entity, Query, System, SystemPhase, World};

/// Picks each entity's animation from its state tags and motion
#[derive(Debug, Default)]
pub struct AnimationSystem;

impl AnimationSystem {
    /// System name in schedules
    pub const NAME: &'static str = "animation";

    /// Create the system
    pub const fn new() -> Self {
        Self
    }

    /// Animation `entity` should be playing
    ///
    /// Rolling beats jumping, jumping beats running.
    pub fn state_of(world: &World, entity: Entity) -> AnimationState {
        if world.has_component::<RollingTag>(entity) {
            return AnimationState::Rolling;
        }
        if world.has_component::<JumpingTag>(entity) {
            return AnimationState::Jumping;
        }
        let moving = world.get_component::<Velocity>(entity).is_some_and(|v| v.x.abs() > f32::EPSILON);
        if !moving {
            return AnimationState::Idle;
        }
        let boosted = world
            .get_component::<TemporaryPowerup>(entity)
            .is_some_and(|powerup| powerup.is(PowerupKind::SpeedBoost));
        if boosted {
            AnimationState::SuperRunning
        } else {
            AnimationState::Running
        }
    }

    /// Update every animation
    pub fn animate(world: &mut World) {
        for entity in world.query(&Query::new().with::<Animation>()) {
            let state = Self::state_of(world, entity);
            let animation = world.component_mut::<Animation>(entity);
            if animation.state != state {
                log::trace!("Entity {} animation {:?} -> {:?}", entity, animation.state, state);
                animation.state = state;
            }
        }
    }
}

impl System<RunnerContext> for AnimationSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::Render
    }

    fn run(&mut self, world: &mut World, _context: &mut RunnerContext) -> Result<(), EcsError> {
        Self::animate(world);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunnerConfig;
    use crate::factories::RunnerFactory;

    #[test]
    fn test_state_priority() {
        let mut world = World::new();
        let sonic = RunnerFactory::new(RunnerConfig::default())
            .create_sonic(&mut world, 0.0, 0.0)
            .unwrap();
        assert_eq!(AnimationSystem::state_of(&world, sonic), AnimationState::Idle);

        world.component_mut::<Velocity>(sonic).x = 4.0;
        assert_eq!(AnimationSystem::state_of(&world, sonic), AnimationState::Running);

        *world.component_mut::<TemporaryPowerup>(sonic) = TemporaryPowerup::new(PowerupKind::SpeedBoost, 10);
        assert_eq!(AnimationSystem::state_of(&world, sonic), AnimationState::SuperRunning);

        world.add_component(sonic, JumpingTag).unwrap();
        assert_eq!(AnimationSystem::state_of(&world, sonic), AnimationState::Jumping);

        world.add_component(sonic, RollingTag).unwrap();
        AnimationSystem::animate(&mut world);
        assert_eq!(world.component::<Animation>(sonic).state, AnimationState::Rolling);
    }
}
