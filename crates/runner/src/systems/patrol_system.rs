//! Badnik walking

use crate::components::Patrol;
use crate::context::RunnerContext;
use arcade_engine::ecs::components::{Position, Velocity};
use arcade_engine::ecs::{EcsError, Query, System, SystemPhase, World};

/// Walks patrolling entities back and forth between their turn points
#[derive(Debug, Default)]
pub struct PatrolSystem;

impl PatrolSystem {
    /// System name in schedules
    pub const NAME: &'static str = "patrol";

    /// Create the system
    pub const fn new() -> Self {
        Self
    }

    /// Turn around at the ends and set walking velocity
    pub fn walk(world: &mut World) {
        let query = Query::new().with::<Patrol>().with::<Position>().with::<Velocity>();
        for entity in world.query(&query) {
            let x = world.component::<Position>(entity).x;
            let patrol = world.component_mut::<Patrol>(entity);
            if patrol.moving_right && x >= patrol.right {
                patrol.moving_right = false;
            } else if !patrol.moving_right && x <= patrol.left {
                patrol.moving_right = true;
            }
            let vx = if patrol.moving_right { patrol.speed } else { -patrol.speed };
            world.component_mut::<Velocity>(entity).x = vx;
        }
    }
}

impl System<RunnerContext> for PatrolSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PreUpdate
    }

    fn run(&mut self, world: &mut World, _context: &mut RunnerContext) -> Result<(), EcsError> {
        Self::walk(world);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunnerConfig;
    use crate::factories::RunnerFactory;
    use approx::assert_relative_eq;

    #[test]
    fn test_turns_at_right_end() {
        let mut world = World::new();
        let badnik = RunnerFactory::new(RunnerConfig::default())
            .create_enemy(&mut world, 300.0, 0.0)
            .unwrap();

        PatrolSystem::walk(&mut world);
        assert_relative_eq!(world.component::<Velocity>(badnik).x, 1.0);

        world.component_mut::<Position>(badnik).x = 400.0;
        PatrolSystem::walk(&mut world);
        assert_relative_eq!(world.component::<Velocity>(badnik).x, -1.0);
        assert!(!world.component::<Patrol>(badnik).moving_right);
    }
}
