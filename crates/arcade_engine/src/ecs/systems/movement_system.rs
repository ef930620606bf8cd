//! Integrates velocity into position

use crate::ecs::components::{Position, Velocity};
use crate::ecs::{EcsError, Query, System, SystemPhase, World};

/// Adds each entity's velocity to its position once per frame
///
/// No clamping happens here; systems that need to keep an entity on screen
/// adjust its velocity before this runs.
#[derive(Debug, Default)]
pub struct MovementSystem {
    dependencies: Vec<&'static str>,
}

impl MovementSystem {
    /// System name in schedules
    pub const NAME: &'static str = "movement";

    /// Create a new movement system
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `system` to run first
    #[must_use]
    pub fn after(mut self, system: &'static str) -> Self {
        self.dependencies.push(system);
        self
    }

    /// Step every moving entity once
    pub fn step(world: &mut World) {
        let moving = world.query(&Query::new().with::<Position>().with::<Velocity>());
        for entity in moving {
            let velocity = *world.component::<Velocity>(entity);
            let position = world.component_mut::<Position>(entity);
            *position = position.stepped(velocity);
        }
    }
}

impl<C> System<C> for MovementSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::Update
    }

    fn dependencies(&self) -> &[&'static str] {
        &self.dependencies
    }

    fn run(&mut self, world: &mut World, _context: &mut C) -> Result<(), EcsError> {
        Self::step(world);
        Ok(())
    }
}
