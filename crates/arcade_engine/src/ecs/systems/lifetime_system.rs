//! Expires entities whose lifetime ran out

use crate::ecs::components::{is_dead, mark_dead, Lifetime};
use crate::ecs::{EcsError, Query, System, SystemPhase, World};

/// Ticks every [`Lifetime`] and marks expired entities dead
#[derive(Debug, Default)]
pub struct LifetimeSystem {
    dependencies: Vec<&'static str>,
}

impl LifetimeSystem {
    /// System name in schedules
    pub const NAME: &'static str = "lifetime";

    /// Create a lifetime system
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `system` to run first
    #[must_use]
    pub fn after(mut self, system: &'static str) -> Self {
        self.dependencies.push(system);
        self
    }

    /// Tick all lifetimes; returns how many entities expired
    pub fn expire(world: &mut World) -> Result<usize, EcsError> {
        let mut expired = 0;
        for entity in world.query(&Query::new().with::<Lifetime>()) {
            if is_dead(world, entity) {
                continue;
            }
            if world.component_mut::<Lifetime>(entity).tick() {
                mark_dead(world, entity)?;
                expired += 1;
            }
        }
        Ok(expired)
    }
}

impl<C> System<C> for LifetimeSystem {
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
        Self::expire(world).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Dead;

    #[test]
    fn test_expired_entities_marked_dead() {
        let mut world = World::new();
        let short = world.create_entity();
        world.add_component(short, Lifetime::frames(1)).unwrap();
        let long = world.create_entity();
        world.add_component(long, Lifetime::frames(3)).unwrap();

        assert_eq!(LifetimeSystem::expire(&mut world).unwrap(), 1);
        assert!(world.has_component::<Dead>(short));
        assert!(!world.has_component::<Dead>(long));
        assert_eq!(world.component::<Lifetime>(long).remaining_frames, 2);

        assert_eq!(LifetimeSystem::expire(&mut world).unwrap(), 0);
        assert_eq!(LifetimeSystem::expire(&mut world).unwrap(), 1);
    }
}
