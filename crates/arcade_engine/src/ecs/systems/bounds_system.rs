//! Marks entities that left the playfield

use crate::ecs::components::{is_dead, mark_dead, Position};
use crate::ecs::{EcsError, Query, System, SystemPhase, World};
use crate::physics::Aabb;

/// Marks entities [`Dead`](crate::ecs::components::Dead) once their position
/// leaves the playfield
///
/// Only entities matching the configured query are considered, so a game can
/// limit culling to projectiles and leave the formation alone.
#[derive(Debug)]
pub struct BoundsCullSystem {
    bounds: Aabb,
    query: Query,
    dependencies: Vec<&'static str>,
}

impl BoundsCullSystem {
    /// System name in schedules
    pub const NAME: &'static str = "bounds_cull";

    /// Cull every positioned entity matching `query` that leaves `bounds`
    pub fn new(bounds: Aabb, query: Query) -> Self {
        Self {
            bounds,
            query: query.with::<Position>(),
            dependencies: Vec::new(),
        }
    }

    /// Require `system` to run first
    #[must_use]
    pub fn after(mut self, system: &'static str) -> Self {
        self.dependencies.push(system);
        self
    }

    /// Playfield in use
    pub const fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Mark everything outside the playfield; returns how many were marked
    pub fn cull(&self, world: &mut World) -> Result<usize, EcsError> {
        let mut culled = 0;
        for entity in world.query(&self.query) {
            if is_dead(world, entity) {
                continue;
            }
            let position = *world.component::<Position>(entity);
            let outside = position.x < self.bounds.x
                || position.x > self.bounds.right()
                || position.y < self.bounds.y
                || position.y > self.bounds.bottom();
            if outside {
                log::debug!("Entity {} left the playfield at ({}, {})", entity, position.x, position.y);
                mark_dead(world, entity)?;
                culled += 1;
            }
        }
        Ok(culled)
    }
}

impl<C> System<C> for BoundsCullSystem {
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
        self.cull(world).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Dead, Velocity};

    #[test]
    fn test_cull_marks_only_escaped_entities() {
        let mut world = World::new();
        let inside = world.create_entity();
        world.add_component(inside, Position::new(400.0, 300.0)).unwrap();
        world.add_component(inside, Velocity::new(0.0, -8.0)).unwrap();

        let above = world.create_entity();
        world.add_component(above, Position::new(400.0, -1.0)).unwrap();
        world.add_component(above, Velocity::new(0.0, -8.0)).unwrap();

        let static_outside = world.create_entity();
        world.add_component(static_outside, Position::new(-50.0, 0.0)).unwrap();

        let system = BoundsCullSystem::new(
            Aabb::new(0.0, 0.0, 800.0, 600.0),
            Query::new().with::<Velocity>(),
        );
        assert_eq!(system.cull(&mut world).unwrap(), 1);

        assert!(world.has_component::<Dead>(above));
        assert!(!world.has_component::<Dead>(inside));
        assert!(!world.has_component::<Dead>(static_outside));
    }

    #[test]
    fn test_already_dead_entities_are_not_counted() {
        let mut world = World::new();
        let gone = world.create_entity();
        world.add_component(gone, Position::new(900.0, 0.0)).unwrap();
        world.add_component(gone, Dead).unwrap();

        let system = BoundsCullSystem::new(Aabb::new(0.0, 0.0, 800.0, 600.0), Query::new());
        assert_eq!(system.cull(&mut world).unwrap(), 0);
    }
}
