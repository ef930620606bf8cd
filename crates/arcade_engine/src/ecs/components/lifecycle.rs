//! Health and death components
//!
//! Entities are never destroyed in the middle of a frame. Whatever decides
//! that an entity is finished adds [`Dead`]; a sweep later in the same frame
//! reads the marker, runs side effects and destroys the entity.

use crate::ecs::{Component, EcsError, Entity, StorageKind, World};

/// Hit points
///
/// May drop to zero or below transiently; the entity is marked [`Dead`] in
/// the same step and swept before the frame ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    /// Remaining hit points
    pub hp: i32,
}

impl Health {
    /// Create with the given hit points
    pub const fn new(hp: i32) -> Self {
        Self { hp }
    }

    /// Subtract `amount` and report whether the entity is out of hit points
    pub fn damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        self.is_depleted()
    }

    /// True once hit points reach zero
    pub const fn is_depleted(&self) -> bool {
        self.hp <= 0
    }
}

impl Component for Health {}

/// Pending removal this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dead;

impl Component for Dead {
    const STORAGE: StorageKind = StorageKind::Sparse;
}

/// Mark `entity` for removal by the end-of-frame sweep
pub fn mark_dead(world: &mut World, entity: Entity) -> Result<(), EcsError> {
    if world.has_component::<Dead>(entity) {
        return Ok(());
    }
    world.add_component(entity, Dead)
}

/// True if `entity` is already marked for removal
pub fn is_dead(world: &World, entity: Entity) -> bool {
    world.has_component::<Dead>(entity)
}

/// Apply damage to an entity that carries [`Health`]
///
/// Marks the entity [`Dead`] once its hit points are gone. Returns whether it
/// died; entities without health take no damage.
pub fn apply_damage(world: &mut World, entity: Entity, amount: i32) -> Result<bool, EcsError> {
    let Some(health) = world.get_component_mut::<Health>(entity) else {
        return Ok(false);
    };
    let depleted = health.damage(amount);
    if depleted {
        mark_dead(world, entity)?;
    }
    Ok(depleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_depletes_at_zero() {
        let mut health = Health::new(2);
        assert!(!health.damage(1));
        assert!(health.damage(1));
        assert_eq!(health.hp, 0);
    }

    #[test]
    fn test_apply_damage_marks_dead() {
        let mut world = World::new();
        let tough = world.create_entity();
        world.add_component(tough, Health::new(2)).unwrap();
        let frail = world.create_entity();
        world.add_component(frail, Health::new(1)).unwrap();

        assert!(!apply_damage(&mut world, tough, 1).unwrap());
        assert!(!is_dead(&world, tough));
        assert_eq!(world.component::<Health>(tough).hp, 1);

        assert!(apply_damage(&mut world, frail, 1).unwrap());
        assert!(is_dead(&world, frail));
    }

    #[test]
    fn test_apply_damage_without_health() {
        let mut world = World::new();
        let rock = world.create_entity();
        assert!(!apply_damage(&mut world, rock, 5).unwrap());
        assert!(!is_dead(&world, rock));
    }

    #[test]
    fn test_mark_dead_is_idempotent() {
        let mut world = World::new();
        let e = world.create_entity();
        mark_dead(&mut world, e).unwrap();
        mark_dead(&mut world, e).unwrap();
        assert!(is_dead(&world, e));
        assert_eq!(world.mask(e).count(), 1);
    }
}
