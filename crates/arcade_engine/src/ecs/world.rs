//! ECS World implementation

use super::commands::{CommandQueue, FlushReport};
use super::component::{short_name, Component, ComponentRegistry};
use super::entity::Entity;
use super::error::EcsError;
use super::mask::Mask;
use super::query::Query;
use super::storage::{AnyStorage, Storage};
use std::collections::VecDeque;

/// ECS World containing all entities and components
///
/// The world keeps one [`Mask`] per entity slot and one storage per
/// registered component type. A mask bit is set exactly when the storage for
/// that type holds a value for the entity; every mutation below keeps the two
/// in step.
///
/// Slots of destroyed entities stay in the mask table with an empty mask and
/// their ids go onto a free list. Scans therefore run up to the highest id
/// ever issued and skip empty slots. Each slot also carries a generation
/// that destruction bumps; a handle only resolves while its generation
/// matches the slot's.
#[derive(Default)]
pub struct World {
    masks: Vec<Mask>,
    alive: Vec<bool>,
    generations: Vec<u32>,
    free_ids: VecDeque<u32>,
    live_count: usize,
    registry: ComponentRegistry,
    storages: Vec<Box<dyn AnyStorage>>,
    commands: CommandQueue,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world whose id 0 is permanently reserved
    ///
    /// The reserved slot is never alive and never reused, so an id of 0 can
    /// serve as a null handle.
    pub fn with_null_entity() -> Self {
        let mut world = Self::new();
        world.masks.push(Mask::EMPTY);
        world.alive.push(false);
        world.generations.push(0);
        world
    }

    /// Create a new entity with an empty mask
    pub fn create_entity(&mut self) -> Entity {
        let entity = if let Some(id) = self.free_ids.pop_front() {
            let entity = Entity::new(id, self.generations[id as usize]);
            self.masks[entity.index()] = Mask::EMPTY;
            self.alive[entity.index()] = true;
            entity
        } else {
            let id = u32::try_from(self.masks.len()).unwrap_or(u32::MAX);
            self.masks.push(Mask::EMPTY);
            self.alive.push(true);
            self.generations.push(0);
            Entity::new(id, 0)
        };
        self.live_count += 1;
        log::trace!("Created entity {}", entity);
        entity
    }

    /// Destroy an entity, dropping all of its components
    ///
    /// Returns `false` if the entity was not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let mask = self.masks[entity.index()];
        for bit in mask.iter_bits() {
            if let Some(storage) = self.storages.get_mut(usize::from(bit)) {
                storage.remove_entity(entity);
            }
        }
        self.masks[entity.index()] = Mask::EMPTY;
        self.alive[entity.index()] = false;
        self.generations[entity.index()] = entity.generation().wrapping_add(1);
        self.free_ids.push_back(entity.id());
        self.live_count -= 1;
        log::trace!("Destroyed entity {}", entity);
        true
    }

    /// True if `entity` refers to a live slot of the same generation
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.get(entity.index()).copied().unwrap_or(false)
            && self.generations.get(entity.index()) == Some(&entity.generation())
    }

    /// Number of live entities
    pub const fn entity_count(&self) -> usize {
        self.live_count
    }

    /// One past the highest id ever issued
    pub fn id_bound(&self) -> u32 {
        u32::try_from(self.masks.len()).unwrap_or(u32::MAX)
    }

    /// Iterate over live entities in ascending id order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive
            .iter()
            .enumerate()
            .zip(&self.generations)
            .filter(|((_, alive), _)| **alive)
            .filter_map(|((index, _), &generation)| {
                u32::try_from(index).ok().map(|id| Entity::new(id, generation))
            })
    }

    /// Component registry of this world
    pub const fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Register `T` ahead of first use and return its mask bit
    pub fn register<T: Component>(&mut self) -> Result<u8, EcsError> {
        let bit = self.registry.register::<T>()?;
        if usize::from(bit) == self.storages.len() {
            self.storages.push(Box::new(Storage::<T>::new()));
        }
        Ok(bit)
    }

    /// Current mask of `entity`; empty for dead, stale or unknown handles
    pub fn mask(&self, entity: Entity) -> Mask {
        if !self.is_alive(entity) {
            return Mask::EMPTY;
        }
        self.masks.get(entity.index()).copied().unwrap_or(Mask::EMPTY)
    }

    /// Add a component to an entity, overwriting any previous value
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::DeadEntity(entity));
        }
        let bit = self.register::<T>()?;
        if let Some(storage) = self.storage_mut::<T>(bit) {
            storage.insert(entity, component);
            self.masks[entity.index()].set(bit);
        }
        Ok(())
    }

    /// Remove a component from an entity, returning it
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        let bit = self.registry.bit_of::<T>()?;
        if !self.mask(entity).test(bit) {
            return None;
        }
        self.masks[entity.index()].clear(bit);
        self.storage_mut::<T>(bit)?.remove(entity)
    }

    /// True if `entity` owns a `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.registry
            .bit_of::<T>()
            .is_some_and(|bit| self.mask(entity).test(bit))
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        let bit = self.registry.bit_of::<T>()?;
        if !self.mask(entity).test(bit) {
            return None;
        }
        self.storage::<T>(bit)?.get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let bit = self.registry.bit_of::<T>()?;
        if !self.mask(entity).test(bit) {
            return None;
        }
        self.storage_mut::<T>(bit)?.get_mut(entity)
    }

    /// Get a component, reporting which one was missing
    pub fn try_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.get_component(entity).ok_or(EcsError::MissingComponent {
            entity,
            component: short_name(std::any::type_name::<T>()),
        })
    }

    /// Get a component the caller knows is present
    ///
    /// # Panics
    /// Panics with the entity and its current component set if `T` is absent.
    /// Systems only call this for bits their query required.
    #[track_caller]
    pub fn component<T: Component>(&self, entity: Entity) -> &T {
        match self.get_component(entity) {
            Some(component) => component,
            None => self.missing::<T>(entity),
        }
    }

    /// Mutable counterpart of [`World::component`]
    ///
    /// # Panics
    /// Panics if `T` is absent.
    #[track_caller]
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
        if !self.has_component::<T>(entity) {
            self.missing::<T>(entity);
        }
        match self.get_component_mut(entity) {
            Some(component) => component,
            None => panic!("storage for {} lost entity {}", short_name(std::any::type_name::<T>()), entity),
        }
    }

    /// Snapshot of the live entities matching `query`, ascending by id
    ///
    /// The snapshot is taken once; entities created while the caller walks
    /// it are not included.
    pub fn query(&self, query: &Query) -> Vec<Entity> {
        let Some(resolved) = query.resolve(&self.registry) else {
            return Vec::new();
        };
        self.entities()
            .filter(|entity| resolved.matches(self.masks[entity.index()]))
            .collect()
    }

    /// Short names of the components `entity` owns
    pub fn describe(&self, entity: Entity) -> Vec<&'static str> {
        self.registry.describe(self.mask(entity))
    }

    /// Deferred command queue
    pub fn commands(&mut self) -> &mut CommandQueue {
        &mut self.commands
    }

    /// Number of deferred commands waiting for the next flush
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Apply every deferred command
    pub fn flush_commands(&mut self) -> Result<FlushReport, EcsError> {
        let mut queue = std::mem::take(&mut self.commands);
        let result = queue.apply(self);
        // Commands recorded during the flush wait for the next one.
        let recorded = std::mem::replace(&mut self.commands, queue);
        self.commands.append(recorded);
        result
    }

    #[track_caller]
    fn missing<T: Component>(&self, entity: Entity) -> ! {
        panic!(
            "entity {} has no {} component (owns {:?})",
            entity,
            short_name(std::any::type_name::<T>()),
            self.describe(entity)
        )
    }

    fn storage<T: Component>(&self, bit: u8) -> Option<&Storage<T>> {
        self.storages
            .get(usize::from(bit))?
            .as_any()
            .downcast_ref::<Storage<T>>()
    }

    fn storage_mut<T: Component>(&mut self, bit: u8) -> Option<&mut Storage<T>> {
        self.storages
            .get_mut(usize::from(bit))?
            .as_any_mut()
            .downcast_mut::<Storage<T>>()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("live", &self.live_count)
            .field("id_bound", &self.masks.len())
            .field("component_types", &self.registry.len())
            .field("pending_commands", &self.commands.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::StorageKind;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Position(i32, i32);
    impl Component for Position {}

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Velocity(i32, i32);
    impl Component for Velocity {}

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Rare(u8);
    impl Component for Rare {
        const STORAGE: StorageKind = StorageKind::Sparse;
    }

    #[test]
    fn test_mask_bit_tracks_storage() {
        let mut world = World::new();
        let e = world.create_entity();
        assert!(world.mask(e).is_empty());

        world.add_component(e, Position(1, 2)).unwrap();
        world.add_component(e, Rare(9)).unwrap();
        assert!(world.has_component::<Position>(e));
        assert_eq!(world.get_component::<Rare>(e), Some(&Rare(9)));
        assert_eq!(world.mask(e).count(), 2);

        assert_eq!(world.remove_component::<Rare>(e), Some(Rare(9)));
        assert!(!world.has_component::<Rare>(e));
        assert!(world.get_component::<Rare>(e).is_none());
        assert!(world.remove_component::<Rare>(e).is_none());
    }

    #[test]
    fn test_add_component_overwrites() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Position(1, 1)).unwrap();
        world.add_component(e, Position(5, 6)).unwrap();
        assert_eq!(*world.component::<Position>(e), Position(5, 6));
    }

    #[test]
    fn test_destroy_releases_components_and_recycles_id() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        world.add_component(a, Position(0, 0)).unwrap();
        world.add_component(a, Rare(1)).unwrap();

        assert!(world.destroy_entity(a));
        assert!(!world.destroy_entity(a));
        assert!(!world.is_alive(a));
        assert!(world.mask(a).is_empty());
        assert_eq!(world.entity_count(), 1);
        assert_eq!(world.id_bound(), 2);

        let c = world.create_entity();
        assert_eq!(c.id(), a.id());
        assert!(world.get_component::<Position>(c).is_none());
        assert!(world.get_component::<Rare>(c).is_none());
        assert_ne!(c, b);
    }

    #[test]
    fn test_stale_handle_does_not_resolve_to_recycled_slot() {
        let mut world = World::new();
        let old = world.create_entity();
        world.add_component(old, Position(1, 1)).unwrap();
        world.destroy_entity(old);

        let new = world.create_entity();
        world.add_component(new, Position(7, 7)).unwrap();
        world.add_component(new, Rare(3)).unwrap();

        assert_eq!(new.id(), old.id());
        assert_ne!(new, old);
        assert_eq!(new.generation(), old.generation() + 1);
        assert!(world.is_alive(new));
        assert!(!world.is_alive(old));
        assert!(world.mask(old).is_empty());
        assert!(world.get_component::<Position>(old).is_none());
        assert!(world.get_component::<Rare>(old).is_none());
        assert!(world.remove_component::<Position>(old).is_none());
        assert!(!world.destroy_entity(old));
        assert_eq!(world.add_component(old, Rare(0)), Err(EcsError::DeadEntity(old)));

        assert_eq!(*world.component::<Position>(new), Position(7, 7));
        assert_eq!(world.entities().collect::<Vec<_>>(), vec![new]);
        assert_eq!(world.query(&Query::new().with::<Rare>()), vec![new]);
    }

    #[test]
    fn test_add_to_dead_entity_is_rejected() {
        let mut world = World::new();
        let e = world.create_entity();
        world.destroy_entity(e);
        assert_eq!(world.add_component(e, Position(0, 0)), Err(EcsError::DeadEntity(e)));
    }

    #[test]
    fn test_query_filters_by_mask() {
        let mut world = World::new();
        let moving = world.create_entity();
        world.add_component(moving, Position(0, 0)).unwrap();
        world.add_component(moving, Velocity(1, 1)).unwrap();

        let still = world.create_entity();
        world.add_component(still, Position(0, 0)).unwrap();

        let tagged = world.create_entity();
        world.add_component(tagged, Position(0, 0)).unwrap();
        world.add_component(tagged, Velocity(1, 1)).unwrap();
        world.add_component(tagged, Rare(0)).unwrap();

        let both = Query::new().with::<Position>().with::<Velocity>();
        assert_eq!(world.query(&both), vec![moving, tagged]);

        let untagged = both.without::<Rare>();
        assert_eq!(world.query(&untagged), vec![moving]);

        let all_positions = Query::new().with::<Position>();
        assert_eq!(world.query(&all_positions), vec![moving, still, tagged]);
    }

    #[test]
    fn test_query_snapshot_ignores_later_spawns() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Position(0, 0)).unwrap();

        let q = Query::new().with::<Position>();
        let snapshot = world.query(&q);
        let late = world.create_entity();
        world.add_component(late, Position(1, 1)).unwrap();

        assert_eq!(snapshot, vec![e]);
        assert_eq!(world.query(&q).len(), 2);
    }

    #[test]
    fn test_null_entity_is_never_issued() {
        let mut world = World::with_null_entity();
        let first = world.create_entity();
        assert_eq!(first.id(), 1);
        assert!(!world.is_alive(Entity::new(0, 0)));

        world.destroy_entity(first);
        let again = world.create_entity();
        assert_eq!(again.id(), 1);
        assert!(!world.is_alive(first));
        assert_eq!(world.entities().collect::<Vec<_>>(), vec![again]);
    }

    #[test]
    fn test_try_component_names_missing_type() {
        let mut world = World::new();
        let e = world.create_entity();
        world.register::<Velocity>().unwrap();
        let err = world.try_component::<Velocity>(e).unwrap_err();
        assert_eq!(
            err,
            EcsError::MissingComponent { entity: e, component: "Velocity" }
        );
    }

    #[test]
    #[should_panic(expected = "has no Velocity component")]
    fn test_component_panics_when_absent() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Position(0, 0)).unwrap();
        world.register::<Velocity>().unwrap();
        let _ = world.component::<Velocity>(e);
    }

    #[test]
    fn test_flush_commands_applies_queue() {
        let mut world = World::new();
        world.commands().spawn("pair", |world| {
            let e = world.create_entity();
            world.add_component(e, Position(3, 4))?;
            Ok(e)
        });
        assert_eq!(world.pending_commands(), 1);
        assert_eq!(world.entity_count(), 0);

        let report = world.flush_commands().unwrap();
        assert_eq!(report.spawned, 1);
        assert_eq!(world.entity_count(), 1);
        assert_eq!(world.pending_commands(), 0);
    }
}
