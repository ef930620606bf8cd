//! Component storage
//!
//! Each registered component type owns one [`Storage`]. Dense storage keeps a
//! slot per entity id and suits components that almost every entity carries.
//! Sparse storage keeps values in a slot map with an entity index on the
//! side, so rare components cost nothing for entities that lack them.
//!
//! Storage never decides whether an entity owns a component. The world's
//! mask table is authoritative and keeps storage in step with it.

use super::component::{Component, StorageKind};
use super::entity::Entity;
use slotmap::{DefaultKey, SlotMap};
use std::any::Any;
use std::collections::HashMap;

/// Type-erased view of a storage, used for whole-entity teardown
pub trait AnyStorage: Any + Send + Sync {
    /// Drop the value held for `entity`, if any
    fn remove_entity(&mut self, entity: Entity);

    /// Number of stored values
    fn len(&self) -> usize;

    /// True if no value is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Downcast support
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Vec indexed by entity id
#[derive(Debug)]
pub struct DenseStorage<T> {
    slots: Vec<Option<T>>,
    len: usize,
}

impl<T> Default for DenseStorage<T> {
    fn default() -> Self {
        Self { slots: Vec::new(), len: 0 }
    }
}

impl<T> DenseStorage<T> {
    fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        let index = entity.index();
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        let previous = self.slots[index].replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    fn get(&self, entity: Entity) -> Option<&T> {
        self.slots.get(entity.index()).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.slots.get_mut(entity.index()).and_then(Option::as_mut)
    }

    fn remove(&mut self, entity: Entity) -> Option<T> {
        let removed = self.slots.get_mut(entity.index()).and_then(Option::take);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }
}

/// Slot map with an entity index
#[derive(Debug)]
pub struct SparseStorage<T> {
    values: SlotMap<DefaultKey, T>,
    index: HashMap<Entity, DefaultKey>,
}

impl<T> Default for SparseStorage<T> {
    fn default() -> Self {
        Self {
            values: SlotMap::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> SparseStorage<T> {
    fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        if let Some(&key) = self.index.get(&entity) {
            if let Some(slot) = self.values.get_mut(key) {
                return Some(std::mem::replace(slot, value));
            }
        }
        let key = self.values.insert(value);
        self.index.insert(entity, key);
        None
    }

    fn get(&self, entity: Entity) -> Option<&T> {
        self.index.get(&entity).and_then(|&key| self.values.get(key))
    }

    fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let key = *self.index.get(&entity)?;
        self.values.get_mut(key)
    }

    fn remove(&mut self, entity: Entity) -> Option<T> {
        let key = self.index.remove(&entity)?;
        self.values.remove(key)
    }
}

/// Storage for one component type
#[derive(Debug)]
pub enum Storage<T> {
    /// Vec indexed by entity id
    Dense(DenseStorage<T>),
    /// Slot map keyed by entity
    Sparse(SparseStorage<T>),
}

impl<T: Component> Storage<T> {
    /// Create storage with the layout `T` asks for
    pub fn new() -> Self {
        match T::STORAGE {
            StorageKind::Dense => Self::Dense(DenseStorage::default()),
            StorageKind::Sparse => Self::Sparse(SparseStorage::default()),
        }
    }

    /// Store a value, returning the one it replaced
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        match self {
            Self::Dense(dense) => dense.insert(entity, value),
            Self::Sparse(sparse) => sparse.insert(entity, value),
        }
    }

    /// Borrow the value for `entity`
    pub fn get(&self, entity: Entity) -> Option<&T> {
        match self {
            Self::Dense(dense) => dense.get(entity),
            Self::Sparse(sparse) => sparse.get(entity),
        }
    }

    /// Mutably borrow the value for `entity`
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self {
            Self::Dense(dense) => dense.get_mut(entity),
            Self::Sparse(sparse) => sparse.get_mut(entity),
        }
    }

    /// Take the value for `entity` out of storage
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        match self {
            Self::Dense(dense) => dense.remove(entity),
            Self::Sparse(sparse) => sparse.remove(entity),
        }
    }

    /// Layout in use
    pub const fn kind(&self) -> StorageKind {
        match self {
            Self::Dense(_) => StorageKind::Dense,
            Self::Sparse(_) => StorageKind::Sparse,
        }
    }
}

impl<T: Component> Default for Storage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> AnyStorage for Storage<T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn len(&self) -> usize {
        match self {
            Self::Dense(dense) => dense.len,
            Self::Sparse(sparse) => sparse.values.len(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
