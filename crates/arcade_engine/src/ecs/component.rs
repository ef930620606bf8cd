//! Component trait and type registry

use super::error::EcsError;
use super::mask::{Mask, MAX_COMPONENT_TYPES};
use std::any::TypeId;
use std::collections::HashMap;

/// How a component type is laid out in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    /// One slot per entity id, for components most entities carry
    #[default]
    Dense,
    /// Slot map keyed by entity, for components few entities carry
    Sparse,
}

/// Marker trait for components
///
/// Components are plain data. The associated [`StorageKind`] picks the
/// storage layout the world uses for the type.
pub trait Component: 'static + Send + Sync {
    /// Storage layout for this component type
    const STORAGE: StorageKind = StorageKind::Dense;
}

/// Registered metadata for one component type
#[derive(Debug, Clone, Copy)]
pub struct ComponentInfo {
    /// Bit index in entity masks
    pub bit: u8,
    /// Type name used in diagnostics
    pub name: &'static str,
    /// Storage layout
    pub storage: StorageKind,
}

/// Maps component types to mask bits
///
/// Bits are handed out in registration order. A world holds at most
/// [`MAX_COMPONENT_TYPES`] distinct component types.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    bits: HashMap<TypeId, u8>,
    infos: Vec<ComponentInfo>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T`, returning its bit. Registering twice returns the same bit.
    pub fn register<T: Component>(&mut self) -> Result<u8, EcsError> {
        if let Some(&bit) = self.bits.get(&TypeId::of::<T>()) {
            return Ok(bit);
        }
        if self.infos.len() >= MAX_COMPONENT_TYPES {
            return Err(EcsError::TooManyComponentTypes {
                component: std::any::type_name::<T>(),
                limit: MAX_COMPONENT_TYPES,
            });
        }
        let bit = u8::try_from(self.infos.len()).map_err(|_| EcsError::TooManyComponentTypes {
            component: std::any::type_name::<T>(),
            limit: MAX_COMPONENT_TYPES,
        })?;
        self.bits.insert(TypeId::of::<T>(), bit);
        self.infos.push(ComponentInfo {
            bit,
            name: std::any::type_name::<T>(),
            storage: T::STORAGE,
        });
        log::trace!("Registered component {} as bit {}", std::any::type_name::<T>(), bit);
        Ok(bit)
    }

    /// Bit of `T`, if registered
    pub fn bit_of<T: Component>(&self) -> Option<u8> {
        self.bit_of_type(TypeId::of::<T>())
    }

    /// Bit of a type id, if registered
    pub fn bit_of_type(&self, type_id: TypeId) -> Option<u8> {
        self.bits.get(&type_id).copied()
    }

    /// Single-bit mask of `T`, if registered
    pub fn mask_of<T: Component>(&self) -> Option<Mask> {
        self.bit_of::<T>().map(Mask::bit)
    }

    /// Metadata for a bit
    pub fn info(&self, bit: u8) -> Option<&ComponentInfo> {
        self.infos.get(usize::from(bit))
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// True if nothing has been registered yet
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Human-readable names of every component present in `mask`
    pub fn describe(&self, mask: Mask) -> Vec<&'static str> {
        mask.iter_bits()
            .filter_map(|bit| self.info(bit).map(|info| short_name(info.name)))
            .collect()
    }
}

/// Strip the module path from a type name
pub(crate) fn short_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}
