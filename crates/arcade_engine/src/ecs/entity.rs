//! Entity implementation

use std::fmt;

/// Entity identifier
///
/// An entity carries no data of its own. It is an index into the world's
/// mask table and into every component storage, plus the generation of that
/// slot when the handle was issued. Destroying an entity bumps the slot's
/// generation, so handles kept across a recycle stop resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: u32,
    generation: u32,
}

impl Entity {
    /// Create a handle for slot `id` at `generation`
    pub(crate) const fn new(id: u32, generation: u32) -> Self {
        Self { id, generation }
    }

    /// Get the entity ID
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Generation of the slot this handle was issued for
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Slot index of this entity in per-entity tables
    pub(crate) const fn index(self) -> usize {
        self.id as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "#{}", self.id)
        } else {
            write!(f, "#{}v{}", self.id, self.generation)
        }
    }
}
