//! Collision components
//!
//! A [`Collider`] is an axis-aligned box anchored at the entity's
//! [`Position`](super::Position), which is its top-left corner.

use crate::ecs::{Component, Entity, StorageKind};
use crate::physics::Aabb;

/// Axis-aligned bounding box size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Collider {
    /// Box width
    pub width: f32,
    /// Box height
    pub height: f32,
}

impl Collider {
    /// Create a new collider
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// World-space box for a collider anchored at `position`
    pub fn bounds_at(&self, position: super::Position) -> Aabb {
        Aabb::new(position.x, position.y, self.width, self.height)
    }
}

impl Component for Collider {}

/// Most recent collision partner
///
/// Reset at the start of every collision pass. `None` means the entity
/// touched nothing this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionInfo {
    /// Last entity this one overlapped
    pub collided_entity: Option<Entity>,
    /// Number of overlaps recorded this pass
    pub contacts: u32,
}

impl CollisionInfo {
    /// Forget the previous pass
    pub fn reset(&mut self) {
        self.collided_entity = None;
        self.contacts = 0;
    }

    /// Record an overlap with `other`
    pub fn record(&mut self, other: Entity) {
        self.collided_entity = Some(other);
        self.contacts += 1;
    }
}

impl Component for CollisionInfo {
    const STORAGE: StorageKind = StorageKind::Sparse;
}
