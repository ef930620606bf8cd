//! Position and velocity components
//!
//! Positions are screen coordinates with the origin at the top-left corner
//! and y growing downwards. Velocities are applied once per frame, so their
//! unit is pixels per frame.

use crate::ecs::Component;

/// Top-left corner of an entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Position {
    /// Create a new position
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position shifted by a velocity step
    #[must_use]
    pub fn stepped(self, velocity: Velocity) -> Self {
        Self::new(self.x + velocity.x, self.y + velocity.y)
    }
}

impl Component for Position {}

/// Per-frame displacement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    /// Horizontal displacement per frame
    pub x: f32,
    /// Vertical displacement per frame
    pub y: f32,
}

impl Velocity {
    /// Create a new velocity
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// No motion
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// True if both axes are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Component for Velocity {}
