//! Lifetime Component
//!
//! Counts down whole frames for short-lived entities such as explosions.

use crate::ecs::{Component, StorageKind};

/// Frames left before the entity expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetime {
    /// Frames remaining; the entity expires when this reaches zero
    pub remaining_frames: u32,
}

impl Lifetime {
    /// Create a lifetime of `frames` frames
    pub const fn frames(frames: u32) -> Self {
        Self { remaining_frames: frames }
    }

    /// Consume one frame; true once the lifetime is used up
    pub fn tick(&mut self) -> bool {
        self.remaining_frames = self.remaining_frames.saturating_sub(1);
        self.is_expired()
    }

    /// Check if this entity's lifetime has expired
    pub const fn is_expired(&self) -> bool {
        self.remaining_frames == 0
    }
}

impl Component for Lifetime {
    const STORAGE: StorageKind = StorageKind::Sparse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetime_expires_after_frames() {
        let mut lifetime = Lifetime::frames(2);
        assert!(!lifetime.tick());
        assert!(lifetime.tick());
        assert!(lifetime.tick());
        assert_eq!(lifetime.remaining_frames, 0);
    }

    #[test]
    fn test_zero_lifetime_is_expired() {
        assert!(Lifetime::frames(0).is_expired());
    }
}
