//! Collision layer system for filtering collision responses
//!
//! Every collidable entity belongs to a set of layers derived from its tag
//! components. Response rules select pairs by layer filters instead of
//! hard-coded tag checks, so a projectile fired by the player is simply an
//! entity on `PROJECTILE | PLAYER`.

use bitflags::bitflags;

bitflags! {
    /// Collision layer membership
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CollisionLayers: u32 {
        /// Player character or anything the player owns
        const PLAYER = 1 << 0;
        /// Enemy character or anything an enemy owns
        const ENEMY = 1 << 1;
        /// Projectiles (bullets, missiles, etc.)
        const PROJECTILE = 1 << 2;
        /// Static environment geometry, shields, platforms
        const ENVIRONMENT = 1 << 3;
        /// Pickups and collectibles
        const PICKUP = 1 << 4;
        /// Entities that can pick things up
        const COLLECTOR = 1 << 5;
        /// Contact hurts whatever touches it
        const HAZARD = 1 << 6;
    }
}

/// Selects entities by layer membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerFilter {
    /// Layers the entity must belong to
    pub all: CollisionLayers,
    /// Layers the entity must not belong to
    pub none: CollisionLayers,
}

impl LayerFilter {
    /// Match entities on every layer in `all`
    pub const fn all(layers: CollisionLayers) -> Self {
        Self {
            all: layers,
            none: CollisionLayers::empty(),
        }
    }

    /// Additionally reject entities on any layer in `layers`
    #[must_use]
    pub const fn excluding(mut self, layers: CollisionLayers) -> Self {
        self.none = self.none.union(layers);
        self
    }

    /// Test a layer set
    pub fn matches(&self, layers: CollisionLayers) -> bool {
        !layers.is_empty() && layers.contains(self.all) && !layers.intersects(self.none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_separates_owner_of_projectile() {
        let player_shot = LayerFilter::all(CollisionLayers::PROJECTILE | CollisionLayers::PLAYER);
        let enemy_body = LayerFilter::all(CollisionLayers::ENEMY).excluding(CollisionLayers::PROJECTILE);

        let shot = CollisionLayers::PROJECTILE | CollisionLayers::PLAYER;
        let enemy_shot = CollisionLayers::PROJECTILE | CollisionLayers::ENEMY;

        assert!(player_shot.matches(shot));
        assert!(!player_shot.matches(enemy_shot));
        assert!(enemy_body.matches(CollisionLayers::ENEMY));
        assert!(!enemy_body.matches(enemy_shot));
    }

    #[test]
    fn test_empty_layers_never_match() {
        assert!(!LayerFilter::default().matches(CollisionLayers::empty()));
        assert!(LayerFilter::default().matches(CollisionLayers::HAZARD));
    }
}
