//! Game-specific components
//!
//! Engine components (position, velocity, collider, health, dead) come from
//! `arcade_engine`. Everything here is Space Invaders vocabulary: tags that
//! classify entities, per-frame intents, and presentation data.

use arcade_engine::ecs::{Component, StorageKind};

macro_rules! tag {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl Component for $name {}
    };
}

tag!(
    /// The player's ship
    PlayerTag
);
tag!(
    /// An invader
    EnemyTag
);
tag!(
    /// Any bullet
    ProjectileTag
);
tag!(
    /// Bullet fired by the player
    PlayerProjectileTag
);
tag!(
    /// Bullet fired by an invader
    EnemyProjectileTag
);
tag!(
    /// Destructible shield
    WallTag
);
tag!(
    /// Short-lived explosion effect
    ExplosionTag
);

/// Points awarded when the entity dies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreValue {
    /// Points
    pub value: u32,
}

impl Component for ScoreValue {
    const STORAGE: StorageKind = StorageKind::Sparse;
}

/// Button state sampled this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Input {
    /// Move left held
    pub left_pressed: bool,
    /// Move right held
    pub right_pressed: bool,
    /// Fire held
    pub fire_pressed: bool,
}

impl Component for Input {
    const STORAGE: StorageKind = StorageKind::Sparse;
}

/// One-frame intent to fire
///
/// Set by intent systems, consumed and cleared by the shooting systems in
/// the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shoots {
    /// Fire this frame
    pub value: bool,
}

impl Component for Shoots {}

/// Whether fire was already held last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FireLatch {
    /// Fire was held on the previous frame
    pub held: bool,
}

impl Component for FireLatch {
    const STORAGE: StorageKind = StorageKind::Sparse;
}

/// What to draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderData {
    /// Sprite or colour slot
    pub sprite_id: u32,
    /// Draw width
    pub width: f32,
    /// Draw height
    pub height: f32,
}

impl RenderData {
    /// Create render data
    pub const fn new(sprite_id: u32, width: f32, height: f32) -> Self {
        Self { sprite_id, width, height }
    }
}

impl Component for RenderData {}

/// Animation frame of an invader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostureChanger {
    /// Current posture frame
    pub posture_id: u32,
}

impl Component for PostureChanger {}

/// Slot of an invader in the formation grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnemyPath {
    /// Grid row, 0 at the top
    pub row: u32,
    /// Grid column, 0 at the left
    pub col: u32,
}

impl Component for EnemyPath {}
