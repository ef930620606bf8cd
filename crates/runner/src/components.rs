//! Side-scroller components
//!
//! Position, velocity, collider, health and the collision record come from
//! the engine. Tags here are zero-sized and dense; state that only a few
//! entities carry is sparse.

use arcade_engine::ecs::{Component, StorageKind};

macro_rules! tag {
    ($(#[$meta:meta])* $name:ident, sparse) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl Component for $name {
            const STORAGE: StorageKind = StorageKind::Sparse;
        }
    };
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl Component for $name {}
    };
}

tag!(
    /// The player character
    PlayerTag
);
tag!(
    /// A badnik
    EnemyTag
);
tag!(
    /// Picks up collectables on contact
    CollectorTag
);
tag!(
    /// Can be picked up
    CollectableTag
);
tag!(
    /// A ring
    RingTag
);
tag!(
    /// Solid level geometry
    ObstacleTag
);
tag!(
    /// Hurts the player on contact
    DamageTag
);
tag!(
    /// Falls under gravity and stands on the ground
    GravityTag
);
tag!(
    /// Acts on its [`Intent`]
    MovementAbility
);
tag!(
    /// Airborne after a jump
    JumpingTag,
    sparse
);
tag!(
    /// Curled into a ball; defeats enemies on contact
    RollingTag,
    sparse
);

/// Rings held by a collector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RingCount {
    /// Rings
    pub count: u32,
}

impl Component for RingCount {
    const STORAGE: StorageKind = StorageKind::Sparse;
}

/// Buttons held this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Input {
    /// Run left
    pub left_pressed: bool,
    /// Run right
    pub right_pressed: bool,
    /// Jump
    pub jump_pressed: bool,
    /// Curl into a roll
    pub roll_pressed: bool,
}

impl Component for Input {
    const STORAGE: StorageKind = StorageKind::Sparse;
}

/// What an entity wants to do this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntentState {
    /// Nothing
    #[default]
    None,
    /// Run left
    MoveLeft,
    /// Run right
    MoveRight,
    /// Jump if standing
    Jump,
    /// Curl into a roll
    Roll,
}

/// Current intent, written by the intent system or by AI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intent {
    /// Intended action
    pub current: IntentState,
}

impl Component for Intent {
    const STORAGE: StorageKind = StorageKind::Sparse;
}

/// Animation being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Standing still
    #[default]
    Idle,
    /// Running
    Running,
    /// Running with a speed boost
    SuperRunning,
    /// In the air
    Jumping,
    /// Rolling
    Rolling,
}

/// Animation state of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Animation {
    /// State being played
    pub state: AnimationState,
}

impl Component for Animation {}

/// Kinds of timed power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerupKind {
    /// No effect
    #[default]
    None,
    /// Ignore damage
    Invincibility,
    /// Faster running
    SpeedBoost,
}

/// Power-up currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemporaryPowerup {
    /// Active effect
    pub kind: PowerupKind,
    /// Frames left
    pub remaining_frames: u32,
}

impl TemporaryPowerup {
    /// An effect lasting `frames`
    pub const fn new(kind: PowerupKind, frames: u32) -> Self {
        Self {
            kind,
            remaining_frames: frames,
        }
    }

    /// True while `kind` is in effect
    pub fn is(&self, kind: PowerupKind) -> bool {
        self.kind == kind && self.remaining_frames > 0
    }
}

impl Component for TemporaryPowerup {
    const STORAGE: StorageKind = StorageKind::Sparse;
}

/// Power-up granted to whoever collects this entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerupGrant {
    /// Effect granted
    pub kind: PowerupKind,
}

impl Component for PowerupGrant {
    const STORAGE: StorageKind = StorageKind::Sparse;
}

/// Walks back and forth between two x positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patrol {
    /// Turn around left of this x
    pub left: f32,
    /// Turn around right of this x
    pub right: f32,
    /// Walking speed
    pub speed: f32,
    /// Currently heading right
    pub moving_right: bool,
}

impl Component for Patrol {
    const STORAGE: StorageKind = StorageKind::Sparse;
}
