//! ECS Components module
//!
//! Engine-level components shared by every game built on the engine.
//! Game-specific tags and data live in the game crates.

pub mod collision;
pub mod lifecycle;
pub mod lifetime;
pub mod movement;

pub use collision::{Collider, CollisionInfo};
pub use lifecycle::{apply_damage, is_dead, mark_dead, Dead, Health};
pub use lifetime::Lifetime;
pub use movement::{Position, Velocity};
