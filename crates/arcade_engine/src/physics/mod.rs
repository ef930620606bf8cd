//! Physics module for collision detection
//!
//! Boxes and layer filtering. Pair scanning and response dispatch live in
//! [`crate::ecs::systems::collision_system`].

pub mod aabb;
pub mod collision_layers;

pub use aabb::Aabb;
pub use collision_layers::{CollisionLayers, LayerFilter};
