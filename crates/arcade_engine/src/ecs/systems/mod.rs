//! ECS Systems module
//!
//! Game-agnostic systems. Each implements [`System<C>`](crate::ecs::System)
//! for any context type.

pub mod bounds_system;
pub mod collision_system;
pub mod lifetime_system;
pub mod movement_system;

pub use bounds_system::BoundsCullSystem;
pub use collision_system::{
    find_overlapping_pairs, CollisionRule, CollisionRules, CollisionStats, CollisionSystem, LayerMap,
    ResolveFn,
};
pub use lifetime_system::LifetimeSystem;
pub use movement_system::MovementSystem;
