//! Entity-Component-System implementation
//!
//! Entities are bare ids. Each entity slot has a 64-bit [`Mask`] naming the
//! component types it owns, and each component type has its own storage.
//! Systems select entities with a [`Query`], which resolves to a required
//! mask and an excluded mask and performs a linear scan over the world.
//!
//! Structural changes requested while a scan is running go through the
//! [`CommandQueue`]; destruction is mark-then-sweep via
//! [`components::Dead`].

pub mod commands;
pub mod component;
pub mod components;
pub mod entity;
pub mod error;
pub mod mask;
pub mod query;
pub mod scheduler;
pub mod storage;
pub mod system;
pub mod systems;
pub mod world;

pub use commands::{Command, CommandQueue, FlushReport};
pub use component::{Component, ComponentRegistry, StorageKind};
pub use entity::Entity;
pub use error::{EcsError, ScheduleError};
pub use mask::{Mask, MAX_COMPONENT_TYPES};
pub use query::Query;
pub use scheduler::{FrameReport, Schedule, SystemScheduler};
pub use system::{System, SystemPhase};
pub use world::World;
