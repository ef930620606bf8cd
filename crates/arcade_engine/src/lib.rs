//! # Arcade Engine
//!
//! A small entity-component-system core for fixed-step 2D arcade games.
//!
//! ## Features
//!
//! - **Bitmask ECS**: entity ids, 64-bit component masks, dense or sparse storage per type
//! - **Deterministic schedule**: phase-ordered systems with validated dependencies
//! - **Deferred commands**: spawns requested mid-frame land at one sync point
//! - **Collision rules**: AABB pair scan with layer-filtered response table
//! - **Configuration**: TOML/RON config files via serde
//!
//! ## Quick Start
//!
//! ```rust
//! use arcade_engine::prelude::*;
//!
//! let mut world = World::new();
//! let ship = world.create_entity();
//! world.add_component(ship, Position::new(0.0, 0.0)).unwrap();
//! world.add_component(ship, Velocity::new(3.0, -2.0)).unwrap();
//!
//! let mut schedule = SystemScheduler::<()>::new()
//!     .with_system(MovementSystem::new())
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! schedule.execute_frame(&mut world, &mut ()).unwrap();
//!
//! assert_eq!(*world.component::<Position>(ship), Position::new(3.0, -2.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        ecs::{
            components::{apply_damage, is_dead, mark_dead, Collider, CollisionInfo, Dead, Health, Lifetime, Position, Velocity},
            systems::{BoundsCullSystem, CollisionRule, CollisionRules, CollisionSystem, LayerMap, LifetimeSystem, MovementSystem},
            Component, EcsError, Entity, Query, Schedule, ScheduleError, StorageKind, System, SystemPhase,
            SystemScheduler, World,
        },
        foundation::{
            random::Dice,
            time::{Cadence, FramePacer},
        },
        physics::{Aabb, CollisionLayers, LayerFilter},
    };
}
