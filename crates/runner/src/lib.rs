//! # Runner
//!
//! A Sonic-style side-scroller prototype on the arcade ECS engine. Sonic
//! runs, jumps and rolls under gravity, collects rings and power-ups, and
//! trades hits with patrolling badniks. Rolling into a badnik defeats it;
//! touching one otherwise costs a hit point and grants a short stretch of
//! invincibility.
//!
//! ```rust
//! use runner::prelude::*;
//!
//! let mut level = Level::demo(RunnerConfig::default()).unwrap();
//! let right = Input { right_pressed: true, ..Input::default() };
//! for _ in 0..30 {
//!     level.step(right).unwrap();
//! }
//! assert!(level.rings() > 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod factories;
pub mod level;
pub mod systems;


/// Common imports for running a level
pub mod prelude {
    pub use crate::{
        components::{AnimationState, Input, IntentState, PowerupKind},
        config::RunnerConfig,
        context::RunnerContext,
        error::RunnerError,
        factories::RunnerFactory,
        level::Level,
    };
}
