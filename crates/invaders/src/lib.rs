//! # Invaders
//!
//! Space Invaders on the arcade ECS engine. The crate is headless: input
//! arrives through an [`InputSource`](input::InputSource) and each frame's
//! sprites leave through a [`RenderSink`](render::RenderSink).
//!
//! ```rust
//! use invaders::prelude::*;
//!
//! let mut config = GameConfig::default();
//! config.seed = Some(1);
//! let mut game = Game::new(config).unwrap();
//! let status = game.step(Buttons::FIRE).unwrap();
//! assert_eq!(status, GameStatus::Playing);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod factories;
pub mod game;
pub mod input;
pub mod render;
pub mod systems;

#[cfg(test)]
mod tests;

/// Common imports for running a game
pub mod prelude {
    pub use crate::{
        config::GameConfig,
        context::{MarchDirection, SimulationContext},
        error::GameError,
        factories::EntityFactory,
        game::{Game, GameStatus},
        input::{Buttons, IdleInput, InputSource, ScriptedInput},
        render::{frame_commands, DrawCommand, DrawKind, LogSink, RecordingSink, RenderSink},
    };
}
