//! Game error type

use arcade_engine::config::ConfigError;
use arcade_engine::ecs::{EcsError, ScheduleError};
use thiserror::Error;

/// Errors that stop the game
#[derive(Debug, Error)]
pub enum GameError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The system pipeline is mis-ordered
    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// A world operation failed
    #[error("world error: {0}")]
    Ecs(#[from] EcsError),
}
