//! Foundation module - Core utilities and types
//!
//! - Frame timing and frame-counting timers
//! - Seedable randomness
//! - Logging setup

pub mod logging;
pub mod random;
pub mod time;
