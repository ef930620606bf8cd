//! Runner configuration

use arcade_engine::config::Config;
use serde::{Deserialize, Serialize};

/// Runner configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunnerConfig {
    /// Level bounds
    pub level: LevelConfig,
    /// Player character
    pub player: PlayerConfig,
    /// Gravity
    pub physics: PhysicsConfig,
    /// Badniks
    pub enemy: EnemyConfig,
    /// Sizes of rings, obstacles, platforms and spikes
    pub props: PropConfig,
    /// Power-up durations
    pub powerups: PowerupConfig,
}

impl Config for RunnerConfig {}

/// Level configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Level width
    pub width: f32,
    /// Level height
    pub height: f32,
    /// Top of the ground
    pub ground_y: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            ground_y: 560.0,
        }
    }
}

/// Player configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Running speed per frame
    pub run_speed: f32,
    /// Initial upward speed of a jump
    pub jump_speed: f32,
    /// Starting hit points
    pub start_hp: i32,
    /// Invulnerable frames after taking a hit
    pub mercy_frames: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 48.0,
            height: 48.0,
            run_speed: 4.0,
            jump_speed: 12.0,
            start_hp: 3,
            mercy_frames: 60,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Terminal falling speed
    pub max_fall_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            max_fall_speed: 12.0,
        }
    }
}

/// Enemy configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Hit points
    pub hp: i32,
    /// Walking speed
    pub patrol_speed: f32,
    /// Half-width of the patrol range
    pub patrol_range: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 32.0,
            height: 32.0,
            hp: 1,
            patrol_speed: 1.0,
            patrol_range: 100.0,
        }
    }
}

/// Prop sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropConfig {
    /// Ring and power-up box size
    pub pickup_size: f32,
    /// Obstacle block size
    pub obstacle_size: f32,
    /// Platform width
    pub platform_width: f32,
    /// Platform height
    pub platform_height: f32,
    /// Spike strip width
    pub spikes_width: f32,
    /// Spike strip height
    pub spikes_height: f32,
}

impl Default for PropConfig {
    fn default() -> Self {
        Self {
            pickup_size: 32.0,
            obstacle_size: 32.0,
            platform_width: 120.0,
            platform_height: 16.0,
            spikes_width: 32.0,
            spikes_height: 16.0,
        }
    }
}

/// Power-up configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupConfig {
    /// Invincibility length in frames
    pub invincibility_frames: u32,
    /// Speed boost length in frames
    pub speed_boost_frames: u32,
    /// Running speed multiplier while boosted
    pub speed_boost_factor: f32,
}

impl Default for PowerupConfig {
    fn default() -> Self {
        Self {
            invincibility_frames: 600,
            speed_boost_frames: 600,
            speed_boost_factor: 2.0,
        }
    }
}
