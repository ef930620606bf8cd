//! Game configuration
//!
//! Every field has a default, and a config file only needs to name the
//! values it changes.

use arcade_engine::config::Config;
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield settings
    pub window: WindowConfig,
    /// Player ship settings
    pub player: PlayerConfig,
    /// Invader grid settings
    pub formation: FormationConfig,
    /// Difficulty ramp settings
    pub difficulty: DifficultyConfig,
    /// Bullet settings
    pub projectiles: ProjectileConfig,
    /// Shield settings
    pub walls: WallConfig,
    /// Frame timing settings
    pub timing: TimingConfig,
    /// Fixed seed for replayable runs
    pub seed: Option<u64>,
}

impl Config for GameConfig {}

/// Playfield configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Playfield width
    pub width: f32,
    /// Playfield height
    pub height: f32,
    /// Distance from the side edges the formation must keep
    pub margin: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 10.0,
        }
    }
}

/// Player configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Ship width
    pub width: f32,
    /// Ship height
    pub height: f32,
    /// Horizontal speed in pixels per frame
    pub speed: f32,
    /// Starting hit points
    pub start_hp: i32,
    /// Distance of the ship's top edge from the bottom of the playfield
    pub bottom_offset: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 20.0,
            speed: 6.0,
            start_hp: 3,
            bottom_offset: 60.0,
        }
    }
}

/// Invader formation configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    /// Grid rows
    pub rows: u32,
    /// Grid columns
    pub cols: u32,
    /// Left edge of the first column
    pub start_x: f32,
    /// Top edge of the first row
    pub start_y: f32,
    /// Horizontal gap between invaders
    pub gap_x: f32,
    /// Vertical gap between invaders
    pub gap_y: f32,
    /// Invader width
    pub invader_width: f32,
    /// Invader height
    pub invader_height: f32,
    /// Hit points per invader
    pub invader_hp: i32,
    /// Points per invader
    pub score_per_invader: u32,
    /// Horizontal distance per march tick
    pub move_step: f32,
    /// Vertical distance when the formation turns around
    pub drop_step: f32,
    /// Distinct invader sprites
    pub sprite_variants: u32,
    /// Animation frames per invader sprite
    pub postures_per_type: u32,
    /// Frames between animation frame changes
    pub posture_interval: u32,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 5,
            start_x: 100.0,
            start_y: 60.0,
            gap_x: 30.0,
            gap_y: 20.0,
            invader_width: 40.0,
            invader_height: 30.0,
            invader_hp: 1,
            score_per_invader: 10,
            move_step: 20.0,
            drop_step: 40.0,
            sprite_variants: 5,
            postures_per_type: 2,
            posture_interval: 30,
        }
    }
}

/// Difficulty configuration
///
/// Each invader death shortens the march interval and the shooting odds by
/// one step, never below the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    /// Frames between march ticks at the start
    pub move_interval: u32,
    /// Fastest march
    pub min_move_interval: u32,
    /// March speed-up per kill
    pub move_interval_step: u32,
    /// Each invader fires with probability 1/N per frame
    pub shoot_odds: u32,
    /// Most aggressive odds
    pub min_shoot_odds: u32,
    /// Odds reduction per kill
    pub shoot_odds_step: u32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            move_interval: 30,
            min_move_interval: 5,
            move_interval_step: 1,
            shoot_odds: 1000,
            min_shoot_odds: 200,
            shoot_odds_step: 50,
        }
    }
}

/// Projectile configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Bullet width
    pub width: f32,
    /// Bullet height
    pub height: f32,
    /// Player bullet speed, upwards
    pub player_speed: f32,
    /// Invader bullet speed, downwards
    pub enemy_speed: f32,
    /// At most one player bullet alive at a time
    pub single_player_projectile: bool,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            width: 6.0,
            height: 16.0,
            player_speed: 8.0,
            enemy_speed: 4.0,
            single_player_projectile: true,
        }
    }
}

/// Shield configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Number of shields, spread evenly across the playfield
    pub count: u32,
    /// Top edge of the shields
    pub y: f32,
    /// Shield width
    pub width: f32,
    /// Shield height
    pub height: f32,
    /// Hits a shield absorbs
    pub hp: i32,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            count: 4,
            y: 450.0,
            width: 80.0,
            height: 20.0,
            hp: 4,
        }
    }
}

/// Frame timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Frame length in milliseconds
    pub frame_ms: u64,
    /// Time the game keeps animating after it ends
    pub game_over_delay_ms: u64,
    /// Frames an explosion stays on screen
    pub explosion_frames: u32,
    /// Stop the headless runner after this many frames
    pub max_frames: u64,
    /// Sleep between frames; off for fast headless runs
    pub realtime: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            game_over_delay_ms: 1300,
            explosion_frames: 12,
            max_frames: 3600,
            realtime: true,
        }
    }
}
