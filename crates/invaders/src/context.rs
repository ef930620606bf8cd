//! Simulation context
//!
//! Global game state that systems share: the formation's march direction and
//! cadence, the difficulty ramp, the running score and the dice. The game
//! owns one context and threads it through every system each frame.

use crate::config::{DifficultyConfig, GameConfig};
use arcade_engine::foundation::random::Dice;
use arcade_engine::foundation::time::Cadence;

/// Horizontal march direction of the formation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarchDirection {
    /// Towards x = 0
    Left,
    /// Towards the right edge
    Right,
}

impl MarchDirection {
    /// Sign of the horizontal step
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Opposite direction
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Shared mutable game state
#[derive(Debug, Clone)]
pub struct SimulationContext {
    /// Current march direction
    pub direction: MarchDirection,
    /// Frames until the next march tick
    pub march: Cadence,
    /// Current per-invader shooting odds (1 in N per frame)
    pub shoot_odds: u32,
    /// Running score
    pub score: u64,
    /// Invaders destroyed so far
    pub kills: u32,
    /// Gameplay randomness
    pub dice: Dice,
    difficulty: DifficultyConfig,
}

impl SimulationContext {
    /// Starting state for a configuration
    pub fn new(config: &GameConfig) -> Self {
        Self {
            direction: MarchDirection::Right,
            march: Cadence::new(config.difficulty.move_interval),
            shoot_odds: config.difficulty.shoot_odds,
            score: 0,
            kills: 0,
            dice: Dice::new(config.seed),
            difficulty: config.difficulty,
        }
    }

    /// Frames between march ticks
    pub const fn move_interval(&self) -> u32 {
        self.march.interval()
    }

    /// Speed the game up after an invader dies
    pub fn ramp_difficulty(&mut self) {
        self.kills += 1;
        let interval = self
            .move_interval()
            .saturating_sub(self.difficulty.move_interval_step)
            .max(self.difficulty.min_move_interval);
        self.march.set_interval(interval);
        self.shoot_odds = self
            .shoot_odds
            .saturating_sub(self.difficulty.shoot_odds_step)
            .max(self.difficulty.min_shoot_odds);
        log::info!(
            "Difficulty ramp after {} kills: march every {} frames, shoot odds 1/{}",
            self.kills,
            interval,
            self.shoot_odds
        );
    }
}
