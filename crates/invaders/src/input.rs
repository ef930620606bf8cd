//! Player input sources
//!
//! The simulation only ever sees a [`Buttons`] sample per frame. Where the
//! sample comes from (a keyboard, a recorded script, nothing at all) is the
//! [`InputSource`]'s business.

use bitflags::bitflags;
use std::ops::Range;

bitflags! {
    /// Buttons held during a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        /// Move left
        const LEFT = 1 << 0;
        /// Move right
        const RIGHT = 1 << 1;
        /// Fire
        const FIRE = 1 << 2;
    }
}

/// Produces one button sample per frame
pub trait InputSource {
    /// Buttons held during `frame`
    fn sample(&mut self, frame: u64) -> Buttons;
}

/// Never presses anything
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn sample(&mut self, _frame: u64) -> Buttons {
        Buttons::empty()
    }
}

/// Replays a fixed script of button presses
///
/// Each step holds its buttons for a range of frames; overlapping steps
/// combine. With a period set the script loops.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: Vec<(Range<u64>, Buttons)>,
    period: Option<u64>,
}

impl ScriptedInput {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `buttons` for every frame in `frames`
    #[must_use]
    pub fn hold(mut self, frames: Range<u64>, buttons: Buttons) -> Self {
        self.steps.push((frames, buttons));
        self
    }

    /// Restart the script every `period` frames
    #[must_use]
    pub fn looping(mut self, period: u64) -> Self {
        self.period = (period > 0).then_some(period);
        self
    }

    /// Sweeps left and right while tapping fire
    pub fn demo() -> Self {
        let mut script = Self::new()
            .hold(0..90, Buttons::LEFT)
            .hold(90..270, Buttons::RIGHT)
            .hold(270..360, Buttons::LEFT);
        for tap in (0..360).step_by(24) {
            script = script.hold(tap..tap + 4, Buttons::FIRE);
        }
        script.looping(360)
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self, frame: u64) -> Buttons {
        let frame = self.period.map_or(frame, |period| frame % period);
        self.steps
            .iter()
            .filter(|(frames, _)| frames.contains(&frame))
            .fold(Buttons::empty(), |held, (_, buttons)| held | *buttons)
    }
}
