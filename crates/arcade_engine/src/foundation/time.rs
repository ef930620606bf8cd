//! Frame timing utilities
//!
//! The simulation advances in fixed steps. [`FramePacer`] keeps a loop at the
//! target frame length and [`Cadence`] counts frames so systems can act every
//! N-th frame without consulting the clock.

use std::time::{Duration, Instant};

/// Default frame length, roughly 60 frames per second
pub const DEFAULT_FRAME_TIME: Duration = Duration::from_millis(16);

/// Fixed-step frame pacer
#[derive(Debug)]
pub struct FramePacer {
    frame_time: Duration,
    frame_start: Instant,
    frame_count: u64,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_TIME)
    }
}

impl FramePacer {
    /// Create a pacer for the given frame length
    pub fn new(frame_time: Duration) -> Self {
        Self {
            frame_time,
            frame_start: Instant::now(),
            frame_count: 0,
        }
    }

    /// Target frame length
    pub const fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Number of completed frames
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time still left in the current frame
    pub fn remaining(&self) -> Duration {
        self.frame_time.saturating_sub(self.frame_start.elapsed())
    }

    /// Finish the current frame, sleeping off whatever time is left
    ///
    /// Returns how long the frame's work took.
    pub fn end_frame(&mut self) -> Duration {
        let busy = self.frame_start.elapsed();
        if busy < self.frame_time {
            std::thread::sleep(self.frame_time - busy);
        } else if busy > self.frame_time * 2 {
            log::debug!("Frame {} overran: {:?}", self.frame_count, busy);
        }
        self.frame_start = Instant::now();
        self.frame_count += 1;
        busy
    }

    /// Number of whole frames covering `millis` milliseconds
    pub fn frames_for_millis(&self, millis: u64) -> u64 {
        let frame_millis = self.frame_time.as_millis().max(1);
        let frames = u128::from(millis).div_ceil(frame_millis);
        u64::try_from(frames).unwrap_or(u64::MAX)
    }
}

/// Frame-counting software timer
///
/// Fires on every `interval`-th call to [`Cadence::tick`]. The interval can
/// be changed while running; the counter keeps its value, so a shorter
/// interval takes effect on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    interval: u32,
    counter: u32,
}

impl Cadence {
    /// Create a timer firing every `interval` frames (minimum 1)
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            counter: 0,
        }
    }

    /// Advance one frame; true when the timer fires
    pub fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.interval {
            self.counter = 0;
            true
        } else {
            false
        }
    }

    /// Current interval in frames
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Change the interval (minimum 1)
    pub fn set_interval(&mut self, interval: u32) {
        self.interval = interval.max(1);
    }

    /// Frames counted since the last firing
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Restart counting from zero
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
