//! Shared run state

/// Counters the runner systems update
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunnerContext {
    /// Rings picked up this run
    pub rings_collected: u32,
    /// Power-ups picked up this run
    pub powerups_collected: u32,
    /// Enemies destroyed
    pub enemies_defeated: u32,
    /// Hits the player took
    pub hits_taken: u32,
}
