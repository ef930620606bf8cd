//! System trait and execution phases

use super::error::EcsError;
use super::world::World;

/// System execution phases with explicit ordering
///
/// Deferred commands are applied once per frame, after the last
/// [`SystemPhase::PostUpdate`] system and before the first
/// [`SystemPhase::Render`] system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SystemPhase {
    /// Input processing, intents, spawn requests
    PreUpdate = 0,
    /// Movement, culling, collision detection
    Update = 1,
    /// Scoring and entity lifecycle sweeps
    PostUpdate = 2,
    /// Animation and draw command generation
    Render = 3,
}

/// System trait with dependency declaration
///
/// `C` is the simulation context the owning game threads through every
/// system. Generic engine systems implement `System<C>` for any `C`.
pub trait System<C> {
    /// Unique system name, used for ordering constraints and diagnostics
    fn name(&self) -> &'static str;

    /// Which phase this system belongs to
    fn phase(&self) -> SystemPhase {
        SystemPhase::Update
    }

    /// Names of systems that must execute before this one
    fn dependencies(&self) -> &[&'static str] {
        &[]
    }

    /// Execute the system once
    fn run(&mut self, world: &mut World, context: &mut C) -> Result<(), EcsError>;
}
