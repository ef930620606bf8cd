//! Score accounting

use crate::components::ScoreValue;
use crate::context::SimulationContext;
use arcade_engine::ecs::components::Dead;
use arcade_engine::ecs::systems::CollisionSystem;
use arcade_engine::ecs::{EcsError, Query, System, SystemPhase, World};

/// Adds the [`ScoreValue`] of every dead entity to the running score
///
/// The value is removed once counted, so an entity scores exactly once even
/// if it lingers.
#[derive(Debug, Default)]
pub struct ScoreSystem;

impl ScoreSystem {
    /// System name in schedules
    pub const NAME: &'static str = "score";

    /// Create the system
    pub const fn new() -> Self {
        Self
    }

    /// Collect points; returns how many were awarded this pass
    pub fn tally(world: &mut World, context: &mut SimulationContext) -> u64 {
        let mut awarded = 0;
        for entity in world.query(&Query::new().with::<Dead>().with::<ScoreValue>()) {
            if let Some(score) = world.remove_component::<ScoreValue>(entity) {
                awarded += u64::from(score.value);
                log::debug!("Entity {} scored {}", entity, score.value);
            }
        }
        context.score += awarded;
        awarded
    }
}

impl System<SimulationContext> for ScoreSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PostUpdate
    }

    fn dependencies(&self) -> &[&'static str] {
        &[CollisionSystem::<SimulationContext>::NAME]
    }

    fn run(&mut self, world: &mut World, context: &mut SimulationContext) -> Result<(), EcsError> {
        Self::tally(world, context);
        Ok(())
    }
}
