//! Invader animation

use crate::components::PostureChanger;
use crate::config::FormationConfig;
use crate::context::SimulationContext;
use arcade_engine::ecs::{EcsError, Query, System, SystemPhase, World};
use arcade_engine::foundation::time::Cadence;

/// Cycles every [`PostureChanger`] to its next frame on a fixed cadence
#[derive(Debug)]
pub struct PostureSystem {
    cadence: Cadence,
    postures: u32,
}

impl PostureSystem {
    /// System name in schedules
    pub const NAME: &'static str = "posture";

    /// Create the system
    pub fn new(formation: FormationConfig) -> Self {
        Self {
            cadence: Cadence::new(formation.posture_interval),
            postures: formation.postures_per_type.max(1),
        }
    }

    /// Advance the cadence; returns true if postures changed
    pub fn animate(&mut self, world: &mut World) -> bool {
        if !self.cadence.tick() {
            return false;
        }
        for entity in world.query(&Query::new().with::<PostureChanger>()) {
            let posture = world.component_mut::<PostureChanger>(entity);
            posture.posture_id = (posture.posture_id + 1) % self.postures;
        }
        true
    }
}

impl System<SimulationContext> for PostureSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::Render
    }

    fn run(&mut self, world: &mut World, _context: &mut SimulationContext) -> Result<(), EcsError> {
        self.animate(world);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postures_wrap() {
        let formation = FormationConfig {
            posture_interval: 2,
            postures_per_type: 2,
            ..FormationConfig::default()
        };
        let mut system = PostureSystem::new(formation);
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, PostureChanger::default()).unwrap();

        assert!(!system.animate(&mut world));
        assert!(system.animate(&mut world));
        assert_eq!(world.component::<PostureChanger>(e).posture_id, 1);
        system.animate(&mut world);
        system.animate(&mut world);
        assert_eq!(world.component::<PostureChanger>(e).posture_id, 0);
    }
}
