//! Timed power-up countdown

use crate::components::{PowerupKind, TemporaryPowerup};
use crate::context::RunnerContext;
use arcade_engine::ecs::{EcsError, Query, System, SystemPhase, World};

/// Counts active power-ups down once per frame and clears expired ones
#[derive(Debug, Default)]
pub struct TemporaryEffectsSystem;

impl TemporaryEffectsSystem {
    /// System name in schedules
    pub const NAME: &'static str = "temporary_effects";

    /// Create the system
    pub const fn new() -> Self {
        Self
    }

    /// Tick every effect; returns how many ran out this frame
    pub fn tick(world: &mut World) -> usize {
        let mut expired = 0;
        for entity in world.query(&Query::new().with::<TemporaryPowerup>()) {
            let powerup = world.component_mut::<TemporaryPowerup>(entity);
            if powerup.kind == PowerupKind::None {
                continue;
            }
            powerup.remaining_frames = powerup.remaining_frames.saturating_sub(1);
            if powerup.remaining_frames == 0 {
                log::debug!("{:?} wore off for {}", powerup.kind, entity);
                *powerup = TemporaryPowerup::default();
                expired += 1;
            }
        }
        expired
    }
}

impl System<RunnerContext> for TemporaryEffectsSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PostUpdate
    }

    fn run(&mut self, world: &mut World, _context: &mut RunnerContext) -> Result<(), EcsError> {
        Self::tick(world);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_expires() {
        let mut world = World::new();
        let sonic = world.create_entity();
        world
            .add_component(sonic, TemporaryPowerup::new(PowerupKind::Invincibility, 2))
            .unwrap();

        assert_eq!(TemporaryEffectsSystem::tick(&mut world), 0);
        assert!(world.component::<TemporaryPowerup>(sonic).is(PowerupKind::Invincibility));
        assert_eq!(TemporaryEffectsSystem::tick(&mut world), 1);
        assert_eq!(world.component::<TemporaryPowerup>(sonic).kind, PowerupKind::None);
        assert_eq!(TemporaryEffectsSystem::tick(&mut world), 0);
    }
}
