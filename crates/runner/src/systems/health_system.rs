//! Destruction sweep

use crate::components::{CollectableTag, EnemyTag, PlayerTag};
use crate::context::RunnerContext;
use crate::systems::item_system::ItemCollectionSystem;
use arcade_engine::ecs::components::Dead;
use arcade_engine::ecs::{EcsError, Query, System, SystemPhase, World};

/// Destroys every entity marked [`Dead`], counting defeated badniks
#[derive(Debug, Default)]
pub struct HealthSystem;

impl HealthSystem {
    /// System name in schedules
    pub const NAME: &'static str = "health";

    /// Create the system
    pub const fn new() -> Self {
        Self
    }

    /// Destroy dead entities; returns how many went
    pub fn sweep(world: &mut World, context: &mut RunnerContext) -> usize {
        let dead = world.query(&Query::new().with::<Dead>());
        for &entity in &dead {
            if world.has_component::<EnemyTag>(entity) {
                context.enemies_defeated += 1;
                log::debug!("Badnik {} destroyed", entity);
            } else if world.has_component::<PlayerTag>(entity) {
                log::info!("Player {} destroyed", entity);
            } else if world.has_component::<CollectableTag>(entity) {
                log::trace!("Collectable {} removed", entity);
            }
            world.destroy_entity(entity);
        }
        dead.len()
    }
}

impl System<RunnerContext> for HealthSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PostUpdate
    }

    fn dependencies(&self) -> &[&'static str] {
        &[ItemCollectionSystem::NAME]
    }

    fn run(&mut self, world: &mut World, context: &mut RunnerContext) -> Result<(), EcsError> {
        Self::sweep(world, context);
        Ok(())
    }
}
