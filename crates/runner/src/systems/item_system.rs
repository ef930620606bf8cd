//! Ring and power-up collection

use crate::components::{CollectableTag, CollectorTag, PowerupGrant, PowerupKind, RingCount, RingTag, TemporaryPowerup};
use crate::config::PowerupConfig;
use crate::context::RunnerContext;
use arcade_engine::ecs::components::{is_dead, mark_dead, Collider, CollisionInfo, Position};
use arcade_engine::ecs::systems::CollisionSystem;
use arcade_engine::ecs::{EcsError, Entity, Query, System, SystemPhase, World};

/// Hands collectables touched this frame to the collector that touched them
///
/// A ring adds to the collector's [`RingCount`]; a power-up box replaces the
/// collector's current [`TemporaryPowerup`]. Either way the collectable is
/// marked dead.
///
/// [`CollisionInfo`] only keeps the last partner, so an item touched by a
/// collector and something else in the same pass is matched against the
/// live collectors directly. The lowest-id collector it overlaps takes it.
#[derive(Debug)]
pub struct ItemCollectionSystem {
    powerups: PowerupConfig,
}

impl ItemCollectionSystem {
    /// System name in schedules
    pub const NAME: &'static str = "item_collection";

    /// Create the system
    pub const fn new(powerups: PowerupConfig) -> Self {
        Self { powerups }
    }

    const fn duration_of(&self, kind: PowerupKind) -> u32 {
        match kind {
            PowerupKind::None => 0,
            PowerupKind::Invincibility => self.powerups.invincibility_frames,
            PowerupKind::SpeedBoost => self.powerups.speed_boost_frames,
        }
    }

    fn can_collect(world: &World, entity: Entity) -> bool {
        world.is_alive(entity) && world.has_component::<CollectorTag>(entity) && !is_dead(world, entity)
    }

    fn collector_of(world: &World, item: Entity, collectors: &[Entity]) -> Option<Entity> {
        let info = world.get_component::<CollisionInfo>(item)?;
        let recorded = info.collided_entity?;
        if info.contacts == 1 {
            return Self::can_collect(world, recorded).then_some(recorded);
        }

        let position = *world.get_component::<Position>(item)?;
        let bounds = world.get_component::<Collider>(item)?.bounds_at(position);
        collectors.iter().copied().find(|&collector| {
            Self::can_collect(world, collector)
                && world
                    .get_component::<Position>(collector)
                    .zip(world.get_component::<Collider>(collector))
                    .is_some_and(|(at, collider)| collider.bounds_at(*at).overlaps(&bounds))
        })
    }

    /// Transfer every touched collectable; returns how many were taken
    pub fn collect(&self, world: &mut World, context: &mut RunnerContext) -> Result<usize, EcsError> {
        let query = Query::new().with::<CollectableTag>().with::<CollisionInfo>();
        let collectors = world.query(&Query::new().with::<CollectorTag>().with::<Position>().with::<Collider>());
        let mut taken = 0;
        for item in world.query(&query) {
            if is_dead(world, item) {
                continue;
            }
            let Some(collector) = Self::collector_of(world, item, &collectors) else {
                continue;
            };

            if world.has_component::<RingTag>(item) {
                if let Some(rings) = world.get_component_mut::<RingCount>(collector) {
                    rings.count += 1;
                }
                context.rings_collected += 1;
                log::debug!("Collector {} picked up ring {}", collector, item);
            }
            if let Some(grant) = world.get_component::<PowerupGrant>(item).copied() {
                let powerup = TemporaryPowerup::new(grant.kind, self.duration_of(grant.kind));
                world.add_component(collector, powerup)?;
                context.powerups_collected += 1;
                log::info!("Collector {} picked up {:?}", collector, grant.kind);
            }
            mark_dead(world, item)?;
            taken += 1;
        }
        Ok(taken)
    }
}

impl System<RunnerContext> for ItemCollectionSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PostUpdate
    }

    fn dependencies(&self) -> &[&'static str] {
        &[CollisionSystem::<RunnerContext>::NAME]
    }

    fn run(&mut self, world: &mut World, context: &mut RunnerContext) -> Result<(), EcsError> {
        self.collect(world, context).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunnerConfig;
    use crate::factories::RunnerFactory;
    use crate::systems::runner_collision_system;
    use arcade_engine::ecs::components::Dead;

    fn setup() -> (World, RunnerFactory, ItemCollectionSystem, Entity) {
        let config = RunnerConfig::default();
        let factory = RunnerFactory::new(config);
        let mut world = World::new();
        let sonic = factory.create_sonic(&mut world, 0.0, 0.0).unwrap();
        (world, factory, ItemCollectionSystem::new(config.powerups), sonic)
    }

    #[test]
    fn test_ring_goes_to_collector() {
        let (mut world, factory, system, sonic) = setup();
        let ring = factory.create_ring(&mut world, 0.0, 0.0).unwrap();
        world.component_mut::<CollisionInfo>(ring).record(sonic);
        let mut context = RunnerContext::default();

        assert_eq!(system.collect(&mut world, &mut context).unwrap(), 1);
        assert_eq!(world.component::<RingCount>(sonic).count, 1);
        assert_eq!(context.rings_collected, 1);
        assert!(world.has_component::<Dead>(ring));

        // Already dead, not collected twice
        assert_eq!(system.collect(&mut world, &mut context).unwrap(), 0);
    }

    #[test]
    fn test_powerup_replaces_current_effect() {
        let (mut world, factory, system, sonic) = setup();
        let boost = factory.create_powerup(&mut world, 0.0, 0.0, PowerupKind::SpeedBoost).unwrap();
        world.component_mut::<CollisionInfo>(boost).record(sonic);
        let mut context = RunnerContext::default();

        system.collect(&mut world, &mut context).unwrap();
        assert_eq!(
            *world.component::<TemporaryPowerup>(sonic),
            TemporaryPowerup::new(PowerupKind::SpeedBoost, 600)
        );
        assert_eq!(context.powerups_collected, 1);
        assert_eq!(context.rings_collected, 0);
    }

    #[test]
    fn test_ring_touched_by_collector_and_badnik_still_collected() {
        let config = RunnerConfig::default();
        let factory = RunnerFactory::new(config);
        let mut world = World::new();
        let ring = factory.create_ring(&mut world, 10.0, 10.0).unwrap();
        let sonic = factory.create_sonic(&mut world, 0.0, 0.0).unwrap();
        let badnik = factory.create_enemy(&mut world, 5.0, 5.0).unwrap();
        let mut context = RunnerContext::default();

        let mut collision = runner_collision_system(config.player.mercy_frames);
        collision.detect(&mut world, &mut context).unwrap();
        assert_eq!(world.component::<CollisionInfo>(ring).collided_entity, Some(badnik));

        let system = ItemCollectionSystem::new(config.powerups);
        assert_eq!(system.collect(&mut world, &mut context).unwrap(), 1);
        assert_eq!(world.component::<RingCount>(sonic).count, 1);
        assert_eq!(context.rings_collected, 1);
        assert!(world.has_component::<Dead>(ring));
    }

    #[test]
    fn test_non_collector_contact_is_ignored() {
        let (mut world, factory, system, _) = setup();
        let ring = factory.create_ring(&mut world, 0.0, 0.0).unwrap();
        let badnik = factory.create_enemy(&mut world, 0.0, 0.0).unwrap();
        world.component_mut::<CollisionInfo>(ring).record(badnik);

        assert_eq!(system.collect(&mut world, &mut RunnerContext::default()).unwrap(), 0);
        assert!(!world.has_component::<Dead>(ring));
    }
}
