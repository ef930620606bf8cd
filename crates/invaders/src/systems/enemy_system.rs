//! Invader formation systems

use crate::components::{EnemyTag, Shoots};
use crate::config::{FormationConfig, ProjectileConfig, WindowConfig};
use crate::context::SimulationContext;
use crate::factories::EntityFactory;
use arcade_engine::ecs::components::{is_dead, Collider, Position};
use arcade_engine::ecs::{EcsError, Entity, Query, System, SystemPhase, World};

/// Marches the formation and rolls each invader's shot
///
/// On every march tick the whole formation steps sideways. When any invader
/// would cross the side margin the formation reverses and drops instead, so
/// no invader moves in the old direction on that tick.
#[derive(Debug)]
pub struct EnemyLogicSystem {
    formation: FormationConfig,
    window: WindowConfig,
}

/// What a march tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarchOutcome {
    /// Not a march frame
    Waiting,
    /// Stepped sideways by this many pixels
    Stepped(f32),
    /// Reversed and dropped
    Dropped,
}

impl EnemyLogicSystem {
    /// System name in schedules
    pub const NAME: &'static str = "enemy_logic";

    /// Create the system
    pub const fn new(formation: FormationConfig, window: WindowConfig) -> Self {
        Self { formation, window }
    }

    fn invaders(world: &World) -> Vec<Entity> {
        world
            .query(&Query::new().with::<EnemyTag>().with::<Position>().with::<Collider>())
            .into_iter()
            .filter(|&entity| !is_dead(world, entity))
            .collect()
    }

    /// Advance the march cadence and move the formation on a tick
    pub fn march(&self, world: &mut World, context: &mut SimulationContext) -> MarchOutcome {
        if !context.march.tick() {
            return MarchOutcome::Waiting;
        }

        let invaders = Self::invaders(world);
        let dx = context.direction.sign() * self.formation.move_step;
        let left = self.window.margin;
        let right = self.window.width - self.window.margin;
        let crosses = invaders.iter().any(|&entity| {
            let x = world.component::<Position>(entity).x + dx;
            let width = world.component::<Collider>(entity).width;
            x < left || x + width > right
        });

        if crosses {
            context.direction = context.direction.reversed();
            for &entity in &invaders {
                world.component_mut::<Position>(entity).y += self.formation.drop_step;
            }
            log::debug!("Formation reversed to {:?} and dropped", context.direction);
            MarchOutcome::Dropped
        } else {
            for &entity in &invaders {
                world.component_mut::<Position>(entity).x += dx;
            }
            MarchOutcome::Stepped(dx)
        }
    }

    /// Give every invader its per-frame chance to fire
    pub fn roll_shots(world: &mut World, context: &mut SimulationContext) {
        let shooters = world.query(&Query::new().with::<EnemyTag>().with::<Shoots>());
        for entity in shooters {
            if is_dead(world, entity) {
                continue;
            }
            if context.dice.one_in(context.shoot_odds) {
                world.component_mut::<Shoots>(entity).value = true;
            }
        }
    }
}

impl System<SimulationContext> for EnemyLogicSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PreUpdate
    }

    fn run(&mut self, world: &mut World, context: &mut SimulationContext) -> Result<(), EcsError> {
        self.march(world, context);
        Self::roll_shots(world, context);
        Ok(())
    }
}

/// Spawns a projectile under every invader whose [`Shoots`] flag is set
///
/// The flag is a one-shot intent and is cleared here.
#[derive(Debug)]
pub struct EnemyShootingSystem {
    factory: EntityFactory,
    projectiles: ProjectileConfig,
}

impl EnemyShootingSystem {
    /// System name in schedules
    pub const NAME: &'static str = "enemy_shooting";

    /// Create the system
    pub fn new(factory: EntityFactory) -> Self {
        Self {
            projectiles: factory.config().projectiles,
            factory,
        }
    }

    /// Fire every raised flag; returns projectiles requested
    pub fn fire(&self, world: &mut World) -> usize {
        let query = Query::new()
            .with::<EnemyTag>()
            .with::<Shoots>()
            .with::<Position>()
            .with::<Collider>();
        let mut fired = 0;
        for entity in world.query(&query) {
            if !world.component::<Shoots>(entity).value {
                continue;
            }
            world.component_mut::<Shoots>(entity).value = false;

            let position = *world.component::<Position>(entity);
            let collider = *world.component::<Collider>(entity);
            let x = position.x + collider.width / 2.0 - self.projectiles.width / 2.0;
            let y = position.y + collider.height;
            self.factory
                .request_projectile(world, x, y, 0.0, self.projectiles.enemy_speed, false);
            fired += 1;
        }
        if fired > 0 {
            log::debug!("Invaders fired {} projectiles", fired);
        }
        fired
    }
}

impl System<SimulationContext> for EnemyShootingSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PreUpdate
    }

    fn dependencies(&self) -> &[&'static str] {
        &[EnemyLogicSystem::NAME]
    }

    fn run(&mut self, world: &mut World, _context: &mut SimulationContext) -> Result<(), EcsError> {
        self.fire(world);
        Ok(())
    }
}
