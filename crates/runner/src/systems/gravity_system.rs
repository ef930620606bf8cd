//! Gravity and the ground
//!
//! Runs after movement. An entity whose feet reached the ground this frame is
//! snapped onto it, stops falling and may jump again; everything else
//! accelerates downwards up to terminal speed.

use crate::components::{GravityTag, JumpingTag};
use crate::config::{LevelConfig, PhysicsConfig};
use crate::context::RunnerContext;
use arcade_engine::ecs::components::{Collider, Position, Velocity};
use arcade_engine::ecs::systems::MovementSystem;
use arcade_engine::ecs::{EcsError, Query, System, SystemPhase, World};

/// Applies gravity and lands entities on the ground line
#[derive(Debug)]
pub struct GravitySystem {
    gravity: f32,
    max_fall_speed: f32,
    ground_y: f32,
}

impl GravitySystem {
    /// System name in schedules
    pub const NAME: &'static str = "gravity";

    /// Create the system
    pub const fn new(physics: PhysicsConfig, level: LevelConfig) -> Self {
        Self {
            gravity: physics.gravity,
            max_fall_speed: physics.max_fall_speed,
            ground_y: level.ground_y,
        }
    }

    /// Land or accelerate every gravity-bound entity; returns how many landed
    pub fn settle(&self, world: &mut World) -> usize {
        let query = Query::new().with::<GravityTag>().with::<Position>().with::<Velocity>();
        let mut landed = 0;
        for entity in world.query(&query) {
            let height = world.get_component::<Collider>(entity).map_or(0.0, |c| c.height);
            let rising = world.component::<Velocity>(entity).y < 0.0;
            let position = world.component_mut::<Position>(entity);

            if !rising && position.y + height >= self.ground_y {
                position.y = self.ground_y - height;
                world.component_mut::<Velocity>(entity).y = 0.0;
                if world.remove_component::<JumpingTag>(entity).is_some() {
                    landed += 1;
                }
            } else {
                let velocity = world.component_mut::<Velocity>(entity);
                velocity.y = (velocity.y + self.gravity).min(self.max_fall_speed);
            }
        }
        landed
    }
}

impl System<RunnerContext> for GravitySystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::Update
    }

    fn dependencies(&self) -> &[&'static str] {
        &[MovementSystem::NAME]
    }

    fn run(&mut self, world: &mut World, _context: &mut RunnerContext) -> Result<(), EcsError> {
        self.settle(world);
        Ok(())
    }
}
