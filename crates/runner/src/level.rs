//! Level loop
//!
//! [`Level`] owns the world, the frame pipeline and the run counters. Each
//! [`Level::step`] writes the held buttons into Sonic and runs one frame.

use crate::components::{Input, RingCount};
use crate::config::RunnerConfig;
use crate::context::RunnerContext;
use crate::error::RunnerError;
use crate::factories::RunnerFactory;
use crate::systems::build_schedule;
use arcade_engine::ecs::components::Health;
use arcade_engine::ecs::{Entity, FrameReport, Schedule, World};

/// A running level
pub struct Level {
    world: World,
    schedule: Schedule<RunnerContext>,
    context: RunnerContext,
    factory: RunnerFactory,
    sonic: Entity,
    last_report: FrameReport,
}

impl Level {
    /// Lay out the demo stretch for `config`
    pub fn demo(config: RunnerConfig) -> Result<Self, RunnerError> {
        let factory = RunnerFactory::new(config);
        let mut world = World::with_null_entity();
        let sonic = factory.spawn_demo_level(&mut world)?;
        Self::with_world(world, factory, sonic)
    }

    /// Wrap an already populated world; `sonic` receives the input
    pub fn with_world(world: World, factory: RunnerFactory, sonic: Entity) -> Result<Self, RunnerError> {
        let schedule = build_schedule(factory.config())?;
        log::info!(
            "Level ready: {} entities, pipeline {}",
            world.entity_count(),
            schedule.order().join(" -> ")
        );
        Ok(Self {
            world,
            schedule,
            context: RunnerContext::default(),
            factory,
            sonic,
            last_report: FrameReport::default(),
        })
    }

    /// Run one frame with `input` held
    pub fn step(&mut self, input: Input) -> Result<FrameReport, RunnerError> {
        if let Some(held) = self.world.get_component_mut::<Input>(self.sonic) {
            *held = input;
        }
        self.last_report = self.schedule.execute_frame(&mut self.world, &mut self.context)?;
        Ok(self.last_report)
    }

    /// True once Sonic has been destroyed
    pub fn is_over(&self) -> bool {
        !self.world.is_alive(self.sonic)
    }

    /// Rings Sonic holds
    pub fn rings(&self) -> u32 {
        self.world.get_component::<RingCount>(self.sonic).map_or(0, |r| r.count)
    }

    /// Sonic's hit points, if still alive
    pub fn sonic_hp(&self) -> Option<i32> {
        self.world.get_component::<Health>(self.sonic).map(|h| h.hp)
    }

    /// Frames run so far
    pub const fn frame(&self) -> u64 {
        self.schedule.frame()
    }

    /// The player entity
    pub const fn sonic(&self) -> Entity {
        self.sonic
    }

    /// Report from the most recent frame
    pub const fn last_report(&self) -> FrameReport {
        self.last_report
    }

    /// Run counters
    pub const fn context(&self) -> &RunnerContext {
        &self.context
    }

    /// Factory for adding entities mid-run
    pub const fn factory(&self) -> &RunnerFactory {
        &self.factory
    }

    /// The world
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl std::fmt::Debug for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Level")
            .field("frame", &self.frame())
            .field("sonic", &self.sonic)
            .field("entities", &self.world.entity_count())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
