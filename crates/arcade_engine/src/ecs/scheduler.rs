//! System Scheduling and Dependency Management
//!
//! Provides a deterministic execution order. Systems are grouped by
//! [`SystemPhase`] and keep registration order inside a phase. Declared
//! dependencies are checked against that order when the schedule is built,
//! so a pipeline that would run a system before one it depends on never
//! starts.

use super::commands::FlushReport;
use super::error::{EcsError, ScheduleError};
use super::system::{System, SystemPhase};
use super::world::World;
use std::collections::HashMap;

/// Collects systems and validates their order
pub struct SystemScheduler<C> {
    systems: Vec<Box<dyn System<C>>>,
}

impl<C> Default for SystemScheduler<C> {
    fn default() -> Self {
        Self { systems: Vec::new() }
    }
}

impl<C> SystemScheduler<C> {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system
    pub fn add_system(&mut self, system: Box<dyn System<C>>) -> Result<(), ScheduleError> {
        let name = system.name();
        if self.systems.iter().any(|existing| existing.name() == name) {
            return Err(ScheduleError::DuplicateSystem(name));
        }
        self.systems.push(system);
        Ok(())
    }

    /// Builder-style [`SystemScheduler::add_system`]
    pub fn with_system<S>(mut self, system: S) -> Result<Self, ScheduleError>
    where
        S: System<C> + 'static,
    {
        self.add_system(Box::new(system))?;
        Ok(self)
    }

    /// Order systems by phase and validate every declared dependency
    pub fn build(mut self) -> Result<Schedule<C>, ScheduleError> {
        // Stable: registration order survives inside a phase.
        self.systems.sort_by_key(|system| system.phase());

        let position: HashMap<&'static str, usize> = self
            .systems
            .iter()
            .enumerate()
            .map(|(index, system)| (system.name(), index))
            .collect();

        for (index, system) in self.systems.iter().enumerate() {
            for &dependency in system.dependencies() {
                match position.get(dependency) {
                    None => {
                        return Err(ScheduleError::UnknownDependency {
                            system: system.name(),
                            dependency,
                        })
                    }
                    Some(&at) if at >= index => {
                        return Err(ScheduleError::OrderViolation {
                            system: system.name(),
                            dependency,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        let flush_at = self
            .systems
            .iter()
            .position(|system| system.phase() > SystemPhase::PostUpdate)
            .unwrap_or(self.systems.len());

        log::debug!(
            "Built schedule: {}",
            self.systems.iter().map(|s| s.name()).collect::<Vec<_>>().join(" -> ")
        );

        Ok(Schedule {
            systems: self.systems,
            flush_at,
            frame: 0,
        })
    }
}

/// Validated, ordered system pipeline
pub struct Schedule<C> {
    systems: Vec<Box<dyn System<C>>>,
    flush_at: usize,
    frame: u64,
}

/// Summary of one executed frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Live entities after the frame
    pub live_entities: usize,
    /// Deferred commands applied this frame
    pub flushed: FlushReport,
}

impl<C> Schedule<C> {
    /// System names in execution order
    pub fn order(&self) -> Vec<&'static str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Number of frames executed so far
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Run every system once, applying deferred commands between the
    /// post-update and render phases
    pub fn execute_frame(&mut self, world: &mut World, context: &mut C) -> Result<FrameReport, EcsError> {
        self.frame += 1;
        let mut flushed = FlushReport::default();

        for (index, system) in self.systems.iter_mut().enumerate() {
            if index == self.flush_at {
                flushed = world.flush_commands()?;
            }
            system.run(world, context)?;
        }
        if self.flush_at == self.systems.len() {
            flushed = world.flush_commands()?;
        }

        Ok(FrameReport {
            frame: self.frame,
            live_entities: world.entity_count(),
            flushed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Component;

    #[derive(Default)]
    struct Trace(Vec<&'static str>);

    struct Probe {
        name: &'static str,
        phase: SystemPhase,
        after: Vec<&'static str>,
    }

    impl Probe {
        fn new(name: &'static str, phase: SystemPhase) -> Self {
            Self { name, phase, after: Vec::new() }
        }

        fn after(mut self, dependency: &'static str) -> Self {
            self.after.push(dependency);
            self
        }
    }

    impl System<Trace> for Probe {
        fn name(&self) -> &'static str {
            self.name
        }

        fn phase(&self) -> SystemPhase {
            self.phase
        }

        fn dependencies(&self) -> &[&'static str] {
            &self.after
        }

        fn run(&mut self, _world: &mut World, context: &mut Trace) -> Result<(), EcsError> {
            context.0.push(self.name);
            Ok(())
        }
    }

    #[test]
    fn test_phases_order_systems() {
        let mut schedule = SystemScheduler::new()
            .with_system(Probe::new("render", SystemPhase::Render))
            .unwrap()
            .with_system(Probe::new("collide", SystemPhase::Update))
            .unwrap()
            .with_system(Probe::new("input", SystemPhase::PreUpdate))
            .unwrap()
            .with_system(Probe::new("move", SystemPhase::Update))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(schedule.order(), vec!["input", "collide", "move", "render"]);

        let mut world = World::new();
        let mut trace = Trace::default();
        let report = schedule.execute_frame(&mut world, &mut trace).unwrap();
        assert_eq!(trace.0, vec!["input", "collide", "move", "render"]);
        assert_eq!(report.frame, 1);
    }

    #[test]
    fn test_order_violation_rejected() {
        let result = SystemScheduler::new()
            .with_system(Probe::new("health", SystemPhase::PostUpdate))
            .unwrap()
            .with_system(Probe::new("score", SystemPhase::PostUpdate).after("collision"))
            .unwrap()
            .with_system(Probe::new("collision", SystemPhase::PostUpdate))
            .unwrap()
            .build();

        assert!(matches!(
            result,
            Err(ScheduleError::OrderViolation { system: "score", dependency: "collision" })
        ));
    }

    #[test]
    fn test_unknown_dependency_rejected() {
        let result = SystemScheduler::new()
            .with_system(Probe::new("score", SystemPhase::PostUpdate).after("collision"))
            .unwrap()
            .build();

        assert!(matches!(result, Err(ScheduleError::UnknownDependency { .. })));
    }

    #[test]
    fn test_duplicate_system_rejected() {
        let result = SystemScheduler::<Trace>::new()
            .with_system(Probe::new("movement", SystemPhase::Update))
            .unwrap()
            .with_system(Probe::new("movement", SystemPhase::Update));

        assert!(matches!(result, Err(ScheduleError::DuplicateSystem("movement"))));
    }

    #[test]
    fn test_commands_flush_before_render() {
        struct Spawner;
        struct Counter(usize);
        impl Component for Counter {}

        impl System<Vec<usize>> for Spawner {
            fn name(&self) -> &'static str {
                "spawner"
            }

            fn phase(&self) -> SystemPhase {
                SystemPhase::PreUpdate
            }

            fn run(&mut self, world: &mut World, _context: &mut Vec<usize>) -> Result<(), EcsError> {
                world.commands().spawn("counter", |world| {
                    let e = world.create_entity();
                    world.add_component(e, Counter(1))?;
                    Ok(e)
                });
                Ok(())
            }
        }

        struct Observer {
            name: &'static str,
            phase: SystemPhase,
        }

        impl System<Vec<usize>> for Observer {
            fn name(&self) -> &'static str {
                self.name
            }

            fn phase(&self) -> SystemPhase {
                self.phase
            }

            fn run(&mut self, world: &mut World, context: &mut Vec<usize>) -> Result<(), EcsError> {
                context.push(world.entity_count());
                Ok(())
            }
        }

        let mut schedule = SystemScheduler::new()
            .with_system(Spawner)
            .unwrap()
            .with_system(Observer { name: "sweep", phase: SystemPhase::PostUpdate })
            .unwrap()
            .with_system(Observer { name: "draw", phase: SystemPhase::Render })
            .unwrap()
            .build()
            .unwrap();

        let mut world = World::new();
        let mut seen = Vec::new();
        let report = schedule.execute_frame(&mut world, &mut seen).unwrap();

        assert_eq!(seen, vec![0, 1]);
        assert_eq!(report.flushed.spawned, 1);
        assert_eq!(report.live_entities, 1);
    }
}
