//! Deferred world mutations
//!
//! Systems that want to create entities while they are scanning the world
//! record a [`Command`] instead. The queue is applied at a single
//! synchronization point in the frame, in recording order, so nothing a
//! system spawns becomes visible to a scan that is already running.

use super::component::Component;
use super::entity::Entity;
use super::error::EcsError;
use super::world::World;
use std::collections::VecDeque;
use std::fmt;

/// Builds an entity from scratch; usually a factory call
pub type SpawnFn = Box<dyn FnOnce(&mut World) -> Result<Entity, EcsError> + Send>;

/// Applies a component change to an existing entity
pub type ApplyFn = Box<dyn FnOnce(&mut World, Entity) -> Result<(), EcsError> + Send>;

/// A deferred ECS mutation
pub enum Command {
    /// Create a new entity
    Spawn {
        /// Archetype name for diagnostics
        label: &'static str,
        /// Constructor run at flush time
        build: SpawnFn,
    },

    /// Destroy an entity
    Despawn {
        /// Entity to remove from the world
        entity: Entity,
    },

    /// Attach a component to an existing entity
    Add {
        /// Target entity
        entity: Entity,
        /// Inserts the captured value
        apply: ApplyFn,
    },

    /// Detach a component from an existing entity
    Remove {
        /// Target entity
        entity: Entity,
        /// Removes the captured type
        apply: ApplyFn,
    },
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { label, .. } => f.debug_struct("Spawn").field("label", label).finish(),
            Self::Despawn { entity } => f.debug_struct("Despawn").field("entity", entity).finish(),
            Self::Add { entity, .. } => f.debug_struct("Add").field("entity", entity).finish(),
            Self::Remove { entity, .. } => f.debug_struct("Remove").field("entity", entity).finish(),
        }
    }
}

/// Ordered list of pending commands
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: VecDeque<Command>,
}

/// Outcome of a flush
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlushReport {
    /// Entities created
    pub spawned: usize,
    /// Entities destroyed
    pub despawned: usize,
    /// Component changes applied
    pub modified: usize,
    /// Commands dropped because their target was already gone
    pub skipped: usize,
}

impl CommandQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an entity construction
    pub fn spawn<F>(&mut self, label: &'static str, build: F)
    where
        F: FnOnce(&mut World) -> Result<Entity, EcsError> + Send + 'static,
    {
        self.commands.push_back(Command::Spawn { label, build: Box::new(build) });
    }

    /// Queue an entity destruction
    pub fn despawn(&mut self, entity: Entity) {
        self.commands.push_back(Command::Despawn { entity });
    }

    /// Queue a component insertion
    pub fn add<T: Component>(&mut self, entity: Entity, component: T) {
        self.commands.push_back(Command::Add {
            entity,
            apply: Box::new(move |world, entity| world.add_component(entity, component)),
        });
    }

    /// Queue a component removal
    pub fn remove<T: Component>(&mut self, entity: Entity) {
        self.commands.push_back(Command::Remove {
            entity,
            apply: Box::new(|world, entity| {
                world.remove_component::<T>(entity);
                Ok(())
            }),
        });
    }

    /// Append an already-built command
    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Move every command of `other` to the back of this queue
    pub fn append(&mut self, mut other: Self) {
        self.commands.append(&mut other.commands);
    }

    /// Number of pending commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Apply every pending command to `world` in recording order
    ///
    /// Commands that target an entity which no longer exists are skipped.
    /// The first constructor error aborts the flush and is returned; commands
    /// after it stay unapplied.
    pub fn apply(&mut self, world: &mut World) -> Result<FlushReport, EcsError> {
        let mut report = FlushReport::default();
        while let Some(command) = self.commands.pop_front() {
            match command {
                Command::Spawn { label, build } => {
                    let entity = build(world)?;
                    log::debug!("Spawned deferred {} as {}", label, entity);
                    report.spawned += 1;
                }
                Command::Despawn { entity } => {
                    if world.destroy_entity(entity) {
                        report.despawned += 1;
                    } else {
                        report.skipped += 1;
                    }
                }
                Command::Add { entity, apply } | Command::Remove { entity, apply } => {
                    if world.is_alive(entity) {
                        apply(world, entity)?;
                        report.modified += 1;
                    } else {
                        report.skipped += 1;
                    }
                }
            }
        }
        Ok(report)
    }
}
