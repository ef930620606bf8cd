//! ECS error types

use super::entity::Entity;
use thiserror::Error;

/// Errors raised by world operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// Component read on an entity that does not own it
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        /// Entity that was queried
        entity: Entity,
        /// Short type name of the component
        component: &'static str,
    },

    /// The world ran out of mask bits
    #[error("cannot register {component}: a world holds at most {limit} component types")]
    TooManyComponentTypes {
        /// Type that failed to register
        component: &'static str,
        /// Mask width
        limit: usize,
    },

    /// Operation on an entity id that is not alive
    #[error("entity {0} is not alive")]
    DeadEntity(Entity),
}

/// Errors raised while building an execution plan
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A system declared a dependency on a name nobody registered
    #[error("system '{system}' depends on unknown system '{dependency}'")]
    UnknownDependency {
        /// Dependent system
        system: &'static str,
        /// Missing dependency
        dependency: &'static str,
    },

    /// A dependency is registered but would run after its dependent
    #[error("system '{system}' must run after '{dependency}' but is scheduled before it")]
    OrderViolation {
        /// Dependent system
        system: &'static str,
        /// Dependency scheduled too late
        dependency: &'static str,
    },

    /// Two systems registered under the same name
    #[error("system '{0}' registered twice")]
    DuplicateSystem(&'static str),
}
