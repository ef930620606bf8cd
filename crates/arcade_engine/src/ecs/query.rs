//! Query system for component access
//!
//! A query names the components an entity must own and the ones it must
//! not own. The world resolves it to a pair of masks and performs a linear
//! scan up to the highest id ever issued.

use super::component::{Component, ComponentRegistry};
use super::mask::Mask;
use std::any::TypeId;

/// Component filter
#[derive(Debug, Clone, Default)]
pub struct Query {
    required: Vec<TypeId>,
    excluded: Vec<TypeId>,
}

/// A query resolved against one world's registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedQuery {
    /// Bits that must all be set
    pub required: Mask,
    /// Bits that must all be clear
    pub excluded: Mask,
}

impl ResolvedQuery {
    /// Test a single entity mask
    pub const fn matches(&self, mask: Mask) -> bool {
        mask.contains(self.required) && !mask.intersects(self.excluded)
    }
}

impl Query {
    /// Create a query that matches every live entity
    pub fn new() -> Self {
        Self::default()
    }

    /// Require component `T`
    #[must_use]
    pub fn with<T: Component>(mut self) -> Self {
        self.required.push(TypeId::of::<T>());
        self
    }

    /// Exclude entities owning component `T`
    #[must_use]
    pub fn without<T: Component>(mut self) -> Self {
        self.excluded.push(TypeId::of::<T>());
        self
    }

    /// Resolve against `registry`
    ///
    /// Returns `None` when a required type was never registered, since no
    /// entity can own it. Unregistered exclusions are ignored.
    pub fn resolve(&self, registry: &ComponentRegistry) -> Option<ResolvedQuery> {
        let mut required = Mask::EMPTY;
        for type_id in &self.required {
            required |= Mask::bit(registry.bit_of_type(*type_id)?);
        }
        let excluded = self
            .excluded
            .iter()
            .filter_map(|type_id| registry.bit_of_type(*type_id))
            .fold(Mask::EMPTY, |mask, bit| mask | Mask::bit(bit));
        Some(ResolvedQuery { required, excluded })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    impl Component for A {}
    struct B;
    impl Component for B {}
    struct C;
    impl Component for C {}

    #[test]
    fn test_resolve_builds_masks() {
        let mut registry = ComponentRegistry::new();
        registry.register::<A>().unwrap();
        registry.register::<B>().unwrap();

        let resolved = Query::new().with::<A>().without::<B>().resolve(&registry).unwrap();
        assert_eq!(resolved.required, Mask::bit(0));
        assert_eq!(resolved.excluded, Mask::bit(1));

        assert!(resolved.matches(Mask::bit(0)));
        assert!(!resolved.matches(Mask::bit(0) | Mask::bit(1)));
        assert!(!resolved.matches(Mask::EMPTY));
    }

    #[test]
    fn test_unregistered_requirement_matches_nothing() {
        let mut registry = ComponentRegistry::new();
        registry.register::<A>().unwrap();

        assert!(Query::new().with::<C>().resolve(&registry).is_none());
        let resolved = Query::new().with::<A>().without::<C>().resolve(&registry).unwrap();
        assert!(resolved.excluded.is_empty());
    }
}
