//! ECS collision system
//!
//! Detection is a brute-force scan over every unordered pair of entities that
//! own both [`Position`] and [`Collider`], in ascending id order. Response is
//! data: each overlapping pair is classified by the collision layers its tag
//! components map to, and the first [`CollisionRule`] whose filters accept the
//! pair (tried as `(a, b)` and then `(b, a)`) resolves it.
//!
//! Entities already marked [`Dead`](crate::ecs::components::Dead) when their
//! pair comes up are skipped, so a projectile consumed by one target cannot
//! hit a second one in the same pass.
//!
//! Bounds are read from the current [`Position`] when each pair comes up. A
//! rule that pushes an entity aside is therefore seen by every later pair in
//! the same pass.

use crate::ecs::components::{is_dead, Collider, CollisionInfo, Position};
use crate::ecs::{Component, EcsError, Entity, Query, System, SystemPhase, World};
use crate::physics::{Aabb, CollisionLayers, LayerFilter};

type LayerProbe = fn(&World, Entity) -> bool;

fn owns<T: Component>(world: &World, entity: Entity) -> bool {
    world.has_component::<T>(entity)
}

/// Derives an entity's collision layers from its tag components
#[derive(Default)]
pub struct LayerMap {
    entries: Vec<(LayerProbe, CollisionLayers)>,
}

impl LayerMap {
    /// Create an empty map; every entity is on no layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities owning `T` join `layers`
    #[must_use]
    pub fn with_tag<T: Component>(mut self, layers: CollisionLayers) -> Self {
        let probe: LayerProbe = owns::<T>;
        self.entries.push((probe, layers));
        self
    }

    /// Union of the layers of every tag `entity` owns
    pub fn layers_of(&self, world: &World, entity: Entity) -> CollisionLayers {
        self.entries
            .iter()
            .filter(|(probe, _)| probe(world, entity))
            .fold(CollisionLayers::empty(), |acc, (_, layers)| acc | *layers)
    }
}

impl std::fmt::Debug for LayerMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerMap").field("entries", &self.entries.len()).finish()
    }
}

/// Resolves one overlapping pair; arguments arrive in filter order
pub type ResolveFn<C> = Box<dyn Fn(&mut World, &mut C, Entity, Entity) -> Result<(), EcsError>>;

/// A single response rule
pub struct CollisionRule<C> {
    name: &'static str,
    first: LayerFilter,
    second: LayerFilter,
    resolve: ResolveFn<C>,
}

impl<C> CollisionRule<C> {
    /// Create a rule for pairs where one side matches `first` and the other
    /// matches `second`
    pub fn new<F>(name: &'static str, first: LayerFilter, second: LayerFilter, resolve: F) -> Self
    where
        F: Fn(&mut World, &mut C, Entity, Entity) -> Result<(), EcsError> + 'static,
    {
        Self {
            name,
            first,
            second,
            resolve: Box::new(resolve),
        }
    }

    /// Rule name for diagnostics
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Orient a pair to this rule, if it applies
    fn orient(
        &self,
        (a, layers_a): (Entity, CollisionLayers),
        (b, layers_b): (Entity, CollisionLayers),
    ) -> Option<(Entity, Entity)> {
        if self.first.matches(layers_a) && self.second.matches(layers_b) {
            Some((a, b))
        } else if self.first.matches(layers_b) && self.second.matches(layers_a) {
            Some((b, a))
        } else {
            None
        }
    }
}

/// Ordered rule table; the first matching rule wins
pub struct CollisionRules<C> {
    rules: Vec<CollisionRule<C>>,
}

impl<C> Default for CollisionRules<C> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<C> CollisionRules<C> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule
    #[must_use]
    pub fn with(mut self, rule: CollisionRule<C>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a rule in place
    pub fn push(&mut self, rule: CollisionRule<C>) {
        self.rules.push(rule);
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve a pair with the first rule that accepts it
    ///
    /// Returns the name of the rule that fired.
    pub fn dispatch(
        &self,
        world: &mut World,
        context: &mut C,
        a: (Entity, CollisionLayers),
        b: (Entity, CollisionLayers),
    ) -> Result<Option<&'static str>, EcsError> {
        for rule in &self.rules {
            if let Some((first, second)) = rule.orient(a, b) {
                (rule.resolve)(world, context, first, second)?;
                return Ok(Some(rule.name));
            }
        }
        Ok(None)
    }
}

/// Counters from the most recent pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollisionStats {
    /// Unordered pairs tested
    pub pairs_tested: usize,
    /// Pairs that overlapped with both sides alive
    pub overlaps: usize,
    /// Overlaps a rule resolved
    pub resolved: usize,
}

/// Every unordered overlapping pair `(a, b)` with `a < b`, ascending
pub fn find_overlapping_pairs(world: &World) -> Vec<(Entity, Entity)> {
    let bodies = collect_bodies(world);
    let mut pairs = Vec::new();
    for (i, (a, box_a)) in bodies.iter().enumerate() {
        for (b, box_b) in &bodies[i + 1..] {
            if box_a.overlaps(box_b) {
                pairs.push((*a, *b));
            }
        }
    }
    pairs
}

fn current_bounds(world: &World, entity: Entity) -> Option<Aabb> {
    let position = *world.get_component::<Position>(entity)?;
    Some(world.get_component::<Collider>(entity)?.bounds_at(position))
}

fn collect_bodies(world: &World) -> Vec<(Entity, Aabb)> {
    world
        .query(&Query::new().with::<Position>().with::<Collider>())
        .into_iter()
        .map(|entity| {
            let position = *world.component::<Position>(entity);
            (entity, world.component::<Collider>(entity).bounds_at(position))
        })
        .collect()
}

/// Pair scan plus rule dispatch
pub struct CollisionSystem<C> {
    layers: LayerMap,
    rules: CollisionRules<C>,
    dependencies: Vec<&'static str>,
    stats: CollisionStats,
}

impl<C> CollisionSystem<C> {
    /// System name in schedules
    pub const NAME: &'static str = "collision";

    /// Create a collision system
    pub fn new(layers: LayerMap, rules: CollisionRules<C>) -> Self {
        Self {
            layers,
            rules,
            dependencies: Vec::new(),
            stats: CollisionStats::default(),
        }
    }

    /// Require `system` to run first
    #[must_use]
    pub fn after(mut self, system: &'static str) -> Self {
        self.dependencies.push(system);
        self
    }

    /// Counters from the most recent pass
    pub const fn stats(&self) -> CollisionStats {
        self.stats
    }

    /// Layer map in use
    pub const fn layers(&self) -> &LayerMap {
        &self.layers
    }

    /// Run one detection and response pass
    pub fn detect(&mut self, world: &mut World, context: &mut C) -> Result<CollisionStats, EcsError> {
        for entity in world.query(&Query::new().with::<CollisionInfo>()) {
            world.component_mut::<CollisionInfo>(entity).reset();
        }

        let bodies: Vec<(Entity, CollisionLayers)> = world
            .query(&Query::new().with::<Position>().with::<Collider>())
            .into_iter()
            .map(|entity| (entity, self.layers.layers_of(world, entity)))
            .collect();

        let mut stats = CollisionStats::default();
        for (i, &(a, layers_a)) in bodies.iter().enumerate() {
            for &(b, layers_b) in &bodies[i + 1..] {
                stats.pairs_tested += 1;
                let (Some(box_a), Some(box_b)) = (current_bounds(world, a), current_bounds(world, b)) else {
                    continue;
                };
                if !box_a.overlaps(&box_b) {
                    continue;
                }
                if is_dead(world, a) || is_dead(world, b) {
                    continue;
                }
                stats.overlaps += 1;

                if let Some(info) = world.get_component_mut::<CollisionInfo>(a) {
                    info.record(b);
                }
                if let Some(info) = world.get_component_mut::<CollisionInfo>(b) {
                    info.record(a);
                }

                if let Some(rule) = self.rules.dispatch(world, context, (a, layers_a), (b, layers_b))? {
                    log::debug!("Collision {} <-> {} resolved by '{}'", a, b, rule);
                    stats.resolved += 1;
                }
            }
        }

        self.stats = stats;
        Ok(stats)
    }
}

impl<C> System<C> for CollisionSystem<C> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::Update
    }

    fn dependencies(&self) -> &[&'static str] {
        &self.dependencies
    }

    fn run(&mut self, world: &mut World, context: &mut C) -> Result<(), EcsError> {
        self.detect(world, context).map(|_| ())
    }
}
