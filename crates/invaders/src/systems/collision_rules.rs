//! Space Invaders collision response
//!
//! Tags map to layers so a bullet carries its owner's side:
//!
//! | tag | layers |
//! |---|---|
//! | `PlayerTag` | `PLAYER` |
//! | `EnemyTag` | `ENEMY` |
//! | `ProjectileTag` | `PROJECTILE` |
//! | `PlayerProjectileTag` | `PLAYER` |
//! | `EnemyProjectileTag` | `ENEMY` |
//! | `WallTag` | `ENVIRONMENT` |
//!
//! Rules are tried in table order and the first match wins.

use crate::components::{EnemyProjectileTag, EnemyTag, PlayerProjectileTag, PlayerTag, ProjectileTag, WallTag};
use crate::context::SimulationContext;
use arcade_engine::ecs::components::{apply_damage, mark_dead};
use arcade_engine::ecs::systems::{CollisionRule, CollisionRules, CollisionSystem, LayerMap};
use arcade_engine::physics::{CollisionLayers, LayerFilter};

const PLAYER_SHOT: CollisionLayers = CollisionLayers::PROJECTILE.union(CollisionLayers::PLAYER);
const ENEMY_SHOT: CollisionLayers = CollisionLayers::PROJECTILE.union(CollisionLayers::ENEMY);

/// Layer assignment for invader tags
pub fn invader_layers() -> LayerMap {
    LayerMap::new()
        .with_tag::<PlayerTag>(CollisionLayers::PLAYER)
        .with_tag::<EnemyTag>(CollisionLayers::ENEMY)
        .with_tag::<ProjectileTag>(CollisionLayers::PROJECTILE)
        .with_tag::<PlayerProjectileTag>(CollisionLayers::PLAYER)
        .with_tag::<EnemyProjectileTag>(CollisionLayers::ENEMY)
        .with_tag::<WallTag>(CollisionLayers::ENVIRONMENT)
}

fn ship(side: CollisionLayers) -> LayerFilter {
    LayerFilter::all(side).excluding(CollisionLayers::PROJECTILE)
}

/// Response table
///
/// Melee contact between an invader and the player costs each side that
/// carries health one hit point.
pub fn invader_rules() -> CollisionRules<SimulationContext> {
    CollisionRules::new()
        .with(CollisionRule::new(
            "player_shot_hits_enemy",
            LayerFilter::all(PLAYER_SHOT),
            ship(CollisionLayers::ENEMY),
            |world, _, shot, enemy| {
                apply_damage(world, enemy, 1)?;
                mark_dead(world, shot)
            },
        ))
        .with(CollisionRule::new(
            "enemy_shot_hits_player",
            LayerFilter::all(ENEMY_SHOT),
            ship(CollisionLayers::PLAYER),
            |world, _, shot, player| {
                apply_damage(world, player, 1)?;
                mark_dead(world, shot)
            },
        ))
        .with(CollisionRule::new(
            "shots_cancel",
            LayerFilter::all(PLAYER_SHOT),
            LayerFilter::all(ENEMY_SHOT),
            |world, _, mine, theirs| {
                mark_dead(world, mine)?;
                mark_dead(world, theirs)
            },
        ))
        .with(CollisionRule::new(
            "shot_hits_wall",
            LayerFilter::all(CollisionLayers::PROJECTILE),
            LayerFilter::all(CollisionLayers::ENVIRONMENT),
            |world, _, shot, wall| {
                apply_damage(world, wall, 1)?;
                mark_dead(world, shot)
            },
        ))
        .with(CollisionRule::new(
            "enemy_rams_player",
            ship(CollisionLayers::ENEMY),
            ship(CollisionLayers::PLAYER),
            |world, _, enemy, player| {
                apply_damage(world, enemy, 1)?;
                apply_damage(world, player, 1).map(|_| ())
            },
        ))
        .with(CollisionRule::new(
            "enemy_crushes_wall",
            ship(CollisionLayers::ENEMY),
            LayerFilter::all(CollisionLayers::ENVIRONMENT),
            |world, _, _, wall| mark_dead(world, wall),
        ))
}

/// Collision system wired with the invader layers and rules
pub fn invader_collision_system() -> CollisionSystem<SimulationContext> {
    CollisionSystem::new(invader_layers(), invader_rules())
}
