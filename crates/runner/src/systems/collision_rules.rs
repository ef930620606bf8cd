//! Side-scroller collision response
//!
//! | tag | layers |
//! |---|---|
//! | `PlayerTag` | `PLAYER` |
//! | `CollectorTag` | `COLLECTOR` |
//! | `EnemyTag` | `ENEMY` |
//! | `DamageTag` | `HAZARD` |
//! | `ObstacleTag` | `ENVIRONMENT` |
//! | `CollectableTag` | `PICKUP` |
//!
//! Pickups have no rule. The collision pass still records the contact in
//! each side's [`CollisionInfo`](arcade_engine::ecs::components::CollisionInfo)
//! and item collection reads it afterwards.

use crate::components::{
    CollectableTag, CollectorTag, DamageTag, EnemyTag, JumpingTag, ObstacleTag, PlayerTag, PowerupKind, RollingTag,
    TemporaryPowerup,
};
use crate::context::RunnerContext;
use arcade_engine::ecs::components::{apply_damage, Collider, Position, Velocity};
use arcade_engine::ecs::systems::{CollisionRule, CollisionRules, CollisionSystem, LayerMap};
use arcade_engine::ecs::{EcsError, Entity, World};
use arcade_engine::physics::{Aabb, CollisionLayers, LayerFilter};

const SPIKES: CollisionLayers = CollisionLayers::ENVIRONMENT.union(CollisionLayers::HAZARD);

/// Layer assignment for runner tags
pub fn runner_layers() -> LayerMap {
    LayerMap::new()
        .with_tag::<PlayerTag>(CollisionLayers::PLAYER)
        .with_tag::<CollectorTag>(CollisionLayers::COLLECTOR)
        .with_tag::<EnemyTag>(CollisionLayers::ENEMY)
        .with_tag::<DamageTag>(CollisionLayers::HAZARD)
        .with_tag::<ObstacleTag>(CollisionLayers::ENVIRONMENT)
        .with_tag::<CollectableTag>(CollisionLayers::PICKUP)
}

fn is_invincible(world: &World, entity: Entity) -> bool {
    world
        .get_component::<TemporaryPowerup>(entity)
        .is_some_and(|powerup| powerup.is(PowerupKind::Invincibility))
}

/// Costs the player one hit point unless invincible, then grants mercy
/// invincibility. Returns whether damage was taken.
fn hurt_player(world: &mut World, context: &mut RunnerContext, player: Entity, mercy_frames: u32) -> Result<bool, EcsError> {
    if is_invincible(world, player) {
        return Ok(false);
    }
    let died = apply_damage(world, player, 1)?;
    context.hits_taken += 1;
    if !died && mercy_frames > 0 {
        world.add_component(player, TemporaryPowerup::new(PowerupKind::Invincibility, mercy_frames))?;
    }
    log::debug!("Player {} hit ({} hits this run)", player, context.hits_taken);
    Ok(true)
}

fn bounds(world: &World, entity: Entity) -> Option<Aabb> {
    let position = *world.get_component::<Position>(entity)?;
    Some(world.get_component::<Collider>(entity)?.bounds_at(position))
}

/// Pushes `mover` out of `solid`
///
/// A falling mover whose centre is above the solid's top lands on it. One
/// whose centre is below the solid's bottom bumps its head. Anything else is
/// pushed out sideways.
pub fn rest_against(world: &mut World, mover: Entity, solid: Entity) {
    let (Some(body), Some(block)) = (bounds(world, mover), bounds(world, solid)) else {
        return;
    };
    let Some(velocity) = world.get_component::<Velocity>(mover).copied() else {
        return;
    };
    let centre_x = body.x + body.width / 2.0;
    let centre_y = body.y + body.height / 2.0;

    if velocity.y >= 0.0 && centre_y < block.y {
        world.component_mut::<Position>(mover).y = block.y - body.height;
        world.component_mut::<Velocity>(mover).y = 0.0;
        world.remove_component::<JumpingTag>(mover);
    } else if centre_y > block.bottom() {
        world.component_mut::<Position>(mover).y = block.bottom();
        let velocity = world.component_mut::<Velocity>(mover);
        velocity.y = velocity.y.max(0.0);
    } else {
        let position = world.component_mut::<Position>(mover);
        position.x = if centre_x < block.x + block.width / 2.0 {
            block.x - body.width
        } else {
            block.right()
        };
        world.component_mut::<Velocity>(mover).x = 0.0;
    }
}

/// Response table
pub fn runner_rules(mercy_frames: u32) -> CollisionRules<RunnerContext> {
    CollisionRules::new()
        .with(CollisionRule::new(
            "player_hits_enemy",
            LayerFilter::all(CollisionLayers::PLAYER),
            LayerFilter::all(CollisionLayers::ENEMY),
            move |world, context, player, enemy| {
                if world.has_component::<RollingTag>(player) {
                    apply_damage(world, enemy, 1)?;
                } else {
                    hurt_player(world, context, player, mercy_frames)?;
                }
                Ok(())
            },
        ))
        .with(CollisionRule::new(
            "player_touches_spikes",
            LayerFilter::all(CollisionLayers::PLAYER),
            LayerFilter::all(SPIKES),
            move |world, context, player, spikes| {
                hurt_player(world, context, player, mercy_frames)?;
                rest_against(world, player, spikes);
                Ok(())
            },
        ))
        .with(CollisionRule::new(
            "player_meets_obstacle",
            LayerFilter::all(CollisionLayers::PLAYER),
            LayerFilter::all(CollisionLayers::ENVIRONMENT).excluding(CollisionLayers::HAZARD),
            |world, _, player, obstacle| {
                rest_against(world, player, obstacle);
                Ok(())
            },
        ))
}

/// Collision system wired with the runner layers and rules
pub fn runner_collision_system(mercy_frames: u32) -> CollisionSystem<RunnerContext> {
    CollisionSystem::new(runner_layers(), runner_rules(mercy_frames))
}
