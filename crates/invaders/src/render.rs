//! Draw command generation
//!
//! The simulation never draws. After a frame the game turns every entity
//! with [`RenderData`] and a [`Position`] into a [`DrawCommand`] and hands the
//! list to a [`RenderSink`]. Windowed front ends implement the sink; the
//! headless binary logs.

use crate::components::{
    EnemyProjectileTag, EnemyTag, ExplosionTag, PlayerProjectileTag, PlayerTag, PostureChanger, RenderData, WallTag,
};
use arcade_engine::ecs::components::Position;
use arcade_engine::ecs::{Entity, Query, World};

/// Broad category of a drawn entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawKind {
    /// The player's ship
    Player,
    /// An invader
    Enemy,
    /// Bullet fired by the player
    PlayerProjectile,
    /// Bullet fired by an invader
    EnemyProjectile,
    /// A shield
    Wall,
    /// Explosion effect
    Explosion,
    /// Anything else with render data
    Other,
}

/// One sprite to draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Source entity
    pub entity: Entity,
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Sprite slot
    pub sprite_id: u32,
    /// Animation frame, for animated sprites
    pub posture_id: Option<u32>,
    /// Category
    pub kind: DrawKind,
}

/// Consumes the draw list of one frame
pub trait RenderSink {
    /// Present `commands` for `frame`
    fn present(&mut self, frame: u64, commands: &[DrawCommand]);
}

/// Logs a summary of each frame at trace level
#[derive(Debug, Default)]
pub struct LogSink;

impl RenderSink for LogSink {
    fn present(&mut self, frame: u64, commands: &[DrawCommand]) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        log::trace!("Frame {}: {} sprites", frame, commands.len());
        for command in commands {
            log::trace!(
                "  {:?} {} sprite {} at ({:.1}, {:.1})",
                command.kind,
                command.entity,
                command.sprite_id,
                command.x,
                command.y
            );
        }
    }
}

/// Keeps the most recent draw list
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Frame of the last presented list
    pub frame: u64,
    /// Last presented list
    pub commands: Vec<DrawCommand>,
    /// Frames presented so far
    pub presented: u64,
}

impl RenderSink for RecordingSink {
    fn present(&mut self, frame: u64, commands: &[DrawCommand]) {
        self.frame = frame;
        self.commands = commands.to_vec();
        self.presented += 1;
    }
}

fn kind_of(world: &World, entity: Entity) -> DrawKind {
    if world.has_component::<PlayerTag>(entity) {
        DrawKind::Player
    } else if world.has_component::<EnemyTag>(entity) {
        DrawKind::Enemy
    } else if world.has_component::<PlayerProjectileTag>(entity) {
        DrawKind::PlayerProjectile
    } else if world.has_component::<EnemyProjectileTag>(entity) {
        DrawKind::EnemyProjectile
    } else if world.has_component::<WallTag>(entity) {
        DrawKind::Wall
    } else if world.has_component::<ExplosionTag>(entity) {
        DrawKind::Explosion
    } else {
        DrawKind::Other
    }
}

/// Draw list for the current world, in ascending entity order
pub fn frame_commands(world: &World) -> Vec<DrawCommand> {
    world
        .query(&Query::new().with::<RenderData>().with::<Position>())
        .into_iter()
        .map(|entity| {
            let position = world.component::<Position>(entity);
            let render = world.component::<RenderData>(entity);
            DrawCommand {
                entity,
                x: position.x,
                y: position.y,
                width: render.width,
                height: render.height,
                sprite_id: render.sprite_id,
                posture_id: world.get_component::<PostureChanger>(entity).map(|p| p.posture_id),
                kind: kind_of(world, entity),
            }
        })
        .collect()
}
