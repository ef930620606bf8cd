//! Game loop
//!
//! [`Game`] owns the world, the frame pipeline and the simulation context.
//! Each [`Game::step`] writes the input sample into the player, runs one
//! frame and re-evaluates the game status. Once the game is decided it keeps
//! running for the configured game-over delay so the last explosions play
//! out, then reports itself finished.

use crate::components::{EnemyTag, Input};
use crate::config::GameConfig;
use crate::context::SimulationContext;
use crate::error::GameError;
use crate::factories::EntityFactory;
use crate::input::{Buttons, InputSource};
use crate::render::{frame_commands, RenderSink};
use crate::systems::build_schedule;
use arcade_engine::ecs::components::{Collider, Position};
use arcade_engine::ecs::{Entity, FrameReport, Query, Schedule, World};
use arcade_engine::foundation::time::FramePacer;
use std::time::Duration;

/// Outcome of the game so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Still running
    Playing,
    /// Every invader destroyed
    Won,
    /// The player was destroyed or the invaders landed
    Lost,
}

/// A running game
pub struct Game {
    world: World,
    schedule: Schedule<SimulationContext>,
    context: SimulationContext,
    factory: EntityFactory,
    player: Entity,
    status: GameStatus,
    last_report: FrameReport,
    frames_since_over: u64,
    over_delay_frames: u64,
}

impl Game {
    /// Set up the playfield for `config`
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let factory = EntityFactory::new(config);
        let mut world = World::with_null_entity();
        let player = factory.spawn_player(&mut world)?;
        factory.spawn_formation(&mut world)?;
        factory.spawn_walls(&mut world)?;
        let schedule = build_schedule(factory)?;
        let pacer = FramePacer::new(Duration::from_millis(config.timing.frame_ms));

        log::info!(
            "Game ready: {} entities, pipeline {}",
            world.entity_count(),
            schedule.order().join(" -> ")
        );

        Ok(Self {
            world,
            schedule,
            context: SimulationContext::new(&config),
            factory,
            player,
            status: GameStatus::Playing,
            last_report: FrameReport::default(),
            frames_since_over: 0,
            over_delay_frames: pacer.frames_for_millis(config.timing.game_over_delay_ms),
        })
    }

    /// Run one frame with the given buttons held
    pub fn step(&mut self, buttons: Buttons) -> Result<GameStatus, GameError> {
        if let Some(input) = self.world.get_component_mut::<Input>(self.player) {
            *input = Input {
                left_pressed: buttons.contains(Buttons::LEFT),
                right_pressed: buttons.contains(Buttons::RIGHT),
                fire_pressed: buttons.contains(Buttons::FIRE),
            };
        }

        self.last_report = self.schedule.execute_frame(&mut self.world, &mut self.context)?;

        if self.status == GameStatus::Playing {
            self.status = self.evaluate();
            if self.status != GameStatus::Playing {
                log::info!(
                    "Game over on frame {}: {:?} with score {}",
                    self.last_report.frame,
                    self.status,
                    self.context.score
                );
            }
        } else {
            self.frames_since_over += 1;
        }
        Ok(self.status)
    }

    /// Sample `input`, run one frame and present the result to `sink`
    pub fn run_frame(
        &mut self,
        input: &mut dyn InputSource,
        sink: &mut dyn RenderSink,
    ) -> Result<GameStatus, GameError> {
        let buttons = input.sample(self.schedule.frame());
        let status = self.step(buttons)?;
        sink.present(self.last_report.frame, &frame_commands(&self.world));
        Ok(status)
    }

    fn evaluate(&self) -> GameStatus {
        if !self.world.is_alive(self.player) {
            return GameStatus::Lost;
        }

        let config = self.factory.config();
        let landing_line = config.window.height - config.player.bottom_offset;
        let invaders = self.world.query(&Query::new().with::<EnemyTag>());
        let landed = invaders.iter().any(|&enemy| {
            let top = self.world.get_component::<Position>(enemy).map_or(0.0, |p| p.y);
            let height = self.world.get_component::<Collider>(enemy).map_or(0.0, |c| c.height);
            top + height >= landing_line
        });

        if landed {
            GameStatus::Lost
        } else if invaders.is_empty() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    /// True once the game is decided and the game-over delay has passed
    pub const fn is_finished(&self) -> bool {
        !matches!(self.status, GameStatus::Playing) && self.frames_since_over >= self.over_delay_frames
    }

    /// Current status
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Running score
    pub const fn score(&self) -> u64 {
        self.context.score
    }

    /// Frames executed
    pub const fn frame(&self) -> u64 {
        self.schedule.frame()
    }

    /// Report of the most recent frame
    pub const fn last_report(&self) -> FrameReport {
        self.last_report
    }

    /// The player entity; may already be destroyed
    pub const fn player(&self) -> Entity {
        self.player
    }

    /// Entity factory in use
    pub const fn factory(&self) -> &EntityFactory {
        &self.factory
    }

    /// Shared simulation state
    pub const fn context(&self) -> &SimulationContext {
        &self.context
    }

    /// Mutable simulation state
    pub fn context_mut(&mut self) -> &mut SimulationContext {
        &mut self.context
    }

    /// The world
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access, for scripted setups
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("frame", &self.schedule.frame())
            .field("status", &self.status)
            .field("score", &self.context.score)
            .field("entities", &self.world.entity_count())
            .finish_non_exhaustive()
    }
}
