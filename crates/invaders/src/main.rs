//! Headless Space Invaders runner
//!
//! Plays the scripted demo input against the simulation and logs the
//! outcome. Pass a config path as the first argument; `invaders.toml` in the
//! working directory is used when present.

use arcade_engine::config::Config;
use arcade_engine::foundation::logging;
use arcade_engine::foundation::time::FramePacer;
use invaders::prelude::*;
use std::time::Duration;

const DEFAULT_CONFIG: &str = "invaders.toml";

fn run(config: GameConfig) -> Result<Game, GameError> {
    let mut game = Game::new(config)?;
    let mut input = ScriptedInput::demo();
    let mut sink = LogSink;
    let mut pacer = FramePacer::new(Duration::from_millis(config.timing.frame_ms));

    while !game.is_finished() && game.frame() < config.timing.max_frames {
        game.run_frame(&mut input, &mut sink)?;
        if config.timing.realtime {
            pacer.end_frame();
        }
    }
    Ok(game)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = GameConfig::load_or_default(&path).map_err(|e| {
        log::error!("Failed to load {}: {}", path, e);
        GameError::from(e)
    })?;
    log::info!("Starting Invaders (seed {:?})", config.seed);

    match run(config) {
        Ok(game) => {
            log::info!(
                "Finished after {} frames: {:?}, score {}",
                game.frame(),
                game.status(),
                game.score()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Game failed: {}", e);
            Err(e.into())
        }
    }
}
