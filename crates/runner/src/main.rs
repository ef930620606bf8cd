//! Headless side-scroller demo
//!
//! Runs Sonic through the demo stretch with a fixed button script and logs
//! what happened. Pass a config path as the first argument; `runner.ron` in
//! the working directory is used when present.

use arcade_engine::config::Config;
use arcade_engine::foundation::logging;
use runner::prelude::*;

const DEFAULT_CONFIG: &str = "runner.ron";
const DEMO_FRAMES: u64 = 600;

/// Run right, jump once, run on, then roll to a stop
fn scripted_input(frame: u64) -> Input {
    match frame {
        0..=89 => Input {
            right_pressed: true,
            ..Input::default()
        },
        90 => Input {
            jump_pressed: true,
            ..Input::default()
        },
        91..=140 => Input {
            right_pressed: true,
            ..Input::default()
        },
        141 => Input {
            roll_pressed: true,
            ..Input::default()
        },
        _ => Input::default(),
    }
}

fn run(config: RunnerConfig) -> Result<Level, RunnerError> {
    let mut level = Level::demo(config)?;
    while !level.is_over() && level.frame() < DEMO_FRAMES {
        level.step(scripted_input(level.frame()))?;
    }
    Ok(level)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = RunnerConfig::load_or_default(&path).map_err(|e| {
        log::error!("Failed to load {}: {}", path, e);
        RunnerError::from(e)
    })?;

    match run(config) {
        Ok(level) => {
            let context = level.context();
            log::info!(
                "Finished after {} frames: {} rings, {} power-ups, {} badniks, {} hits, hp {:?}",
                level.frame(),
                context.rings_collected,
                context.powerups_collected,
                context.enemies_defeated,
                context.hits_taken,
                level.sonic_hp()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}
