//! Headless voxel tetris runner (default binary).
//!
//! Plays a session without rendering: applies the scripted actions, one before
//! each tick, advances gravity for the configured number of ticks and prints a
//! summary or a JSON report. Board events go to stderr with `--verbose`.

use anyhow::Result;

use voxel_tetris::config::{parse_args, RunConfig, USAGE};
use voxel_tetris::core::{GameState, TickOutcome};
use voxel_tetris::logging::LogObserver;
use voxel_tetris::report::{build_report, summary_lines};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = parse_args(&args)?;
    run(&config)
}

fn run(config: &RunConfig) -> Result<()> {
    eprintln!(
        "[Runner] board={} seed={} ticks={} template={:?}",
        config.game.board, config.game.seed, config.ticks, config.game.debug_template
    );

    let mut game = GameState::new(config.game);
    game.start();

    let mut observer = LogObserver::default();
    for tick in 0..config.ticks {
        if let Some(&action) = config.actions.get(tick as usize) {
            if !game.apply_action(action) {
                eprintln!("[Runner] tick {}: {} rejected", tick, action.as_str());
            }
        }

        let outcome = game.advance_tick();

        if config.verbose {
            game.flush_events(&mut observer);
        } else {
            game.drain_events();
        }

        match outcome {
            TickOutcome::Froze { layers_cleared } if layers_cleared > 0 => {
                eprintln!("[Runner] tick {}: cleared {} layer(s)", tick, layers_cleared);
            }
            TickOutcome::GameOver => {
                eprintln!("[Runner] tick {}: board overflow, game over", tick);
                break;
            }
            _ => {}
        }
        if game.game_over() {
            break;
        }
    }

    let report = build_report(&game);
    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in summary_lines(&report) {
            println!("{}", line);
        }
    }
    Ok(())
}
