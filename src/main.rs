//! Swarm Defender entry point
//!
//! Runs a headless demo: the autopilot plays one game against the simulation
//! at a fixed 60 Hz display rate and the result is printed.
//!
//! Usage: `swarm-defender [--settings PATH] [--frames N] [--dump]`

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
use swarm_defender::platform::{Autopilot, HeadlessPresenter};
#[cfg(not(target_arch = "wasm32"))]
use swarm_defender::sim::GamePhase;
#[cfg(not(target_arch = "wasm32"))]
use swarm_defender::{Driver, Settings};

#[cfg(not(target_arch = "wasm32"))]
const DISPLAY_HZ: f64 = 60.0;
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FRAMES: u64 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser)]
#[command(name = "swarm-defender")]
#[command(about = "Let the autopilot play one headless game of Swarm Defender")]
struct Cli {
    /// JSON settings file (defaults are used if it can't be loaded)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Stop after this many 60 Hz frames
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,
    /// Print the final game state as JSON
    #[arg(long)]
    dump: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    log::info!("Swarm Defender (headless) starting with seed {}", settings.seed);

    let mut driver = Driver::new(&settings);
    let mut presenter = HeadlessPresenter::new(Autopilot::new(false));

    let mut frames = 0;
    while frames < cli.frames {
        driver.frame(frames as f64 / DISPLAY_HZ, &mut presenter);
        frames += 1;
        if driver.state.phase == GamePhase::GameOver {
            break;
        }
    }

    let state = &driver.state;
    println!("Status:    {}", presenter.status);
    println!("Frames:    {}", frames);
    println!("Score:     {}", state.score);
    println!("Level:     {}", state.level);
    println!("Lives:     {}", state.lives);
    println!("Destroyed: {}", presenter.enemies_destroyed);
    if let Some(run) = state.last_run {
        println!("Ended by:  {:?}", run.cause);
    }

    if cli.dump {
        match serde_json::to_string_pretty(state) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to serialize final state: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core has no web front-end of its own
}
