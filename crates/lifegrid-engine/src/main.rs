//! Engine binary for the Lifegrid simulation.
//!
//! Wires the core grid to a command-driven controller and prints plain-text
//! frames to stdout. Commands are single characters read from stdin, one or
//! more per line. Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `lifegrid-config.yaml` (or the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Build the grid and seed it
//! 4. Create the controller and print the first frame
//! 5. Spawn the stdin command reader
//! 6. Run the loop until quit, a limit, or closed input
//! 7. Log the result

use std::io::Write;
use std::path::{Path, PathBuf};

use lifegrid_core::Grid;
use lifegrid_engine::command::{self, Command};
use lifegrid_engine::config::{DEFAULT_CONFIG_PATH, LoggingConfig, SimulationConfig};
use lifegrid_engine::controller::{Controller, Outcome};
use lifegrid_engine::error::EngineError;
use lifegrid_engine::pattern;
use lifegrid_engine::runner::{self, FrameCallback};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Commands buffered between the stdin reader and the run loop.
const COMMAND_BUFFER: usize = 64;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, seeding, or the run loop fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(EngineError::from)?;
    let result = runtime.block_on(run_engine());
    // The stdin reader may still be parked in a blocking read.
    runtime.shutdown_background();
    result?;
    Ok(())
}

async fn run_engine() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, found) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("lifegrid-engine starting");
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }

    // 3. Build and seed the grid.
    let mut grid = Grid::new(config.grid.width, config.grid.height)?;
    pattern::seed_grid(&mut grid, &config.seed)?;

    // 4. Controller and first frame.
    let mut controller = Controller::new(grid, config.runner.start_running);
    let mut output = StdoutFrames;
    print_frame(&controller);

    // 5. Command reader.
    let (tx, mut rx) = mpsc::channel(COMMAND_BUFFER);
    tokio::spawn(read_commands(tx));

    // 6. Run.
    let result = runner::run(&mut controller, &mut rx, &config.runner, &mut output).await?;

    // 7. Report.
    runner::log_run_end(&result);
    Ok(())
}

/// Load configuration from `path`, falling back to defaults if it is missing.
///
/// The flag reports whether the file was found.
fn load_config(path: &Path) -> Result<(SimulationConfig, bool), EngineError> {
    if path.exists() {
        Ok((SimulationConfig::from_file(path)?, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}

fn init_tracing(logging: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Forward commands from stdin until it closes or the run loop is gone.
async fn read_commands(commands: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("stdin closed");
                return;
            }
            Err(e) => {
                warn!(error = %e, "failed to read stdin");
                return;
            }
        };

        let ignored: String = line
            .chars()
            .filter(|ch| !ch.is_whitespace() && Command::from_char(*ch).is_none())
            .collect();
        if !ignored.is_empty() {
            warn!(ignored = %ignored, "ignoring unbound input characters");
        }

        for command in command::parse_line(&line) {
            if commands.send(command).await.is_err() {
                return;
            }
        }
    }
}

/// Writes each frame and its status line to stdout.
struct StdoutFrames;

impl FrameCallback for StdoutFrames {
    fn on_frame(&mut self, _outcome: &Outcome, controller: &Controller) {
        print_frame(controller);
    }
}

fn print_frame(controller: &Controller) {
    let mut stdout = std::io::stdout().lock();
    let written = write!(stdout, "{}", controller.render())
        .and_then(|()| writeln!(stdout, "{}", controller.status_line()))
        .and_then(|()| stdout.flush());
    if let Err(e) = written {
        warn!(error = %e, "failed to write frame");
    }
    debug!(redrawn = controller.take_redrawn(), "frame written");
}
