//! Run loop driving the controller from a command channel.
//!
//! [`run`] is the top-level async function. Each pass of the loop takes at
//! most one command and hands it to the [`Controller`]:
//!
//! - **Running**: commands are polled without waiting, so a missing command
//!   means "advance one generation". Every generation advanced while running
//!   is followed by the tick interval sleep, whether or not a command caused
//!   it. Passes that do not sleep yield to the runtime so the input task
//!   still gets scheduled on a current-thread runtime.
//! - **Paused**: the loop blocks on the channel until the next command.
//! - **Bounded runs**: stop after `max_generations`, or on extinction when
//!   `stop_on_extinction` is set.
//! - **Input closed**: a paused loop with no remaining input ends cleanly.
//!   A running loop keeps going until another limit is hit.

use lifegrid_core::{GenerationSummary, GridError};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, info};

use crate::command::Command;
use crate::config::RunnerConfig;
use crate::controller::{Controller, Outcome};

/// Errors that can occur during the run loop.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A command could not be applied to the grid.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },
}

/// Why the run loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEndReason {
    /// The `q` command was received.
    Quit,
    /// `max_generations` was reached.
    MaxGenerationsReached,
    /// Every cell died while running.
    Extinction,
    /// Input closed while paused; nothing could resume the run.
    InputClosed,
}

/// Result of a run.
#[derive(Debug)]
pub struct RunResult {
    /// The reason the run ended.
    pub end_reason: RunEndReason,
    /// The last generation summary, if any generation was advanced.
    pub final_summary: Option<GenerationSummary>,
    /// Generations advanced during this run.
    pub generations: u64,
}

/// Callback invoked whenever the frame changed.
pub trait FrameCallback {
    /// Called after an advance or a plot.
    fn on_frame(&mut self, outcome: &Outcome, controller: &Controller);
}

/// A no-op frame callback for testing.
pub struct NoOpCallback;

impl FrameCallback for NoOpCallback {
    fn on_frame(&mut self, _outcome: &Outcome, _controller: &Controller) {}
}

/// Pull the next command according to the current mode.
///
/// Sets `input_open` to `false` once every sender is gone.
async fn next_command(
    controller: &Controller,
    commands: &mut mpsc::Receiver<Command>,
    input_open: &mut bool,
) -> Option<Command> {
    if !*input_open {
        return None;
    }
    if controller.is_running() {
        match commands.try_recv() {
            Ok(command) => Some(command),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                *input_open = false;
                None
            }
        }
    } else {
        let received = commands.recv().await;
        if received.is_none() {
            *input_open = false;
        }
        received
    }
}

/// Run the loop until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if a command cannot be applied to the grid.
pub async fn run(
    controller: &mut Controller,
    commands: &mut mpsc::Receiver<Command>,
    config: &RunnerConfig,
    callback: &mut dyn FrameCallback,
) -> Result<RunResult, RunnerError> {
    let mut last_summary: Option<GenerationSummary> = None;
    let mut generations: u64 = 0;
    let mut input_open = true;

    info!(
        tick_interval_ms = config.tick_interval_ms,
        max_generations = config.max_generations,
        stop_on_extinction = config.stop_on_extinction,
        mode = %controller.mode(),
        "Run loop starting"
    );

    loop {
        let input = next_command(controller, commands, &mut input_open).await;

        if input.is_none() && !input_open && !controller.is_running() {
            info!("Input closed while paused");
            return Ok(RunResult {
                end_reason: RunEndReason::InputClosed,
                final_summary: last_summary,
                generations,
            });
        }

        let outcome = controller.handle(input)?;

        if outcome == Outcome::Quit {
            info!("Quit requested");
            return Ok(RunResult {
                end_reason: RunEndReason::Quit,
                final_summary: last_summary,
                generations,
            });
        }

        if outcome.needs_redraw() {
            callback.on_frame(&outcome, controller);
        }

        let Outcome::Advanced(summary) = outcome else {
            tokio::task::yield_now().await;
            continue;
        };
        generations = generations.saturating_add(1);
        last_summary = Some(summary);
        debug!(
            generation = summary.generation,
            changed = summary.changed,
            alive = summary.alive,
            "Generation complete"
        );

        if config.stop_on_extinction && summary.alive == 0 && controller.is_running() {
            info!(generation = summary.generation, "All cells dead -- extinction");
            return Ok(RunResult {
                end_reason: RunEndReason::Extinction,
                final_summary: last_summary,
                generations,
            });
        }

        if config.max_generations > 0 && summary.generation >= config.max_generations {
            info!(
                generation = summary.generation,
                max_generations = config.max_generations,
                "Generation limit reached"
            );
            return Ok(RunResult {
                end_reason: RunEndReason::MaxGenerationsReached,
                final_summary: last_summary,
                generations,
            });
        }

        if controller.is_running() && config.tick_interval_ms > 0 {
            let interval = tokio::time::Duration::from_millis(config.tick_interval_ms);
            tokio::time::sleep(interval).await;
        } else {
            tokio::task::yield_now().await;
        }
    }
}

/// Log the end of a run.
pub fn log_run_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        generations = result.generations,
        final_generation = result.final_summary.as_ref().map(|s| s.generation),
        final_alive = result.final_summary.as_ref().map(|s| s.alive),
        "Run ended"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lifegrid_core::{CellState, Grid};

    use super::*;

    fn config(max_generations: u64, stop_on_extinction: bool) -> RunnerConfig {
        RunnerConfig {
            tick_interval_ms: 0,
            max_generations,
            start_running: false,
            stop_on_extinction,
        }
    }

    fn blinker(start_running: bool) -> Controller {
        let mut grid = Grid::new(5, 5).unwrap();
        for col in 1..=3 {
            grid.set_cell_state(col, 2, CellState::Alive).unwrap();
        }
        Controller::new(grid, start_running)
    }

    fn channel(commands: &[Command]) -> mpsc::Receiver<Command> {
        let (tx, rx) = mpsc::channel(commands.len().max(1));
        for command in commands {
            tx.try_send(*command).unwrap();
        }
        rx
    }

    struct CountingCallback {
        frames: usize,
    }

    impl FrameCallback for CountingCallback {
        fn on_frame(&mut self, _outcome: &Outcome, _controller: &Controller) {
            self.frames = self.frames.saturating_add(1);
        }
    }

    #[tokio::test]
    async fn quit_ends_run() {
        let mut controller = blinker(false);
        let mut rx = channel(&[Command::Step, Command::Quit]);
        let result = run(&mut controller, &mut rx, &config(0, true), &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, RunEndReason::Quit);
        assert_eq!(result.generations, 1);
    }

    #[tokio::test]
    async fn closed_input_while_paused_ends_run() {
        let mut controller = blinker(false);
        let mut rx = channel(&[Command::CursorDown, Command::Plot]);
        let result = run(&mut controller, &mut rx, &config(0, true), &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, RunEndReason::InputClosed);
        assert_eq!(result.generations, 0);
        assert_eq!(controller.grid().get_cell_state(0, 1), Ok(CellState::Alive));
    }

    #[tokio::test]
    async fn running_stops_at_generation_limit() {
        let mut controller = blinker(true);
        let mut rx = channel(&[]);
        let mut callback = CountingCallback { frames: 0 };
        let result = run(&mut controller, &mut rx, &config(6, true), &mut callback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, RunEndReason::MaxGenerationsReached);
        assert_eq!(result.generations, 6);
        assert_eq!(callback.frames, 6);
        assert_eq!(result.final_summary.map(|s| s.generation), Some(6));
        // Period 2: back to the horizontal phase.
        assert_eq!(controller.grid().get_cell_state(1, 2), Ok(CellState::Alive));
    }

    #[tokio::test]
    async fn start_command_keeps_running_after_input_closes() {
        let mut controller = blinker(false);
        let mut rx = channel(&[Command::Start]);
        let result = run(&mut controller, &mut rx, &config(4, true), &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, RunEndReason::MaxGenerationsReached);
        assert_eq!(result.generations, 4);
    }

    #[tokio::test]
    async fn extinction_ends_running_loop() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set_cell_state(2, 2, CellState::Alive).unwrap();
        let mut controller = Controller::new(grid, true);
        let mut rx = channel(&[]);
        let result = run(&mut controller, &mut rx, &config(0, true), &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, RunEndReason::Extinction);
        assert_eq!(result.generations, 1);
        assert_eq!(result.final_summary.map(|s| s.alive), Some(0));
    }

    #[tokio::test]
    async fn extinction_ignored_when_disabled() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set_cell_state(2, 2, CellState::Alive).unwrap();
        let mut controller = Controller::new(grid, true);
        let mut rx = channel(&[]);
        let result = run(&mut controller, &mut rx, &config(3, false), &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, RunEndReason::MaxGenerationsReached);
        assert_eq!(result.generations, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn running_loop_sleeps_between_generations() {
        let mut controller = blinker(true);
        let mut rx = channel(&[]);
        let paced = RunnerConfig {
            tick_interval_ms: 200,
            ..config(3, true)
        };
        let started = tokio::time::Instant::now();
        let result = run(&mut controller, &mut rx, &paced, &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.generations, 3);
        // Two sleeps: the limit check runs before the third one.
        let elapsed = started.elapsed();
        assert!(elapsed >= tokio::time::Duration::from_millis(400));
        assert!(elapsed < tokio::time::Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn command_mid_run_does_not_skip_tick_interval() {
        let mut controller = blinker(true);
        let mut rx = channel(&[Command::Start]);
        let paced = RunnerConfig {
            tick_interval_ms: 200,
            ..config(3, true)
        };
        let started = tokio::time::Instant::now();
        let result = run(&mut controller, &mut rx, &paced, &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, RunEndReason::MaxGenerationsReached);
        assert_eq!(result.generations, 3);
        // The generation advanced by `s` is paced like the others.
        let elapsed = started.elapsed();
        assert!(elapsed >= tokio::time::Duration::from_millis(400));
        assert!(elapsed < tokio::time::Duration::from_millis(600));
    }

    #[tokio::test]
    async fn quit_reaches_unpaced_running_loop() {
        let mut controller = blinker(true);
        let (tx, mut rx) = mpsc::channel(1);
        tokio::spawn(async move {
            tx.send(Command::Quit).await.unwrap();
            // Keep the sender alive so input never reads as closed.
            std::future::pending::<()>().await;
        });
        let result = run(&mut controller, &mut rx, &config(50_000, true), &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, RunEndReason::Quit);
        assert!(result.generations < 50_000);
    }
}
