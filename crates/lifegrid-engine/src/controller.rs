//! Controller: turns commands into grid edits and generation advances.
//!
//! The controller owns the grid, the edit cursor, and the frame buffer. The
//! frame is subscribed to every cell at construction and synced in full once,
//! so afterwards it only redraws what the grid reports as changed. Plots go
//! through the grid's raw toggle, which does not notify, so the controller
//! redraws the plotted cell itself.
//!
//! Run state is sticky: after `s` the grid keeps advancing on every tick
//! without further input, and after `p` it stays still. Cursor moves and
//! plots do not change it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use lifegrid_core::{CellChange, GenerationSummary, Grid, GridError, Position, SharedListener};
use tracing::{debug, info};

use crate::command::Command;
use crate::cursor::Cursor;
use crate::frame::FrameBuffer;

/// Whether generations advance without input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Waiting for commands.
    Paused,
    /// Advancing one generation per tick.
    Running,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paused => f.write_str("paused"),
            Self::Running => f.write_str("running"),
        }
    }
}

/// What one [`Controller::handle`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing happened (paused, no input).
    Idle,
    /// One generation was advanced.
    Advanced(GenerationSummary),
    /// The cell under the cursor was toggled.
    Plotted(CellChange),
    /// The cursor moved.
    Moved(Position),
    /// The run mode changed without advancing.
    ModeChanged(Mode),
    /// The user asked to quit.
    Quit,
}

impl Outcome {
    /// Whether the frame changed and should be shown again.
    pub const fn needs_redraw(&self) -> bool {
        matches!(self, Self::Advanced(_) | Self::Plotted(_))
    }
}

/// Owns the grid and applies commands to it.
#[derive(Debug)]
pub struct Controller {
    grid: Grid,
    frame: Rc<RefCell<FrameBuffer>>,
    cursor: Cursor,
    mode: Mode,
}

impl Controller {
    /// Take ownership of a seeded grid, subscribe the frame buffer, and sync
    /// it with the grid.
    pub fn new(mut grid: Grid, start_running: bool) -> Self {
        let frame = Rc::new(RefCell::new(FrameBuffer::new(grid.width(), grid.height())));
        frame.borrow_mut().sync_from(&grid);
        let listener: SharedListener<CellChange> = frame.clone();
        grid.subscribe(&listener);

        let cursor = Cursor::new(grid.width(), grid.height());
        let mode = if start_running {
            Mode::Running
        } else {
            Mode::Paused
        };
        info!(
            width = grid.width(),
            height = grid.height(),
            alive = grid.alive_count(),
            %mode,
            "controller ready"
        );
        Self {
            grid,
            frame,
            cursor,
            mode,
        }
    }

    /// Apply one input, or continue in the current mode when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if a plot addresses a cell outside the grid.
    pub fn handle(&mut self, input: Option<Command>) -> Result<Outcome, GridError> {
        let Some(command) = input else {
            return Ok(match self.mode {
                Mode::Running => Outcome::Advanced(self.advance()),
                Mode::Paused => Outcome::Idle,
            });
        };

        debug!(?command, "command received");
        let outcome = match command {
            Command::Quit => Outcome::Quit,
            Command::Pause => {
                self.set_mode(Mode::Paused);
                Outcome::ModeChanged(Mode::Paused)
            }
            Command::Start => {
                self.set_mode(Mode::Running);
                Outcome::Advanced(self.advance())
            }
            Command::Step => {
                self.set_mode(Mode::Paused);
                Outcome::Advanced(self.advance())
            }
            Command::CursorUp => self.move_cursor(Cursor::move_up),
            Command::CursorDown => self.move_cursor(Cursor::move_down),
            Command::CursorRight => self.move_cursor(Cursor::move_right),
            Command::CursorLeft => self.move_cursor(Cursor::move_left),
            Command::Plot => Outcome::Plotted(self.plot()?),
        };
        Ok(outcome)
    }

    fn advance(&mut self) -> GenerationSummary {
        self.grid.advance_generation()
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            info!(generation = self.grid.generation(), %mode, "mode changed");
        }
        self.mode = mode;
    }

    fn move_cursor(&mut self, step: fn(&mut Cursor)) -> Outcome {
        step(&mut self.cursor);
        Outcome::Moved(self.cursor.position())
    }

    fn plot(&mut self) -> Result<CellChange, GridError> {
        let position = self.cursor.position();
        let state = self.grid.toggle_cell(position.col, position.row)?;
        self.frame.borrow_mut().draw(position, state);
        debug!(%position, %state, "cell plotted");
        Ok(CellChange { position, state })
    }

    /// The grid being driven.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current cursor position.
    pub const fn cursor(&self) -> Position {
        self.cursor.position()
    }

    /// Current run mode.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether generations advance without input.
    pub const fn is_running(&self) -> bool {
        matches!(self.mode, Mode::Running)
    }

    /// Current frame text.
    pub fn render(&self) -> String {
        self.frame.borrow().render()
    }

    /// Glyph writes since the last call.
    pub fn take_redrawn(&self) -> usize {
        self.frame.borrow_mut().take_redrawn()
    }

    /// One-line summary shown under the frame.
    pub fn status_line(&self) -> String {
        format!(
            "generation {} | alive {} | cursor {} | {}",
            self.grid.generation(),
            self.grid.alive_count(),
            self.cursor.position(),
            self.mode
        )
    }
}
