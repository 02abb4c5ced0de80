//! The toroidal grid and the generation driver.
//!
//! A [`Grid`] owns every [`Cell`] in one flat, row-major arena. Adjacency is
//! resolved once in [`Grid::new`] and stored in each cell as arena indices,
//! so the neighbor graph (which is cyclic) never holds references between
//! cells.
//!
//! # Generation protocol
//!
//! [`Grid::advance_generation`] runs two complete passes:
//!
//! 1. **Broadcast** -- every cell's current state is delivered to the tally of
//!    each of its eight neighbors.
//! 2. **Decide** -- every cell applies the transition rule to its tally.
//!
//! No cell decides before every cell has broadcast, so each generation is
//! computed from the snapshot taken at its start.

use tracing::{debug, info};

use crate::cell::Cell;
use crate::error::GridError;
use crate::observer::SharedListener;
use crate::state::{CellChange, CellState, Position};
use crate::topology::{self, NEIGHBOR_COUNT};

/// Outcome of one [`Grid::advance_generation`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Generation number reached (the first advance returns `1`).
    pub generation: u64,
    /// Cells whose state changed.
    pub changed: usize,
    /// Live cells after the advance.
    pub alive: usize,
}

/// A fixed-size toroidal grid of cells.
#[derive(Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major: the cell at `(col, row)` lives at `row * width + col`.
    cells: Vec<Cell>,
    generation: u64,
}

impl Grid {
    /// Build a `width` x `height` grid of dead cells and link every cell to
    /// its eight toroidal neighbors.
    ///
    /// Dimensions below three are accepted; see [`topology`] for how
    /// duplicate neighbors are handled.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero,
    /// or [`GridError::TooLarge`] if the cell count overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let count = width
            .checked_mul(height)
            .ok_or(GridError::TooLarge { width, height })?;

        let mut cells = Vec::with_capacity(count);
        for row in 0..height {
            for col in 0..width {
                let position = Position::new(col, row);
                let neighbors = link(position, width, height)?;
                cells.push(Cell::new(position, neighbors));
            }
        }

        info!(width, height, cells = count, "grid constructed");
        Ok(Self {
            width,
            height,
            cells,
            generation: 0,
        })
    }

    /// Build a grid from a state dump: one line per row, `0` dead, `1` alive.
    ///
    /// Blank lines and surrounding whitespace are ignored. This is the
    /// inverse of [`Grid::state_dump`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] for an empty dump,
    /// [`GridError::RaggedDump`] if rows differ in length, or
    /// [`GridError::InvalidStateChar`] for any other character.
    pub fn parse_dump(dump: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = dump
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map_or(0, |line| line.chars().count());
        let mut grid = Self::new(width, rows.len())?;

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedDump {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                grid.set_cell_state(col, row, CellState::try_from(ch)?)?;
            }
        }
        Ok(grid)
    }

    // -------------------------------------------------------------------
    // Dimensions
    // -------------------------------------------------------------------

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Generations advanced since construction.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    // -------------------------------------------------------------------
    // Cell access
    // -------------------------------------------------------------------

    /// State of the cell at `(col, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates outside the grid.
    pub fn get_cell_state(&self, col: usize, row: usize) -> Result<CellState, GridError> {
        self.cell(col, row).map(Cell::state)
    }

    /// Overwrite the state of the cell at `(col, row)`.
    ///
    /// A raw write for seeding and editing between generations: nothing is
    /// broadcast and no listener is notified.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates outside the grid.
    pub fn set_cell_state(
        &mut self,
        col: usize,
        row: usize,
        state: CellState,
    ) -> Result<(), GridError> {
        self.cell_mut(col, row)?.set_state(state);
        Ok(())
    }

    /// Flip the cell at `(col, row)` and return its new state.
    ///
    /// Like [`Grid::set_cell_state`], this does not notify listeners.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates outside the grid.
    pub fn toggle_cell(&mut self, col: usize, row: usize) -> Result<CellState, GridError> {
        let cell = self.cell_mut(col, row)?;
        let next = cell.state().toggled();
        cell.set_state(next);
        Ok(next)
    }

    /// Set every cell dead. A raw write; no listener is notified.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.set_state(CellState::Dead);
        }
    }

    /// Read-only access to the cell at `(col, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates outside the grid.
    pub fn cell(&self, col: usize, row: usize) -> Result<&Cell, GridError> {
        let index = self.index_of(col, row)?;
        self.cells
            .get(index)
            .ok_or_else(|| self.out_of_bounds(col, row))
    }

    fn cell_mut(&mut self, col: usize, row: usize) -> Result<&mut Cell, GridError> {
        let index = self.index_of(col, row)?;
        let error = self.out_of_bounds(col, row);
        self.cells.get_mut(index).ok_or(error)
    }

    /// Iterate over rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Number of live cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.state().is_alive()).count()
    }

    /// Positions of all live cells in row-major order.
    pub fn alive_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|cell| cell.state().is_alive())
            .map(Cell::position)
            .collect()
    }

    /// Positions of the eight neighbors of `(col, row)`, in
    /// [`Direction::ALL`](crate::topology::Direction::ALL) order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates outside the grid.
    pub fn neighbor_positions(
        &self,
        col: usize,
        row: usize,
    ) -> Result<[Position; NEIGHBOR_COUNT], GridError> {
        let cell = self.cell(col, row)?;
        let origin = cell.position();
        let neighbors = *cell.neighbors();
        Ok(neighbors.map(|index| self.cells.get(index).map_or(origin, Cell::position)))
    }

    /// Live neighbors of `(col, row)`, read through the adjacency without
    /// touching any tally. Duplicate neighbors on small grids count once per
    /// direction.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates outside the grid.
    pub fn live_neighbor_count(&self, col: usize, row: usize) -> Result<u8, GridError> {
        let cell = self.cell(col, row)?;
        let live = cell
            .neighbors()
            .iter()
            .filter_map(|&index| self.cells.get(index))
            .filter(|neighbor| neighbor.state().is_alive())
            .count();
        Ok(u8::try_from(live).unwrap_or(u8::MAX))
    }

    /// Full-grid dump: one line per row, `0` for dead and `1` for alive.
    pub fn state_dump(&self) -> String {
        let capacity = self.width.saturating_add(1).saturating_mul(self.height);
        let mut out = String::with_capacity(capacity);
        for row in self.rows() {
            out.extend(row.iter().map(|cell| cell.state().as_digit()));
            out.push('\n');
        }
        out
    }

    // -------------------------------------------------------------------
    // Change subscriptions
    // -------------------------------------------------------------------

    /// Attach `listener` to every cell's change notifications.
    ///
    /// The grid keeps only weak handles; drop the `Rc` to stop delivery.
    pub fn subscribe(&mut self, listener: &SharedListener<CellChange>) {
        for cell in &mut self.cells {
            cell.attach(listener);
        }
        debug!(cells = self.cells.len(), "change listener attached to all cells");
    }

    /// Detach `listener` from every cell. No-op for cells it is not on.
    pub fn unsubscribe(&mut self, listener: &SharedListener<CellChange>) {
        for cell in &mut self.cells {
            cell.detach(listener);
        }
    }

    /// Attach `listener` to the cell at `(col, row)` only.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates outside the grid.
    pub fn subscribe_cell(
        &mut self,
        col: usize,
        row: usize,
        listener: &SharedListener<CellChange>,
    ) -> Result<(), GridError> {
        self.cell_mut(col, row)?.attach(listener);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Generation
    // -------------------------------------------------------------------

    /// Advance every cell by one generation.
    ///
    /// Runs the broadcast pass over all cells, then the decide pass over all
    /// cells. Listeners are notified from inside the decide pass, once per
    /// changed cell.
    pub fn advance_generation(&mut self) -> GenerationSummary {
        self.broadcast_phase();
        let changed = self.decide_phase();
        self.generation = self.generation.saturating_add(1);

        let summary = GenerationSummary {
            generation: self.generation,
            changed,
            alive: self.alive_count(),
        };
        debug!(
            generation = summary.generation,
            changed = summary.changed,
            alive = summary.alive,
            "generation advanced"
        );
        summary
    }

    /// Phase 1: deliver every cell's current state to its neighbors.
    fn broadcast_phase(&mut self) {
        for index in 0..self.cells.len() {
            let Some(broadcast) = self.cells.get(index).map(Cell::broadcast_state) else {
                continue;
            };
            for target in broadcast.targets {
                if let Some(neighbor) = self.cells.get_mut(target) {
                    neighbor.receive_neighbor_state(broadcast.state);
                }
            }
        }
    }

    /// Phase 2: every cell decides from its tally. Returns the change count.
    fn decide_phase(&mut self) -> usize {
        let mut changed: usize = 0;
        for cell in &mut self.cells {
            if cell.decide() {
                changed = changed.saturating_add(1);
            }
        }
        changed
    }

    // -------------------------------------------------------------------
    // Indexing
    // -------------------------------------------------------------------

    fn index_of(&self, col: usize, row: usize) -> Result<usize, GridError> {
        if col >= self.width || row >= self.height {
            return Err(self.out_of_bounds(col, row));
        }
        arena_index(col, row, self.width).ok_or_else(|| self.out_of_bounds(col, row))
    }

    const fn out_of_bounds(&self, col: usize, row: usize) -> GridError {
        GridError::OutOfBounds {
            col,
            row,
            width: self.width,
            height: self.height,
        }
    }
}

/// Row-major arena index of `(col, row)`, or `None` on overflow.
fn arena_index(col: usize, row: usize, width: usize) -> Option<usize> {
    row.checked_mul(width)?.checked_add(col)
}

/// Resolve the arena indices of the eight toroidal neighbors of `position`.
fn link(
    position: Position,
    width: usize,
    height: usize,
) -> Result<[usize; NEIGHBOR_COUNT], GridError> {
    let mut indices = [0; NEIGHBOR_COUNT];
    for (slot, neighbor) in indices
        .iter_mut()
        .zip(topology::neighborhood(position, width, height))
    {
        *slot = arena_index(neighbor.col, neighbor.row, width)
            .ok_or(GridError::TooLarge { width, height })?;
    }
    Ok(indices)
}
