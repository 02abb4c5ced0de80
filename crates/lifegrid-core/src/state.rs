//! Value types shared by cells, the grid, and listeners.
//!
//! - [`CellState`] -- the two-valued automaton state.
//! - [`Position`] -- immutable `(col, row)` coordinates of a cell.
//! - [`CellChange`] -- payload pushed to change listeners.
//! - [`NeighborTally`] -- per-generation count of neighbor states.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// State of a single cell.
///
/// Only two values exist. Raw input (numbers or dump characters) is
/// converted through [`TryFrom`], which is where anything else is rejected.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// The cell is empty.
    #[default]
    Dead,
    /// The cell is populated.
    Alive,
}

impl CellState {
    /// Return `true` for [`CellState::Alive`].
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Return the opposite state.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dead => Self::Alive,
            Self::Alive => Self::Dead,
        }
    }

    /// Digit used by state dumps: `'0'` dead, `'1'` alive.
    pub const fn as_digit(self) -> char {
        match self {
            Self::Dead => '0',
            Self::Alive => '1',
        }
    }
}

impl TryFrom<u8> for CellState {
    type Error = GridError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Dead),
            1 => Ok(Self::Alive),
            other => Err(GridError::InvalidState(other)),
        }
    }
}

impl TryFrom<char> for CellState {
    type Error = GridError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '0' => Ok(Self::Dead),
            '1' => Ok(Self::Alive),
            other => Err(GridError::InvalidStateChar(other)),
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dead => f.write_str("dead"),
            Self::Alive => f.write_str("alive"),
        }
    }
}

/// Grid coordinates of a cell. Fixed when the cell is created.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    /// Column, `0..width`.
    pub col: usize,
    /// Row, `0..height`.
    pub row: usize,
}

impl Position {
    /// Create a position from a column and a row.
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A cell changed state during a generation's decide phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellChange {
    /// Which cell changed.
    pub position: Position,
    /// The state it changed to.
    pub state: CellState,
}

/// Count of neighbor states delivered to a cell in the current generation.
///
/// Filled during the broadcast phase, read and cleared by
/// [`Cell::decide`](crate::cell::Cell::decide). Counts saturate rather
/// than wrap; a cell only ever receives eight deliveries per generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborTally {
    dead: u8,
    alive: u8,
}

impl NeighborTally {
    /// An empty tally.
    pub const fn new() -> Self {
        Self { dead: 0, alive: 0 }
    }

    /// Record one delivered neighbor state.
    pub const fn record(&mut self, state: CellState) {
        match state {
            CellState::Dead => self.dead = self.dead.saturating_add(1),
            CellState::Alive => self.alive = self.alive.saturating_add(1),
        }
    }

    /// Number of deliveries of `state`.
    pub const fn count(&self, state: CellState) -> u8 {
        match state {
            CellState::Dead => self.dead,
            CellState::Alive => self.alive,
        }
    }

    /// Number of live neighbors recorded.
    pub const fn alive(&self) -> u8 {
        self.alive
    }

    /// Total deliveries recorded.
    pub const fn total(&self) -> u8 {
        self.dead.saturating_add(self.alive)
    }

    /// Zero every count.
    pub const fn reset(&mut self) {
        self.dead = 0;
        self.alive = 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn state_from_raw_values() {
        assert_eq!(CellState::try_from(0_u8), Ok(CellState::Dead));
        assert_eq!(CellState::try_from(1_u8), Ok(CellState::Alive));
        assert_eq!(CellState::try_from(2_u8), Err(GridError::InvalidState(2)));
    }

    #[test]
    fn state_from_dump_chars() {
        assert_eq!(CellState::try_from('0'), Ok(CellState::Dead));
        assert_eq!(CellState::try_from('1'), Ok(CellState::Alive));
        assert_eq!(
            CellState::try_from('*'),
            Err(GridError::InvalidStateChar('*'))
        );
    }

    #[test]
    fn toggled_flips() {
        assert_eq!(CellState::Dead.toggled(), CellState::Alive);
        assert_eq!(CellState::Alive.toggled(), CellState::Dead);
    }

    #[test]
    fn state_serializes_snake_case() {
        let json = serde_json::to_string(&CellState::Alive).unwrap();
        assert_eq!(json, "\"alive\"");
        let back: CellState = serde_json::from_str("\"dead\"").unwrap();
        assert_eq!(back, CellState::Dead);
    }

    #[test]
    fn invalid_state_name_rejected() {
        let parsed: Result<CellState, _> = serde_json::from_str("\"zombie\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn tally_counts_and_resets() {
        let mut tally = NeighborTally::new();
        tally.record(CellState::Alive);
        tally.record(CellState::Alive);
        tally.record(CellState::Dead);
        assert_eq!(tally.alive(), 2);
        assert_eq!(tally.count(CellState::Dead), 1);
        assert_eq!(tally.total(), 3);

        tally.reset();
        assert_eq!(tally, NeighborTally::new());
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(3, 7).to_string(), "(3, 7)");
    }
}
