//! The Game-of-Life transition rule.
//!
//! Four predicates are checked in a fixed priority order and the first match
//! wins. Their antecedents partition on the current state, so at most one can
//! apply to a cell:
//!
//! | Transition        | Current | Live neighbors | Next  |
//! |-------------------|---------|----------------|-------|
//! | `Birth`           | dead    | exactly 3      | alive |
//! | `Survival`        | alive   | 2 or 3         | alive |
//! | `Underpopulation` | alive   | 0 or 1         | dead  |
//! | `Overpopulation`  | alive   | 4 or more      | dead  |
//! | `Dormant`         | dead    | anything but 3 | dead  |

use crate::state::CellState;

/// Live-neighbor count that brings a dead cell to life.
pub const BIRTH_COUNT: u8 = 3;

/// Fewest live neighbors a live cell needs to survive.
pub const SURVIVAL_MIN: u8 = 2;

/// Most live neighbors a live cell can have and still survive.
pub const SURVIVAL_MAX: u8 = 3;

/// Which rule decided a cell's next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Dead cell with exactly three live neighbors comes alive.
    Birth,
    /// Live cell with two or three live neighbors stays alive.
    Survival,
    /// Live cell with at most one live neighbor dies.
    Underpopulation,
    /// Live cell with four or more live neighbors dies.
    Overpopulation,
    /// Dead cell without exactly three live neighbors stays dead.
    Dormant,
}

impl Transition {
    /// Classify a cell by its current state and live-neighbor count.
    pub const fn classify(current: CellState, live_neighbors: u8) -> Self {
        match current {
            CellState::Dead if live_neighbors == BIRTH_COUNT => Self::Birth,
            CellState::Dead => Self::Dormant,
            CellState::Alive
                if live_neighbors >= SURVIVAL_MIN && live_neighbors <= SURVIVAL_MAX =>
            {
                Self::Survival
            }
            CellState::Alive if live_neighbors < SURVIVAL_MIN => Self::Underpopulation,
            CellState::Alive => Self::Overpopulation,
        }
    }

    /// State the cell holds after this transition.
    pub const fn next_state(self) -> CellState {
        match self {
            Self::Birth | Self::Survival => CellState::Alive,
            Self::Underpopulation | Self::Overpopulation | Self::Dormant => CellState::Dead,
        }
    }
}

/// Next state of a cell, as a plain function of its inputs.
pub const fn next_state(current: CellState, live_neighbors: u8) -> CellState {
    Transition::classify(current, live_neighbors).next_state()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_cell_born_with_exactly_three() {
        assert_eq!(Transition::classify(CellState::Dead, 3), Transition::Birth);
        assert_eq!(next_state(CellState::Dead, 3), CellState::Alive);
    }

    #[test]
    fn dead_cell_stays_dead_otherwise() {
        for live in [0, 1, 2, 4, 5, 6, 7, 8] {
            assert_eq!(Transition::classify(CellState::Dead, live), Transition::Dormant);
            assert_eq!(next_state(CellState::Dead, live), CellState::Dead);
        }
    }

    #[test]
    fn live_cell_survives_with_two_or_three() {
        assert_eq!(Transition::classify(CellState::Alive, 2), Transition::Survival);
        assert_eq!(Transition::classify(CellState::Alive, 3), Transition::Survival);
    }

    #[test]
    fn live_cell_underpopulation() {
        assert_eq!(
            Transition::classify(CellState::Alive, 0),
            Transition::Underpopulation
        );
        assert_eq!(
            Transition::classify(CellState::Alive, 1),
            Transition::Underpopulation
        );
        assert_eq!(next_state(CellState::Alive, 1), CellState::Dead);
    }

    #[test]
    fn live_cell_overpopulation() {
        for live in 4..=8 {
            assert_eq!(
                Transition::classify(CellState::Alive, live),
                Transition::Overpopulation
            );
            assert_eq!(next_state(CellState::Alive, live), CellState::Dead);
        }
    }
}
