//! A single automaton unit.
//!
//! A [`Cell`] knows its own state, the tally of neighbor states delivered to
//! it this generation, the arena indices of its eight neighbors, and the
//! listeners interested in its changes. It never looks at neighbor cells
//! directly: the grid routes each cell's [`Broadcast`] to the neighbors'
//! [`Cell::receive_neighbor_state`], and [`Cell::decide`] works only from the
//! accumulated tally.

use tracing::trace;

use crate::observer::{SharedListener, Subject};
use crate::rule::Transition;
use crate::state::{CellChange, CellState, NeighborTally, Position};
use crate::topology::NEIGHBOR_COUNT;

/// What a cell sends during the broadcast phase: its current state,
/// addressed to each of its neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Broadcast {
    /// The sender's state at the start of the generation.
    pub state: CellState,
    /// Arena indices of the receiving neighbors.
    pub targets: [usize; NEIGHBOR_COUNT],
}

/// One cell of the grid.
#[derive(Debug)]
pub struct Cell {
    state: CellState,
    position: Position,
    tally: NeighborTally,
    /// Arena indices, in [`Direction::ALL`](crate::topology::Direction::ALL) order.
    neighbors: [usize; NEIGHBOR_COUNT],
    changes: Subject<CellChange>,
}

impl Cell {
    /// Create a dead cell with its adjacency already resolved.
    pub(crate) const fn new(position: Position, neighbors: [usize; NEIGHBOR_COUNT]) -> Self {
        Self {
            state: CellState::Dead,
            position,
            tally: NeighborTally::new(),
            neighbors,
            changes: Subject::new(),
        }
    }

    /// Current state.
    pub const fn state(&self) -> CellState {
        self.state
    }

    /// Overwrite the state. Does not broadcast or notify.
    pub const fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    /// Grid coordinates.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Arena indices of the eight neighbors.
    pub const fn neighbors(&self) -> &[usize; NEIGHBOR_COUNT] {
        &self.neighbors
    }

    /// Neighbor states received so far this generation.
    pub const fn tally(&self) -> NeighborTally {
        self.tally
    }

    /// This cell's state addressed to all eight neighbors.
    pub const fn broadcast_state(&self) -> Broadcast {
        Broadcast {
            state: self.state,
            targets: self.neighbors,
        }
    }

    /// Count one neighbor's state toward this generation's tally.
    pub const fn receive_neighbor_state(&mut self, state: CellState) {
        self.tally.record(state);
    }

    /// Apply the transition rule to the accumulated tally.
    ///
    /// Clears the tally, stores the next state, and, when the state changed,
    /// notifies attached listeners with a [`CellChange`]. Returns whether the
    /// state changed.
    pub fn decide(&mut self) -> bool {
        let previous = self.state;
        let transition = Transition::classify(previous, self.tally.alive());
        let next = transition.next_state();

        self.tally.reset();
        self.state = next;

        if next == previous {
            return false;
        }

        trace!(
            position = %self.position,
            ?transition,
            state = %next,
            "cell changed"
        );
        self.changes.notify(&CellChange {
            position: self.position,
            state: next,
        });
        true
    }

    /// Attach a change listener. Returns `false` if it was already attached.
    pub fn attach(&mut self, listener: &SharedListener<CellChange>) -> bool {
        self.changes.attach(listener)
    }

    /// Detach a change listener. No-op when it is not attached.
    pub fn detach(&mut self, listener: &SharedListener<CellChange>) -> bool {
        self.changes.detach(listener)
    }

    /// Number of live change listeners attached to this cell.
    pub fn listener_count(&self) -> usize {
        self.changes.listener_count()
    }
}
