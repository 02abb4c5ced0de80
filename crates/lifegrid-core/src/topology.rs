//! Toroidal neighborhood arithmetic.
//!
//! Each axis wraps independently: stepping back from index `0` lands on
//! `max - 1`, stepping forward from `max - 1` lands on `0`. The eight
//! [`Direction`]s are resolved with these steps once, when the grid links its
//! cells; nothing recomputes coordinates afterwards.
//!
//! On axes shorter than three cells the same coordinate is reached by more
//! than one step. That is kept as is: a cell on a 1-wide axis is its own
//! left and right neighbor, and duplicate neighbors are counted once per
//! direction.

use crate::state::Position;

/// Number of neighbors every cell has.
pub const NEIGHBOR_COUNT: usize = 8;

/// Relative movement along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Toward index `0`, wrapping to `max - 1`.
    Back,
    /// No movement.
    Stay,
    /// Toward `max - 1`, wrapping to `0`.
    Forward,
}

impl Step {
    /// Apply this step to `index` on an axis of length `max`.
    pub const fn apply(self, index: usize, max: usize) -> usize {
        match self {
            Self::Back => wrap_back(index, max),
            Self::Stay => index,
            Self::Forward => wrap_forward(index, max),
        }
    }
}

/// One of the eight compass directions around a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Up and left.
    NorthWest,
    /// Up.
    North,
    /// Up and right.
    NorthEast,
    /// Left.
    West,
    /// Right.
    East,
    /// Down and left.
    SouthWest,
    /// Down.
    South,
    /// Down and right.
    SouthEast,
}

impl Direction {
    /// All directions in row-major order around the center.
    pub const ALL: [Self; NEIGHBOR_COUNT] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::West,
        Self::East,
        Self::SouthWest,
        Self::South,
        Self::SouthEast,
    ];

    /// Column and row steps for this direction. Rows grow downward.
    pub const fn steps(self) -> (Step, Step) {
        match self {
            Self::NorthWest => (Step::Back, Step::Back),
            Self::North => (Step::Stay, Step::Back),
            Self::NorthEast => (Step::Forward, Step::Back),
            Self::West => (Step::Back, Step::Stay),
            Self::East => (Step::Forward, Step::Stay),
            Self::SouthWest => (Step::Back, Step::Forward),
            Self::South => (Step::Stay, Step::Forward),
            Self::SouthEast => (Step::Forward, Step::Forward),
        }
    }
}

/// Step back along an axis of length `max`, wrapping `0` to `max - 1`.
pub const fn wrap_back(index: usize, max: usize) -> usize {
    match index.checked_sub(1) {
        Some(prev) => prev,
        None => max.saturating_sub(1),
    }
}

/// Step forward along an axis of length `max`, wrapping `max - 1` to `0`.
pub const fn wrap_forward(index: usize, max: usize) -> usize {
    match index.checked_add(1) {
        Some(next) if next < max => next,
        _ => 0,
    }
}

/// Position of the neighbor of `origin` in `direction` on a
/// `width` x `height` torus.
pub const fn neighbor_of(
    origin: Position,
    direction: Direction,
    width: usize,
    height: usize,
) -> Position {
    let (col_step, row_step) = direction.steps();
    Position::new(
        col_step.apply(origin.col, width),
        row_step.apply(origin.row, height),
    )
}

/// All eight neighbor positions of `origin`, in [`Direction::ALL`] order.
pub fn neighborhood(origin: Position, width: usize, height: usize) -> [Position; NEIGHBOR_COUNT] {
    Direction::ALL.map(|direction| neighbor_of(origin, direction, width, height))
}
