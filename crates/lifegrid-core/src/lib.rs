//! Generation engine for Conway's Game of Life on a toroidal grid.
//!
//! The crate owns the data model and the update protocol; rendering, input,
//! and seeding live with the caller and go through the [`Grid`] accessors
//! and change subscriptions.
//!
//! # Modules
//!
//! - [`cell`] -- [`Cell`]: state, neighbor tally, and the decide step.
//! - [`error`] -- [`GridError`] for construction and access failures.
//! - [`grid`] -- [`Grid`]: cell arena, toroidal linking, and the two-phase
//!   generation driver.
//! - [`observer`] -- [`Subject`] and [`Listener`] for push notification.
//! - [`rule`] -- [`Transition`] classification of the Life rule.
//! - [`state`] -- [`CellState`], [`Position`], [`CellChange`], and
//!   [`NeighborTally`].
//! - [`topology`] -- wraparound arithmetic and the eight [`Direction`]s.
//!
//! [`Direction`]: topology::Direction

pub mod cell;
pub mod error;
pub mod grid;
pub mod observer;
pub mod rule;
pub mod state;
pub mod topology;

// Re-export primary types at crate root.
pub use cell::Cell;
pub use error::GridError;
pub use grid::{GenerationSummary, Grid};
pub use observer::{Listener, SharedListener, Subject};
pub use rule::Transition;
pub use state::{CellChange, CellState, NeighborTally, Position};
