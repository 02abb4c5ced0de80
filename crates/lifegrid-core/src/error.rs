//! Error types for the `lifegrid-core` crate.
//!
//! Every fallible grid operation returns [`GridError`]. All variants are
//! contract violations reported straight back to the caller; nothing in the
//! core retries or recovers internally.

/// Errors that can occur during grid construction or cell access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Width or height was zero.
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// The cell count `width * height` does not fit in `usize`.
    #[error("grid dimensions {width}x{height} are too large")]
    TooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// A coordinate fell outside `[0, width) x [0, height)`.
    #[error("cell ({col}, {row}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested column.
        col: usize,
        /// Requested row.
        row: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// A raw numeric state outside `{0 = dead, 1 = alive}`.
    #[error("invalid cell state value: {0}")]
    InvalidState(u8),

    /// A state character outside `{'0', '1'}`.
    #[error("invalid cell state character: {0:?}")]
    InvalidStateChar(char),

    /// A state dump whose rows do not all have the same length.
    #[error("ragged state dump: row {row} has {found} cells, expected {expected}")]
    RaggedDump {
        /// The offending row.
        row: usize,
        /// Width taken from the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
}
