//! Error types for the Lifegrid engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup and the run
//! loop, so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The configured grid dimensions were rejected.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: lifegrid_core::GridError,
    },

    /// Seeding the grid failed.
    #[error("pattern error: {source}")]
    Pattern {
        /// The underlying pattern error.
        #[from]
        source: crate::pattern::PatternError,
    },

    /// The run loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: crate::runner::RunnerError,
    },

    /// The async runtime could not be built.
    #[error("runtime error: {source}")]
    Runtime {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
