//! Configuration loading and typed config structures for the Lifegrid engine.
//!
//! The configuration lives in `lifegrid-config.yaml` in the working
//! directory. Every field has a default, so a missing file or a partial file
//! is valid; only unreadable files and malformed YAML are errors.

use std::path::Path;

use serde::Deserialize;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "lifegrid-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration. Mirrors `lifegrid-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Grid dimensions.
    #[serde(default)]
    pub grid: GridConfig,

    /// Run loop pacing and limits.
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Initial population.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Grid dimensions. Terminal-sized by default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    /// Number of columns.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Number of rows.
    #[serde(default = "default_height")]
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Run loop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunnerConfig {
    /// Delay between generations while running, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many generations (0 = unlimited).
    #[serde(default)]
    pub max_generations: u64,

    /// Start advancing immediately instead of waiting for `s`.
    #[serde(default)]
    pub start_running: bool,

    /// Stop once every cell is dead while running.
    #[serde(default = "default_true")]
    pub stop_on_extinction: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_generations: 0,
            start_running: false,
            stop_on_extinction: true,
        }
    }
}

/// Initial population: named patterns at fixed origins, plus an optional
/// random soup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedConfig {
    /// Patterns to stamp onto the grid, in order.
    #[serde(default = "default_placements")]
    pub placements: Vec<Placement>,

    /// Random fill applied before the placements.
    #[serde(default)]
    pub soup: Option<SoupConfig>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            placements: default_placements(),
            soup: None,
        }
    }
}

/// One pattern stamped at a top-left origin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Placement {
    /// Pattern name from the built-in catalogue.
    pub pattern: String,
    /// Origin column.
    pub col: usize,
    /// Origin row.
    pub row: usize,
}

impl Placement {
    fn new(pattern: &str, col: usize, row: usize) -> Self {
        Self {
            pattern: pattern.to_owned(),
            col,
            row,
        }
    }
}

/// Deterministic random fill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SoupConfig {
    /// Chance of each cell starting alive, 0-100.
    #[serde(default = "default_density_percent")]
    pub density_percent: u8,

    /// RNG seed for reproducible soups.
    #[serde(default = "default_rng_seed")]
    pub rng_seed: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (required by serde)
// ---------------------------------------------------------------------------

const fn default_width() -> usize {
    80
}

const fn default_height() -> usize {
    24
}

const fn default_tick_interval_ms() -> u64 {
    200
}

const fn default_true() -> bool {
    true
}

const fn default_density_percent() -> u8 {
    25
}

const fn default_rng_seed() -> u64 {
    42
}

fn default_log_level() -> String {
    "info".to_owned()
}

/// The classic opening board: three still lifes, four blinkers, a glider.
fn default_placements() -> Vec<Placement> {
    vec![
        Placement::new("beehive", 2, 1),
        Placement::new("block", 3, 5),
        Placement::new("boat", 2, 8),
        Placement::new("blinker-vertical", 10, 1),
        Placement::new("blinker", 6, 5),
        Placement::new("blinker", 12, 5),
        Placement::new("blinker-vertical", 10, 7),
        Placement::new("glider", 1, 15),
    ]
}
