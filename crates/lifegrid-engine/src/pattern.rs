//! Built-in patterns and initial seeding.
//!
//! Patterns are lists of `(col, row)` offsets from a top-left origin.
//! Seeding only uses the grid's raw writes, so nothing is broadcast and no
//! change listener fires; callers resync their display afterwards.

use lifegrid_core::{CellState, Grid, GridError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::{Placement, SeedConfig, SoupConfig};

/// Errors that can occur while seeding a grid.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// No built-in pattern has this name.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// Soup density above 100 percent.
    #[error("soup density must be 0-100, got {0}")]
    InvalidDensity(u8),

    /// A pattern cell landed outside the grid.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },
}

/// A named set of live cells relative to a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    /// Lookup name used in the config file.
    pub name: &'static str,
    /// `(col, row)` offsets of the live cells.
    pub cells: &'static [(usize, usize)],
}

/// The built-in catalogue.
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "beehive",
        cells: &[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2)],
    },
    Pattern {
        name: "boat",
        cells: &[(1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "blinker-vertical",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
];

/// Look up a built-in pattern by name.
///
/// # Errors
///
/// Returns [`PatternError::UnknownPattern`] if no pattern has that name.
pub fn find(name: &str) -> Result<&'static Pattern, PatternError> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| PatternError::UnknownPattern(name.to_owned()))
}

/// Stamp `pattern` onto the grid with its top-left corner at `(col, row)`.
///
/// Cells are bounds-checked, not wrapped. Returns the number of cells set.
///
/// # Errors
///
/// Returns [`PatternError::Grid`] if any cell falls outside the grid. Cells
/// before the offending one have already been written.
pub fn place(
    grid: &mut Grid,
    pattern: &Pattern,
    col: usize,
    row: usize,
) -> Result<usize, PatternError> {
    for &(dc, dr) in pattern.cells {
        grid.set_cell_state(
            col.saturating_add(dc),
            row.saturating_add(dr),
            CellState::Alive,
        )?;
    }
    debug!(pattern = pattern.name, col, row, "pattern placed");
    Ok(pattern.cells.len())
}

/// Fill the grid randomly at the configured density. Returns live cells set.
///
/// The same seed and grid size always produce the same soup.
///
/// # Errors
///
/// Returns [`PatternError::InvalidDensity`] for densities above 100.
pub fn fill_soup(grid: &mut Grid, soup: &SoupConfig) -> Result<usize, PatternError> {
    if soup.density_percent > 100 {
        return Err(PatternError::InvalidDensity(soup.density_percent));
    }
    let mut rng = StdRng::seed_from_u64(soup.rng_seed);
    let mut alive: usize = 0;
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let roll: u8 = rng.random_range(0..100);
            if roll < soup.density_percent {
                grid.set_cell_state(col, row, CellState::Alive)?;
                alive = alive.saturating_add(1);
            }
        }
    }
    Ok(alive)
}

/// Apply the whole seed section: the soup first, then every placement.
///
/// Returns the number of live cells on the grid afterwards.
///
/// # Errors
///
/// Returns the first [`PatternError`] met; earlier writes are kept.
pub fn seed_grid(grid: &mut Grid, seed: &SeedConfig) -> Result<usize, PatternError> {
    if let Some(soup) = &seed.soup {
        let alive = fill_soup(grid, soup)?;
        info!(
            density_percent = soup.density_percent,
            rng_seed = soup.rng_seed,
            alive,
            "soup seeded"
        );
    }
    for Placement { pattern, col, row } in &seed.placements {
        place(grid, find(pattern)?, *col, *row)?;
    }
    let alive = grid.alive_count();
    info!(placements = seed.placements.len(), alive, "grid seeded");
    Ok(alive)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("Glider").unwrap().name, "glider");
        assert!(matches!(
            find("spaceship"),
            Err(PatternError::UnknownPattern(name)) if name == "spaceship"
        ));
    }

    #[test]
    fn catalogue_names_are_unique() {
        for (i, a) in PATTERNS.iter().enumerate() {
            for b in PATTERNS.iter().skip(i.saturating_add(1)) {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn place_offsets_from_origin() {
        let mut grid = Grid::new(6, 6).unwrap();
        let placed = place(&mut grid, find("block").unwrap(), 2, 3).unwrap();
        assert_eq!(placed, 4);
        assert_eq!(grid.get_cell_state(2, 3), Ok(CellState::Alive));
        assert_eq!(grid.get_cell_state(3, 4), Ok(CellState::Alive));
        assert_eq!(grid.alive_count(), 4);
    }

    #[test]
    fn place_out_of_bounds_is_error() {
        let mut grid = Grid::new(4, 4).unwrap();
        let result = place(&mut grid, find("glider").unwrap(), 2, 2);
        assert!(matches!(result, Err(PatternError::Grid { .. })));
    }

    #[test]
    fn default_seed_fits_default_grid() {
        let mut grid = Grid::new(80, 24).unwrap();
        let alive = seed_grid(&mut grid, &SeedConfig::default()).unwrap();
        // beehive 6 + block 4 + boat 6 + four blinkers 12 + glider 5
        assert_eq!(alive, 33);
        assert_eq!(grid.get_cell_state(3, 1), Ok(CellState::Alive));
        assert_eq!(grid.get_cell_state(10, 9), Ok(CellState::Alive));
        assert_eq!(grid.get_cell_state(3, 17), Ok(CellState::Alive));
    }

    #[test]
    fn default_still_lifes_survive_a_generation() {
        let mut grid = Grid::new(80, 24).unwrap();
        seed_grid(&mut grid, &SeedConfig::default()).unwrap();
        grid.advance_generation();
        // Beehive, block, and boat cells are unchanged.
        for (col, row) in [(3, 1), (5, 2), (3, 5), (4, 6), (3, 8), (4, 9), (2, 10)] {
            assert_eq!(grid.get_cell_state(col, row), Ok(CellState::Alive));
        }
    }

    #[test]
    fn soup_is_deterministic() {
        let soup = SoupConfig {
            density_percent: 40,
            rng_seed: 99,
        };
        let mut a = Grid::new(20, 10).unwrap();
        let mut b = Grid::new(20, 10).unwrap();
        let alive_a = fill_soup(&mut a, &soup).unwrap();
        let alive_b = fill_soup(&mut b, &soup).unwrap();
        assert_eq!(alive_a, alive_b);
        assert_eq!(a.state_dump(), b.state_dump());
    }

    #[test]
    fn soup_density_extremes() {
        let mut empty = Grid::new(10, 10).unwrap();
        let none = SoupConfig {
            density_percent: 0,
            rng_seed: 1,
        };
        assert_eq!(fill_soup(&mut empty, &none).unwrap(), 0);

        let mut full = Grid::new(10, 10).unwrap();
        let all = SoupConfig {
            density_percent: 100,
            rng_seed: 1,
        };
        assert_eq!(fill_soup(&mut full, &all).unwrap(), 100);
    }

    #[test]
    fn soup_rejects_density_over_100() {
        let mut grid = Grid::new(3, 3).unwrap();
        let soup = SoupConfig {
            density_percent: 101,
            rng_seed: 1,
        };
        assert!(matches!(
            fill_soup(&mut grid, &soup),
            Err(PatternError::InvalidDensity(101))
        ));
    }

    #[test]
    fn unknown_placement_fails_seeding() {
        let mut grid = Grid::new(10, 10).unwrap();
        let seed = SeedConfig {
            placements: vec![Placement {
                pattern: "nope".to_owned(),
                col: 0,
                row: 0,
            }],
            soup: None,
        };
        assert!(seed_grid(&mut grid, &seed).is_err());
    }
}
