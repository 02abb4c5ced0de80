//! Plain-text frame buffer.
//!
//! The buffer mirrors the grid as one glyph per cell. It is synced in full
//! once after seeding and is then kept current by [`CellChange`]
//! notifications, so a generation only touches the glyphs that changed.

use lifegrid_core::{CellChange, CellState, Grid, Listener, Position};

/// Glyph for a live cell.
pub const ALIVE_GLYPH: char = '*';

/// Glyph for a dead cell.
pub const DEAD_GLYPH: char = ' ';

const fn glyph(state: CellState) -> char {
    match state {
        CellState::Dead => DEAD_GLYPH,
        CellState::Alive => ALIVE_GLYPH,
    }
}

/// Text mirror of the grid, updated incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    glyphs: Vec<char>,
    /// Glyph writes since the last [`FrameBuffer::take_redrawn`].
    redrawn: usize,
}

impl FrameBuffer {
    /// A blank frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            glyphs: vec![DEAD_GLYPH; width.saturating_mul(height)],
            redrawn: 0,
        }
    }

    /// Copy every cell state from the grid.
    pub fn sync_from(&mut self, grid: &Grid) {
        self.width = grid.width();
        self.height = grid.height();
        self.glyphs = grid.cells().map(|cell| glyph(cell.state())).collect();
        self.redrawn = self.redrawn.saturating_add(self.glyphs.len());
    }

    /// Redraw one cell. Returns `false` if the position is outside the frame.
    pub fn draw(&mut self, position: Position, state: CellState) -> bool {
        if position.col >= self.width || position.row >= self.height {
            return false;
        }
        let slot = position
            .row
            .checked_mul(self.width)
            .and_then(|offset| offset.checked_add(position.col))
            .and_then(|index| self.glyphs.get_mut(index));
        let Some(slot) = slot else {
            return false;
        };
        *slot = glyph(state);
        self.redrawn = self.redrawn.saturating_add(1);
        true
    }

    /// Glyph currently shown at `position`.
    pub fn glyph_at(&self, position: Position) -> Option<char> {
        if position.col >= self.width {
            return None;
        }
        let index = position.row.checked_mul(self.width)?.checked_add(position.col)?;
        self.glyphs.get(index).copied()
    }

    /// Number of glyph writes since the last call, resetting the counter.
    pub const fn take_redrawn(&mut self) -> usize {
        std::mem::replace(&mut self.redrawn, 0)
    }

    /// Render the frame: one line per row.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.glyphs.len().saturating_add(self.height));
        for row in self.glyphs.chunks(self.width.max(1)) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl Listener<CellChange> for FrameBuffer {
    fn on_notify(&mut self, payload: &CellChange) {
        self.draw(payload.position, payload.state);
    }
}
