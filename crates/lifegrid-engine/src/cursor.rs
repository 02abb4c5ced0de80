//! Edit cursor. Moves wrap around the edges the same way the grid does.

use lifegrid_core::Position;
use lifegrid_core::topology::{wrap_back, wrap_forward};

/// Cursor over a `width` x `height` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: Position,
    width: usize,
    height: usize,
}

impl Cursor {
    /// A cursor at the top-left corner.
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            position: Position::new(0, 0),
            width,
            height,
        }
    }

    /// Current position.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Up one row, wrapping to the bottom.
    pub const fn move_up(&mut self) {
        self.position.row = wrap_back(self.position.row, self.height);
    }

    /// Down one row, wrapping to the top.
    pub const fn move_down(&mut self) {
        self.position.row = wrap_forward(self.position.row, self.height);
    }

    /// Right one column, wrapping to the left edge.
    pub const fn move_right(&mut self) {
        self.position.col = wrap_forward(self.position.col, self.width);
    }

    /// Left one column, wrapping to the right edge.
    pub const fn move_left(&mut self) {
        self.position.col = wrap_back(self.position.col, self.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_within_bounds() {
        let mut cursor = Cursor::new(5, 4);
        cursor.move_right();
        cursor.move_down();
        cursor.move_down();
        assert_eq!(cursor.position(), Position::new(1, 2));
        cursor.move_up();
        cursor.move_left();
        assert_eq!(cursor.position(), Position::new(0, 1));
    }

    #[test]
    fn wraps_at_every_edge() {
        let mut cursor = Cursor::new(5, 4);
        cursor.move_up();
        assert_eq!(cursor.position(), Position::new(0, 3));
        cursor.move_left();
        assert_eq!(cursor.position(), Position::new(4, 3));
        cursor.move_down();
        assert_eq!(cursor.position(), Position::new(4, 0));
        cursor.move_right();
        assert_eq!(cursor.position(), Position::new(0, 0));
    }
}
