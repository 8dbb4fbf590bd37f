//! Board geometry inside the board panel.
//!
//! Everything here is in panel pixels and screen squares. Turning a screen
//! square into a board coordinate is left to `BoardProjection`, which knows
//! whether the board is mirrored.

use gpui::{Pixels, Size};

use crate::ui::theme::{BOARD_PADDING, MIN_SQUARE_SIZE, PIECE_SCALE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardLayout {
    width: f32,
    height: f32,
}

impl BoardLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_panel(size: Size<Pixels>) -> Self {
        Self::new(size.width.into(), size.height.into())
    }

    /// Largest square that fits eight across inside the padding
    pub fn square_size(&self) -> f32 {
        let inner = (self.width.min(self.height) - BOARD_PADDING * 2.0) / 8.0;
        inner.max(MIN_SQUARE_SIZE)
    }

    pub fn piece_size(&self) -> f32 {
        self.square_size() * PIECE_SCALE
    }

    pub fn board_total_size(&self) -> f32 {
        self.square_size() * 8.0
    }

    /// Screen (row, col) under a panel point, `None` off the board
    pub fn pos_to_square(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let (bx, by) = (x - BOARD_PADDING, y - BOARD_PADDING);
        let extent = self.board_total_size();
        if !(0.0..extent).contains(&bx) || !(0.0..extent).contains(&by) {
            return None;
        }

        let size = self.square_size();
        let row = ((by / size) as usize).min(7);
        let col = ((bx / size) as usize).min(7);
        Some((row, col))
    }

    /// Panel point at the middle of a screen square
    #[cfg(test)]
    pub fn square_center(&self, row: usize, col: usize) -> (f32, f32) {
        let size = self.square_size();
        (
            BOARD_PADDING + size * (col as f32 + 0.5),
            BOARD_PADDING + size * (row as f32 + 0.5),
        )
    }
}
