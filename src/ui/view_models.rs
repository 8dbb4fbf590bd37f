//! View models for rendering the board.
//!
//! These types are DTOs (Data Transfer Objects) that prepare game state
//! for display in the UI. They carry no toolkit types, so any renderer
//! can draw them.

use crate::domain::{BoardGrid, Coord, Piece, PlayerRole};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Shade {
    Light,
    Dark,
}

/// One square as it should be drawn
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SquareView {
    /// Board coordinate (not screen position)
    pub coord: Coord,
    pub shade: Shade,
    pub piece: Option<Piece>,
    pub draggable: bool,
}

/// A full board laid out in screen order
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardProjection {
    /// Eight rows of eight squares, top-left first
    rows: Vec<Vec<SquareView>>,
    flipped: bool,
}

impl BoardProjection {
    /// Build the projection from scratch for the given board and viewer
    pub fn build(board: &BoardGrid, role: PlayerRole) -> Self {
        let flipped = role.is_flipped();
        let rows = (0..8)
            .map(|display_row| {
                (0..8)
                    .map(|display_col| {
                        let coord = Self::coord_for(display_row, display_col, flipped);
                        let piece = board[coord.row][coord.col];
                        SquareView {
                            coord,
                            shade: if coord.is_light() {
                                Shade::Light
                            } else {
                                Shade::Dark
                            },
                            piece,
                            draggable: piece.is_some_and(|p| role.can_drag(p)),
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows, flipped }
    }

    fn coord_for(display_row: usize, display_col: usize, flipped: bool) -> Coord {
        let coord = Coord {
            row: display_row,
            col: display_col,
        };
        if flipped { coord.mirrored() } else { coord }
    }

    pub fn rows(&self) -> &[Vec<SquareView>] {
        &self.rows
    }

    pub fn squares(&self) -> impl Iterator<Item = &SquareView> {
        self.rows.iter().flatten()
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Board coordinate shown at a screen row/col
    pub fn coord_at(&self, display_row: usize, display_col: usize) -> Option<Coord> {
        self.rows
            .get(display_row)
            .and_then(|row| row.get(display_col))
            .map(|square| square.coord)
    }

    pub fn square(&self, coord: Coord) -> Option<&SquareView> {
        self.squares().find(|square| square.coord == coord)
    }
}

impl Default for BoardProjection {
    fn default() -> Self {
        Self::build(&[[None; 8]; 8], PlayerRole::Spectator)
    }
}
