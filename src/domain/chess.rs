//! Pure chess domain types and utilities.
//! No GPUI dependencies - this is the domain layer.

use serde::{Deserialize, Serialize};
use shakmaty::{Color as SColor, File, Rank, Role, Square};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceColor {
    White,
    Black,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    #[cfg(test)]
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// Board glyph for this piece. Color is applied by the renderer.
    pub fn glyph(&self) -> &'static str {
        match self.kind {
            PieceKind::Pawn => "♟",
            PieceKind::Rook => "♜",
            PieceKind::Knight => "♞",
            PieceKind::Bishop => "♝",
            PieceKind::Queen => "♛",
            PieceKind::King => "♚",
        }
    }
}

/// Which side (if any) this client plays, as assigned by the server
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PlayerRole {
    White,
    Black,
    #[default]
    Spectator,
}

impl PlayerRole {
    /// Parse the wire code sent with `playerRole` ("w" or "b")
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "w" => Some(PlayerRole::White),
            "b" => Some(PlayerRole::Black),
            _ => None,
        }
    }

    /// The piece color this role may move, if any
    pub fn color(self) -> Option<PieceColor> {
        match self {
            PlayerRole::White => Some(PieceColor::White),
            PlayerRole::Black => Some(PieceColor::Black),
            PlayerRole::Spectator => None,
        }
    }

    pub fn can_drag(self, piece: Piece) -> bool {
        self.color() == Some(piece.color)
    }

    /// Black sees the board from the other side
    pub fn is_flipped(self) -> bool {
        self == PlayerRole::Black
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerRole::White => f.write_str("white"),
            PlayerRole::Black => f.write_str("black"),
            PlayerRole::Spectator => f.write_str("spectator"),
        }
    }
}

/// A board coordinate: row 0 = rank 8, col 0 = file a
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < 8 && col < 8).then_some(Self { row, col })
    }

    /// Algebraic square name, e.g. row 6 col 4 is "e2"
    pub fn notation(&self) -> String {
        let file = (b'a' + self.col as u8) as char;
        format!("{}{}", file, 8 - self.row)
    }

    /// Whether this square is drawn with the light shade
    pub fn is_light(&self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    pub fn to_square(&self) -> Square {
        to_square(self.row, self.col)
    }

    /// The square at the same place on a board turned 180 degrees
    pub fn mirrored(&self) -> Self {
        Self {
            row: 7 - self.row,
            col: 7 - self.col,
        }
    }

    /// All 64 coordinates in row-major order, a8 first
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..8).flat_map(|row| (0..8).map(move |col| Coord { row, col }))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

/// Piece a pawn turns into on the last rank. Always queen for now.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Promotion {
    #[default]
    Queen,
}

impl Promotion {
    pub fn code(self) -> &'static str {
        match self {
            Promotion::Queen => "q",
        }
    }

    pub fn role(self) -> Role {
        match self {
            Promotion::Queen => Role::Queen,
        }
    }
}

/// A move the local player is trying to make
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveIntent {
    pub from: Coord,
    pub to: Coord,
    pub promotion: Promotion,
}

impl MoveIntent {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            promotion: Promotion::Queen,
        }
    }

    /// Wire form of this move as sent with the `move` event
    pub fn payload(&self) -> MovePayload {
        MovePayload {
            from: self.from.notation(),
            to: self.to.notation(),
            promotion: self.promotion.code().to_string(),
        }
    }
}

impl fmt::Display for MoveIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}={}", self.from, self.to, self.promotion.code())
    }
}

/// `{ from, to, promotion }` in square notation
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MovePayload {
    pub from: String,
    pub to: String,
    pub promotion: String,
}

/// Convert row/col (0-indexed, row 0 = rank 8) to shakmaty Square
pub fn to_square(row: usize, col: usize) -> Square {
    let file = File::new(col as u32);
    let rank = Rank::new(7 - row as u32); // row 0 = rank 8, row 7 = rank 1
    Square::from_coords(file, rank)
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    Piece {
        kind,
        color: shakmaty_to_color(piece.color),
    }
}

pub fn shakmaty_to_color(color: SColor) -> PieceColor {
    match color {
        SColor::White => PieceColor::White,
        SColor::Black => PieceColor::Black,
    }
}
