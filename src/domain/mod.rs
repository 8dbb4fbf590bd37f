pub mod chess;
pub mod rules;
pub mod status;

#[cfg(test)]
pub mod testing;

pub use chess::{Coord, MoveIntent, MovePayload, Piece, PieceColor, PieceKind, PlayerRole};
pub use rules::{BoardGrid, RulesEngine, RulesError, START_FEN, ShakmatyEngine};
pub use status::{Notice, game_status};
