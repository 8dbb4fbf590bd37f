//! Notices shown to the player after moves.

use crate::domain::rules::RulesEngine;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Notice {
    InvalidMove,
    Checkmate,
    Draw,
    Stalemate,
    Check,
    InsufficientMaterial,
    ThreefoldRepetition,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::InvalidMove => "Invalid move. Please try again.",
            Notice::Checkmate => "Checkmate! Game over.",
            Notice::Draw => "It's a draw!",
            Notice::Stalemate => "Stalemate! Game over.",
            Notice::Check => "Check!",
            Notice::InsufficientMaterial => "Draw due to insufficient material.",
            Notice::ThreefoldRepetition => "Draw due to threefold repetition.",
        }
    }
}

/// Report the most important condition of the engine's current position.
///
/// Conditions are tried in a fixed order and only the first that holds is
/// reported: checkmate, draw, stalemate, check, insufficient material,
/// threefold repetition.
pub fn game_status(engine: &impl RulesEngine) -> Option<Notice> {
    if engine.is_checkmate() {
        Some(Notice::Checkmate)
    } else if engine.is_draw() {
        Some(Notice::Draw)
    } else if engine.is_stalemate() {
        Some(Notice::Stalemate)
    } else if engine.is_check() {
        Some(Notice::Check)
    } else if engine.is_insufficient_material() {
        Some(Notice::InsufficientMaterial)
    } else if engine.is_threefold_repetition() {
        Some(Notice::ThreefoldRepetition)
    } else {
        None
    }
}
