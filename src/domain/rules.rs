//! Rules engine seam.
//!
//! The board controller never inspects chess rules itself. It loads positions,
//! attempts moves and asks status questions through [`RulesEngine`], which is
//! backed by shakmaty in the app and by scripted doubles in tests.

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, EnPassantMode, File, Move, Position, Square};

use crate::domain::chess::{
    Coord, MoveIntent, Piece, PieceColor, shakmaty_to_color, shakmaty_to_piece,
};

/// 8x8 snapshot, row 0 = rank 8
pub type BoardGrid = [[Option<Piece>; 8]; 8];

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule applies
const FIFTY_MOVE_HALFMOVES: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// A move the engine accepted and applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub san: String,
}

pub trait RulesEngine {
    /// Replace the current position. On error the position is unchanged.
    fn load(&mut self, fen: &str) -> Result<(), RulesError>;

    /// Apply the move if it is legal. Returns `None` without touching the
    /// position otherwise.
    fn try_move(&mut self, intent: &MoveIntent) -> Option<AppliedMove>;

    fn board(&self) -> BoardGrid;

    fn turn(&self) -> PieceColor;

    fn fen(&self) -> String;

    fn is_checkmate(&self) -> bool;
    /// Fifty-move rule, stalemate, insufficient material or threefold repetition
    fn is_draw(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_check(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;
    fn is_threefold_repetition(&self) -> bool;
}

/// Rules engine backed by shakmaty's standard chess position
pub struct ShakmatyEngine {
    position: Chess,
    /// Repetition keys of every position since the last load, current last
    history: Vec<String>,
}

impl ShakmatyEngine {
    pub fn new() -> Self {
        let position = Chess::default();
        let history = vec![repetition_key(&position)];
        Self { position, history }
    }

    #[cfg(test)]
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let mut engine = Self::new();
        engine.load(fen)?;
        Ok(engine)
    }

    /// Find the legal move matching the intent's squares.
    ///
    /// Castling is matched by the king's destination square (g or c file),
    /// promotions only by the intent's promotion piece.
    fn find_legal_move(&self, intent: &MoveIntent) -> Option<Move> {
        let from_sq = intent.from.to_square();
        let to_sq = intent.to.to_square();

        for m in &self.position.legal_moves() {
            let (move_from, move_to) = match m {
                Move::Normal { from, to, .. } => (*from, *to),
                Move::EnPassant { from, to, .. } => (*from, *to),
                Move::Castle { king, rook, .. } => {
                    let king_dest = if rook.file() == File::H {
                        Square::from_coords(File::G, rook.rank())
                    } else {
                        Square::from_coords(File::C, rook.rank())
                    };
                    (*king, king_dest)
                }
                Move::Put { .. } => continue,
            };

            if move_from != from_sq || move_to != to_sq {
                continue;
            }

            match m.promotion() {
                Some(role) if role != intent.promotion.role() => continue,
                _ => return Some(m.clone()),
            }
        }
        None
    }
}

impl Default for ShakmatyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for ShakmatyEngine {
    fn load(&mut self, fen: &str) -> Result<(), RulesError> {
        let invalid = |reason: String| RulesError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };
        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;

        self.history = vec![repetition_key(&position)];
        self.position = position;
        Ok(())
    }

    fn try_move(&mut self, intent: &MoveIntent) -> Option<AppliedMove> {
        let m = self.find_legal_move(intent)?;
        let san = San::from_move(&self.position, m.clone()).to_string();

        match self.position.clone().play(m) {
            Ok(next) => {
                self.history.push(repetition_key(&next));
                self.position = next;
                Some(AppliedMove { san })
            }
            Err(err) => {
                tracing::warn!("legal move {san} failed to play: {err}");
                None
            }
        }
    }

    fn board(&self) -> BoardGrid {
        let mut grid: BoardGrid = [[None; 8]; 8];
        for coord in Coord::all() {
            grid[coord.row][coord.col] = self
                .position
                .board()
                .piece_at(coord.to_square())
                .map(shakmaty_to_piece);
        }
        grid
    }

    fn turn(&self) -> PieceColor {
        shakmaty_to_color(self.position.turn())
    }

    fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_draw(&self) -> bool {
        self.position.halfmoves() >= FIFTY_MOVE_HALFMOVES
            || self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.history.last() else {
            return false;
        };
        self.history.iter().filter(|key| *key == current).count() >= 3
    }
}

/// Placement, side to move, castling rights and en passant square.
/// Move counters are dropped so repeated positions compare equal.
fn repetition_key(position: &Chess) -> String {
    let fen = Fen::from_position(position, EnPassantMode::Legal).to_string();
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chess::PieceKind;

    fn coord(name: &str) -> Coord {
        let bytes = name.as_bytes();
        let col = (bytes[0] - b'a') as usize;
        let row = 8 - (bytes[1] - b'0') as usize;
        Coord::new(row, col).unwrap()
    }

    fn piece_at(engine: &ShakmatyEngine, name: &str) -> Option<Piece> {
        let at = coord(name);
        engine.board()[at.row][at.col]
    }

    fn play(engine: &mut ShakmatyEngine, from: &str, to: &str) -> bool {
        engine
            .try_move(&MoveIntent::new(coord(from), coord(to)))
            .is_some()
    }

    #[test]
    fn test_start_position_board() {
        let engine = ShakmatyEngine::new();
        let board = engine.board();
        assert_eq!(
            board[0][4],
            Some(Piece::new(PieceKind::King, PieceColor::Black))
        );
        assert_eq!(
            board[7][3],
            Some(Piece::new(PieceKind::Queen, PieceColor::White))
        );
        assert_eq!(
            board[6][0],
            Some(Piece::new(PieceKind::Pawn, PieceColor::White))
        );
        assert!(board[4].iter().all(|sq| sq.is_none()));
        assert_eq!(engine.turn(), PieceColor::White);
        assert_eq!(engine.fen(), START_FEN);
    }

    #[test]
    fn test_legal_move_applies() {
        let mut engine = ShakmatyEngine::new();
        let applied = engine.try_move(&MoveIntent::new(coord("e2"), coord("e4")));
        assert_eq!(
            applied,
            Some(AppliedMove {
                san: "e4".to_string()
            })
        );
        assert!(piece_at(&engine, "e2").is_none());
        assert_eq!(
            piece_at(&engine, "e4"),
            Some(Piece::new(PieceKind::Pawn, PieceColor::White))
        );
        assert_eq!(engine.turn(), PieceColor::Black);
    }

    #[test]
    fn test_illegal_move_leaves_position() {
        let mut engine = ShakmatyEngine::new();
        let before = engine.fen();
        assert!(!play(&mut engine, "e2", "e5"));
        assert!(!play(&mut engine, "e7", "e5")); // not black's turn
        assert!(!play(&mut engine, "e4", "e5")); // empty square
        assert_eq!(engine.fen(), before);
    }

    #[test]
    fn test_castle_by_king_destination() {
        let mut engine = ShakmatyEngine::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(play(&mut engine, "e1", "g1"));
        assert_eq!(
            piece_at(&engine, "g1"),
            Some(Piece::new(PieceKind::King, PieceColor::White))
        );
        assert_eq!(
            piece_at(&engine, "f1"),
            Some(Piece::new(PieceKind::Rook, PieceColor::White))
        );
    }

    #[test]
    fn test_promotes_to_queen() {
        let mut engine = ShakmatyEngine::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        assert!(play(&mut engine, "e7", "e8"));
        assert_eq!(
            piece_at(&engine, "e8"),
            Some(Piece::new(PieceKind::Queen, PieceColor::White))
        );
    }

    #[test]
    fn test_fools_mate() {
        let mut engine = ShakmatyEngine::new();
        assert!(play(&mut engine, "f2", "f3"));
        assert!(play(&mut engine, "e7", "e5"));
        assert!(play(&mut engine, "g2", "g4"));
        assert!(play(&mut engine, "d8", "h4"));
        assert!(engine.is_checkmate());
        assert!(engine.is_check());
        assert!(!engine.is_draw());
    }

    #[test]
    fn test_stalemate_is_draw() {
        let engine = ShakmatyEngine::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(engine.is_stalemate());
        assert!(engine.is_draw());
        assert!(!engine.is_checkmate());
        assert!(!engine.is_check());
    }

    #[test]
    fn test_insufficient_material() {
        let engine = ShakmatyEngine::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(engine.is_insufficient_material());
        assert!(engine.is_draw());
    }

    #[test]
    fn test_fifty_move_rule_is_draw() {
        let engine =
            ShakmatyEngine::from_fen("r3k3/8/8/8/8/8/8/R3K3 w - - 100 80").unwrap();
        assert!(!engine.is_stalemate());
        assert!(!engine.is_insufficient_material());
        assert!(engine.is_draw());
    }

    #[test]
    fn test_threefold_repetition() {
        let mut engine = ShakmatyEngine::new();
        for _ in 0..2 {
            assert!(!engine.is_threefold_repetition());
            assert!(play(&mut engine, "g1", "f3"));
            assert!(play(&mut engine, "g8", "f6"));
            assert!(play(&mut engine, "f3", "g1"));
            assert!(play(&mut engine, "f6", "g8"));
        }
        assert!(engine.is_threefold_repetition());
        assert!(engine.is_draw());
    }

    #[test]
    fn test_load_resets_repetition_history() {
        let mut engine = ShakmatyEngine::new();
        for _ in 0..2 {
            play(&mut engine, "g1", "f3");
            play(&mut engine, "g8", "f6");
            play(&mut engine, "f3", "g1");
            play(&mut engine, "f6", "g8");
        }
        assert!(engine.is_threefold_repetition());
        engine.load(START_FEN).unwrap();
        assert!(!engine.is_threefold_repetition());
    }

    #[test]
    fn test_invalid_fen_keeps_position() {
        let mut engine = ShakmatyEngine::new();
        play(&mut engine, "e2", "e4");
        let before = engine.fen();

        let err = engine.load("not a fen").unwrap_err();
        assert!(matches!(err, RulesError::InvalidFen { .. }));
        assert_eq!(engine.fen(), before);
    }

    #[test]
    fn test_load_replaces_position() {
        let mut engine = ShakmatyEngine::new();
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
        engine.load(fen).unwrap();
        assert_eq!(engine.fen(), fen);
        assert_eq!(
            piece_at(&engine, "e5"),
            Some(Piece::new(PieceKind::Pawn, PieceColor::Black))
        );
    }
}
