//! Test doubles for the rules engine seam.

use crate::domain::chess::{MoveIntent, PieceColor};
use crate::domain::rules::{AppliedMove, BoardGrid, RulesEngine, RulesError, ShakmatyEngine};

/// Status predicates a [`ScriptedEngine`] reports regardless of position
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusFlags {
    pub checkmate: bool,
    pub draw: bool,
    pub stalemate: bool,
    pub check: bool,
    pub insufficient_material: bool,
    pub threefold_repetition: bool,
}

/// Real board and move legality from shakmaty, scripted status predicates
pub struct ScriptedEngine {
    pub inner: ShakmatyEngine,
    pub flags: StatusFlags,
    pub reject_all: bool,
    pub attempts: Vec<MoveIntent>,
    pub loads: Vec<String>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            inner: ShakmatyEngine::new(),
            flags: StatusFlags::default(),
            reject_all: false,
            attempts: Vec::new(),
            loads: Vec::new(),
        }
    }

    pub fn with_flags(flags: StatusFlags) -> Self {
        Self {
            flags,
            ..Self::new()
        }
    }
}

impl RulesEngine for ScriptedEngine {
    fn load(&mut self, fen: &str) -> Result<(), RulesError> {
        self.loads.push(fen.to_string());
        self.inner.load(fen)
    }

    fn try_move(&mut self, intent: &MoveIntent) -> Option<AppliedMove> {
        self.attempts.push(*intent);
        if self.reject_all {
            return None;
        }
        self.inner.try_move(intent)
    }

    fn board(&self) -> BoardGrid {
        self.inner.board()
    }

    fn turn(&self) -> PieceColor {
        self.inner.turn()
    }

    fn fen(&self) -> String {
        self.inner.fen()
    }

    fn is_checkmate(&self) -> bool {
        self.flags.checkmate
    }

    fn is_draw(&self) -> bool {
        self.flags.draw
    }

    fn is_stalemate(&self) -> bool {
        self.flags.stalemate
    }

    fn is_check(&self) -> bool {
        self.flags.check
    }

    fn is_insufficient_material(&self) -> bool {
        self.flags.insufficient_material
    }

    fn is_threefold_repetition(&self) -> bool {
        self.flags.threefold_repetition
    }
}
