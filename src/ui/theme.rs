//! Theme constants and colors for the board UI.

use gpui::{Rgba, rgb};

use crate::domain::PieceColor;
use crate::ui::view_models::Shade;

// Layout constants
pub const BOARD_PADDING: f32 = 20.0;
pub const PIECE_SCALE: f32 = 0.8; // glyph size relative to square
pub const GHOST_OPACITY: f32 = 0.4;
pub const MIN_SQUARE_SIZE: f32 = 30.0;

// Initial panel sizes
pub const INITIAL_LEFT_PANEL: f32 = 540.0;
pub const INITIAL_RIGHT_PANEL: f32 = 280.0;

// Board colors
pub const LIGHT_SQUARE: u32 = 0xEFD9B5;
pub const DARK_SQUARE: u32 = 0xB48764;

// Piece colors
pub const WHITE_PIECE: u32 = 0xFFFFFF;
pub const BLACK_PIECE: u32 = 0x1A1A1A;

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;
pub const STATUS_BG: u32 = 0x1e1e1e;
pub const BORDER_COLOR: u32 = 0x4a4a4a;
pub const TEXT_PRIMARY: u32 = 0xffffff;
pub const TEXT_SECONDARY: u32 = 0x888888;
pub const TEXT_ERROR: u32 = 0xE06C75;

// Notice overlay
pub const NOTICE_SCRIM: u32 = 0x000000;
pub const NOTICE_SCRIM_OPACITY: f32 = 0.55;
pub const NOTICE_BG: u32 = 0x333333;

pub fn square_color(shade: Shade) -> Rgba {
    match shade {
        Shade::Light => rgb(LIGHT_SQUARE),
        Shade::Dark => rgb(DARK_SQUARE),
    }
}

pub fn piece_color(color: PieceColor) -> Rgba {
    match color {
        PieceColor::White => rgb(WHITE_PIECE),
        PieceColor::Black => rgb(BLACK_PIECE),
    }
}
