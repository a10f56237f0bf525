//! Theme constants and colors for the chess UI.

use gpui::{Rgba, rgb};

// Layout constants
pub const PIECE_SCALE: f32 = 0.8; // glyph size relative to square
pub const MIN_SQUARE_SIZE: f32 = 30.0;
pub const DEST_DOT_SCALE: f32 = 0.28; // destination marker relative to square

// Initial panel sizes
pub const INITIAL_RIGHT_PANEL: f32 = 300.0;

// Board colors
pub const LIGHT_SQUARE: u32 = 0xEFD9B5;
pub const DARK_SQUARE: u32 = 0xB48764;
pub const SELECTED_OUTLINE: u32 = 0xf6f669;
pub const DEST_DOT: u32 = 0x3d6b3d;

// Glyphs are hollow for white and filled for black, so one ink color does
pub const PIECE_INK: u32 = 0x111111;

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;
pub const MOVE_LIST_BG: u32 = 0x1e1e1e;
pub const BORDER_COLOR: u32 = 0x4a4a4a;
pub const TEXT_PRIMARY: u32 = 0xffffff;
pub const TEXT_SECONDARY: u32 = 0x888888;
pub const TEXT_WARNING: u32 = 0xfbbf24;
pub const TEXT_CHECK: u32 = 0xf87171;
pub const OVERLAY_BG: u32 = 0x000000a0; // rgba

/// Get the color for a board square based on its position
pub fn square_color(row: usize, col: usize) -> Rgba {
    if (row + col) % 2 == 0 {
        rgb(LIGHT_SQUARE)
    } else {
        rgb(DARK_SQUARE)
    }
}
