//! View models for the side panel and the board overlay.
//!
//! These types are DTOs that prepare a match snapshot for display. They
//! live in the UI layer, not the domain layer, and carry no GPUI types.

use crate::domain::{Piece, PieceColor};

/// One row of the move list: a move number and up to two moves
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRow {
    pub move_num: u32,
    /// None when the game started with Black to move
    pub white: Option<String>,
    pub black: Option<String>,
}

/// Everything the side panel shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidePanelDisplay {
    pub white_name: String,
    pub black_name: String,
    /// "Turn: <name of the player to move>"
    pub turn_line: String,
    pub in_check: bool,
    /// "Status: Check" or "Status: OK"
    pub status_line: String,
    pub move_number_line: String,
    /// File name of the move log, if one is being written
    pub log_file: Option<String>,
    pub rows: Vec<MoveRow>,
    /// "Result: 1-0 (Checkmate)" once the game is over
    pub result_line: Option<String>,
    pub warning: Option<String>,
}

/// Prompt shown over the board while a promotion is pending
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromotionPrompt {
    pub color: PieceColor,
    /// Key letter and the piece it picks, in prompt order
    pub choices: Vec<(char, Piece)>,
}
