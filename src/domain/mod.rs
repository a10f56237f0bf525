//! Domain layer - chess values, the rules seam and the pieces of the match
//! state machine. No GPUI dependencies.

pub mod chess;
pub mod coords;
pub mod lifecycle;
pub mod resolver;
pub mod rules;
pub mod selection;

pub use chess::{
    Move, Piece, PieceColor, PieceKind, Square, color_from_shakmaty, role_to_kind,
    shakmaty_to_piece,
};
pub use coords::{
    BoardGeometry, pixel_to_square, row_col_to_square, square_to_pixel_center, square_to_row_col,
};
pub use lifecycle::{GameOutcome, ResultCode, Termination};
pub use resolver::Resolution;
pub use rules::{AppliedMove, RulesEngine, ShakmatyRules};
pub use selection::SelectionState;
