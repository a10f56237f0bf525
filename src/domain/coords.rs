//! Pixel ↔ square mapping for a board drawn with White at the bottom.
//!
//! Screen row 0 is rank 8 and column 0 is the a-file. These are pure
//! functions over a [`BoardGeometry`]; the presentation layer decides the
//! geometry from whatever it measured.

use serde::Serialize;

use crate::domain::Square;

/// Where the board sits in the drawing surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoardGeometry {
    /// Left edge of the a-file
    pub origin_x: f32,
    /// Top edge of the eighth rank
    pub origin_y: f32,
    /// Side length of one square in pixels
    pub square_size: f32,
}

impl BoardGeometry {
    pub fn new(origin_x: f32, origin_y: f32, square_size: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            square_size,
        }
    }

    /// Total size of the board (8 squares)
    pub fn board_size(&self) -> f32 {
        self.square_size * 8.0
    }
}

/// Convert a pixel position to the square under it, if it is on the board
pub fn pixel_to_square(x: f32, y: f32, geometry: &BoardGeometry) -> Option<Square> {
    if !x.is_finite() || !y.is_finite() || !(geometry.square_size > 0.0) {
        return None;
    }

    let board_x = x - geometry.origin_x;
    let board_y = y - geometry.origin_y;
    let board_size = geometry.board_size();

    // half-open: the far edges belong to the neighbouring widget
    if board_x < 0.0 || board_y < 0.0 || board_x >= board_size || board_y >= board_size {
        return None;
    }

    let col = ((board_x / geometry.square_size) as u8).min(7);
    let row = ((board_y / geometry.square_size) as u8).min(7);

    Square::new(col, 7 - row)
}

/// Pixel center of a square, for drawing pieces and markers
pub fn square_to_pixel_center(square: Square, geometry: &BoardGeometry) -> (f32, f32) {
    let col = square.file() as f32;
    let row = (7 - square.rank()) as f32;
    let half = geometry.square_size / 2.0;
    (
        geometry.origin_x + col * geometry.square_size + half,
        geometry.origin_y + row * geometry.square_size + half,
    )
}

/// Screen (row, col) of a square, row 0 at the top
pub fn square_to_row_col(square: Square) -> (usize, usize) {
    ((7 - square.rank()) as usize, square.file() as usize)
}

/// Square at screen (row, col), row 0 at the top
pub fn row_col_to_square(row: usize, col: usize) -> Option<Square> {
    if row < 8 && col < 8 {
        Square::new(col as u8, 7 - row as u8)
    } else {
        None
    }
}
