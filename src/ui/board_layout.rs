//! Board layout calculations - sizing from the measured panel, and the
//! geometry handed to the match controller for click mapping.

use gpui::{Pixels, Size, px};

use crate::domain::BoardGeometry;
use crate::ui::theme::{MIN_SQUARE_SIZE, PIECE_SCALE};

/// Handles all layout calculations for the chess board
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardLayout {
    pub panel_size: Size<Pixels>,
    /// Board offset from the panel's top-left corner
    pub padding: f32,
}

impl BoardLayout {
    pub fn new(panel_size: Size<Pixels>, padding: f32) -> Self {
        Self {
            panel_size,
            padding,
        }
    }

    /// Panel size that fits a board of `square_size` squares
    pub fn for_square_size(square_size: f32, padding: f32) -> Self {
        let side = px(square_size * 8.0 + padding * 2.0);
        Self::new(
            Size {
                width: side,
                height: side,
            },
            padding,
        )
    }

    /// Calculate square size from measured panel dimensions
    pub fn square_size(&self) -> f32 {
        let panel_width: f32 = self.panel_size.width.into();
        let panel_height: f32 = self.panel_size.height.into();
        let available_width = panel_width - self.padding * 2.0;
        let available_height = panel_height - self.padding * 2.0;
        (available_width.min(available_height) / 8.0).max(MIN_SQUARE_SIZE)
    }

    /// Glyph size based on square size
    pub fn piece_size(&self) -> f32 {
        self.square_size() * PIECE_SCALE
    }

    /// Get the total size of the board (8 squares)
    pub fn board_total_size(&self) -> f32 {
        self.square_size() * 8.0
    }

    /// Geometry for pixel-to-square mapping
    pub fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(self.padding, self.padding, self.square_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_size_from_panel() {
        let layout = BoardLayout::new(
            Size {
                width: px(700.0),
                height: px(500.0),
            },
            20.0,
        );
        assert_eq!(layout.square_size(), 57.5);
        assert_eq!(layout.geometry(), BoardGeometry::new(20.0, 20.0, 57.5));
    }

    #[test]
    fn test_minimum_square_size() {
        let layout = BoardLayout::new(
            Size {
                width: px(100.0),
                height: px(100.0),
            },
            20.0,
        );
        assert_eq!(layout.square_size(), MIN_SQUARE_SIZE);
    }

    #[test]
    fn test_for_square_size_round_trips() {
        let layout = BoardLayout::for_square_size(80.0, 20.0);
        assert_eq!(layout.square_size(), 80.0);
        assert_eq!(layout.board_total_size(), 640.0);
    }
}
