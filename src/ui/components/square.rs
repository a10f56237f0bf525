//! Square rendering component.

use gpui::{div, prelude::*, px, rgb};

use crate::domain::Piece;
use crate::ui::components::render_piece;
use crate::ui::theme::{DEST_DOT, DEST_DOT_SCALE, SELECTED_OUTLINE, square_color};

/// Render a single board square with optional piece and markers
pub fn render_square(
    row: usize,
    col: usize,
    piece: Option<Piece>,
    is_selected: bool,
    is_destination: bool,
    square_size: f32,
    piece_size: f32,
) -> impl IntoElement {
    let dot_size = square_size * DEST_DOT_SCALE;

    div()
        .relative()
        .flex_shrink_0() // never shrink - maintain aspect ratio
        .size(px(square_size))
        .bg(square_color(row, col))
        .flex()
        .items_center()
        .justify_center()
        .when(is_selected, |el| {
            el.border_2().border_color(rgb(SELECTED_OUTLINE))
        })
        .when_some(piece, |el, p| el.child(render_piece(p, piece_size)))
        .when(is_destination, |el| {
            // dot over the center, also on top of a capturable piece
            el.child(
                div()
                    .absolute()
                    .left(px((square_size - dot_size) / 2.0))
                    .top(px((square_size - dot_size) / 2.0))
                    .size(px(dot_size))
                    .rounded_full()
                    .bg(rgb(DEST_DOT))
                    .opacity(0.7),
            )
        })
}
