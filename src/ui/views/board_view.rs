//! Chess board view - the board with click-to-move input, keyboard commands
//! and the promotion overlay.

use gpui::{
    App, Context, Entity, FocusHandle, Focusable, KeyDownEvent, MouseButton, MouseDownEvent,
    Pixels, Subscription, Window, canvas, div, prelude::*, px, rgb, rgba,
};
use gpui_component::resizable::{h_resizable, resizable_panel};
use tracing::error;

use crate::domain::{Square, row_col_to_square};
use crate::models::{EventOutcome, GameModel, InputEvent};
use crate::ui::board_layout::BoardLayout;
use crate::ui::components::{render_piece, render_square};
use crate::ui::display::promotion_prompt;
use crate::ui::theme::{INITIAL_RIGHT_PANEL, LIGHT_SQUARE, OVERLAY_BG, PANEL_BG, TEXT_PRIMARY};
use crate::ui::views::render_side_panel;

/// The main chess board view that observes a GameModel
pub struct ChessBoardView {
    model: Entity<GameModel>,
    layout: BoardLayout,
    /// Board panel width the window opened with
    initial_width: Pixels,
    focus_handle: FocusHandle,
    _subscription: Subscription,
}

impl ChessBoardView {
    pub fn new(model: Entity<GameModel>, layout: BoardLayout, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&model, |_, _, cx| cx.notify());
        Self {
            model,
            layout,
            initial_width: layout.panel_size.width,
            focus_handle: cx.focus_handle(),
            _subscription,
        }
    }
}

impl Focusable for ChessBoardView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

/// Send one event to the controller. Quit and fatal errors end the app.
pub fn dispatch(model: &Entity<GameModel>, event: InputEvent, cx: &mut App) {
    model.update(cx, |game, cx| {
        match game.handle_event(event) {
            Ok(EventOutcome::Quit) => cx.quit(),
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "fatal match error, quitting");
                // flush what was logged so far
                game.quit();
                cx.quit();
            }
        }
        cx.notify();
    });
}

impl Render for ChessBoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let model_down = self.model.clone();
        let model_key = self.model.clone();
        let view_measure = cx.entity().clone();

        let snapshot = self.model.read(cx).snapshot();
        let layout = self.layout;

        let square_size = layout.square_size();
        let piece_size = layout.piece_size();
        let board_total_size = layout.board_total_size();

        let selected = snapshot.selection.selected_square();
        let destinations: Vec<Square> = snapshot.selection.destinations().collect();

        let board = div()
            .flex_shrink_0()
            .flex()
            .flex_col()
            .w(px(board_total_size))
            .h(px(board_total_size))
            .overflow_hidden()
            .rounded_md()
            .children((0..8).map(|row| {
                div().flex().flex_shrink_0().children((0..8).map(|col| {
                    let square = row_col_to_square(row, col);
                    let piece = square.and_then(|sq| snapshot.piece_at(sq));
                    let is_selected = square.is_some() && square == selected;
                    let is_destination = square.is_some_and(|sq| destinations.contains(&sq));
                    render_square(
                        row,
                        col,
                        piece,
                        is_selected,
                        is_destination,
                        square_size,
                        piece_size,
                    )
                }))
            }));

        // Promotion prompt over the board
        let overlay = promotion_prompt(&snapshot.selection).map(|prompt| {
            let choice_size = square_size * 0.9;
            div()
                .absolute()
                .left(px(layout.padding))
                .top(px(layout.padding))
                .w(px(board_total_size))
                .h(px(board_total_size))
                .flex()
                .flex_col()
                .items_center()
                .justify_center()
                .gap_2()
                .bg(rgba(OVERLAY_BG))
                .child(
                    div()
                        .text_color(rgb(TEXT_PRIMARY))
                        .child("Press Q / R / B / N"),
                )
                .child(div().flex().gap_4().children(prompt.choices.into_iter().map(
                    |(key, piece)| {
                        div()
                            .flex()
                            .flex_col()
                            .items_center()
                            .child(
                                div()
                                    .size(px(choice_size))
                                    .rounded_md()
                                    .bg(rgb(LIGHT_SQUARE))
                                    .child(render_piece(piece, choice_size * 0.85)),
                            )
                            .child(
                                div()
                                    .text_color(rgb(TEXT_PRIMARY))
                                    .text_sm()
                                    .child(key.to_string()),
                            )
                    },
                )))
        });

        let board_panel_content = div()
            .id("board-panel")
            .relative()
            .size_full()
            .overflow_hidden()
            .bg(rgb(PANEL_BG))
            .p(px(layout.padding))
            .child(board)
            .when_some(overlay, |el, overlay| el.child(overlay))
            .on_mouse_down(
                MouseButton::Left,
                move |ev: &MouseDownEvent, _window, cx| {
                    let pos = ev.position;
                    dispatch(
                        &model_down,
                        InputEvent::Click {
                            x: pos.x.into(),
                            y: pos.y.into(),
                        },
                        cx,
                    );
                },
            );

        // Canvas to measure actual panel size
        let measure_canvas = canvas(
            move |bounds, _window, cx| {
                view_measure.update(cx, |view, cx| {
                    if view.layout.panel_size != bounds.size {
                        view.layout.panel_size = bounds.size;
                        let geometry = view.layout.geometry();
                        view.model.update(cx, |game, _| game.set_geometry(geometry));
                        cx.notify();
                    }
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        let board_panel_with_measure = div()
            .relative()
            .size_full()
            .child(measure_canvas)
            .child(board_panel_content);

        let side_panel = render_side_panel(&self.model, cx);

        div()
            .size_full()
            .track_focus(&self.focus_handle)
            .on_key_down(move |ev: &KeyDownEvent, _window, cx| {
                dispatch(&model_key, InputEvent::Key(ev.keystroke.key.clone()), cx);
            })
            .child(
                h_resizable("chess-layout")
                    .child(
                        resizable_panel()
                            .size(self.initial_width)
                            .size_range(px(320.)..px(1400.))
                            .child(board_panel_with_measure),
                    )
                    .child(
                        resizable_panel()
                            .size(px(INITIAL_RIGHT_PANEL))
                            .size_range(px(200.)..Pixels::MAX)
                            .child(side_panel),
                    ),
            )
    }
}
