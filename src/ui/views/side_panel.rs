//! Side panel - players, game status, key help, the move list and the result.

use gpui::{App, Div, Entity, SharedString, div, prelude::*, px, rgb};
use gpui_component::button::{Button, ButtonVariants};

use crate::models::{GameModel, InputEvent};
use crate::ui::display::{KEY_HELP, side_panel_display};
use crate::ui::theme::{
    BORDER_COLOR, MOVE_LIST_BG, PANEL_BG, TEXT_CHECK, TEXT_PRIMARY, TEXT_SECONDARY, TEXT_WARNING,
};
use crate::ui::view_models::MoveRow;
use crate::ui::views::dispatch;

const PANEL_PADDING: f32 = 20.0;

/// Render the side panel for a given game model.
pub fn render_side_panel(model: &Entity<GameModel>, cx: &App) -> Div {
    let display = side_panel_display(&model.read(cx).snapshot());
    let model_restart = model.clone();

    let status_color = if display.in_check {
        TEXT_CHECK
    } else {
        TEXT_PRIMARY
    };

    let header = div()
        .flex()
        .flex_col()
        .gap_1()
        .text_color(rgb(TEXT_PRIMARY))
        .child(format!("White: {}", display.white_name))
        .child(format!("Black: {}", display.black_name))
        .child(div().mt_2().child(display.turn_line))
        .child(div().text_color(rgb(status_color)).child(display.status_line))
        .child(display.move_number_line);

    let key_help = div()
        .flex()
        .flex_col()
        .text_sm()
        .text_color(rgb(TEXT_SECONDARY))
        .children(KEY_HELP.iter().map(|line| div().child(*line)))
        .when_some(display.log_file, |el, name| {
            el.child(div().mt_1().child(format!("Log: {name}")))
        });

    let moves_content = if display.rows.is_empty() {
        div().text_color(rgb(TEXT_SECONDARY)).child("No moves yet")
    } else {
        div()
            .flex()
            .flex_col()
            .gap_1()
            .children(display.rows.iter().map(render_move_row))
    };

    let move_list = div()
        .flex_1()
        .min_h_0()
        .flex()
        .flex_col()
        .bg(rgb(MOVE_LIST_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .overflow_hidden()
        // Header (fixed)
        .child(
            div()
                .p_4()
                .pb_2()
                .text_color(rgb(TEXT_PRIMARY))
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child("Move History"),
        )
        // Scrollable moves content
        .child(
            div()
                .id("move-list-scroll")
                .flex_1()
                .overflow_y_scroll()
                .p_4()
                .pt_2()
                .child(moves_content),
        )
        .when_some(display.result_line, |el, result| {
            el.child(
                div()
                    .p_3()
                    .border_t_1()
                    .border_color(rgb(BORDER_COLOR))
                    .text_color(rgb(TEXT_PRIMARY))
                    .child(result),
            )
        });

    let restart_button = Button::new("restart-match")
        .label("Restart")
        .primary()
        .compact()
        .on_click(move |_, _, cx| dispatch(&model_restart, InputEvent::Restart, cx));

    div()
        .size_full()
        .flex()
        .flex_col()
        .gap_3()
        .bg(rgb(PANEL_BG))
        .p(px(PANEL_PADDING))
        .child(header)
        .child(key_help)
        .child(move_list)
        .when_some(display.warning, |el, warning| {
            el.child(
                div()
                    .text_sm()
                    .text_color(rgb(TEXT_WARNING))
                    .child(SharedString::from(warning)),
            )
        })
        .child(div().flex().justify_end().child(restart_button))
}

fn render_move_row(row: &MoveRow) -> Div {
    let white = row.white.clone().unwrap_or_else(|| "...".to_string());

    div()
        .flex()
        .items_center()
        .gap_2()
        .text_sm()
        .child(
            div()
                .text_color(rgb(TEXT_SECONDARY))
                .w(px(40.0))
                .child(format!("{}.", row.move_num)),
        )
        .child(div().text_color(rgb(TEXT_PRIMARY)).flex_1().child(white))
        .when_some(row.black.clone(), |el, black| {
            el.child(div().text_color(rgb(TEXT_PRIMARY)).flex_1().child(black))
        })
}
