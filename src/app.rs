//! Application setup and window creation.

use gpui::{App, Bounds, Focusable, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;
use tracing::error;

use crate::config::MatchConfig;
use crate::models::GameModel;
use crate::ui::BoardLayout;
use crate::ui::theme::INITIAL_RIGHT_PANEL;
use crate::ui::views::ChessBoardView;

/// Initialize and run the chess application
pub fn run(cx: &mut App, config: MatchConfig) {
    gpui_component::init(cx);

    // Create the match controller
    let model = cx.new(|cx| {
        // flush the move log when the app goes away
        cx.on_app_quit(|game: &mut GameModel, _cx| {
            game.quit();
            async {}
        })
        .detach();
        GameModel::from_config(&config)
    });

    let geometry = config.geometry();
    let layout = BoardLayout::for_square_size(geometry.square_size, geometry.origin_x);
    let window_width: f32 = f32::from(layout.panel_size.width) + INITIAL_RIGHT_PANEL;
    let window_height: f32 = layout.panel_size.height.into();

    let bounds = Bounds::centered(None, size(px(window_width), px(window_height)), cx);
    let opened = cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| ChessBoardView::new(model, layout, cx));
            window.focus(&view.focus_handle(cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    );

    if let Err(e) = opened {
        error!(error = %e, "failed to open window");
        cx.quit();
    }
}
