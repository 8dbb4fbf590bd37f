//! Application setup and window creation.

use gpui::{App, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;

use crate::config::ClientConfig;
use crate::models::SessionModel;
use crate::ui::views::ChessBoardView;

/// Open the board window and connect to the server
pub fn run(cx: &mut App, config: ClientConfig) -> anyhow::Result<()> {
    gpui_component::init(cx);

    let start_fen = config.start_fen.clone();
    let session = cx.new(|cx| SessionModel::new(config.server_url, start_fen.as_deref(), cx));

    let bounds = Bounds::centered(None, size(px(900.0), px(600.0)), cx);
    cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| ChessBoardView::new(session, cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    )?;
    Ok(())
}
