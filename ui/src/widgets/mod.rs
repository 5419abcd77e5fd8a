mod attachment_button;
mod error_screen;
mod file_uploader;

use std::future::Future;

pub use attachment_button::{attachment_button, glyph_text};
pub use error_screen::{ChannelErrorPresenter, ErrorScreenState, create_error_channel, error_screen};
pub use file_uploader::file_uploader;

/// Runs a controller action on the tokio runtime and repaints when it settles.
pub(crate) fn spawn_action<F>(ctx: &egui::Context, action: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let ctx = ctx.clone();
    tokio::spawn(async move {
        action.await;
        ctx.request_repaint();
    });
}
