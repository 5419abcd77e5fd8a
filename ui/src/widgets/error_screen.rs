//! Error dialog fed by uploader controllers.
//!
//! Controllers run on tokio tasks, so descriptions travel to the UI thread
//! over a flume channel and are shown one at a time, oldest first.

use std::collections::VecDeque;

use egui::{Frame, Margin, RichText, Window};
use fileup_business::ErrorPresenter;

use crate::utils::colors::COLOR_RED;

/// Sends error descriptions to the UI thread.
#[derive(Debug, Clone)]
pub struct ChannelErrorPresenter {
    sender: flume::Sender<String>,
}

impl ErrorPresenter for ChannelErrorPresenter {
    fn open_error_screen(&self, description: &str) {
        if self.sender.send(description.to_owned()).is_err() {
            log::warn!("Error screen closed, dropping {description:?}");
        }
    }
}

/// Pending error descriptions, owned by the UI thread.
#[derive(Debug)]
pub struct ErrorScreenState {
    receiver: flume::Receiver<String>,
    pending: VecDeque<String>,
}

impl ErrorScreenState {
    /// Moves every delivered description into the queue.
    pub fn poll(&mut self) {
        self.pending.extend(self.receiver.try_iter());
    }

    /// The description currently on screen.
    pub fn current(&self) -> Option<&str> {
        self.pending.front().map(String::as_str)
    }

    pub fn dismiss(&mut self) {
        self.pending.pop_front();
    }
}

pub fn create_error_channel() -> (ChannelErrorPresenter, ErrorScreenState) {
    let (sender, receiver) = flume::unbounded();
    (
        ChannelErrorPresenter { sender },
        ErrorScreenState {
            receiver,
            pending: VecDeque::new(),
        },
    )
}

/// Renders the error window while a description is pending.
pub fn error_screen(ctx: &egui::Context, state: &mut ErrorScreenState) {
    state.poll();
    let Some(description) = state.current().map(str::to_owned) else {
        return;
    };

    let mut dismissed = false;
    Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                Frame::NONE
                    .fill(COLOR_RED)
                    .inner_margin(Margin::symmetric(8, 4))
                    .corner_radius(4.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(&description).color(egui::Color32::WHITE));
                    });
                ui.add_space(8.0);
                if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        state.dismiss();
    }
}
