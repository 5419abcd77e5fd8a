use egui::{RichText, Ui};

use crate::{state::State, widgets};

pub struct FileupApp {
    state: State,
}

impl FileupApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for FileupApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Fileup").strong());
                ui.label(RichText::new(self.state.autumn_url()).small().weak());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            profile_page(ui, &mut self.state);
        });
    }
}

/// Banner, avatar and attachment controls plus the error dialog.
pub fn profile_page(ui: &mut Ui, state: &mut State) {
    state.sync();

    ui.heading("Profile");
    ui.add_space(8.0);

    widgets::file_uploader(&state.banner, ui);
    ui.add_space(8.0);
    widgets::file_uploader(&state.avatar, ui);

    ui.separator();

    ui.horizontal(|ui| {
        widgets::attachment_button(&state.attachments, ui);

        for file in &state.profile.attachments {
            ui.label(format!("📎 {}", file.name()));
        }

        let can_send = !state.profile.attachments.is_empty() && !state.profile.sending;
        if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() {
            state.send_attachments();
        }
    });

    for id in &state.profile.sent {
        ui.label(RichText::new(format!("Sent {id}")).small());
    }

    widgets::error_screen(ui.ctx(), &mut state.error_screen);
}
