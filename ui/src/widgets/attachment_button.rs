use egui::{Response, RichText, Sense, Ui};
use fileup_business::{AttachmentGlyph, UploadController, UploaderVisual};

use super::spawn_action;

const GLYPH_SIZE: f32 = 24.0;

/// Glyph text for each attachment state.
pub fn glyph_text(glyph: AttachmentGlyph) -> &'static str {
    match glyph {
        AttachmentGlyph::Cancel => "⊗",
        AttachmentGlyph::Detach => "❌",
        AttachmentGlyph::Attach => "➕",
    }
}

/// Renders the attachment glyph; a click cancels, detaches or picks files.
pub fn attachment_button(controller: &UploadController, ui: &mut Ui) -> Response {
    let UploaderVisual::Attachment { glyph, size } = controller.visual() else {
        return super::file_uploader(controller, ui);
    };

    let hover = match glyph {
        AttachmentGlyph::Cancel => "Cancel upload",
        AttachmentGlyph::Detach => "Remove attachments",
        AttachmentGlyph::Attach => "Attach files",
    };

    let response = ui
        .add(
            egui::Label::new(RichText::new(glyph_text(glyph)).size(size.unwrap_or(GLYPH_SIZE)))
                .selectable(false)
                .sense(Sense::click()),
        )
        .on_hover_text(hover);

    if response.clicked() {
        let controller = controller.clone();
        spawn_action(ui.ctx(), async move { controller.remove_or_upload().await });
    }

    response
}
