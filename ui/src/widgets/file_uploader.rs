//! Icon and banner uploader widgets.
//!
//! The widget draws the controller's [`ImageVisual`]: the preview area is the
//! primary action, the action label underneath is the secondary one.

use egui::{
    Align2, Color32, FontId, Rect, Response, RichText, Sense, Spinner, Ui, Vec2, WidgetInfo,
    WidgetType,
};
use fileup_business::{Background, ImageVisual, Overlay, UploadController, UploaderVisual};

use super::spawn_action;
use crate::utils::colors::{BANNER_VEIL, PLACEHOLDER};

const ICON_SIZE: f32 = 92.0;
const BANNER_SIZE: Vec2 = Vec2::new(480.0, 120.0);

/// Renders an icon or banner uploader and wires its clicks to `controller`.
///
/// Attachment controllers are drawn by [`super::attachment_button`] instead.
pub fn file_uploader(controller: &UploadController, ui: &mut Ui) -> Response {
    match controller.visual() {
        UploaderVisual::Image(visual) => image_uploader(controller, &visual, ui),
        UploaderVisual::Attachment { .. } => super::attachment_button(controller, ui),
    }
}

fn image_uploader(controller: &UploadController, visual: &ImageVisual, ui: &mut Ui) -> Response {
    let size = if visual.banner {
        Vec2::new(
            visual.width.unwrap_or(BANNER_SIZE.x),
            visual.height.unwrap_or(BANNER_SIZE.y),
        )
    } else {
        Vec2::new(
            visual.width.unwrap_or(ICON_SIZE),
            visual.height.unwrap_or(ICON_SIZE),
        )
    };

    ui.vertical(|ui| {
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        let label = format!("{} uploader", controller.file_type());
        response.widget_info(|| WidgetInfo::labeled(WidgetType::Button, !visual.uploading, &label));

        paint_background(ui, rect, &visual.background, visual.banner);
        paint_overlay(ui, rect, visual.overlay, response.hovered());

        if response.clicked() {
            log::debug!("{label} clicked");
            let controller = controller.clone();
            spawn_action(ui.ctx(), async move { controller.on_click().await });
        }

        let action = ui.add(
            egui::Label::new(RichText::new(visual.action.fallback_text()).strong())
                .selectable(false)
                .sense(Sense::click()),
        );
        if action.clicked() {
            let controller = controller.clone();
            spawn_action(ui.ctx(), async move { controller.remove_or_upload().await });
        }

        ui.label(RichText::new(visual.hint.fallback_text()).small().weak());

        response
    })
    .inner
}

fn paint_background(ui: &Ui, rect: Rect, background: &Background, banner: bool) {
    let radius = if banner { 6.0 } else { rect.width() / 2.0 };
    match background {
        Background::Image(url) => {
            egui::Image::new(url.as_str())
                .corner_radius(radius)
                .paint_at(ui, rect);
        }
        Background::DimmedImage(url) => {
            egui::Image::new(url.as_str())
                .corner_radius(radius)
                .paint_at(ui, rect);
            ui.painter().rect_filled(rect, radius, BANNER_VEIL);
        }
        Background::Black => {
            ui.painter().rect_filled(rect, radius, Color32::BLACK);
        }
        Background::None => {
            ui.painter().rect_filled(rect, radius, PLACEHOLDER);
        }
    }
}

fn paint_overlay(ui: &Ui, rect: Rect, overlay: Overlay, hovered: bool) {
    match overlay {
        Overlay::Spinner => {
            let spinner = Rect::from_center_size(rect.center(), Vec2::splat(24.0));
            Spinner::new().size(24.0).paint_at(ui, spinner);
        }
        Overlay::Edit if hovered => {
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                "✏",
                FontId::proportional(22.0),
                Color32::WHITE,
            );
        }
        Overlay::Edit => {}
    }
}
