//! Shared color constants for the uploader widgets.

use egui::Color32;

/// Veil drawn over banner previews, 50% black.
pub const BANNER_VEIL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128);

/// Icon background when there is neither a preview nor a default.
pub const PLACEHOLDER: Color32 = Color32::from_gray(64);

/// Red color for error dialogs.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);
