//! What the uploader widgets draw for a given style and busy state.
//!
//! Widgets never branch on controller internals; they render an
//! [`UploaderVisual`] and route clicks back to the controller.

use crate::props::{AttachmentState, ImagePreview, PresentationStyle};

/// Localizable strings used by the uploader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextId {
    UploadingFile,
    Remove,
    Upload,
    MaxFileSize,
}

impl TextId {
    /// Translation key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::UploadingFile => "app.main.channel.uploading_file",
            Self::Remove => "app.settings.actions.remove",
            Self::Upload => "app.settings.actions.upload",
            Self::MaxFileSize => "app.settings.actions.max_filesize",
        }
    }

    /// English text, with `{filesize}` as the only placeholder.
    pub fn fallback(&self) -> &'static str {
        match self {
            Self::UploadingFile => "Uploading file...",
            Self::Remove => "Remove",
            Self::Upload => "Upload",
            Self::MaxFileSize => "Max File Size: {filesize}",
        }
    }
}

/// A text id plus its interpolation fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub id: TextId,
    pub fields: Vec<(&'static str, String)>,
}

impl Label {
    pub fn new(id: TextId) -> Self {
        Self {
            id,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    /// Renders the English fallback with fields substituted.
    pub fn fallback_text(&self) -> String {
        self.fields
            .iter()
            .fold(self.id.fallback().to_owned(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    Image(String),
    /// Image behind a 50% black veil.
    DimmedImage(String),
    Black,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Spinner,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentGlyph {
    /// Cancel the running upload (XCircle).
    Cancel,
    /// Detach the file (X).
    Detach,
    /// Pick a file (Plus).
    Attach,
}

/// Render model of the icon and banner styles.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageVisual {
    pub banner: bool,
    pub background: Background,
    pub overlay: Overlay,
    pub action: Label,
    pub hint: Label,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub uploading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploaderVisual {
    Image(ImageVisual),
    Attachment {
        glyph: AttachmentGlyph,
        size: Option<f32>,
    },
}

impl UploaderVisual {
    pub(crate) fn new(style: &PresentationStyle, busy: bool, max_file_size: u64) -> Self {
        match style {
            PresentationStyle::Icon(preview) => {
                let background = preview
                    .preview_url
                    .as_ref()
                    .or(preview.default_preview.as_ref())
                    .map_or(Background::None, |url| Background::Image(url.clone()));
                Self::Image(image_visual(preview, false, background, busy, max_file_size))
            }
            PresentationStyle::Banner(preview) => {
                let background = preview
                    .preview_url
                    .as_ref()
                    .map_or(Background::Black, |url| Background::DimmedImage(url.clone()));
                Self::Image(image_visual(preview, true, background, busy, max_file_size))
            }
            PresentationStyle::Attachment(state) => Self::Attachment {
                glyph: attachment_glyph(state),
                size: state.size,
            },
        }
    }
}

fn image_visual(
    preview: &ImagePreview,
    banner: bool,
    background: Background,
    busy: bool,
    max_file_size: u64,
) -> ImageVisual {
    let action = if busy {
        TextId::UploadingFile
    } else if preview.preview_url.is_some() {
        TextId::Remove
    } else {
        TextId::Upload
    };

    ImageVisual {
        banner,
        background,
        overlay: if busy { Overlay::Spinner } else { Overlay::Edit },
        action: Label::new(action),
        hint: Label::new(TextId::MaxFileSize)
            .with_field("filesize", determine_file_size(max_file_size)),
        width: preview.width,
        height: preview.height,
        uploading: busy,
    }
}

fn attachment_glyph(state: &AttachmentState) -> AttachmentGlyph {
    if state.uploading {
        AttachmentGlyph::Cancel
    } else if state.attached {
        AttachmentGlyph::Detach
    } else {
        AttachmentGlyph::Attach
    }
}

/// Human readable size in decimal units, e.g. `20.00 MB`.
pub fn determine_file_size(size: u64) -> String {
    if size > 1_000_000 {
        format!("{:.2} MB", size as f64 / 1e6)
    } else if size > 1_000 {
        format!("{:.2} KB", size as f64 / 1e3)
    } else {
        format!("{size} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview(url: Option<&str>) -> ImagePreview {
        ImagePreview {
            preview_url: url.map(str::to_owned),
            default_preview: Some("default.png".to_owned()),
            width: Some(92.0),
            height: None,
        }
    }

    fn image(visual: UploaderVisual) -> ImageVisual {
        match visual {
            UploaderVisual::Image(image) => image,
            UploaderVisual::Attachment { .. } => panic!("expected an image visual"),
        }
    }

    #[test]
    fn file_size_units() {
        assert_eq!(determine_file_size(512), "512 B");
        assert_eq!(determine_file_size(1_000), "1000 B");
        assert_eq!(determine_file_size(1_500), "1.50 KB");
        assert_eq!(determine_file_size(1_000_000), "1000.00 KB");
        assert_eq!(determine_file_size(20_000_000), "20.00 MB");
    }

    #[test]
    fn icon_falls_back_to_default_preview() {
        let style = PresentationStyle::Icon(preview(None));
        let visual = image(UploaderVisual::new(&style, false, 4_000_000));

        assert_eq!(visual.background, Background::Image("default.png".to_owned()));
        assert_eq!(visual.action.id, TextId::Upload);
        assert_eq!(visual.overlay, Overlay::Edit);
        assert_eq!(visual.width, Some(92.0));
        assert_eq!(visual.hint.fallback_text(), "Max File Size: 4.00 MB");
    }

    #[test]
    fn icon_with_preview_offers_removal() {
        let style = PresentationStyle::Icon(preview(Some("me.png")));
        let visual = image(UploaderVisual::new(&style, false, 10));

        assert_eq!(visual.background, Background::Image("me.png".to_owned()));
        assert_eq!(visual.action.id, TextId::Remove);
    }

    #[test]
    fn banner_is_dimmed_or_black() {
        let with = PresentationStyle::Banner(preview(Some("b.png")));
        let without = PresentationStyle::Banner(preview(None));

        assert_eq!(
            image(UploaderVisual::new(&with, false, 10)).background,
            Background::DimmedImage("b.png".to_owned())
        );
        let visual = image(UploaderVisual::new(&without, false, 10));
        assert_eq!(visual.background, Background::Black);
        assert!(visual.banner);
    }

    #[test]
    fn busy_shows_spinner_and_uploading_label() {
        let style = PresentationStyle::Icon(preview(Some("me.png")));
        let visual = image(UploaderVisual::new(&style, true, 10));

        assert_eq!(visual.overlay, Overlay::Spinner);
        assert_eq!(visual.action.id, TextId::UploadingFile);
        assert!(visual.uploading);
    }

    #[test]
    fn attachment_glyph_priority() {
        let mut state = AttachmentState::new(|| {});
        let glyph = |state: &AttachmentState| {
            match UploaderVisual::new(&PresentationStyle::Attachment(state.clone()), false, 10) {
                UploaderVisual::Attachment { glyph, .. } => glyph,
                UploaderVisual::Image(_) => panic!("expected an attachment visual"),
            }
        };

        assert_eq!(glyph(&state), AttachmentGlyph::Attach);
        state.attached = true;
        assert_eq!(glyph(&state), AttachmentGlyph::Detach);
        state.uploading = true;
        assert_eq!(glyph(&state), AttachmentGlyph::Cancel);
    }

    #[test]
    fn label_keys_match_translations() {
        assert_eq!(TextId::Upload.key(), "app.settings.actions.upload");
        assert_eq!(
            Label::new(TextId::UploadingFile).fallback_text(),
            "Uploading file..."
        );
    }
}
