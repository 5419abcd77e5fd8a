//! Configuration of one uploader instance.
//!
//! What happens with the chosen files ([`Behavior`]) and how the control is
//! drawn ([`PresentationStyle`]) are independent choices, combined in
//! [`UploaderConfig`] and validated when the controller is built.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::config::FileType;
use crate::file::{FileSet, PickedFile};

/// Boxed `Send` future returned by asynchronous callbacks.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

pub type ChangeCallback = Arc<dyn Fn(PickedFile) -> anyhow::Result<()> + Send + Sync>;
pub type MultiChangeCallback = Arc<dyn Fn(FileSet) -> anyhow::Result<()> + Send + Sync>;
pub type UploadCallback = Arc<dyn Fn(String) -> BoxFuture<anyhow::Result<()>> + Send + Sync>;
pub type RemoveCallback = Arc<dyn Fn() -> BoxFuture<anyhow::Result<()>> + Send + Sync>;
pub type CancelCallback = Arc<dyn Fn() + Send + Sync>;

/// Completion protocol, fixed for the lifetime of an instance.
#[derive(Clone)]
pub enum Behavior {
    /// Hand the single chosen file back raw.
    Ask(ChangeCallback),
    /// Hand every chosen file back raw; multiple selection is enabled.
    Multi(MultiChangeCallback),
    /// Upload the chosen file and hand back the remote identifier.
    Upload(UploadCallback),
}

impl Behavior {
    pub fn ask<F>(on_change: F) -> Self
    where
        F: Fn(PickedFile) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::Ask(Arc::new(on_change))
    }

    pub fn multi<F>(on_change: F) -> Self
    where
        F: Fn(FileSet) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::Multi(Arc::new(on_change))
    }

    pub fn upload<F, Fut>(on_upload: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::Upload(Arc::new(move |id| -> BoxFuture<anyhow::Result<()>> {
            Box::pin(on_upload(id))
        }))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ask(_) => "ask",
            Self::Multi(_) => "multi",
            Self::Upload(_) => "upload",
        }
    }

    /// Whether the picker may return more than one file.
    pub fn allows_multiple(&self) -> bool {
        matches!(self, Self::Multi(_))
    }
}

impl std::fmt::Debug for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Preview shown by the icon and banner styles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagePreview {
    /// Currently uploaded image, if any.
    pub preview_url: Option<String>,
    /// Shown by the icon style when there is no preview.
    pub default_preview: Option<String>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

/// Attachment state tracked by the owner of the control, not by the controller.
#[derive(Clone)]
pub struct AttachmentState {
    pub attached: bool,
    pub uploading: bool,
    pub cancel: CancelCallback,
    /// Glyph size.
    pub size: Option<f32>,
}

impl AttachmentState {
    pub fn new<F>(cancel: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            attached: false,
            uploading: false,
            cancel: Arc::new(cancel),
            size: None,
        }
    }
}

impl std::fmt::Debug for AttachmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentState")
            .field("attached", &self.attached)
            .field("uploading", &self.uploading)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum PresentationStyle {
    Icon(ImagePreview),
    Banner(ImagePreview),
    Attachment(AttachmentState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Icon,
    Banner,
    Attachment,
}

impl StyleKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Icon => "icon",
            Self::Banner => "banner",
            Self::Attachment => "attachment",
        }
    }
}

impl PresentationStyle {
    pub fn kind(&self) -> StyleKind {
        match self {
            Self::Icon(_) => StyleKind::Icon,
            Self::Banner(_) => StyleKind::Banner,
            Self::Attachment(_) => StyleKind::Attachment,
        }
    }
}

/// Everything an uploader instance is built from.
#[derive(Clone)]
pub struct UploaderConfig {
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,
    pub file_type: FileType,
    /// File server base URL, used by [`Behavior::Upload`].
    pub endpoint_base: String,
    pub behavior: Behavior,
    pub style: PresentationStyle,
    pub remove: RemoveCallback,
}

impl UploaderConfig {
    pub fn new(
        max_file_size: u64,
        file_type: FileType,
        endpoint_base: impl Into<String>,
        behavior: Behavior,
        style: PresentationStyle,
    ) -> Self {
        Self {
            max_file_size,
            file_type,
            endpoint_base: endpoint_base.into(),
            behavior,
            style,
            remove: Arc::new(|| -> BoxFuture<anyhow::Result<()>> {
                Box::pin(async { anyhow::Ok(()) })
            }),
        }
    }

    pub fn with_remove<F, Fut>(mut self, remove: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.remove = Arc::new(move || -> BoxFuture<anyhow::Result<()>> {
            Box::pin(remove())
        });
        self
    }
}

impl std::fmt::Debug for UploaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploaderConfig")
            .field("max_file_size", &self.max_file_size)
            .field("file_type", &self.file_type)
            .field("endpoint_base", &self.endpoint_base)
            .field("behavior", &self.behavior)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}
