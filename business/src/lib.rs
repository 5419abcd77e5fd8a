//! Business layer of the file uploader control.
//!
//! Everything here is independent of the rendering toolkit: the file picker
//! contract and its size policy, the per-instance upload state machine, the
//! multipart upload client and the mapping from controller state to what the
//! widgets draw.

mod config;
mod controller;
mod error;
mod file;
mod file_picker;
pub mod http;
mod presentation;
mod props;
mod upload;


#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{FileType, UploaderEnv};
pub use controller::{BusyFlag, BusyGuard, UploadController};
pub use error::{ConfigError, ErrorPresenter, FILE_TOO_LARGE, UploaderError, take_error};
pub use file::{FileSet, PickedFile};
pub use file_picker::{FilePicker, PickOutcome, check_selection, grab_files};
pub use presentation::{
    AttachmentGlyph, Background, ImageVisual, Label, Overlay, TextId, UploaderVisual,
    determine_file_size,
};
pub use props::{
    AttachmentState, Behavior, BoxFuture, CancelCallback, ImagePreview, PresentationStyle,
    RemoveCallback, StyleKind, UploaderConfig,
};
pub use upload::{UploadError, UploadResponse, upload_file, upload_url};
