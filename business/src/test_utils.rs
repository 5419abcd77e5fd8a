//! Test doubles for the uploader's external collaborators.
//!
//! - [`ScriptedFilePicker`] stands in for the native selection surface and
//!   hands back a fixed selection, optionally holding it until released.
//! - [`RecordingPresenter`] stands in for the error dialog and records every
//!   description it is asked to show.
//!
//! # Example
//!
//! ```ignore
//! use fileup_business::test_utils::{RecordingPresenter, ScriptedFilePicker, file_of_size};
//!
//! let picker = ScriptedFilePicker::new(vec![file_of_size("a.png", 10)]);
//! let presenter = RecordingPresenter::default();
//! // ... build an UploadController with Arc::new(picker), Arc::new(presenter)
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{ErrorPresenter, FilePicker, FileSet, PickedFile};

/// Builds an in-memory file of `size` zero bytes.
pub fn file_of_size(name: &str, size: usize) -> PickedFile {
    PickedFile::new(name, vec![0u8; size])
}

/// Picker double that returns the same selection on every invocation.
#[derive(Debug, Default)]
pub struct ScriptedFilePicker {
    selection: FileSet,
    requests: Mutex<Vec<bool>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedFilePicker {
    pub fn new(selection: FileSet) -> Self {
        Self {
            selection,
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// A picker that waits for the returned [`Notify`] before answering.
    ///
    /// Each `notify_one()` releases one pending invocation.
    pub fn gated(selection: FileSet) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let picker = Self {
            gate: Some(gate.clone()),
            ..Self::new(selection)
        };
        (picker, gate)
    }

    /// The `allow_multiple` flag of every invocation so far.
    pub fn requests(&self) -> Vec<bool> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn invocations(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl FilePicker for ScriptedFilePicker {
    async fn pick(&self, allow_multiple: bool) -> FileSet {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(allow_multiple);
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.selection.clone()
    }
}

/// Error presenter double that records every description.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    shown: Arc<Mutex<Vec<String>>>,
}

impl RecordingPresenter {
    pub fn shown(&self) -> Vec<String> {
        self.shown
            .lock()
            .map(|shown| shown.clone())
            .unwrap_or_default()
    }
}

impl ErrorPresenter for RecordingPresenter {
    fn open_error_screen(&self, description: &str) {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(description.to_owned());
        }
    }
}
