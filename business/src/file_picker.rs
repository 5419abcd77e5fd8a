//! File picker contract and the size policy applied to every selection.
//!
//! The native selection surface is abstracted behind [`FilePicker`] so the
//! controller can be driven by a deterministic double in tests. The size
//! policy itself lives in [`check_selection`], shared by every picker.

use async_trait::async_trait;
use log::{debug, info};

use crate::file::{FileSet, PickedFile};

/// Opens a file selection surface and returns what the user chose.
///
/// An empty set means the surface was dismissed. Each call opens an
/// independent surface.
#[async_trait]
pub trait FilePicker: Send + Sync {
    async fn pick(&self, allow_multiple: bool) -> FileSet;
}

/// Result of applying the size policy to a raw selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// Nothing was selected.
    Empty,
    /// At least one file exceeds the limit; the whole selection is dropped.
    TooLarge,
    /// Every file is within the limit, in selection order.
    Accepted(FileSet),
}

/// Validates every file against `size_limit`, in selection order.
///
/// A single oversized file rejects the whole selection.
pub fn check_selection(files: FileSet, size_limit: u64) -> PickOutcome {
    if files.is_empty() {
        return PickOutcome::Empty;
    }

    if let Some(file) = files.iter().find(|file| file.size() > size_limit) {
        info!(
            "Rejecting selection of {} file(s): {:?} is {} bytes, limit is {size_limit}",
            files.len(),
            file.name(),
            file.size()
        );
        return PickOutcome::TooLarge;
    }

    debug!("Accepted selection of {} file(s)", files.len());
    PickOutcome::Accepted(files)
}

/// Opens `picker` and reports the checked selection through callbacks.
///
/// Exactly one of `on_accepted` or `on_too_large` fires, or neither when
/// the selection is empty.
pub async fn grab_files<A, T>(
    picker: &dyn FilePicker,
    size_limit: u64,
    on_accepted: A,
    on_too_large: T,
    allow_multiple: bool,
) where
    A: FnOnce(Vec<PickedFile>),
    T: FnOnce(),
{
    match check_selection(picker.pick(allow_multiple).await, size_limit) {
        PickOutcome::Empty => {}
        PickOutcome::TooLarge => on_too_large(),
        PickOutcome::Accepted(files) => on_accepted(files),
    }
}
