//! Native file selection for the uploader controllers.
//!
//! [`SystemFilePicker`] opens the platform dialog through `rfd`. Chosen files
//! are sized from their metadata and left on disk; the controller applies the
//! size limit before anything is read.

use std::path::PathBuf;

use async_trait::async_trait;
use fileup_business::{FilePicker, FileSet, PickedFile};
use rfd::AsyncFileDialog;

/// File picker backed by the system file dialog.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFilePicker;

#[async_trait]
impl FilePicker for SystemFilePicker {
    async fn pick(&self, allow_multiple: bool) -> FileSet {
        log::debug!("Opening file dialog (multiple: {allow_multiple})");

        let handles = if allow_multiple {
            AsyncFileDialog::new()
                .set_title("Select files")
                .pick_files()
                .await
                .unwrap_or_default()
        } else {
            AsyncFileDialog::new()
                .set_title("Select a file")
                .pick_file()
                .await
                .into_iter()
                .collect()
        };

        if handles.is_empty() {
            log::debug!("File dialog dismissed");
        }

        files_from_paths(handles.iter().map(|handle| handle.path().to_path_buf()))
    }
}

/// Sizes each chosen path without reading it; unreadable paths are skipped.
pub fn files_from_paths(paths: impl IntoIterator<Item = PathBuf>) -> FileSet {
    paths
        .into_iter()
        .filter_map(|path| match PickedFile::from_path(&path) {
            Ok(file) => {
                log::info!("User selected file: {path:?} ({} bytes)", file.size());
                Some(file)
            }
            Err(e) => {
                log::warn!("Failed to stat selected file {path:?}: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_system_file_picker_is_object_safe() {
        fn _accept_file_picker(_picker: &dyn FilePicker) {}
        _accept_file_picker(&SystemFilePicker);
    }

    #[test]
    fn test_files_from_paths_keeps_contents_on_disk() {
        let mut temp_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(&[1u8; 4096])
            .expect("Failed to write to temp file");

        let files = files_from_paths([temp_file.path().to_path_buf()]);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size(), 4096);
        assert_eq!(files[0].path(), Some(temp_file.path()));
    }

    #[test]
    fn test_files_from_paths_skips_missing_files() {
        let temp_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let files = files_from_paths([
            PathBuf::from("/non/existent/path/image.png"),
            temp_file.path().to_path_buf(),
        ]);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size(), 0);
    }
}
