use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::config::FileType;
use crate::file::PickedFile;
use crate::http::Client;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// No response was received.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("server returned {status}")]
    Status { status: u16, body: String },
    /// 2xx response without a usable `id`.
    #[error("invalid upload response: {0}")]
    InvalidResponse(String),
    /// The picked file could not be loaded.
    #[error("failed to read {name:?}: {reason}")]
    Read { name: String, reason: String },
}

/// Body returned by the file server after a successful upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub id: String,
}

/// `{endpoint_base}/{file_type}`, tolerating a trailing slash on the base.
pub fn upload_url(endpoint_base: &str, file_type: FileType) -> String {
    format!("{}/{file_type}", endpoint_base.trim_end_matches('/'))
}

/// Sends `file` as the single `file` field of a multipart form and returns the
/// identifier of the stored object.
///
/// Disk-backed files are loaded here, after the size limit has been applied.
pub async fn upload_file(
    endpoint_base: &str,
    file_type: FileType,
    file: PickedFile,
) -> Result<String, UploadError> {
    let url = upload_url(endpoint_base, file_type);
    info!("Uploading {:?} ({} bytes) to {url}", file.name(), file.size());

    let name = file.name().to_owned();
    let bytes = file.read().map_err(|err| UploadError::Read {
        name: name.clone(),
        reason: err.to_string(),
    })?;
    let response = Client::post(&url)
        .file_part("file", name, bytes)
        .send()
        .await
        .map_err(|err| UploadError::Network(err.message))?;

    if !response.is_success() {
        warn!("Upload to {url} failed with status {}", response.status);
        return Err(UploadError::Status {
            status: response.status,
            body: response.text_lossy(),
        });
    }

    let UploadResponse { id } = response
        .json()
        .map_err(|err| UploadError::InvalidResponse(err.to_string()))?;
    info!("Upload to {url} stored as {id}");
    Ok(id)
}
