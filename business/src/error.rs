use log::error;
use serde::Deserialize;
use thiserror::Error;

use crate::upload::UploadError;

/// Description shown when a selection exceeds the size limit.
pub const FILE_TOO_LARGE: &str = "FileTooLarge";

/// Something the user should be told about after a cycle.
#[derive(Debug, Error)]
pub enum UploaderError {
    #[error("selected file exceeds the size limit")]
    FileTooLarge,
    #[error("upload failed: {0}")]
    UploadFailed(#[from] UploadError),
    #[error("callback failed: {0}")]
    CallbackFailed(anyhow::Error),
}

/// Rejected uploader configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max file size must be positive")]
    ZeroSizeLimit,
    #[error("invalid upload endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("{behavior} behaviour cannot be used with the {style} style")]
    UnsupportedCombination {
        behavior: &'static str,
        style: &'static str,
    },
    #[error("style changed from {from} to {to}")]
    StyleKindChanged {
        from: &'static str,
        to: &'static str,
    },
}

/// Shows an error dialog to the user.
pub trait ErrorPresenter: Send + Sync {
    fn open_error_screen(&self, description: &str);
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Normalizes an error into the short tag shown by the error dialog.
pub fn take_error(err: &UploaderError) -> String {
    match err {
        UploaderError::FileTooLarge => FILE_TOO_LARGE.to_owned(),
        UploaderError::UploadFailed(UploadError::Status { status, body }) => {
            let kind = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|body| body.kind);
            match kind {
                Some(kind) => kind,
                None if *status == 403 => "Unauthorized".to_owned(),
                None => {
                    error!("Upload rejected with status {status}: {body}");
                    "UnknownError".to_owned()
                }
            }
        }
        UploaderError::UploadFailed(UploadError::Network(_)) => "NetworkError".to_owned(),
        other => {
            error!("{other}");
            "UnknownError".to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, body: &str) -> UploaderError {
        UploaderError::UploadFailed(UploadError::Status {
            status,
            body: body.to_owned(),
        })
    }

    #[test]
    fn file_too_large_tag() {
        assert_eq!(take_error(&UploaderError::FileTooLarge), "FileTooLarge");
    }

    #[test]
    fn server_error_type_wins() {
        let err = status(400, r#"{"type":"FileTypeNotAllowed"}"#);
        assert_eq!(take_error(&err), "FileTypeNotAllowed");

        let err = status(403, r#"{"type":"Blocked"}"#);
        assert_eq!(take_error(&err), "Blocked");
    }

    #[test]
    fn forbidden_without_type_is_unauthorized() {
        assert_eq!(take_error(&status(403, "")), "Unauthorized");
    }

    #[test]
    fn other_statuses_are_unknown() {
        assert_eq!(take_error(&status(500, "oops")), "UnknownError");
        assert_eq!(take_error(&status(413, r#"{"type":null}"#)), "UnknownError");
    }

    #[test]
    fn transport_failure_is_network_error() {
        let err = UploaderError::UploadFailed(UploadError::Network("connection refused".into()));
        assert_eq!(take_error(&err), "NetworkError");
    }

    #[test]
    fn callback_failure_is_unknown() {
        let err = UploaderError::CallbackFailed(anyhow::anyhow!("listener dropped"));
        assert_eq!(take_error(&err), "UnknownError");
    }

    #[test]
    fn malformed_response_is_unknown() {
        let err = UploaderError::UploadFailed(UploadError::InvalidResponse("missing id".into()));
        assert_eq!(take_error(&err), "UnknownError");
    }
}
