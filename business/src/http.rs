//! Thin HTTP client over reqwest with a Send-safe response snapshot.
//!
//! Responses are read fully into a [`Response`] so callers can inspect the
//! status and body after the connection is gone, and so the futures stay
//! `Send` for tasks spawned from the UI thread.

use log::debug;

/// A simplified HTTP response that contains only Send-safe data.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Attempt to deserialize the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level failure: no response was received.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP error: {}", self.message)
    }
}

impl std::error::Error for HttpError {}

/// Result type for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// One file part of a multipart form.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A multipart POST under construction.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: String,
    parts: Vec<FilePart>,
}

impl RequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            parts: Vec::new(),
        }
    }

    /// Append a file part to the `multipart/form-data` body.
    pub fn file_part(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.parts.push(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            bytes: bytes.into(),
        });
        self
    }

    /// Send the request and read the whole response.
    pub async fn send(self) -> HttpResult<Response> {
        let form = self
            .parts
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, part| {
                form.part(
                    part.field,
                    reqwest::multipart::Part::bytes(part.bytes).file_name(part.file_name),
                )
            });

        debug!("POST {}", self.url);

        let response = reqwest::Client::new()
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?
            .to_vec();

        Ok(Response { status, body })
    }
}

/// HTTP client entry points.
///
/// # Example
///
/// ```ignore
/// use fileup_business::http::Client;
///
/// async fn upload(bytes: Vec<u8>) {
///     let response = Client::post("https://autumn.example.com/avatars")
///         .file_part("file", "me.png", bytes)
///         .send()
///         .await
///         .unwrap();
///     assert!(response.is_success());
/// }
/// ```
pub struct Client;

impl Client {
    /// Create a multipart POST request.
    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url)
    }
}
