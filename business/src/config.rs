use std::env::vars;
use std::fmt::Display;

use log::info;
use serde::Deserialize;

/// Category tag of an upload; selects the endpoint path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Backgrounds,
    Icons,
    Avatars,
    Attachments,
    Banners,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backgrounds => "backgrounds",
            Self::Icons => "icons",
            Self::Avatars => "avatars",
            Self::Attachments => "attachments",
            Self::Banners => "banners",
        }
    }
}

impl Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawEnv {
    autumn_url: Option<String>,
}

/// Client-side settings shared by every uploader instance.
///
/// The build flavour picks the default file server; `AUTUMN_URL` overrides it
/// at runtime. Controllers never read this directly, the owner passes
/// [`UploaderEnv::autumn_url`] into each `UploaderConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploaderEnv {
    autumn_url: String,
}

impl UploaderEnv {
    pub fn new(autumn_url: impl Into<String>) -> Self {
        Self {
            autumn_url: autumn_url.into(),
        }
    }

    /// Resolves the file server from the process environment.
    pub fn init() -> anyhow::Result<Self> {
        let raw: RawEnv = serde_env::from_iter(vars())?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawEnv) -> Self {
        match raw.autumn_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                info!("Using provided AUTUMN_URL: {url}");
                Self::new(url)
            }
            None => {
                let env = Self::default();
                info!("AUTUMN_URL not set, defaulting to {}", env.autumn_url);
                env
            }
        }
    }

    /// Base URL of the file server, without a trailing slash.
    pub fn autumn_url(&self) -> &str {
        self.autumn_url.trim_end_matches('/')
    }
}

impl Default for UploaderEnv {
    fn default() -> Self {
        // env_test targets a locally running file server on its default port.
        let autumn_url = if cfg!(feature = "env_test") {
            "http://localhost:3000"
        } else {
            "https://autumn.revolt.chat"
        };
        Self::new(autumn_url)
    }
}
