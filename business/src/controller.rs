//! Per-instance upload state machine.
//!
//! A controller is either idle or running one selection-to-completion cycle.
//! The busy flag is taken before the picker opens and released by a guard on
//! every exit path, so a second click can never open a second picker or start
//! a second upload for the same instance.
//!
//! # Usage
//!
//! ```ignore
//! let controller = UploadController::new(config, picker, presenter)?;
//!
//! // from the UI thread
//! let c = controller.clone();
//! tokio::spawn(async move { c.on_click().await });
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};

use crate::config::FileType;
use crate::error::{ConfigError, ErrorPresenter, UploaderError, take_error};
use crate::file::FileSet;
use crate::file_picker::{FilePicker, PickOutcome, check_selection};
use crate::presentation::UploaderVisual;
use crate::props::{Behavior, PresentationStyle, RemoveCallback, StyleKind, UploaderConfig};
use crate::upload::upload_file;

/// In-flight guard of one controller.
#[derive(Debug, Default)]
pub struct BusyFlag(AtomicBool);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Marks the flag busy, unless it already is.
    pub fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { flag: self })
    }
}

/// Clears the busy flag when dropped.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    flag: &'a BusyFlag,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.0.store(false, Ordering::Release);
    }
}

struct Inner {
    max_file_size: u64,
    file_type: FileType,
    endpoint_base: String,
    behavior: Behavior,
    remove: RemoveCallback,
    style_kind: StyleKind,
    style: Mutex<PresentationStyle>,
    busy: BusyFlag,
    picker: Arc<dyn FilePicker>,
    presenter: Arc<dyn ErrorPresenter>,
}

/// Cheaply cloneable handle to one uploader instance.
#[derive(Clone)]
pub struct UploadController {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for UploadController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadController")
            .field("file_type", &self.inner.file_type)
            .field("behavior", &self.inner.behavior)
            .field("style", &self.inner.style_kind)
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}

impl UploadController {
    pub fn new(
        config: UploaderConfig,
        picker: Arc<dyn FilePicker>,
        presenter: Arc<dyn ErrorPresenter>,
    ) -> Result<Self, ConfigError> {
        let UploaderConfig {
            max_file_size,
            file_type,
            endpoint_base,
            behavior,
            style,
            remove,
        } = config;

        if max_file_size == 0 {
            return Err(ConfigError::ZeroSizeLimit);
        }

        let style_kind = style.kind();
        if behavior.allows_multiple() && style_kind != StyleKind::Attachment {
            return Err(ConfigError::UnsupportedCombination {
                behavior: behavior.name(),
                style: style_kind.name(),
            });
        }

        if matches!(behavior, Behavior::Upload(_)) {
            validate_endpoint(&endpoint_base)?;
        }

        Ok(Self {
            inner: Arc::new(Inner {
                max_file_size,
                file_type,
                endpoint_base,
                behavior,
                remove,
                style_kind,
                style: Mutex::new(style),
                busy: BusyFlag::default(),
                picker,
                presenter,
            }),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.inner.busy.is_busy()
    }

    pub fn max_file_size(&self) -> u64 {
        self.inner.max_file_size
    }

    pub fn file_type(&self) -> FileType {
        self.inner.file_type
    }

    /// Current style, including the externally tracked fields.
    pub fn style(&self) -> PresentationStyle {
        self.inner
            .style
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Refreshes preview or attachment state; the style kind cannot change.
    pub fn update_style(&self, style: PresentationStyle) -> Result<(), ConfigError> {
        if style.kind() != self.inner.style_kind {
            return Err(ConfigError::StyleKindChanged {
                from: self.inner.style_kind.name(),
                to: style.kind().name(),
            });
        }
        *self
            .inner
            .style
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = style;
        Ok(())
    }

    pub fn visual(&self) -> UploaderVisual {
        UploaderVisual::new(&self.style(), self.is_busy(), self.inner.max_file_size)
    }

    /// Primary action: pick files and complete them according to the behavior.
    ///
    /// Ignored while a cycle is already running.
    pub async fn on_click(&self) {
        let Some(_busy) = self.inner.busy.try_acquire() else {
            debug!("{:?} uploader busy, ignoring click", self.inner.file_type);
            return;
        };

        let allow_multiple = self.inner.behavior.allows_multiple();
        let files = self.inner.picker.pick(allow_multiple).await;

        let result = match check_selection(files, self.inner.max_file_size) {
            PickOutcome::Empty => Ok(()),
            PickOutcome::TooLarge => Err(UploaderError::FileTooLarge),
            PickOutcome::Accepted(files) => self.complete(files).await,
        };

        if let Err(err) = result {
            self.present(&err);
        }
    }

    /// Secondary action: cancel, remove or pick depending on the style state.
    ///
    /// Ignored while a cycle is running.
    pub async fn remove_or_upload(&self) {
        if self.is_busy() {
            debug!("{:?} uploader busy, ignoring secondary action", self.inner.file_type);
            return;
        }

        match self.style() {
            PresentationStyle::Icon(preview) | PresentationStyle::Banner(preview) => {
                if preview.preview_url.is_some() {
                    self.remove().await;
                } else {
                    self.on_click().await;
                }
            }
            PresentationStyle::Attachment(state) => {
                if state.uploading {
                    info!("Cancelling attachment upload");
                    (state.cancel)();
                } else if state.attached {
                    self.remove().await;
                } else {
                    self.on_click().await;
                }
            }
        }
    }

    async fn complete(&self, files: FileSet) -> Result<(), UploaderError> {
        match &self.inner.behavior {
            Behavior::Multi(on_change) => on_change(files).map_err(UploaderError::CallbackFailed),
            Behavior::Ask(on_change) => match files.into_iter().next() {
                Some(file) => on_change(file).map_err(UploaderError::CallbackFailed),
                None => Ok(()),
            },
            Behavior::Upload(on_upload) => {
                let Some(file) = files.into_iter().next() else {
                    return Ok(());
                };
                let id = upload_file(&self.inner.endpoint_base, self.inner.file_type, file).await?;
                on_upload(id)
                    .await
                    .map_err(UploaderError::CallbackFailed)
            }
        }
    }

    async fn remove(&self) {
        if let Err(err) = (self.inner.remove)().await {
            self.present(&UploaderError::CallbackFailed(err));
        }
    }

    fn present(&self, err: &UploaderError) {
        let description = take_error(err);
        warn!(
            "{:?} uploader failed ({description}): {err}",
            self.inner.file_type
        );
        self.inner.presenter.open_error_screen(&description);
    }
}

fn validate_endpoint(endpoint_base: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        url: endpoint_base.to_owned(),
        reason,
    };
    let url = reqwest::Url::parse(endpoint_base).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(format!("unsupported scheme {scheme}"))),
    }
}
