use std::sync::{Arc, Mutex, PoisonError};

use fileup_business::{
    AttachmentState, Behavior, CancelCallback, ErrorPresenter, FilePicker, FileSet, FileType,
    ImagePreview, PresentationStyle, UploadController, UploaderConfig, UploaderEnv, UploaderError,
    take_error, upload_file,
};
use tokio::task::AbortHandle;

use crate::widgets::{ChannelErrorPresenter, ErrorScreenState, create_error_channel};

pub const AVATAR_MAX_SIZE: u64 = 4_000_000;
pub const BANNER_MAX_SIZE: u64 = 6_000_000;
pub const ATTACHMENT_MAX_SIZE: u64 = 20_000_000;

/// Changes reported by controller callbacks and background sends.
#[derive(Debug)]
pub enum ProfileEvent {
    AvatarChanged(Option<String>),
    BannerChanged(Option<String>),
    Attached(FileSet),
    Detached,
    AttachmentsSent(Vec<String>),
    SendStopped,
}

/// What the demo profile currently holds.
#[derive(Debug, Default)]
pub struct Profile {
    pub avatar: Option<String>,
    pub banner: Option<String>,
    pub attachments: FileSet,
    pub sending: bool,
    pub sent: Vec<String>,
}

/// The main application state.
pub struct State {
    pub avatar: UploadController,
    pub banner: UploadController,
    pub attachments: UploadController,
    pub profile: Profile,
    pub error_screen: ErrorScreenState,
    autumn_url: String,
    presenter: ChannelErrorPresenter,
    events: flume::Receiver<ProfileEvent>,
    event_sender: flume::Sender<ProfileEvent>,
    send_task: Arc<Mutex<Option<AbortHandle>>>,
    cancel: CancelCallback,
}

impl State {
    pub fn new(env: &UploaderEnv, picker: Arc<dyn FilePicker>) -> anyhow::Result<Self> {
        let autumn_url = env.autumn_url().to_owned();
        let (presenter, error_screen) = create_error_channel();
        let (event_sender, events) = flume::unbounded();
        let send_task = Arc::new(Mutex::new(None::<AbortHandle>));

        let cancel: CancelCallback = {
            let send_task = send_task.clone();
            let events = event_sender.clone();
            Arc::new(move || {
                if let Some(task) = send_task
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .take()
                {
                    log::info!("Cancelling attachment send");
                    task.abort();
                }
                report(&events, ProfileEvent::SendStopped);
            })
        };

        let shared_presenter: Arc<dyn ErrorPresenter> = Arc::new(presenter.clone());

        let avatar = UploadController::new(
            image_config(
                AVATAR_MAX_SIZE,
                FileType::Avatars,
                &autumn_url,
                PresentationStyle::Icon(avatar_preview(None)),
                &event_sender,
                ProfileEvent::AvatarChanged,
            ),
            picker.clone(),
            shared_presenter.clone(),
        )?;

        let banner = UploadController::new(
            image_config(
                BANNER_MAX_SIZE,
                FileType::Banners,
                &autumn_url,
                PresentationStyle::Banner(ImagePreview::default()),
                &event_sender,
                ProfileEvent::BannerChanged,
            ),
            picker.clone(),
            shared_presenter.clone(),
        )?;

        let attachments = {
            let on_attach = event_sender.clone();
            let on_detach = event_sender.clone();
            let config = UploaderConfig::new(
                ATTACHMENT_MAX_SIZE,
                FileType::Attachments,
                &autumn_url,
                Behavior::multi(move |files| {
                    on_attach.send(ProfileEvent::Attached(files))?;
                    Ok(())
                }),
                PresentationStyle::Attachment(attachment_state(&cancel, false, false)),
            )
            .with_remove(move || {
                let sent = on_detach.send(ProfileEvent::Detached);
                async move {
                    sent?;
                    anyhow::Ok(())
                }
            });
            UploadController::new(config, picker, shared_presenter)?
        };

        Ok(Self {
            avatar,
            banner,
            attachments,
            profile: Profile::default(),
            error_screen,
            autumn_url,
            presenter,
            events,
            event_sender,
            send_task,
            cancel,
        })
    }

    /// State pointed at a mock file server.
    pub fn test(base_url: String, picker: Arc<dyn FilePicker>) -> anyhow::Result<Self> {
        Self::new(&UploaderEnv::new(base_url), picker)
    }

    pub fn autumn_url(&self) -> &str {
        &self.autumn_url
    }

    /// Applies every pending event and refreshes the controllers' styles.
    pub fn sync(&mut self) {
        let mut changed = false;
        for event in self.events.try_iter() {
            log::debug!("Profile event: {event:?}");
            changed = true;
            match event {
                ProfileEvent::AvatarChanged(id) => self.profile.avatar = id,
                ProfileEvent::BannerChanged(id) => self.profile.banner = id,
                ProfileEvent::Attached(files) => self.profile.attachments.extend(files),
                ProfileEvent::Detached => self.profile.attachments.clear(),
                ProfileEvent::AttachmentsSent(ids) => {
                    self.profile.attachments.clear();
                    self.profile.sent.extend(ids);
                    self.profile.sending = false;
                    self.clear_send_task();
                }
                ProfileEvent::SendStopped => {
                    self.profile.sending = false;
                    self.clear_send_task();
                }
            }
        }

        if changed {
            self.refresh_styles();
        }
    }

    /// Uploads the attached files in the background; cancellable from the
    /// attachment glyph.
    pub fn send_attachments(&mut self) {
        if self.profile.sending || self.profile.attachments.is_empty() {
            return;
        }
        self.profile.sending = true;
        self.refresh_styles();

        let files = self.profile.attachments.clone();
        let autumn_url = self.autumn_url.clone();
        let events = self.event_sender.clone();
        let presenter = self.presenter.clone();

        let task = tokio::spawn(async move {
            let mut ids = Vec::with_capacity(files.len());
            for file in files {
                match upload_file(&autumn_url, FileType::Attachments, file).await {
                    Ok(id) => ids.push(id),
                    Err(err) => {
                        let description = take_error(&UploaderError::from(err));
                        presenter.open_error_screen(&description);
                        report(&events, ProfileEvent::SendStopped);
                        return;
                    }
                }
            }
            report(&events, ProfileEvent::AttachmentsSent(ids));
        });

        *self
            .send_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(task.abort_handle());
    }

    fn clear_send_task(&self) {
        self.send_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn refresh_styles(&self) {
        let updates = [
            (
                &self.avatar,
                PresentationStyle::Icon(avatar_preview(
                    self.profile
                        .avatar
                        .as_deref()
                        .map(|id| self.file_url(FileType::Avatars, id)),
                )),
            ),
            (
                &self.banner,
                PresentationStyle::Banner(ImagePreview {
                    preview_url: self
                        .profile
                        .banner
                        .as_deref()
                        .map(|id| self.file_url(FileType::Banners, id)),
                    ..ImagePreview::default()
                }),
            ),
            (
                &self.attachments,
                PresentationStyle::Attachment(attachment_state(
                    &self.cancel,
                    !self.profile.attachments.is_empty(),
                    self.profile.sending,
                )),
            ),
        ];

        for (controller, style) in updates {
            if let Err(err) = controller.update_style(style) {
                log::error!("Failed to refresh {:?} uploader: {err}", controller.file_type());
            }
        }
    }

    fn file_url(&self, file_type: FileType, id: &str) -> String {
        format!("{}/{file_type}/{id}", self.autumn_url)
    }
}

/// Delivers an event from a background task; the profile may already be gone.
fn report(events: &flume::Sender<ProfileEvent>, event: ProfileEvent) {
    if let Err(err) = events.send(event) {
        log::debug!("Profile closed, dropping {:?}", err.into_inner());
    }
}

fn avatar_preview(preview_url: Option<String>) -> ImagePreview {
    ImagePreview {
        preview_url,
        width: Some(92.0),
        height: Some(92.0),
        ..ImagePreview::default()
    }
}

fn attachment_state(cancel: &CancelCallback, attached: bool, uploading: bool) -> AttachmentState {
    AttachmentState {
        attached,
        uploading,
        cancel: cancel.clone(),
        size: None,
    }
}

/// Upload-behavior config whose callbacks report `event(Some(id))` on upload
/// and `event(None)` on removal.
fn image_config(
    max_file_size: u64,
    file_type: FileType,
    autumn_url: &str,
    style: PresentationStyle,
    events: &flume::Sender<ProfileEvent>,
    event: fn(Option<String>) -> ProfileEvent,
) -> UploaderConfig {
    let on_upload = events.clone();
    let on_remove = events.clone();
    UploaderConfig::new(
        max_file_size,
        file_type,
        autumn_url,
        Behavior::upload(move |id| {
            let sent = on_upload.send(event(Some(id)));
            async move {
                sent?;
                anyhow::Ok(())
            }
        }),
        style,
    )
    .with_remove(move || {
        let sent = on_remove.send(event(None));
        async move {
            sent?;
            anyhow::Ok(())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fileup_business::test_utils::ScriptedFilePicker;

    fn state() -> State {
        State::test(
            "http://127.0.0.1:1".to_owned(),
            Arc::new(ScriptedFilePicker::new(Vec::new())),
        )
        .unwrap()
    }

    #[test]
    fn test_avatar_event_sets_preview() {
        let mut state = state();
        state
            .event_sender
            .send(ProfileEvent::AvatarChanged(Some("a1".to_owned())))
            .unwrap();
        state.sync();

        assert_eq!(state.profile.avatar.as_deref(), Some("a1"));
        let PresentationStyle::Icon(preview) = state.avatar.style() else {
            panic!("avatar must stay an icon");
        };
        assert_eq!(
            preview.preview_url.as_deref(),
            Some("http://127.0.0.1:1/avatars/a1")
        );
    }

    #[test]
    fn test_attach_and_detach_toggle_attachment_state() {
        let mut state = state();
        state
            .event_sender
            .send(ProfileEvent::Attached(vec![fileup_business::PickedFile::new(
                "a.txt", "hi",
            )]))
            .unwrap();
        state.sync();

        let PresentationStyle::Attachment(attachment) = state.attachments.style() else {
            panic!("attachments must stay an attachment");
        };
        assert!(attachment.attached);
        assert!(!attachment.uploading);

        state.event_sender.send(ProfileEvent::Detached).unwrap();
        state.sync();
        assert!(state.profile.attachments.is_empty());
    }

    #[test]
    fn test_cancel_reports_send_stopped() {
        let mut state = state();
        state.profile.sending = true;

        (state.cancel)();
        state.sync();

        assert!(!state.profile.sending);
    }

    #[test]
    fn test_cancel_after_state_dropped_is_quiet() {
        let state = state();
        let cancel = state.cancel.clone();
        drop(state);

        cancel();
    }

    #[test]
    fn test_report_without_receiver_drops_event() {
        let (sender, receiver) = flume::unbounded();
        drop(receiver);

        report(&sender, ProfileEvent::SendStopped);
        assert!(sender.is_disconnected());
    }
}
