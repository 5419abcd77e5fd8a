use std::sync::Arc;
use std::time::Duration;

use egui_kittest::Harness;
use fileup_business::PickedFile;
use fileup_business::test_utils::ScriptedFilePicker;
use fileup_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a> {
    _mock_server: MockServer,
    harness: Harness<'a, State>,
}

impl<'a> TestCtx<'a> {
    /// Profile page backed by a mock file server and a picker that always
    /// returns `selection`.
    pub async fn new(selection: Vec<PickedFile>) -> Self {
        let mock_server = MockServer::start().await;

        for (tag, id) in [
            ("avatars", "avatar-1"),
            ("banners", "banner-1"),
            ("attachments", "attachment-1"),
        ] {
            Mock::given(method("POST"))
                .and(path(format!("/{tag}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "id": id
                })))
                .mount(&mock_server)
                .await;
        }

        let state = State::test(
            mock_server.uri(),
            Arc::new(ScriptedFilePicker::new(selection)),
        )
        .expect("test state");
        let harness = Harness::new_ui_state(fileup_ui::profile_page, state);

        Self {
            _mock_server: mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, State> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, State> {
        &self.harness
    }

    /// Steps the UI while spawned controller tasks make progress.
    pub async fn step_until(&mut self, condition: impl Fn(&Harness<'a, State>) -> bool) {
        for _ in 0..100 {
            self.harness.step();
            if condition(&self.harness) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("condition not reached after stepping the UI");
    }
}

#[allow(unused)]
pub fn file_of_size(name: &str, size: usize) -> PickedFile {
    PickedFile::new(name, vec![b'x'; size])
}
