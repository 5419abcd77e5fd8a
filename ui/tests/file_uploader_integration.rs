use kittest::Queryable;

use crate::common::{TestCtx, file_of_size};

mod common;

#[tokio::test]
async fn test_uploaders_render_idle_labels() {
    let mut ctx = TestCtx::new(Vec::new()).await;

    let harness = ctx.harness_mut();
    harness.step();

    assert!(harness.query_by_label("avatars uploader").is_some());
    assert!(harness.query_by_label("banners uploader").is_some());
    assert_eq!(
        harness.query_all_by_label("Upload").count(),
        2,
        "both image uploaders offer an upload"
    );
    assert!(harness.query_by_label("Max File Size: 4.00 MB").is_some());
    assert!(harness.query_by_label("Max File Size: 6.00 MB").is_some());
    assert!(harness.query_by_label("➕").is_some(), "attach glyph is shown");
}

#[tokio::test]
async fn test_avatar_upload_then_remove() {
    let mut ctx = TestCtx::new(vec![file_of_size("me.png", 128)]).await;
    ctx.harness_mut().step();

    ctx.harness_mut().get_by_label("avatars uploader").click();
    ctx.step_until(|h| h.state().profile.avatar.as_deref() == Some("avatar-1"))
        .await;
    ctx.step_until(|h| h.query_by_label("Remove").is_some()).await;
    assert!(!ctx.harness_mut().state().avatar.is_busy());

    ctx.harness_mut().get_by_label("Remove").click();
    ctx.step_until(|h| h.state().profile.avatar.is_none()).await;
    ctx.step_until(|h| h.query_all_by_label("Upload").count() == 2)
        .await;
}

#[tokio::test]
async fn test_oversized_avatar_opens_error_window() {
    let mut ctx = TestCtx::new(vec![file_of_size("huge.png", 4_000_001)]).await;
    ctx.harness_mut().step();

    ctx.harness_mut().get_by_label("avatars uploader").click();
    ctx.step_until(|h| h.query_by_label("FileTooLarge").is_some())
        .await;
    assert!(ctx.harness_mut().state().profile.avatar.is_none());

    ctx.harness_mut().get_by_label("OK").click();
    ctx.step_until(|h| h.query_by_label("FileTooLarge").is_none())
        .await;
}

#[tokio::test]
async fn test_attach_detach_and_send() {
    let mut ctx = TestCtx::new(vec![file_of_size("a.txt", 3), file_of_size("b.txt", 5)]).await;
    ctx.harness_mut().step();

    ctx.harness_mut().get_by_label("➕").click();
    ctx.step_until(|h| h.state().profile.attachments.len() == 2)
        .await;
    ctx.step_until(|h| h.query_by_label("❌").is_some()).await;
    assert!(ctx.harness_mut().query_by_label("📎 a.txt").is_some());
    assert!(ctx.harness_mut().query_by_label("📎 b.txt").is_some());

    ctx.harness_mut().get_by_label("❌").click();
    ctx.step_until(|h| h.state().profile.attachments.is_empty())
        .await;

    ctx.harness_mut().get_by_label("➕").click();
    ctx.step_until(|h| h.state().profile.attachments.len() == 2)
        .await;
    ctx.harness_mut().get_by_label("Send").click();
    ctx.step_until(|h| h.state().profile.sent.len() == 2).await;

    let harness = ctx.harness_mut();
    assert!(harness.state().profile.attachments.is_empty());
    assert!(!harness.state().profile.sending);
    harness.step();
    assert!(harness.query_by_label("➕").is_some());
}
