mod test_utils;

use atelier_core::{LocalFile, OpaqueKey, StagingPolicy};
use atelier_gateway::{EntityApi, ObjectStoreGateway};
use atelier_staging::{FormDraft, FormRules, SubmissionOrchestrator};
use serde_json::json;
use std::sync::Arc;
use test_utils::{RecordingApi, RecordingGateway};

fn png(name: &str) -> LocalFile {
    LocalFile::new(name, "image/png", vec![0u8; 32])
}

fn keys(raw: &[&str]) -> Vec<OpaqueKey> {
    raw.iter().map(|k| OpaqueKey::from(*k)).collect()
}

fn harness() -> (Arc<RecordingGateway>, Arc<RecordingApi>, SubmissionOrchestrator) {
    let gateway = Arc::new(RecordingGateway::new());
    let api = Arc::new(RecordingApi::new());
    let gateway_dyn: Arc<dyn ObjectStoreGateway> = gateway.clone();
    let api_dyn: Arc<dyn EntityApi> = api.clone();
    let orchestrator = SubmissionOrchestrator::new(gateway_dyn, api_dyn);
    (gateway, api, orchestrator)
}

#[tokio::test]
async fn edit_with_removal_and_new_file() {
    // Load ["img/a", "img/b"], remove index 0, stage one new file,
    // submit. The payload must carry ["img/b", <new key>] and ledger
    // ["img/a"].
    let (gateway, api, orchestrator) = harness();
    gateway.seed("img/a", b"a");
    gateway.seed("img/b", b"b");

    let mut draft = FormDraft::edit("news-42", FormRules::default(), StagingPolicy::default());
    draft
        .assets_mut()
        .load_existing(gateway.as_ref(), &keys(&["img/a", "img/b"]))
        .await;
    draft.assets_mut().remove_at(0).unwrap();
    draft.assets_mut().stage_files(vec![png("new.png")]).unwrap();

    let entity = orchestrator.submit(&mut draft).await.unwrap();
    assert_eq!(entity.id, "news-42");

    let updated = api.updated();
    assert_eq!(updated.len(), 1);
    let (id, payload) = &updated[0];
    assert_eq!(id, "news-42");

    assert_eq!(payload.image_keys.len(), 2);
    assert_eq!(payload.image_keys[0], OpaqueKey::from("img/b"));
    assert!(payload.image_keys[1].has_prefix("news-42/"));
    assert_eq!(payload.deleted_images, keys(&["img/a"]));
    assert_eq!(payload.draft_id, None);

    // Success clears staged state.
    assert!(draft.assets().ledger().is_empty());
    assert_eq!(draft.assets().active_preview_count(), 0);
}

#[tokio::test]
async fn create_uploads_under_the_client_draft_identity() {
    // Both staged files land under the client-generated prefix, and that
    // identity reaches the create call.
    let (_gateway, api, orchestrator) = harness();

    let mut draft = FormDraft::create(FormRules::default(), StagingPolicy::default());
    draft
        .assets_mut()
        .stage_files(vec![png("one.png"), png("two.png")])
        .unwrap();

    let entity = orchestrator.submit(&mut draft).await.unwrap();

    let created = api.created();
    assert_eq!(created.len(), 1);
    let payload = &created[0];

    let draft_id = payload.draft_id.clone().expect("create carries the draft id");
    assert_eq!(entity.id, draft_id);
    assert_eq!(payload.image_keys.len(), 2);
    for key in &payload.image_keys {
        assert!(key.has_prefix(&format!("{draft_id}/")));
    }
}

#[tokio::test]
async fn upload_failure_aborts_before_the_api_call() {
    // One of three staged files fails to upload: the entity API must not
    // be called and all three files stay staged.
    let (gateway, api, orchestrator) = harness();
    gateway.fail_uploads_named("two.png");

    let mut draft = FormDraft::create(FormRules::default(), StagingPolicy::default());
    draft
        .assets_mut()
        .stage_files(vec![png("one.png"), png("two.png"), png("three.png")])
        .unwrap();

    let err = orchestrator.submit(&mut draft).await.unwrap_err();
    assert!(format!("{err}").contains("Upload failed"));

    assert_eq!(api.call_count(), 0);
    assert_eq!(draft.assets().len(), 3);
    assert_eq!(draft.assets().active_preview_count(), 3);
}

#[tokio::test]
async fn retry_skips_files_that_already_uploaded() {
    let (gateway, api, orchestrator) = harness();
    gateway.fail_uploads_named("two.png");

    let mut draft = FormDraft::create(FormRules::default(), StagingPolicy::default());
    draft
        .assets_mut()
        .stage_files(vec![png("one.png"), png("two.png"), png("three.png")])
        .unwrap();

    orchestrator.submit(&mut draft).await.unwrap_err();
    let after_first = gateway.upload_count();
    assert_eq!(after_first, 3);

    // The blocked file is allowed through on retry; the two files that
    // already uploaded are not sent again.
    gateway.clear_failures();
    orchestrator.submit(&mut draft).await.unwrap();

    assert_eq!(gateway.upload_count(), after_first + 1);
    assert_eq!(api.created().len(), 1);
    assert_eq!(api.created()[0].image_keys.len(), 3);
}

#[tokio::test]
async fn validation_failure_issues_no_network_calls() {
    let (gateway, api, orchestrator) = harness();

    let rules = FormRules::default().with_required_fields(vec!["title".to_string()]);
    let mut draft = FormDraft::create(rules, StagingPolicy::default());
    draft.assets_mut().stage_files(vec![png("a.png")]).unwrap();

    let err = orchestrator.submit(&mut draft).await.unwrap_err();
    assert!(format!("{err}").contains("Required field"));
    assert_eq!(gateway.upload_count(), 0);
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn commit_failure_preserves_staged_state_for_retry() {
    let (gateway, api, orchestrator) = harness();
    api.fail_next();

    let mut draft = FormDraft::create(FormRules::default(), StagingPolicy::default());
    draft.set_field("title", json!("Launch"));
    draft.assets_mut().stage_files(vec![png("a.png")]).unwrap();

    let err = orchestrator.submit(&mut draft).await.unwrap_err();
    assert!(format!("{err}").contains("Create failed"));
    assert_eq!(draft.assets().len(), 1);
    assert_eq!(draft.assets().active_preview_count(), 1);

    // Second attempt succeeds without re-uploading.
    let uploads_before_retry = gateway.upload_count();
    orchestrator.submit(&mut draft).await.unwrap();
    assert_eq!(gateway.upload_count(), uploads_before_retry);
    assert_eq!(draft.assets().active_preview_count(), 0);
}

#[tokio::test]
async fn description_resaves_to_its_original_key() {
    let (gateway, api, orchestrator) = harness();
    gateway.seed("img/a", b"a");
    gateway.seed("desc/news-42", b"<p>old</p>");

    let mut draft = FormDraft::edit("news-42", FormRules::default(), StagingPolicy::default());
    draft
        .assets_mut()
        .load_existing(gateway.as_ref(), &keys(&["img/a"]))
        .await;
    // The description keeps its overwrite target from the loaded entity.
    let fetcher = Arc::new(atelier_gateway::MemoryFetcher::new(gateway.inner()));
    let gateway_dyn: Arc<dyn ObjectStoreGateway> = gateway.clone();
    let resolver = atelier_staging::ContentResolver::new(gateway_dyn, fetcher);
    draft.load_description("desc/news-42", &resolver).await;
    draft.set_description_body("<p>rewritten</p>");

    orchestrator.submit(&mut draft).await.unwrap();

    let (_, payload) = &api.updated()[0];
    assert_eq!(payload.description_key, Some(OpaqueKey::from("desc/news-42")));

    let description_uploads: Vec<_> = gateway
        .upload_calls()
        .into_iter()
        .filter(|call| call.detailed_description)
        .collect();
    assert_eq!(description_uploads.len(), 1);
    assert_eq!(
        description_uploads[0].custom_key,
        Some(OpaqueKey::from("desc/news-42"))
    );
    assert_eq!(
        gateway.inner().object(&OpaqueKey::from("desc/news-42")),
        Some(b"<p>rewritten</p>".to_vec())
    );
}

#[tokio::test]
async fn empty_description_is_not_uploaded() {
    let (gateway, api, orchestrator) = harness();

    let mut draft = FormDraft::create(FormRules::default(), StagingPolicy::default());
    draft.set_field("title", json!("No description"));

    orchestrator.submit(&mut draft).await.unwrap();

    assert_eq!(api.created()[0].description_key, None);
    assert_eq!(gateway.upload_count(), 0);
}

#[tokio::test]
async fn sections_serialize_in_order_within_the_payload() {
    let (_gateway, api, orchestrator) = harness();

    let mut draft = FormDraft::create(FormRules::default(), StagingPolicy::default());
    draft.sections_mut().append_section();
    draft.sections_mut().append_section();
    draft.sections_mut().set_title(0, "First").unwrap();
    draft.sections_mut().set_body(0, "<p>one</p>").unwrap();
    draft.sections_mut().set_title(1, "Second").unwrap();
    draft.sections_mut().set_body(1, "<p>two</p>").unwrap();

    orchestrator.submit(&mut draft).await.unwrap();

    let payload = &api.created()[0];
    let titles: Vec<_> = payload.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
    for record in &payload.sections {
        assert!(record.description.starts_with(&payload.draft_id.clone().unwrap()));
    }
}
