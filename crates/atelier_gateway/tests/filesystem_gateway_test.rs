use atelier_core::OpaqueKey;
use atelier_gateway::{FileSystemGateway, ObjectStoreGateway, UploadOptions};

#[tokio::test]
async fn upload_retrieve_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = FileSystemGateway::new(dir.path()).unwrap();

    let data = b"\x89PNG fake image bytes";
    let options = UploadOptions::default().with_filename(Some("cover.png".to_string()));
    let receipt = gateway.upload(data, "news-42", &options).await.unwrap();

    assert!(receipt.public_id().has_prefix("news-42/"));
    assert!(receipt.public_id().as_str().ends_with(".png"));

    let retrieved = gateway.retrieve(receipt.public_id()).await.unwrap();
    assert_eq!(retrieved, data);
}

#[tokio::test]
async fn identical_bytes_under_one_prefix_share_a_key() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = FileSystemGateway::new(dir.path()).unwrap();

    let options = UploadOptions::default();
    let first = gateway.upload(b"same", "p", &options).await.unwrap();
    let second = gateway.upload(b"same", "p", &options).await.unwrap();

    assert_eq!(first.public_id(), second.public_id());
}

#[tokio::test]
async fn custom_key_overwrites_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = FileSystemGateway::new(dir.path()).unwrap();

    let receipt = gateway
        .upload(b"v1", "sections", &UploadOptions::default())
        .await
        .unwrap();
    let key = receipt.into_public_id();

    let options = UploadOptions::default().with_custom_key(Some(key.clone()));
    let second = gateway.upload(b"v2", "ignored", &options).await.unwrap();

    assert_eq!(second.public_id(), &key);
    assert_eq!(gateway.retrieve(&key).await.unwrap(), b"v2");
}

#[tokio::test]
async fn batch_resolution_omits_missing_keys() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = FileSystemGateway::new(dir.path()).unwrap();

    let receipt = gateway
        .upload(b"a", "img", &UploadOptions::default())
        .await
        .unwrap();
    let present = receipt.into_public_id();
    let missing = OpaqueKey::from("img/not-there");

    let urls = gateway
        .resolve_urls(&[present.clone(), missing.clone()])
        .await
        .unwrap();

    assert!(urls.contains_key(&present));
    assert!(!urls.contains_key(&missing));
    assert!(urls[&present].starts_with("file://"));
}

#[tokio::test]
async fn delete_removes_the_object() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = FileSystemGateway::new(dir.path()).unwrap();

    let receipt = gateway
        .upload(b"bytes", "img", &UploadOptions::default())
        .await
        .unwrap();
    let key = receipt.into_public_id();

    gateway.delete_by_key(&key).await.unwrap();
    assert!(gateway.resolve_url(&key).await.is_err());
    assert!(gateway.delete_by_key(&key).await.is_err());
}

#[tokio::test]
async fn traversal_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = FileSystemGateway::new(dir.path()).unwrap();

    let key = OpaqueKey::from("../outside");
    assert!(gateway.resolve_url(&key).await.is_err());
}
