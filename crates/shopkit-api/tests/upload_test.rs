//! Standalone upload endpoint integration tests.
//!
//! Run with: `cargo test -p shopkit-api --test upload_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{spawn_app, spawn_app_with_storage, MockStorage, StorageFailure};
use serde_json::Value;

fn png_form(bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(bytes)
            .file_name("chair.png")
            .mime_type("image/png"),
    )
}

#[tokio::test]
async fn test_upload_returns_public_url() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/upload")
        .multipart(png_form(b"0123456789".to_vec()))
        .await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let url = body["url"].as_str().expect("url field");

    let stored = app.storage.last_put().expect("one object stored");
    assert_eq!(
        url,
        format!("{}/{}/{}", helpers::TEST_CDN_BASE, helpers::TEST_BUCKET, stored.key)
    );
    assert_eq!(stored.content_type, "image/png");
    assert_eq!(stored.data, b"0123456789".to_vec());
}

#[tokio::test]
async fn test_upload_key_keeps_extension() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/upload")
        .multipart(png_form(vec![1, 2, 3]))
        .await;

    assert_eq!(response.status_code(), 200);

    let key = app.storage.last_put().expect("stored").key;
    assert!(key.ends_with(".png"), "key {} should keep extension", key);

    // {unix_millis}-{token}.png
    let stem = key.strip_suffix(".png").unwrap();
    let (millis, token) = stem.split_once('-').expect("timestamp-token shape");
    assert!(millis.chars().all(|c| c.is_ascii_digit()));
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_upload_without_file_part_is_rejected() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/upload")
        .multipart(MultipartForm::new().add_text("note", "no file here"))
        .await;

    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["error"], "No file uploaded");
    assert_eq!(app.storage.attempt_count(), 0);
}

#[tokio::test]
async fn test_upload_with_empty_file_is_rejected() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/upload")
        .multipart(png_form(Vec::new()))
        .await;

    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn test_upload_with_missing_bucket_names_the_bucket() {
    let app = spawn_app_with_storage(MockStorage::failing(StorageFailure::BucketMissing));

    let response = app
        .server
        .post("/api/upload")
        .multipart(png_form(vec![1, 2, 3]))
        .await;

    assert_eq!(response.status_code(), 500);

    let body: Value = response.json();
    let error = body["error"].as_str().expect("error field");
    assert!(error.contains("product-images"), "got: {}", error);
    assert!(error.contains("not found"), "got: {}", error);
}

#[tokio::test]
async fn test_upload_storage_failure_is_terminal() {
    let app = spawn_app_with_storage(MockStorage::failing(StorageFailure::WriteFailed));

    let response = app
        .server
        .post("/api/upload")
        .multipart(png_form(vec![1, 2, 3]))
        .await;

    assert_eq!(response.status_code(), 500);

    let body: Value = response.json();
    let error = body["error"].as_str().expect("error field");
    assert!(error.starts_with("Upload failed:"), "got: {}", error);
    assert_eq!(app.storage.attempt_count(), 1);
}

#[tokio::test]
async fn test_two_uploads_of_same_filename_get_distinct_keys() {
    let app = spawn_app();

    for _ in 0..2 {
        let response = app
            .server
            .post("/api/upload")
            .multipart(png_form(vec![9, 9, 9]))
            .await;
        assert_eq!(response.status_code(), 200);
    }

    let keys = app.storage.keys();
    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);
}
