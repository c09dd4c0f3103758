//! End-to-end workflow tests against a mocked gallery service.
//!
//! Each test stands up an HTTP mock double of the gallery service, runs one
//! checker workflow against it, and asserts the classified outcome. Tampering
//! is simulated by having the mock return listings or image content that
//! contradict what the checker stored or uploaded.

use httpmock::prelude::*;
use std::path::Path;
use std::time::Duration;

use gallery_checker::checker::ProbeIdentifiers;
use gallery_checker::codec;
use gallery_checker::{CheckResult, GalleryChecker, GalleryClient, PlacementRecord, StateStore};

fn checker_for(server: &MockServer, state_dir: &Path) -> GalleryChecker {
    let client =
        GalleryClient::from_base_url(server.base_url(), Duration::from_secs(5)).unwrap();
    GalleryChecker::new(client, StateStore::new(state_dir))
}

fn gallery_anchor(gallery_name: &str) -> String {
    format!("<a href=\"/gallery/{}\">", gallery_name)
}

fn file_span(file_name: &str) -> String {
    format!("<span class=\"file-name\">{}</span>", file_name)
}

#[tokio::test]
async fn place_stores_record_and_uploads_flag() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/create");
            then.status(200);
        })
        .await;
    let upload = server
        .mock_async(|when, then| {
            when.method(POST).path_contains("/upload");
            then.status(200);
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let checker = checker_for(&server, dir.path());

    let result = checker.place_flag(5, "FLAG{abc123}").await.unwrap();
    assert_eq!(result, CheckResult::Ok);

    create.assert_async().await;
    // Theme covers (3 or 4) plus the flag image itself
    assert!(upload.hits_async().await >= 4);

    let record = StateStore::new(dir.path()).get(5).unwrap().unwrap();
    assert!(record.file_name.starts_with("flag"));
    assert!(record.file_name.ends_with(".png"));
    assert_eq!(record.gallery_name.len(), 32);
    assert_eq!(
        record.sha256_hex,
        codec::embed_flag("FLAG{abc123}").unwrap().fingerprint
    );
}

#[tokio::test]
async fn place_is_faulty_when_gallery_creation_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/create");
            then.status(500).body("database on fire");
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let checker = checker_for(&server, dir.path());

    let result = checker.place_flag(6, "FLAG{abc123}").await.unwrap();
    assert_eq!(result, CheckResult::Faulty);

    // Nothing was placed, so nothing may be recorded
    assert_eq!(StateStore::new(dir.path()).get(6).unwrap(), None);
}

#[tokio::test]
async fn verify_succeeds_when_service_returns_original_content() {
    let server = MockServer::start_async().await;
    let artifact = codec::embed_flag("FLAG{abc123}").unwrap();
    let png = codec::png_bytes(&artifact.image).unwrap();

    let dir = tempfile::tempdir().unwrap();
    StateStore::new(dir.path())
        .put(
            5,
            &PlacementRecord {
                gallery_name: "0123456789abcdef".to_string(),
                file_name: "flagcafe.png".to_string(),
                password: "hunter2".to_string(),
                sha256_hex: artifact.fingerprint.clone(),
            },
        )
        .unwrap();

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/gallery/0123456789abcdef/download/flagcafe.png");
            then.status(200).body(png.clone());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/gallery/0123456789abcdef/decrypt")
                .json_body(serde_json::json!({
                    "fileId": "flagcafe.png",
                    "password": "hunter2",
                }));
            then.status(200).body(png.clone());
        })
        .await;

    let checker = checker_for(&server, dir.path());
    let result = checker.check_flag(5).await.unwrap();
    assert_eq!(result, CheckResult::Ok);
}

#[tokio::test]
async fn verify_fails_when_decrypted_content_was_tampered() {
    let server = MockServer::start_async().await;
    let artifact = codec::embed_flag("FLAG{abc123}").unwrap();
    let original_png = codec::png_bytes(&artifact.image).unwrap();
    // The service hands back some other image instead of the stored flag
    let tampered = codec::embed_flag("We replaced your flag, sorry!").unwrap();
    let tampered_png = codec::png_bytes(&tampered.image).unwrap();

    let dir = tempfile::tempdir().unwrap();
    StateStore::new(dir.path())
        .put(
            7,
            &PlacementRecord {
                gallery_name: "0123456789abcdef".to_string(),
                file_name: "flagcafe.png".to_string(),
                password: "hunter2".to_string(),
                sha256_hex: artifact.fingerprint.clone(),
            },
        )
        .unwrap();

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/gallery/0123456789abcdef/download/flagcafe.png");
            then.status(200).body(original_png.clone());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/gallery/0123456789abcdef/decrypt");
            then.status(200).body(tampered_png.clone());
        })
        .await;

    let checker = checker_for(&server, dir.path());
    let result = checker.check_flag(7).await.unwrap();
    assert_eq!(result, CheckResult::FlagNotFound);
}

#[tokio::test]
async fn verify_fails_when_decrypt_returns_garbage() {
    let server = MockServer::start_async().await;
    let artifact = codec::embed_flag("FLAG{abc123}").unwrap();
    let png = codec::png_bytes(&artifact.image).unwrap();

    let dir = tempfile::tempdir().unwrap();
    StateStore::new(dir.path())
        .put(
            8,
            &PlacementRecord {
                gallery_name: "0123456789abcdef".to_string(),
                file_name: "flagcafe.png".to_string(),
                password: "hunter2".to_string(),
                sha256_hex: artifact.fingerprint,
            },
        )
        .unwrap();

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/gallery/0123456789abcdef/download/flagcafe.png");
            then.status(200).body(png.clone());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/gallery/0123456789abcdef/decrypt");
            then.status(200).body("<html>totally an image</html>");
        })
        .await;

    let checker = checker_for(&server, dir.path());
    let result = checker.check_flag(8).await.unwrap();
    assert_eq!(result, CheckResult::FlagNotFound);
}

#[tokio::test]
async fn verify_of_unplaced_tick_is_flag_not_found() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().unwrap();
    let checker = checker_for(&server, dir.path());

    // Tick 99 was never placed; must classify cleanly, not error
    let result = checker.check_flag(99).await.unwrap();
    assert_eq!(result, CheckResult::FlagNotFound);
}

#[tokio::test]
async fn check_is_faulty_when_new_gallery_is_not_listed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/create");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("<html><body>no galleries here</body></html>");
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let checker = checker_for(&server, dir.path());

    let result = checker.check_service().await.unwrap();
    assert_eq!(result, CheckResult::Faulty);
}

#[tokio::test]
async fn check_is_faulty_when_upload_never_becomes_visible() {
    let server = MockServer::start_async().await;
    let probe = ProbeIdentifiers {
        gallery_name: "feedfacefeedface".to_string(),
        file_name: "probe1234.png".to_string(),
        password: "pw".to_string(),
    };

    server
        .mock_async(|when, then| {
            when.method(POST).path("/create");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .body(format!("<html>{}</html>", gallery_anchor("feedfacefeedface")));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/gallery/feedfacefeedface/upload");
            then.status(200);
        })
        .await;
    // Gallery listing never reflects the upload
    server
        .mock_async(|when, then| {
            when.method(GET).path("/gallery/feedfacefeedface");
            then.status(200).body("<html><div class=\"gallery\"></div></html>");
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let checker = checker_for(&server, dir.path());

    let result = checker.check_service_with(probe).await.unwrap();
    assert_eq!(result, CheckResult::Faulty);
}

#[tokio::test]
async fn check_is_faulty_when_deleted_image_stays_listed() {
    let server = MockServer::start_async().await;
    let probe = ProbeIdentifiers {
        gallery_name: "feedfacefeedface".to_string(),
        file_name: "probe1234.png".to_string(),
        password: "pw".to_string(),
    };

    server
        .mock_async(|when, then| {
            when.method(POST).path("/create");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .body(format!("<html>{}</html>", gallery_anchor("feedfacefeedface")));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/gallery/feedfacefeedface/upload");
            then.status(200);
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(POST).path("/gallery/feedfacefeedface/delete");
            then.status(200);
        })
        .await;
    // Listing shows the file before AND after the delete
    server
        .mock_async(|when, then| {
            when.method(GET).path("/gallery/feedfacefeedface");
            then.status(200)
                .body(format!("<html>{}</html>", file_span("probe1234.png")));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let checker = checker_for(&server, dir.path());

    let result = checker.check_service_with(probe).await.unwrap();
    assert_eq!(result, CheckResult::Faulty);
    delete.assert_async().await;
}
