//! Provider lifecycle integration tests.
//!
//! These tests drive a YouTube provider through the public API with a
//! mock oEmbed client:
//! - Ingestion of pasted URLs (transform -> Ok / Error)
//! - Direct metadata refreshes and their error propagation
//! - Playback configuration and download redirects for stored media

use std::sync::Arc;

use http::header::{HeaderMap, HeaderValue, CACHE_CONTROL, LOCATION};
use http::StatusCode;
use serde_json::json;

use mediaprov_core::{
    provider::ContentTypeMetadataBuilder,
    testing::{fixtures, MockOEmbedClient},
    FetchError, MediaEntity, MediaProvider, PlaybackOptions, ProviderError, ProviderStatus,
    YouTubeProvider,
};

const ID: &str = "dQw4w9WgXcQ";

/// Test helper bundling a provider with a handle on its mock client.
struct TestHarness {
    provider: YouTubeProvider,
    client: MockOEmbedClient,
}

impl TestHarness {
    async fn new() -> Self {
        let client = MockOEmbedClient::new();
        client
            .set_response(fixtures::oembed_document("T", "A", 640, 480))
            .await;
        Self {
            provider: fixtures::youtube_provider(client.clone()),
            client,
        }
    }

    async fn failing() -> Self {
        let harness = Self::new().await;
        harness.client.clear_responses().await;
        harness
    }

    /// A media that went through a successful transform.
    async fn ingested(&self, raw: &str) -> MediaEntity {
        let mut media = fixtures::raw_media(raw);
        self.provider.transform(&mut media).await;
        assert_eq!(media.provider_status, ProviderStatus::Ok);
        media
    }
}

// =============================================================================
// Ingestion
// =============================================================================

#[tokio::test]
async fn test_ingest_watch_url() {
    let harness = TestHarness::new().await;
    let media = harness
        .ingested("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        .await;

    assert_eq!(media.provider_reference.as_deref(), Some(ID));
    assert_eq!(media.name.as_deref(), Some("T"));
    assert_eq!(media.author_name.as_deref(), Some("A"));
    assert_eq!(media.height, Some(480));
    assert_eq!(media.width, Some(640));
    assert_eq!(media.content_type.as_deref(), Some("video/x-flv"));
    assert_eq!(media.metadata_value("provider_name"), Some(&json!("YouTube")));
    assert!(media.enabled);
}

#[tokio::test]
async fn test_ingest_every_url_shape_yields_same_reference() {
    let harness = TestHarness::new().await;
    for raw in [
        "https://youtu.be/dQw4w9WgXcQ",
        "https://www.youtube.com/embed/dQw4w9WgXcQ",
        "https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
        "dQw4w9WgXcQ",
    ] {
        let media = harness.ingested(raw).await;
        assert_eq!(media.provider_reference.as_deref(), Some(ID), "input: {}", raw);
    }
}

#[tokio::test]
async fn test_failed_ingest_disables_but_keeps_reference() {
    let harness = TestHarness::failing().await;
    let mut media = fixtures::raw_media("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    media.name = Some("typed by user".to_string());

    harness.provider.transform(&mut media).await;

    assert_eq!(media.provider_status, ProviderStatus::Error);
    assert!(!media.enabled);
    assert_eq!(media.provider_reference.as_deref(), Some(ID));
    assert_eq!(media.provider_name.as_deref(), Some("youtube"));
    assert_eq!(media.name.as_deref(), Some("typed by user"));
    assert_eq!(media.author_name, None);
    assert!(media.provider_metadata.is_empty());
}

#[tokio::test]
async fn test_transform_refetches_every_time() {
    let harness = TestHarness::new().await;
    let mut media = harness.ingested(ID).await;

    media.name = Some("renamed".to_string());
    harness.provider.transform(&mut media).await;

    // forced mode overwrites the rename again
    assert_eq!(media.name.as_deref(), Some("T"));
    assert_eq!(harness.client.request_count().await, 2);
}

#[tokio::test]
async fn test_retransform_after_error_recovers_status_but_not_enabled() {
    let harness = TestHarness::new().await;
    harness
        .client
        .set_next_error(FetchError::Parse("truncated".to_string()))
        .await;

    let mut media = fixtures::raw_media(ID);
    harness.provider.transform(&mut media).await;
    assert_eq!(media.provider_status, ProviderStatus::Error);

    harness.provider.transform(&mut media).await;
    assert_eq!(media.provider_status, ProviderStatus::Ok);
    assert!(!media.enabled);
}

// =============================================================================
// Direct metadata sync
// =============================================================================

#[tokio::test]
async fn test_direct_sync_keeps_user_name() {
    let harness = TestHarness::new().await;
    let mut media = harness.ingested(ID).await;
    media.name = Some("renamed".to_string());

    harness
        .client
        .set_response(fixtures::oembed_document("New title", "B", 1280, 720))
        .await;
    let record = harness
        .provider
        .sync_metadata(&mut media, false)
        .await
        .unwrap();

    assert_eq!(record.title, "New title");
    assert_eq!(media.name.as_deref(), Some("renamed"));
    assert_eq!(media.author_name.as_deref(), Some("A"));
    assert_eq!(media.width, Some(1280));
    assert_eq!(media.height, Some(720));
}

#[tokio::test]
async fn test_direct_sync_error_propagates_without_disabling() {
    let harness = TestHarness::new().await;
    let mut media = harness.ingested(ID).await;
    let before = media.clone();

    harness
        .client
        .set_next_error(FetchError::Status {
            status: 503,
            message: "unavailable".to_string(),
        })
        .await;
    let err = harness
        .provider
        .sync_metadata(&mut media, false)
        .await
        .unwrap_err();

    assert!(err.is_fetch());
    assert_eq!(media, before);
    assert!(media.enabled);
    assert_eq!(media.provider_status, ProviderStatus::Ok);
}

#[tokio::test]
async fn test_operations_without_reference_fail_with_precondition() {
    let harness = TestHarness::new().await;
    let mut media = MediaEntity::new();

    assert!(harness
        .provider
        .reference_url(&media)
        .unwrap_err()
        .is_precondition());
    assert!(harness
        .provider
        .download_response(&media, HeaderMap::new())
        .unwrap_err()
        .is_precondition());
    assert!(matches!(
        harness.provider.sync_metadata(&mut media, true).await,
        Err(ProviderError::MissingReference)
    ));
    assert_eq!(harness.client.request_count().await, 0);
}

// =============================================================================
// Rendering
// =============================================================================

#[tokio::test]
async fn test_playback_config_for_ingested_media() {
    let harness = TestHarness::new().await;
    let media = harness.ingested(ID).await;

    let config = harness
        .provider
        .playback_config(&media, "medium", &PlaybackOptions::default())
        .unwrap();
    assert_eq!(config.player_parameters["width"], json!(640));
    assert_eq!(config.player_parameters["height"], json!(480));

    let config = harness
        .provider
        .playback_config(&media, "reference", &PlaybackOptions::new().html5(true))
        .unwrap();
    assert!(config.html5);
    assert_eq!(config.player_parameters["width"], json!(640));
}

#[tokio::test]
async fn test_playback_config_contains_every_default() {
    let harness = TestHarness::new().await;
    let config = harness
        .provider
        .playback_config(&MediaEntity::new(), "small", &PlaybackOptions::default())
        .unwrap();

    for pair in [
        "rel=0",
        "autoplay=0",
        "loop=0",
        "enablejsapi=0",
        "disablekb=0",
        "egm=0",
        "border=0",
        "fs=1",
        "start=0",
        "hd=1",
        "showsearch=0",
        "showinfo=0",
        "iv_load_policy=1",
        "cc_load_policy=1",
        "wmode=window",
    ] {
        assert!(
            config.player_url_parameters.split('&').any(|p| p == pair),
            "missing {}",
            pair
        );
    }
    // unset parameters are left out of the query
    assert!(!config.player_url_parameters.contains("playerapiid"));
    assert!(!config.player_url_parameters.contains("color1"));
}

#[tokio::test]
async fn test_playback_overrides_cannot_change_box() {
    let harness = TestHarness::new().await;
    let options = PlaybackOptions::new()
        .url_parameter("autoplay", 1)
        .url_parameter("color1", "ff0000")
        .player_parameter("width", 999);

    let config = harness
        .provider
        .playback_config(&MediaEntity::new(), "big", &options)
        .unwrap();

    assert!(config.player_url_parameters.contains("autoplay=1"));
    assert!(config.player_url_parameters.contains("color1=ff0000"));
    assert!(config.player_url_parameters.contains("rel=0"));
    assert_eq!(config.player_parameters["width"], json!(1280));
    assert_eq!(config.player_parameters["height"], json!(720));
}

#[tokio::test]
async fn test_download_redirects_to_watch_page() {
    let harness = TestHarness::new().await;
    let media = harness.ingested(ID).await;

    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("private"));
    let response = harness.provider.download_response(&media, headers).unwrap();

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        response.headers[LOCATION],
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
    );
    assert_eq!(response.headers[CACHE_CONTROL], "private");

    let response: http::Response<()> = response.into();
    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_storage_metadata_uses_injected_builder() {
    let harness = TestHarness::new().await;
    let media = harness.ingested(ID).await;
    assert!(harness
        .provider
        .storage_metadata(&media, "thumb_small.jpg")
        .is_empty());

    let provider = fixtures::youtube_provider(harness.client.clone())
        .with_metadata_builder(Arc::new(ContentTypeMetadataBuilder));
    let metadata = provider.storage_metadata(&media, "thumb_small.jpg");
    assert_eq!(metadata.get("Content-Type").map(String::as_str), Some("image/jpeg"));
}

#[tokio::test]
async fn test_provider_as_trait_object() {
    let harness = TestHarness::new().await;
    let provider: Arc<dyn MediaProvider> = Arc::new(harness.provider);

    let mut media = fixtures::raw_media("youtu.be/dQw4w9WgXcQ");
    provider.transform(&mut media).await;

    assert_eq!(provider.name(), "youtube");
    assert_eq!(media.provider_status, ProviderStatus::Ok);
    assert_eq!(
        provider.reference_image(&media).as_deref(),
        Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg")
    );
}
