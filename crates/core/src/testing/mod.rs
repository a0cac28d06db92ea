//! Testing utilities and mock implementations.
//!
//! This module provides a mock oEmbed client and fixtures, allowing
//! providers to be exercised end to end without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use mediaprov_core::testing::{fixtures, MockOEmbedClient};
//!
//! let client = MockOEmbedClient::new();
//! client.set_response(fixtures::oembed_document("Title", "Author", 640, 480)).await;
//!
//! let provider = fixtures::youtube_provider(client.clone());
//! ```

mod mock_oembed;

pub use mock_oembed::MockOEmbedClient;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::sync::Arc;

    use serde_json::{json, Map, Value};

    use super::MockOEmbedClient;
    use crate::config::FormatConfig;
    use crate::dimension::FormatBoxResolver;
    use crate::media::MediaEntity;
    use crate::provider::{VideoProvider, YouTube, YouTubeProvider};

    /// Create an oEmbed document shaped like YouTube's.
    pub fn oembed_document(title: &str, author: &str, width: u32, height: u32) -> Map<String, Value> {
        let document = json!({
            "title": title,
            "author_name": author,
            "author_url": format!("https://www.youtube.com/@{}", author.to_lowercase()),
            "type": "video",
            "height": height,
            "width": width,
            "version": "1.0",
            "provider_name": "YouTube",
            "provider_url": "https://www.youtube.com/",
            "thumbnail_height": 360,
            "thumbnail_width": 480,
            "thumbnail_url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg",
            "html": format!("<iframe width=\"{}\" height=\"{}\"></iframe>", width, height),
        });

        match document {
            Value::Object(object) => object,
            _ => unreachable!("json! object literal"),
        }
    }

    /// Resolver with `small` (320x180), `medium` (640 wide) and `big` (1280x720).
    pub fn format_resolver() -> FormatBoxResolver {
        FormatBoxResolver::default()
            .with_format("small", FormatConfig::new(Some(320), Some(180)))
            .with_format("medium", FormatConfig::new(Some(640), None))
            .with_format("big", FormatConfig::new(Some(1280), Some(720)))
    }

    /// Create a YouTube provider backed by `client` and [`format_resolver`].
    pub fn youtube_provider(client: MockOEmbedClient) -> YouTubeProvider {
        VideoProvider::new(YouTube::new(), Arc::new(client), Arc::new(format_resolver()))
            .expect("youtube parameter schema is valid")
    }

    /// Create a media waiting to be transformed.
    pub fn raw_media(raw: &str) -> MediaEntity {
        MediaEntity::with_raw_content(raw)
    }
}
