//! Mock oEmbed client for testing.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::oembed::{FetchError, OEmbedClient};

/// Mock implementation of the OEmbedClient trait.
///
/// Provides controllable behavior for testing:
/// - Return a default document, or per-URL documents
/// - Track requested URLs for assertions
/// - Simulate failures
///
/// Clones share state, so a test can keep a handle while the provider
/// owns another one.
///
/// # Example
///
/// ```rust,ignore
/// use mediaprov_core::testing::{MockOEmbedClient, fixtures};
///
/// let client = MockOEmbedClient::new();
/// client.set_response(fixtures::oembed_document("Title", "Author", 640, 480)).await;
///
/// let document = client.fetch("https://www.youtube.com/oembed?url=...").await?;
/// assert_eq!(client.request_count().await, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockOEmbedClient {
    /// Document returned for any URL without a specific entry.
    default_response: Arc<RwLock<Option<Map<String, Value>>>>,
    /// Documents keyed by full request URL.
    responses: Arc<RwLock<HashMap<String, Map<String, Value>>>>,
    /// Requested URLs, in order.
    requests: Arc<RwLock<Vec<String>>>,
    /// If set, the next request will fail with this error.
    next_error: Arc<RwLock<Option<FetchError>>>,
}

impl MockOEmbedClient {
    /// Create a mock with no documents: every request answers 404.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Response Configuration
    // =========================================================================

    /// Return `document` for any URL.
    pub async fn set_response(&self, document: Map<String, Value>) {
        *self.default_response.write().await = Some(document);
    }

    /// Return `document` for exactly `url`.
    pub async fn set_response_for(&self, url: impl Into<String>, document: Map<String, Value>) {
        self.responses.write().await.insert(url.into(), document);
    }

    /// Forget every configured document.
    pub async fn clear_responses(&self) {
        *self.default_response.write().await = None;
        self.responses.write().await.clear();
    }

    // =========================================================================
    // Request Recording
    // =========================================================================

    /// Get all requested URLs.
    pub async fn requested_urls(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }

    /// Get the number of requests performed.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Clear recorded requests.
    pub async fn clear_recorded(&self) {
        self.requests.write().await.clear();
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next request to fail with the given error.
    pub async fn set_next_error(&self, error: FetchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }
}

#[async_trait]
impl OEmbedClient for MockOEmbedClient {
    async fn fetch(&self, url: &str) -> Result<Map<String, Value>, FetchError> {
        self.requests.write().await.push(url.to_string());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        if let Some(document) = self.responses.read().await.get(url) {
            return Ok(document.clone());
        }

        self.default_response
            .read()
            .await
            .clone()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                message: "Not Found".to_string(),
            })
    }
}
