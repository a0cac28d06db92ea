//! oEmbed lookups against remote video platforms.
//!
//! Providers never talk to the network directly: they build a lookup URL
//! and hand it to an [`OEmbedClient`], which returns the raw JSON object.
//! Parsing the object into a [`MetadataRecord`](crate::MetadataRecord) is
//! the provider's job.

mod client;

pub use client::{ReqwestOEmbedClient, DEFAULT_TIMEOUT_SECS};

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while fetching oEmbed metadata.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-2xx status.
    #[error("oEmbed endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON shape.
    #[error("Failed to parse oEmbed response: {0}")]
    Parse(String),
}

/// HTTP collaborator used to fetch oEmbed documents.
///
/// One call is one request: implementations must not retry or cache.
#[async_trait]
pub trait OEmbedClient: Send + Sync {
    /// Fetch the JSON object served at `url`.
    async fn fetch(&self, url: &str) -> Result<Map<String, Value>, FetchError>;
}

/// Build `{endpoint}?url=<encoded reference url>&format=json`.
pub fn lookup_url(endpoint: &str, reference_url: &str) -> String {
    format!(
        "{}?url={}&format=json",
        endpoint,
        urlencoding::encode(reference_url)
    )
}
