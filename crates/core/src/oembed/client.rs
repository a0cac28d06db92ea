//! reqwest-backed oEmbed client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::debug;

use super::{FetchError, OEmbedClient};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// oEmbed client performing a single GET per lookup.
#[derive(Debug, Clone)]
pub struct ReqwestOEmbedClient {
    client: Client,
}

impl ReqwestOEmbedClient {
    /// Create a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Create a client with [`DEFAULT_TIMEOUT_SECS`].
    pub fn with_default_timeout() -> Result<Self, FetchError> {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

#[async_trait]
impl OEmbedClient for ReqwestOEmbedClient {
    async fn fetch(&self, url: &str) -> Result<Map<String, Value>, FetchError> {
        debug!("oEmbed lookup: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let value: Value = response.json().await.map_err(|e| {
            FetchError::Parse(format!("Response body is not valid JSON: {}", e))
        })?;

        match value {
            Value::Object(object) => Ok(object),
            other => Err(FetchError::Parse(format!(
                "Expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
