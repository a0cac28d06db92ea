use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub youtube: YouTubeConfig,
    /// Named display formats, resolved into boxes for embed players.
    #[serde(default)]
    pub formats: BTreeMap<String, FormatConfig>,
}

/// YouTube provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YouTubeConfig {
    /// Provider name recorded on transformed media
    #[serde(default = "default_youtube_name")]
    pub name: String,
    /// Use the html5 embed instead of the legacy player by default
    #[serde(default)]
    pub html5: bool,
    /// oEmbed endpoint queried for metadata
    #[serde(default = "default_oembed_endpoint")]
    pub oembed_endpoint: String,
    /// Metadata request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            name: default_youtube_name(),
            html5: false,
            oembed_endpoint: default_oembed_endpoint(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_youtube_name() -> String {
    "youtube".to_string()
}

fn default_oembed_endpoint() -> String {
    "https://www.youtube.com/oembed".to_string()
}

fn default_timeout() -> u64 {
    crate::oembed::DEFAULT_TIMEOUT_SECS
}

/// Display format. A missing dimension is derived from the media's aspect ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormatConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl FormatConfig {
    pub fn new(width: Option<u32>, height: Option<u32>) -> Self {
        Self { width, height }
    }
}
