//! YouTube video provider.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde_json::{Map, Value};

use super::schema::{DefaultValue, InlineParameter, InlineSource, ParameterSchema, ParameterSpec};
use super::{ReferenceExtractor, SetupError, VideoPlatform, VideoProvider};
use crate::config::Config;
use crate::dimension::FormatBoxResolver;
use crate::oembed::ReqwestOEmbedClient;

/// Length of a YouTube video id.
pub const VIDEO_ID_LEN: usize = 11;

const DEFAULT_OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

// watch/short-link/embed URLs, with or without scheme, www. and m.
static VIDEO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.)?(?:m\.)?(?:youtu\.be/|youtube\.com/(?:(?:watch)?\?(?:.*&)?vi?=|(?:embed|v|vi|user)/))(?P<id>[^#?&'>]+)",
    )
    .expect("youtube url pattern should compile")
});

// https://developers.google.com/youtube/player_parameters
const URL_PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec::new("rel", DefaultValue::Int(0), "Show related videos when playback ends"),
    ParameterSpec::new("autoplay", DefaultValue::Int(0), "Start playing as soon as the player loads"),
    ParameterSpec::new("loop", DefaultValue::Int(0), "Restart the video (or playlist) when it ends"),
    ParameterSpec::new("enablejsapi", DefaultValue::Int(0), "Enable the JavaScript player API"),
    ParameterSpec::new("playerapiid", DefaultValue::Null, "Identifier passed back by the JavaScript API"),
    ParameterSpec::new("disablekb", DefaultValue::Int(0), "Disable keyboard controls"),
    ParameterSpec::new("egm", DefaultValue::Int(0), "Open the enhanced genie menu on mouse over"),
    ParameterSpec::new("border", DefaultValue::Int(0), "Draw a border around the player"),
    ParameterSpec::new("color1", DefaultValue::Null, "Primary border color (hex RGB)"),
    ParameterSpec::new("color2", DefaultValue::Null, "Control bar and secondary border color (hex RGB)"),
    ParameterSpec::new("fs", DefaultValue::Int(1), "Show the fullscreen button"),
    ParameterSpec::new("start", DefaultValue::Int(0), "Seconds from the start where playback begins"),
    ParameterSpec::new("hd", DefaultValue::Int(1), "Prefer HD playback when available"),
    ParameterSpec::new("showsearch", DefaultValue::Int(0), "Show the search box when minimized"),
    ParameterSpec::new("showinfo", DefaultValue::Int(0), "Show title and rating before playback"),
    ParameterSpec::new("iv_load_policy", DefaultValue::Int(1), "1 shows annotations, 3 hides them"),
    ParameterSpec::new("cc_load_policy", DefaultValue::Int(1), "Force closed captions on"),
    ParameterSpec::new("wmode", DefaultValue::Str("window"), "Flash window mode: window, opaque or transparent"),
];

const INLINE_PARAMETERS: &[InlineParameter] = &[
    InlineParameter::new("border", InlineSource::UrlParameter("border")),
    InlineParameter::new("allowFullScreen", InlineSource::Fixed(DefaultValue::Bool(true))),
    InlineParameter::new("allowScriptAccess", InlineSource::ScriptAccess("always")),
    InlineParameter::new("wmode", InlineSource::UrlParameter("wmode")),
];

/// Player parameter schema for YouTube embeds.
pub static YOUTUBE_PARAMETERS: ParameterSchema = ParameterSchema {
    name: "youtube.player",
    version: 1,
    url_parameters: URL_PARAMETERS,
    inline_parameters: INLINE_PARAMETERS,
};

/// The YouTube platform: id pattern, URL forms and embed defaults.
#[derive(Debug, Clone)]
pub struct YouTube {
    oembed_endpoint: String,
}

impl Default for YouTube {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTube {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_OEMBED_ENDPOINT)
    }

    /// Query a different oEmbed endpoint (proxies, tests).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            oembed_endpoint: endpoint.into(),
        }
    }
}

impl VideoPlatform for YouTube {
    fn default_name(&self) -> &'static str {
        "youtube"
    }

    fn extractor(&self) -> ReferenceExtractor {
        ReferenceExtractor::new(&VIDEO_URL, VIDEO_ID_LEN)
    }

    fn reference_url(&self, reference: &str) -> String {
        format!("https://www.youtube.com/watch?v={}", reference)
    }

    fn oembed_endpoint(&self) -> &str {
        &self.oembed_endpoint
    }

    fn content_type(&self) -> &'static str {
        "video/x-flv"
    }

    fn parameter_schema(&self) -> &'static ParameterSchema {
        &YOUTUBE_PARAMETERS
    }

    fn descriptor_options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        options.insert("class".to_string(), Value::from("fa fa-youtube"));
        options
    }
}

pub type YouTubeProvider = VideoProvider<YouTube>;

/// Factory function to create a YouTube provider from config
pub fn create_youtube_provider(config: &Config) -> Result<YouTubeProvider, SetupError> {
    let youtube = &config.youtube;
    let client = ReqwestOEmbedClient::new(std::time::Duration::from_secs(youtube.timeout_secs))?;
    let resolver = FormatBoxResolver::new(config.formats.clone());

    let provider = VideoProvider::new(
        YouTube::with_endpoint(youtube.oembed_endpoint.clone()),
        Arc::new(client),
        Arc::new(resolver),
    )?
    .with_name(youtube.name.clone())
    .with_html5(youtube.html5);

    Ok(provider)
}
