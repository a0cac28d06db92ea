//! Embed player configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::ParameterSchema;
use crate::media::MediaBox;

/// Per-call options for [`PlaybackConfigBuilder::build`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackOptions {
    /// Overrides the provider-level html5 setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html5: Option<bool>,
    /// Overrides the inline `allowScriptAccess` default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_script_access: Option<String>,
    /// Merged over the url parameter defaults.
    #[serde(default)]
    pub player_url_parameters: Map<String, Value>,
    /// Merged over the inline player defaults (except width/height).
    #[serde(default)]
    pub player_parameters: Map<String, Value>,
}

impl PlaybackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html5(mut self, html5: bool) -> Self {
        self.html5 = Some(html5);
        self
    }

    pub fn url_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.player_url_parameters.insert(name.into(), value.into());
        self
    }

    pub fn player_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.player_parameters.insert(name.into(), value.into());
        self
    }
}

/// Everything a player surface needs to embed a media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    pub html5: bool,
    /// Encoded query string appended to the embed URL.
    pub player_url_parameters: String,
    pub player_parameters: Map<String, Value>,
}

/// Merges default tables, caller overrides and the display box.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackConfigBuilder<'a> {
    schema: &'a ParameterSchema,
    html5: bool,
}

impl<'a> PlaybackConfigBuilder<'a> {
    pub fn new(schema: &'a ParameterSchema, html5: bool) -> Self {
        Self { schema, html5 }
    }

    pub fn build(&self, display: MediaBox, options: &PlaybackOptions) -> PlaybackConfig {
        let mut url_parameters = self.schema.url_defaults();
        for (name, value) in &options.player_url_parameters {
            url_parameters.insert(name.clone(), value.clone());
        }

        let mut player_parameters = self
            .schema
            .inline_defaults(options.allow_script_access.as_deref());
        for (name, value) in &options.player_parameters {
            player_parameters.insert(name.clone(), value.clone());
        }
        // the display box always wins over caller values
        player_parameters.insert("width".to_string(), Value::from(display.width));
        player_parameters.insert("height".to_string(), Value::from(display.height));

        PlaybackConfig {
            html5: options.html5.unwrap_or(self.html5),
            player_url_parameters: encode_query(&url_parameters),
            player_parameters,
        }
    }
}

/// Serialize parameters into a query string.
///
/// Null values are skipped, booleans become `1`/`0` and nested arrays or
/// objects are written as `key[sub]=value`.
pub fn encode_query(parameters: &Map<String, Value>) -> String {
    let mut pairs = Vec::new();
    for (name, value) in parameters {
        push_pairs(&mut pairs, &urlencoding::encode(name), value);
    }
    pairs.join("&")
}

fn push_pairs(pairs: &mut Vec<String>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push(format!("{}={}", key, if *b { "1" } else { "0" })),
        Value::Number(n) => pairs.push(format!("{}={}", key, n)),
        Value::String(s) => pairs.push(format!("{}={}", key, urlencoding::encode(s))),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push_pairs(pairs, &format!("{}%5B{}%5D", key, index), item);
            }
        }
        Value::Object(object) => {
            for (sub, item) in object {
                push_pairs(
                    pairs,
                    &format!("{}%5B{}%5D", key, urlencoding::encode(sub)),
                    item,
                );
            }
        }
    }
}
