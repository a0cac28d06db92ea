use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle status a provider assigns to a media entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    /// Not processed by any provider yet.
    #[default]
    Pending,
    /// Reference normalized and metadata fetched.
    Ok,
    /// Metadata could not be fetched during ingestion.
    Error,
}

impl ProviderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderStatus::Pending => "pending",
            ProviderStatus::Ok => "ok",
            ProviderStatus::Error => "error",
        }
    }
}

/// A media record as seen by providers.
///
/// The caller owns the entity; providers only ever borrow it for the
/// duration of a single operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEntity {
    /// Unprocessed input (pasted URL, short code...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
    /// Canonical external id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_reference: Option<String>,
    /// Name of the provider that last transformed this entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub provider_status: ProviderStatus,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Last fetched metadata snapshot, kept verbatim.
    #[serde(default)]
    pub provider_metadata: Map<String, Value>,
}

fn default_enabled() -> bool {
    true
}

impl Default for MediaEntity {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaEntity {
    /// Create an empty, enabled entity in `Pending` status.
    pub fn new() -> Self {
        Self {
            raw_content: None,
            provider_reference: None,
            provider_name: None,
            provider_status: ProviderStatus::Pending,
            enabled: default_enabled(),
            name: None,
            author_name: None,
            width: None,
            height: None,
            content_type: None,
            provider_metadata: Map::new(),
        }
    }

    /// Create an entity carrying raw input waiting to be transformed.
    pub fn with_raw_content(raw: impl Into<String>) -> Self {
        Self {
            raw_content: Some(raw.into()),
            ..Self::new()
        }
    }

    /// Look up a single value of the last metadata snapshot.
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.provider_metadata.get(key)
    }

    /// The entity's own size, when both dimensions are known.
    pub fn box_size(&self) -> Option<MediaBox> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(MediaBox::new(width, height)),
            _ => None,
        }
    }
}

/// Descriptive metadata returned by a remote oEmbed endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub title: String,
    pub author_name: String,
    pub height: u32,
    pub width: u32,
    /// Provider-specific fields (thumbnail_url, html, provider_name...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MetadataRecord {
    /// Parse a record out of a raw JSON object.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(object.clone()))
    }
}

/// Concrete display size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaBox {
    pub width: u32,
    pub height: u32,
}

impl MediaBox {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_entity_is_pending_and_enabled() {
        let media = MediaEntity::new();
        assert_eq!(media.provider_status, ProviderStatus::Pending);
        assert!(media.enabled);
        assert!(media.provider_reference.is_none());
    }

    #[test]
    fn test_box_size_requires_both_dimensions() {
        let mut media = MediaEntity::new();
        media.width = Some(640);
        assert_eq!(media.box_size(), None);

        media.height = Some(480);
        assert_eq!(media.box_size(), Some(MediaBox::new(640, 480)));
    }

    #[test]
    fn test_metadata_record_keeps_extra_fields() {
        let object = json!({
            "title": "T",
            "author_name": "A",
            "height": 480,
            "width": 640,
            "thumbnail_url": "https://i.ytimg.com/vi/x/hqdefault.jpg"
        });
        let record = MetadataRecord::from_object(object.as_object().unwrap()).unwrap();

        assert_eq!(record.title, "T");
        assert_eq!(record.width, 640);
        assert_eq!(
            record.extra.get("thumbnail_url"),
            Some(&json!("https://i.ytimg.com/vi/x/hqdefault.jpg"))
        );
    }

    #[test]
    fn test_metadata_record_rejects_missing_title() {
        let object = json!({ "author_name": "A", "height": 480, "width": 640 });
        assert!(MetadataRecord::from_object(object.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_metadata_record_rejects_string_dimensions() {
        let object = json!({ "title": "T", "author_name": "A", "height": "480", "width": 640 });
        assert!(MetadataRecord::from_object(object.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_status_deserializes_snake_case() {
        let status: ProviderStatus = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(status, ProviderStatus::Error);
        assert_eq!(status.as_str(), "error");
    }
}
