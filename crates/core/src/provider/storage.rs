//! Metadata attached to files a provider hands to a storage backend.

use std::collections::BTreeMap;

use crate::media::MediaEntity;

/// Builds storage object metadata (content type, cache headers...) for a
/// file derived from a media, such as a thumbnail.
pub trait MetadataBuilder: Send + Sync {
    fn storage_metadata(&self, media: &MediaEntity, filename: &str) -> BTreeMap<String, String>;
}

/// Builder used when none is configured: attaches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetadataBuilder;

impl MetadataBuilder for NoopMetadataBuilder {
    fn storage_metadata(&self, _media: &MediaEntity, _filename: &str) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}

/// Sets `Content-Type` from the file extension, falling back to the
/// media's own content type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentTypeMetadataBuilder;

impl MetadataBuilder for ContentTypeMetadataBuilder {
    fn storage_metadata(&self, media: &MediaEntity, filename: &str) -> BTreeMap<String, String> {
        let mut metadata = BTreeMap::new();
        let content_type = guess_content_type(filename)
            .map(str::to_string)
            .or_else(|| media.content_type.clone());
        if let Some(content_type) = content_type {
            metadata.insert("Content-Type".to_string(), content_type);
        }
        metadata
    }
}

fn guess_content_type(filename: &str) -> Option<&'static str> {
    let (_, extension) = filename.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
