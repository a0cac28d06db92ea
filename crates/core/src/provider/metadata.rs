//! Synchronization of descriptive metadata from an oEmbed endpoint.

use tracing::debug;

use super::ProviderError;
use crate::media::{MediaEntity, MetadataRecord};
use crate::oembed::{lookup_url, FetchError, OEmbedClient};

/// Fetches oEmbed metadata for a reference URL and copies it onto a media.
///
/// One request per call, no retry, no caching. The media is only touched
/// once a complete record has been parsed, so a failed sync leaves it as
/// it was.
pub struct MetadataSynchronizer<'a> {
    client: &'a dyn OEmbedClient,
    endpoint: &'a str,
    content_type: &'a str,
}

impl<'a> MetadataSynchronizer<'a> {
    pub fn new(client: &'a dyn OEmbedClient, endpoint: &'a str, content_type: &'a str) -> Self {
        Self {
            client,
            endpoint,
            content_type,
        }
    }

    /// `force` also overwrites the user-facing name and author.
    pub async fn sync(
        &self,
        media: &mut MediaEntity,
        reference_url: &str,
        force: bool,
    ) -> Result<MetadataRecord, ProviderError> {
        let url = lookup_url(self.endpoint, reference_url);
        let object = self.client.fetch(&url).await?;

        let record = MetadataRecord::from_object(&object)
            .map_err(|e| FetchError::Parse(format!("Invalid oEmbed document: {}", e)))?;

        debug!(
            "Fetched metadata for {}: '{}' by '{}' ({}x{})",
            reference_url, record.title, record.author_name, record.width, record.height
        );

        media.provider_metadata = object;
        if force {
            media.name = Some(record.title.clone());
            media.author_name = Some(record.author_name.clone());
        }
        media.height = Some(record.height);
        media.width = Some(record.width);
        media.content_type = Some(self.content_type.to_string());

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockOEmbedClient};

    const REFERENCE_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    fn media_with_name() -> MediaEntity {
        let mut media = MediaEntity::new();
        media.name = Some("My edited title".to_string());
        media.author_name = Some("Me".to_string());
        media
    }

    #[tokio::test]
    async fn test_forced_sync_overwrites_name_and_author() {
        let client = MockOEmbedClient::new();
        client
            .set_response(fixtures::oembed_document("T", "A", 640, 480))
            .await;
        let sync = MetadataSynchronizer::new(&client, "https://oembed.test", "video/x-flv");

        let mut media = media_with_name();
        let record = sync.sync(&mut media, REFERENCE_URL, true).await.unwrap();

        assert_eq!(record.title, "T");
        assert_eq!(media.name.as_deref(), Some("T"));
        assert_eq!(media.author_name.as_deref(), Some("A"));
        assert_eq!(media.width, Some(640));
        assert_eq!(media.height, Some(480));
        assert_eq!(media.content_type.as_deref(), Some("video/x-flv"));
        assert_eq!(media.provider_metadata["title"], "T");
    }

    #[tokio::test]
    async fn test_unforced_sync_keeps_name_and_author() {
        let client = MockOEmbedClient::new();
        client
            .set_response(fixtures::oembed_document("T", "A", 640, 480))
            .await;
        let sync = MetadataSynchronizer::new(&client, "https://oembed.test", "video/x-flv");

        let mut media = media_with_name();
        sync.sync(&mut media, REFERENCE_URL, false).await.unwrap();

        assert_eq!(media.name.as_deref(), Some("My edited title"));
        assert_eq!(media.author_name.as_deref(), Some("Me"));
        assert_eq!(media.width, Some(640));
    }

    #[tokio::test]
    async fn test_sync_requests_encoded_lookup_url() {
        let client = MockOEmbedClient::new();
        client
            .set_response(fixtures::oembed_document("T", "A", 640, 480))
            .await;
        let sync = MetadataSynchronizer::new(&client, "https://oembed.test", "video/x-flv");

        sync.sync(&mut MediaEntity::new(), REFERENCE_URL, false)
            .await
            .unwrap();

        assert_eq!(
            client.requested_urls().await,
            vec![
                "https://oembed.test?url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3DdQw4w9WgXcQ&format=json"
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_incomplete_document_is_a_fetch_error_and_leaves_media_untouched() {
        let client = MockOEmbedClient::new();
        let mut document = fixtures::oembed_document("T", "A", 640, 480);
        document.remove("author_name");
        client.set_response(document).await;
        let sync = MetadataSynchronizer::new(&client, "https://oembed.test", "video/x-flv");

        let mut media = media_with_name();
        let before = media.clone();
        let err = sync.sync(&mut media, REFERENCE_URL, true).await.unwrap_err();

        assert!(err.is_fetch());
        assert_eq!(media, before);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = MockOEmbedClient::new();
        client
            .set_next_error(FetchError::Status {
                status: 500,
                message: "boom".to_string(),
            })
            .await;
        let sync = MetadataSynchronizer::new(&client, "https://oembed.test", "video/x-flv");

        let result = sync.sync(&mut MediaEntity::new(), REFERENCE_URL, true).await;
        assert!(matches!(
            result,
            Err(ProviderError::Fetch(FetchError::Status { status: 500, .. }))
        ));
    }
}
