//! Shared implementation for providers backed by a video hosting platform.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use http::HeaderMap;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::{
    MediaProvider, MetadataBuilder, MetadataSynchronizer, NoopMetadataBuilder, ParameterSchema,
    PlaybackConfig, PlaybackConfigBuilder, PlaybackOptions, ProviderDescriptor, ProviderError,
    RedirectResponse, ReferenceExtractor, SchemaError,
};
use crate::dimension::DimensionResolver;
use crate::media::{MediaEntity, MetadataRecord, ProviderStatus};
use crate::oembed::OEmbedClient;

/// What a concrete video platform contributes to a [`VideoProvider`].
pub trait VideoPlatform: Send + Sync {
    /// Name used when the provider isn't given one explicitly.
    fn default_name(&self) -> &'static str;

    fn extractor(&self) -> ReferenceExtractor;

    /// Canonical public URL of a reference.
    fn reference_url(&self, reference: &str) -> String;

    fn oembed_endpoint(&self) -> &str;

    /// Content type recorded on media after a metadata sync.
    fn content_type(&self) -> &'static str;

    fn parameter_schema(&self) -> &'static ParameterSchema;

    /// Extra descriptor options (icon class...).
    fn descriptor_options(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// Media provider for content hosted on a video platform.
///
/// Only the reference lives on our side: metadata comes from the
/// platform's oEmbed endpoint and downloads redirect to the platform.
pub struct VideoProvider<P> {
    name: String,
    platform: P,
    client: Arc<dyn OEmbedClient>,
    resolver: Arc<dyn DimensionResolver>,
    metadata_builder: Arc<dyn MetadataBuilder>,
    html5: bool,
}

impl<P: VideoPlatform> VideoProvider<P> {
    /// Create a provider, validating the platform's parameter schema.
    pub fn new(
        platform: P,
        client: Arc<dyn OEmbedClient>,
        resolver: Arc<dyn DimensionResolver>,
    ) -> Result<Self, SchemaError> {
        let schema = platform.parameter_schema();
        schema.validate()?;
        debug!(
            "Using parameter schema '{}' v{} ({} url parameters)",
            schema.name,
            schema.version,
            schema.url_parameters.len()
        );

        Ok(Self {
            name: platform.default_name().to_string(),
            platform,
            client,
            resolver,
            metadata_builder: Arc::new(NoopMetadataBuilder),
            html5: false,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Default embed mode, overridable per call.
    pub fn with_html5(mut self, html5: bool) -> Self {
        self.html5 = html5;
        self
    }

    pub fn with_metadata_builder(mut self, builder: Arc<dyn MetadataBuilder>) -> Self {
        self.metadata_builder = builder;
        self
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn html5(&self) -> bool {
        self.html5
    }
}

#[async_trait]
impl<P: VideoPlatform> MediaProvider for VideoProvider<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            title: self.name.clone(),
            description: format!("{}.description", self.name),
            image: None,
            domain: Some(super::DESCRIPTOR_DOMAIN.to_string()),
            options: self.platform.descriptor_options(),
        }
    }

    fn normalize(&self, raw: &str) -> String {
        self.platform.extractor().normalize(raw)
    }

    async fn transform(&self, media: &mut MediaEntity) {
        let Some(raw) = media.raw_content.as_deref() else {
            return;
        };

        let reference = self.normalize(raw);
        media.provider_name = Some(self.name.clone());
        media.provider_status = ProviderStatus::Ok;
        media.provider_reference = Some(reference);

        // the reference stays even if the metadata fetch fails
        match self.sync_metadata(media, true).await {
            Ok(record) => {
                info!(
                    "Transformed media '{}' with {}: '{}'",
                    media.provider_reference.as_deref().unwrap_or_default(),
                    self.name,
                    record.title
                );
            }
            Err(e) => {
                warn!(
                    "Disabling media '{}': {}",
                    media.provider_reference.as_deref().unwrap_or_default(),
                    e
                );
                media.provider_status = ProviderStatus::Error;
                media.enabled = false;
            }
        }
    }

    async fn sync_metadata(
        &self,
        media: &mut MediaEntity,
        force: bool,
    ) -> Result<MetadataRecord, ProviderError> {
        let reference_url = self.reference_url(media)?;
        MetadataSynchronizer::new(
            self.client.as_ref(),
            self.platform.oembed_endpoint(),
            self.platform.content_type(),
        )
        .sync(media, &reference_url, force)
        .await
    }

    fn playback_config(
        &self,
        media: &MediaEntity,
        format: &str,
        options: &PlaybackOptions,
    ) -> Result<PlaybackConfig, ProviderError> {
        let display = self.resolver.resolve(media, format)?;
        Ok(PlaybackConfigBuilder::new(self.platform.parameter_schema(), self.html5)
            .build(display, options))
    }

    fn reference_url(&self, media: &MediaEntity) -> Result<String, ProviderError> {
        let reference = media
            .provider_reference
            .as_deref()
            .ok_or(ProviderError::MissingReference)?;
        Ok(self.platform.reference_url(reference))
    }

    fn download_response(
        &self,
        media: &MediaEntity,
        headers: HeaderMap,
    ) -> Result<RedirectResponse, ProviderError> {
        let url = self.reference_url(media)?;
        RedirectResponse::found(&url, headers)
    }

    fn reference_image(&self, media: &MediaEntity) -> Option<String> {
        media
            .metadata_value("thumbnail_url")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn storage_metadata(&self, media: &MediaEntity, filename: &str) -> BTreeMap<String, String> {
        self.metadata_builder.storage_metadata(media, filename)
    }
}
