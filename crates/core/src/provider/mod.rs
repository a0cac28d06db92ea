//! Media providers.
//!
//! A provider turns raw user input into a canonical reference, keeps the
//! media's descriptive metadata in sync with the remote platform and
//! describes how the media is played and downloaded.
//!
//! [`VideoProvider`] holds everything shared by hosted-video providers;
//! a [`VideoPlatform`] such as [`YouTube`] only supplies its id pattern,
//! URL forms and embed parameter defaults.

mod descriptor;
mod download;
mod error;
mod metadata;
mod playback;
mod reference;
mod schema;
mod storage;
mod video;
mod youtube;

pub use descriptor::ProviderDescriptor;
pub use download::RedirectResponse;
pub use error::ProviderError;
pub use metadata::MetadataSynchronizer;
pub use playback::{encode_query, PlaybackConfig, PlaybackConfigBuilder, PlaybackOptions};
pub use reference::{ReferenceExtractor, REFERENCE_GROUP};
pub use schema::{
    DefaultValue, InlineParameter, InlineSource, ParameterSchema, ParameterSpec, SchemaError,
};
pub use storage::{ContentTypeMetadataBuilder, MetadataBuilder, NoopMetadataBuilder};
pub use video::{VideoPlatform, VideoProvider};
pub use youtube::{
    create_youtube_provider, YouTube, YouTubeProvider, VIDEO_ID_LEN, YOUTUBE_PARAMETERS,
};

use std::collections::BTreeMap;

use async_trait::async_trait;
use http::HeaderMap;
use thiserror::Error;

use crate::media::{MediaEntity, MetadataRecord};
use crate::oembed::FetchError;

/// Translation domain used by provider descriptors.
pub const DESCRIPTOR_DOMAIN: &str = "mediaprov";

/// Errors raised while building a provider.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Invalid parameter schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] FetchError),
}

/// Capabilities every media provider offers.
#[async_trait]
pub trait MediaProvider: Send + Sync {
    fn name(&self) -> &str;

    fn descriptor(&self) -> ProviderDescriptor;

    /// Canonical reference for raw input. Unrecognized input comes back
    /// unchanged.
    fn normalize(&self, raw: &str) -> String;

    /// Normalize `raw_content` into the provider reference and fetch
    /// metadata, overwriting name and author.
    ///
    /// Never fails: a failed fetch sets the status to `Error` and disables
    /// the media, keeping the reference. No-op without `raw_content`.
    async fn transform(&self, media: &mut MediaEntity);

    /// Fetch metadata for the stored reference. Errors are returned as-is
    /// and leave the media untouched.
    async fn sync_metadata(
        &self,
        media: &mut MediaEntity,
        force: bool,
    ) -> Result<MetadataRecord, ProviderError>;

    /// Embed configuration for `media` displayed in `format`.
    fn playback_config(
        &self,
        media: &MediaEntity,
        format: &str,
        options: &PlaybackOptions,
    ) -> Result<PlaybackConfig, ProviderError>;

    fn reference_url(&self, media: &MediaEntity) -> Result<String, ProviderError>;

    /// Redirect to the reference URL with `headers` merged in.
    fn download_response(
        &self,
        media: &MediaEntity,
        headers: HeaderMap,
    ) -> Result<RedirectResponse, ProviderError>;

    /// Preview image URL taken from the last metadata snapshot.
    fn reference_image(&self, media: &MediaEntity) -> Option<String>;

    fn storage_metadata(&self, media: &MediaEntity, filename: &str) -> BTreeMap<String, String>;
}
