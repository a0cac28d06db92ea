pub mod config;
pub mod dimension;
pub mod media;
pub mod oembed;
pub mod provider;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, FormatConfig,
    YouTubeConfig,
};
pub use dimension::{DimensionResolver, FormatBoxResolver, REFERENCE_FORMAT};
pub use media::{MediaBox, MediaEntity, MetadataRecord, ProviderStatus};
pub use oembed::{FetchError, OEmbedClient, ReqwestOEmbedClient};
pub use provider::{
    create_youtube_provider, MediaProvider, MetadataBuilder, NoopMetadataBuilder, PlaybackConfig,
    PlaybackOptions, ProviderDescriptor, ProviderError, RedirectResponse, SetupError,
    VideoPlatform, VideoProvider, YouTube, YouTubeProvider,
};
