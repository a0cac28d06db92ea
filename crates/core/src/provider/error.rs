use thiserror::Error;

use crate::oembed::FetchError;

/// Errors returned by provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The operation needs a stored provider reference and there is none.
    #[error("Unable to generate reference url for media without provider reference")]
    MissingReference,

    /// The requested display format is not configured.
    #[error("Unknown display format: {0}")]
    UnknownFormat(String),

    /// A display box could not be computed for the media.
    #[error("Cannot compute display box: {0}")]
    InvalidBox(String),

    /// The reference URL cannot be used as a `Location` header.
    #[error("Invalid redirect location: {0}")]
    InvalidLocation(String),

    /// Remote metadata could not be fetched or parsed.
    #[error("Metadata fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

impl ProviderError {
    /// True for invalid-argument style failures (missing reference).
    pub fn is_precondition(&self) -> bool {
        matches!(self, ProviderError::MissingReference)
    }

    /// True when the failure came from the metadata endpoint.
    pub fn is_fetch(&self) -> bool {
        matches!(self, ProviderError::Fetch(_))
    }
}
