//! Resolution of named display formats into concrete boxes.

use std::collections::BTreeMap;

use crate::config::FormatConfig;
use crate::media::{MediaBox, MediaEntity};
use crate::provider::ProviderError;

/// Format name that always maps to the media's own size.
pub const REFERENCE_FORMAT: &str = "reference";

/// Computes the display box of a media for a named format.
pub trait DimensionResolver: Send + Sync {
    fn resolve(&self, media: &MediaEntity, format: &str) -> Result<MediaBox, ProviderError>;
}

/// Resolver backed by a table of configured formats.
///
/// A format declaring a single dimension gets the other one from the
/// media's aspect ratio, rounded to the nearest pixel.
#[derive(Debug, Clone, Default)]
pub struct FormatBoxResolver {
    formats: BTreeMap<String, FormatConfig>,
}

impl FormatBoxResolver {
    pub fn new(formats: BTreeMap<String, FormatConfig>) -> Self {
        Self { formats }
    }

    pub fn with_format(mut self, name: impl Into<String>, format: FormatConfig) -> Self {
        self.formats.insert(name.into(), format);
        self
    }
}

impl DimensionResolver for FormatBoxResolver {
    fn resolve(&self, media: &MediaEntity, format: &str) -> Result<MediaBox, ProviderError> {
        if format == REFERENCE_FORMAT {
            return media.box_size().ok_or_else(|| {
                ProviderError::InvalidBox("media has no known size".to_string())
            });
        }

        let settings = self
            .formats
            .get(format)
            .ok_or_else(|| ProviderError::UnknownFormat(format.to_string()))?;

        match (settings.width, settings.height) {
            (Some(width), Some(height)) => Ok(MediaBox::new(width, height)),
            (Some(width), None) => {
                let size = known_size(media, format)?;
                Ok(MediaBox::new(width, scale(width, size.height, size.width)))
            }
            (None, Some(height)) => {
                let size = known_size(media, format)?;
                Ok(MediaBox::new(scale(height, size.width, size.height), height))
            }
            (None, None) => Err(ProviderError::InvalidBox(format!(
                "format '{}' declares neither width nor height",
                format
            ))),
        }
    }
}

fn known_size(media: &MediaEntity, format: &str) -> Result<MediaBox, ProviderError> {
    match media.box_size() {
        Some(size) if size.width > 0 && size.height > 0 => Ok(size),
        _ => Err(ProviderError::InvalidBox(format!(
            "format '{}' needs the media size to derive a missing dimension",
            format
        ))),
    }
}

fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    (f64::from(value) * f64::from(numerator) / f64::from(denominator)).round() as u32
}
