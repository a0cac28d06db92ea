use super::{types::Config, ConfigError};
use crate::dimension::REFERENCE_FORMAT;

/// Validate configuration
/// Currently validates:
/// - Provider name is not empty
/// - oEmbed endpoint is an http(s) URL
/// - Timeout is not 0
/// - Formats declare at least one non-zero dimension and don't shadow `reference`
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let youtube = &config.youtube;

    if youtube.name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "youtube.name cannot be empty".to_string(),
        ));
    }

    if !(youtube.oembed_endpoint.starts_with("http://")
        || youtube.oembed_endpoint.starts_with("https://"))
    {
        return Err(ConfigError::ValidationError(format!(
            "youtube.oembed_endpoint must be an http(s) URL, got '{}'",
            youtube.oembed_endpoint
        )));
    }

    if youtube.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "youtube.timeout_secs cannot be 0".to_string(),
        ));
    }

    for (name, format) in &config.formats {
        if name == REFERENCE_FORMAT {
            return Err(ConfigError::ValidationError(format!(
                "format name '{}' is reserved",
                REFERENCE_FORMAT
            )));
        }
        let width = format.width.unwrap_or(0);
        let height = format.height.unwrap_or(0);
        if width == 0 && height == 0 {
            return Err(ConfigError::ValidationError(format!(
                "formats.{} needs a non-zero width or height",
                name
            )));
        }
        if format.width == Some(0) || format.height == Some(0) {
            return Err(ConfigError::ValidationError(format!(
                "formats.{} dimensions cannot be 0",
                name
            )));
        }
    }

    Ok(())
}
