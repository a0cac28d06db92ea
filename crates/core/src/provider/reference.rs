//! Normalization of raw input into canonical provider references.

use regex_lite::Regex;
use tracing::debug;

/// Name of the capture group holding the reference in extractor patterns.
pub const REFERENCE_GROUP: &str = "id";

/// Turns pasted URLs and short codes into a canonical reference id.
///
/// Input that already has the canonical length is returned as-is, so a
/// stored reference never goes through the pattern again. Input that does
/// not match is also returned unchanged: deciding whether the result is a
/// valid reference is up to the caller.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceExtractor {
    pattern: &'static Regex,
    canonical_len: usize,
}

impl ReferenceExtractor {
    /// `pattern` must contain a named group called [`REFERENCE_GROUP`].
    pub const fn new(pattern: &'static Regex, canonical_len: usize) -> Self {
        Self {
            pattern,
            canonical_len,
        }
    }

    pub fn normalize(&self, raw: &str) -> String {
        if raw.len() == self.canonical_len {
            return raw.to_string();
        }

        match self
            .pattern
            .captures(raw)
            .and_then(|caps| caps.name(REFERENCE_GROUP))
        {
            Some(id) => {
                debug!("Extracted reference '{}' from '{}'", id.as_str(), raw);
                id.as_str().to_string()
            }
            None => raw.to_string(),
        }
    }
}
