//! Download responses for providers whose content lives elsewhere.

use http::header::{HeaderMap, HeaderValue, LOCATION};
use http::{Response, StatusCode};

use super::ProviderError;

/// A redirect instruction: status, headers and no body.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl RedirectResponse {
    /// 302 to `location`, keeping the caller's headers.
    ///
    /// `Location` always points at `location`, even if the caller passed
    /// its own.
    pub fn found(location: &str, mut headers: HeaderMap) -> Result<Self, ProviderError> {
        let value = HeaderValue::from_str(location)
            .map_err(|_| ProviderError::InvalidLocation(location.to_string()))?;
        headers.insert(LOCATION, value);

        Ok(Self {
            status: StatusCode::FOUND,
            headers,
        })
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }
}

impl From<RedirectResponse> for Response<()> {
    fn from(redirect: RedirectResponse) -> Self {
        let mut response = Response::new(());
        *response.status_mut() = redirect.status;
        *response.headers_mut() = redirect.headers;
        response
    }
}
