//! Internal error helpers for mapping HTTP/reqwest errors to [`ProviderError`].

use contentgen_types::ProviderError;

/// Map a non-success HTTP status to a [`ProviderError`].
///
/// The body is never read; the reason phrase comes from the status code.
pub(crate) fn map_http_status(status: reqwest::StatusCode) -> ProviderError {
    ProviderError::HttpStatus {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
    }
}

/// Map a [`reqwest::Error`] to a [`ProviderError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout()
    } else if err.is_decode() {
        ProviderError::Decode(err.to_string())
    } else {
        ProviderError::transport(err.to_string(), err)
    }
}
