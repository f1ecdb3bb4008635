//! Destination URL validation and normalization.

use url::Url;

/// Longest destination accepted, in bytes, after normalization.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a submitted destination is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs can be shortened")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL is longer than {MAX_URL_LENGTH} characters")]
    TooLong,
}

/// Validates a destination and returns its canonical form.
///
/// The input must be an absolute `http` or `https` URL with a host. The
/// host is lowercased, a default port is dropped and the fragment is
/// removed; path and query are kept verbatim.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url("HTTPS://Example.COM:443/Docs?q=1#intro").unwrap(),
///     "https://example.com/Docs?q=1"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let input = input.trim();

    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {
            let lowered = host.to_ascii_lowercase();
            if lowered != host {
                url.set_host(Some(&lowered))
                    .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;
            }
        }
        _ => return Err(UrlNormalizationError::MissingHost),
    }

    // Default ports are already dropped by the parser.
    url.set_fragment(None);

    let normalized = url.to_string();
    if normalized.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    Ok(normalized)
}
