// Validation and normalization of user-submitted audit targets

use crate::error::{Result, ScanError};
use std::fmt;
use url::Url;

const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// A user-supplied URL that passed validation.
///
/// The normalized string is kept verbatim (trimmed, scheme-prefixed) so the
/// caller sees the URL the way it was submitted rather than the serializer's
/// canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl {
    normalized: String,
    parsed: Url,
}

impl TargetUrl {
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn url(&self) -> &Url {
        &self.parsed
    }

    pub fn host(&self) -> &str {
        self.parsed.host_str().unwrap_or_default()
    }

    pub fn is_https(&self) -> bool {
        self.parsed.scheme() == "https"
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

/// Validate raw user input and turn it into an absolute URL.
///
/// Input without an explicit `http://` or `https://` prefix gets `https://`.
/// Hostnames must contain a dot or be `localhost`, which keeps bare words
/// like `test` from being treated as hosts.
pub fn validate_url(raw: Option<&str>) -> Result<TargetUrl> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(ScanError::MissingUrl),
    };

    let trimmed = raw.trim();
    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed)
    };

    let parsed = Url::parse(&normalized)?;

    let host = parsed.host_str().unwrap_or_default();
    if !host.contains('.') && host != "localhost" {
        return Err(ScanError::InvalidHost(host.to_string()));
    }

    Ok(TargetUrl { normalized, parsed })
}
