//! Client configuration: where the service lives and the default reference URL.

use std::fmt;

/// Environment variable holding the service base address, read by the CLI.
pub const API_URL_ENV: &str = "RFPDESK_API_URL";

/// Base address used when [`API_URL_ENV`] is unset or empty.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Company knowledge-base URL offered before the user edits it.
pub const DEFAULT_COMPANY_URL: &str = "https://www.intelia.com.au/";

/// User-supplied pointer to the company knowledge source used for drafting.
///
/// Any string is accepted. Malformed URLs are passed through to the service
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceUrl(String);

impl ReferenceUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ReferenceUrl {
    fn default() -> Self {
        Self(DEFAULT_COMPANY_URL.to_string())
    }
}

impl fmt::Display for ReferenceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service base address, without a trailing slash.
    pub base_url: String,
    pub company_url: ReferenceUrl,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            company_url: ReferenceUrl::default(),
        }
    }

    pub fn with_company_url(mut self, url: impl Into<String>) -> Self {
        self.company_url = ReferenceUrl::new(url);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let cfg = ClientConfig::new("http://localhost:8000/");
        assert_eq!(cfg.base_url, "http://localhost:8000");
    }

    #[test]
    fn company_url_override() {
        let cfg = ClientConfig::default().with_company_url("https://acme.com");
        assert_eq!(cfg.base_url, DEFAULT_API_URL);
        assert_eq!(cfg.company_url.as_str(), "https://acme.com");
    }

    #[test]
    fn reference_url_has_non_empty_default() {
        let url = ReferenceUrl::default();
        assert!(!url.as_str().is_empty());
        assert_eq!(ClientConfig::default().company_url, url);
    }

    #[test]
    fn reference_url_accepts_anything() {
        let url = ReferenceUrl::new("not a url");
        assert_eq!(url.to_string(), "not a url");
    }
}
