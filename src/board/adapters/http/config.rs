//! Connection settings for the HTTP task store.

use reqwest::Url;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "TASKBOARD_API_URL";
/// Environment variable holding the bearer token.
pub const API_TOKEN_ENV: &str = "TASKBOARD_API_TOKEN";
/// Environment variable holding the request timeout in whole seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "TASKBOARD_REQUEST_TIMEOUT_SECS";

/// Errors raised while building HTTP store settings or the client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpStoreConfigError {
    /// A required environment variable is unset or blank.
    #[error("missing required setting {0}")]
    MissingSetting(&'static str),

    /// The base URL does not parse.
    #[error("invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl {
        /// Offending value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The base URL is not `http` or `https`.
    #[error("unsupported API URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    /// The timeout is not a positive whole number of seconds.
    #[error("invalid request timeout '{0}', expected positive seconds")]
    InvalidTimeout(String),

    /// The bearer token contains bytes not allowed in a header.
    #[error("bearer token is not a valid header value")]
    InvalidBearerToken,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// HTTP store settings.
///
/// No timeout is applied unless one is configured; a hung request then
/// leaves the board in its current state.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpStoreConfig {
    base_url: Url,
    bearer_token: Option<String>,
    request_timeout: Option<Duration>,
}

impl HttpStoreConfig {
    /// Creates settings for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpStoreConfigError::InvalidBaseUrl`] or
    /// [`HttpStoreConfigError::UnsupportedScheme`] for unusable URLs.
    pub fn new(base_url: &str) -> Result<Self, HttpStoreConfigError> {
        let trimmed = base_url.trim();
        let parsed = Url::parse(trimmed).map_err(|err| HttpStoreConfigError::InvalidBaseUrl {
            value: trimmed.to_owned(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(HttpStoreConfigError::UnsupportedScheme(
                parsed.scheme().to_owned(),
            ));
        }
        if parsed.cannot_be_a_base() {
            return Err(HttpStoreConfigError::InvalidBaseUrl {
                value: trimmed.to_owned(),
                reason: "URL cannot be a base".to_owned(),
            });
        }
        Ok(Self {
            base_url: parsed,
            bearer_token: None,
            request_timeout: None,
        })
    }

    /// Attaches a bearer token sent with every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Sets a transport-level timeout for every request.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`HttpStoreConfigError`] when the URL is missing or any value
    /// is malformed.
    pub fn from_env() -> Result<Self, HttpStoreConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps variable names to values.
    ///
    /// # Errors
    ///
    /// Returns [`HttpStoreConfigError`] when the URL is missing or any value
    /// is malformed.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, HttpStoreConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url =
            non_blank(API_URL_ENV).ok_or(HttpStoreConfigError::MissingSetting(API_URL_ENV))?;
        let mut config = Self::new(&base_url)?;

        if let Some(token) = non_blank(API_TOKEN_ENV) {
            config = config.with_bearer_token(token.trim());
        }
        if let Some(raw) = non_blank(REQUEST_TIMEOUT_ENV) {
            let seconds = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .ok_or_else(|| HttpStoreConfigError::InvalidTimeout(raw.clone()))?;
            config = config.with_request_timeout(Duration::from_secs(seconds));
        }
        Ok(config)
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the bearer token, if configured.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Resolves `segments` below the base URL, percent-encoding each one.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl fmt::Debug for HttpStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpStoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
