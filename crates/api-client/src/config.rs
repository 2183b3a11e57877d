// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client configuration
//!
//! A [`ClientConfig`] is validated once when it is built and never changes
//! afterwards. Nothing is read from the process environment.

use std::{fmt, time::Duration};

use url::Url;

use crate::{
    error::{ApiError, ApiResult},
    retry::RetryPolicy,
};

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api.nftmarketplace.io/v1";
/// Per-attempt timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Attempt budget used when none is configured
pub const DEFAULT_RETRIES: u32 = 3;
/// First backoff delay used when none is configured
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);

/// Validated, immutable client configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
    retries: u32,
    initial_delay: Duration,
}

impl ClientConfig {
    /// Start building a configuration for the given API key
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }

    /// Configuration with defaults for everything but the API key
    ///
    /// # Errors
    ///
    /// Returns a validation error if the API key is empty
    pub fn new(api_key: impl Into<String>) -> ApiResult<Self> {
        Self::builder(api_key).build()
    }

    /// The API key sent as bearer token
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-attempt timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Total attempts per call
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// First backoff delay
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Retry policy derived from the attempt budget and initial delay
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, self.initial_delay)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("initial_delay", &self.initial_delay)
            .finish()
    }
}

/// Builder for [`ClientConfig`]
#[derive(Clone)]
pub struct ClientConfigBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    retries: u32,
    initial_delay: Duration,
}

impl fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("initial_delay", &self.initial_delay)
            .finish_non_exhaustive()
    }
}

impl ClientConfigBuilder {
    /// Override the base URL
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-attempt timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the total number of attempts per call
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Override the first backoff delay
    #[must_use]
    pub fn initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Validate and freeze the configuration
    ///
    /// # Errors
    ///
    /// Returns a validation error if the API key is empty, the base URL is not
    /// an absolute http(s) URL, or the timeout is zero
    pub fn build(self) -> ApiResult<ClientConfig> {
        let api_key = self.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ApiError::validation("API key cannot be empty"));
        }

        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url)
            .map_err(|e| ApiError::validation(format!("invalid base URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::validation(format!(
                "base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::validation("timeout must be greater than zero"));
        }

        Ok(ClientConfig {
            api_key,
            base_url,
            timeout: self.timeout,
            retries: self.retries,
            initial_delay: self.initial_delay,
        })
    }
}
