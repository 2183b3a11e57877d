// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Loading client configuration from a file
//!
//! The format follows the file extension (`.json`, `.toml`, `.yaml`, ...).
//! Only the given file is read; nothing comes from the environment.

use std::{path::Path, time::Duration};

use api_client::{
    ApiError, ClientConfig,
    config::{DEFAULT_BASE_URL, DEFAULT_INITIAL_DELAY, DEFAULT_RETRIES, DEFAULT_TIMEOUT},
};
use config::{Config, ConfigError, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file is missing, unreadable, or does not match [`FileConfig`]
    #[error("failed to read configuration: {0}")]
    Read(#[from] ConfigError),

    /// The file was read but describes an invalid configuration
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ApiError),
}

/// On-disk shape of a client configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    /// API key sent as bearer token
    pub api_key: String,
    /// Base URL of the API
    pub base_url: String,
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,
    /// Total attempts per call
    pub retries: u32,
    /// First backoff delay in milliseconds
    pub initial_delay_ms: u64,
}

impl FileConfig {
    /// Validate into a [`ClientConfig`]
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty key, malformed base URL, or
    /// zero timeout
    pub fn into_client_config(self) -> Result<ClientConfig, ApiError> {
        ClientConfig::builder(self.api_key)
            .base_url(self.base_url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .retries(self.retries)
            .initial_delay(Duration::from_millis(self.initial_delay_ms))
            .build()
    }
}

/// Read a configuration file; every field but `api_key` has a default
///
/// # Errors
///
/// Returns [`ConfigFileError::Read`] if the file cannot be parsed and
/// [`ConfigFileError::Invalid`] if its values are rejected
pub fn load_client_config(path: impl AsRef<Path>) -> Result<ClientConfig, ConfigFileError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading client configuration");

    let file_config: FileConfig = Config::builder()
        .set_default("base_url", DEFAULT_BASE_URL)?
        .set_default("timeout_ms", duration_millis(DEFAULT_TIMEOUT))?
        .set_default("retries", DEFAULT_RETRIES)?
        .set_default("initial_delay_ms", duration_millis(DEFAULT_INITIAL_DELAY))?
        .add_source(File::from(path))
        .build()?
        .try_deserialize()?;

    Ok(file_config.into_client_config()?)
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
