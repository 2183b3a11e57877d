// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy shared by every SDK component
//!
//! Every failure the SDK reports is an [`ApiError`] of exactly one kind.
//! Callers branch on [`ApiError::kind`] or [`ApiError::code`]; the message is
//! meant for humans and may change between releases.

use std::fmt;

use thiserror::Error;

/// Result type alias for SDK operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Code attached to network errors caused by the per-call timeout
pub const TIMEOUT_CODE: &str = "TIMEOUT";
/// Code attached to server errors for status codes outside the known table
pub const UNEXPECTED_STATUS_CODE: &str = "UNEXPECTED_STATUS";
/// Code attached to server errors for success bodies that cannot be decoded
pub const INVALID_RESPONSE_CODE: &str = "INVALID_RESPONSE";

/// Discriminant of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport failure or timeout
    Network,
    /// Input rejected locally or by the server (400)
    Validation,
    /// Missing or rejected credentials (401, 403)
    Authentication,
    /// Resource does not exist (404)
    NotFound,
    /// Too many requests (429)
    RateLimit,
    /// Server-side failure or unexpected status
    Server,
    /// NFT domain rule violated
    Nft,
    /// Marketplace domain rule violated
    Marketplace,
    /// Collection domain rule violated
    Collection,
}

impl ErrorKind {
    /// Machine-readable code used when no more specific code is known
    pub const fn default_code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Validation => "VALIDATION_ERROR",
            Self::Authentication => "AUTHENTICATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::RateLimit => "RATE_LIMIT_EXCEEDED",
            Self::Server => "SERVER_ERROR",
            Self::Nft => "NFT_ERROR",
            Self::Marketplace => "MARKETPLACE_ERROR",
            Self::Collection => "COLLECTION_ERROR",
        }
    }

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Network => "Network",
            Self::Validation => "Validation",
            Self::Authentication => "Authentication",
            Self::NotFound => "Not found",
            Self::RateLimit => "Rate limit",
            Self::Server => "Server",
            Self::Nft => "NFT",
            Self::Marketplace => "Marketplace",
            Self::Collection => "Collection",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors reported by the SDK
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// Transport failure, including timeouts
    #[error("Network error: {message}")]
    Network {
        message: String,
        code: Option<String>,
    },

    /// Input failed validation
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        code: Option<String>,
    },

    /// Credentials missing or rejected
    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        code: Option<String>,
    },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        code: Option<String>,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        code: Option<String>,
    },

    /// Server-side failure
    #[error("Server error: {message}")]
    Server {
        message: String,
        code: Option<String>,
    },

    /// NFT domain error
    #[error("NFT error: {message}")]
    Nft {
        message: String,
        code: Option<String>,
    },

    /// Marketplace domain error
    #[error("Marketplace error: {message}")]
    Marketplace {
        message: String,
        code: Option<String>,
    },

    /// Collection domain error
    #[error("Collection error: {message}")]
    Collection {
        message: String,
        code: Option<String>,
    },
}

impl ApiError {
    /// Build an error of the given kind without an explicit code
    pub fn new<T: ToString>(kind: ErrorKind, message: T) -> Self {
        let message = message.to_string();
        let code = None;
        match kind {
            ErrorKind::Network => Self::Network { message, code },
            ErrorKind::Validation => Self::Validation { message, code },
            ErrorKind::Authentication => Self::Authentication { message, code },
            ErrorKind::NotFound => Self::NotFound { message, code },
            ErrorKind::RateLimit => Self::RateLimit { message, code },
            ErrorKind::Server => Self::Server { message, code },
            ErrorKind::Nft => Self::Nft { message, code },
            ErrorKind::Marketplace => Self::Marketplace { message, code },
            ErrorKind::Collection => Self::Collection { message, code },
        }
    }

    /// Create a network error
    pub fn network<T: ToString>(message: T) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// Create a validation error
    pub fn validation<T: ToString>(message: T) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an authentication error
    pub fn authentication<T: ToString>(message: T) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create a not found error
    pub fn not_found<T: ToString>(message: T) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a rate limit error
    pub fn rate_limit<T: ToString>(message: T) -> Self {
        Self::new(ErrorKind::RateLimit, message)
    }

    /// Create a server error
    pub fn server<T: ToString>(message: T) -> Self {
        Self::new(ErrorKind::Server, message)
    }

    /// Create an NFT domain error
    pub fn nft<T: ToString>(message: T) -> Self {
        Self::new(ErrorKind::Nft, message)
    }

    /// Create a marketplace domain error
    pub fn marketplace<T: ToString>(message: T) -> Self {
        Self::new(ErrorKind::Marketplace, message)
    }

    /// Create a collection domain error
    pub fn collection<T: ToString>(message: T) -> Self {
        Self::new(ErrorKind::Collection, message)
    }

    /// Create the network error reported when a call exceeds its timeout
    pub fn timeout(timeout_ms: u128) -> Self {
        Self::network(format!("request timed out after {timeout_ms} ms")).with_code(TIMEOUT_CODE)
    }

    /// Attach a machine-readable code
    #[must_use]
    pub fn with_code<T: ToString>(mut self, new_code: T) -> Self {
        *self.code_slot() = Some(new_code.to_string());
        self
    }

    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } => ErrorKind::Network,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Server { .. } => ErrorKind::Server,
            Self::Nft { .. } => ErrorKind::Nft,
            Self::Marketplace { .. } => ErrorKind::Marketplace,
            Self::Collection { .. } => ErrorKind::Collection,
        }
    }

    /// Human-readable message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Network { message, .. }
            | Self::Validation { message, .. }
            | Self::Authentication { message, .. }
            | Self::NotFound { message, .. }
            | Self::RateLimit { message, .. }
            | Self::Server { message, .. }
            | Self::Nft { message, .. }
            | Self::Marketplace { message, .. }
            | Self::Collection { message, .. } => message,
        }
    }

    /// Machine-readable code, falling back to the kind's default code
    pub fn code(&self) -> &str {
        match self {
            Self::Network { code, .. }
            | Self::Validation { code, .. }
            | Self::Authentication { code, .. }
            | Self::NotFound { code, .. }
            | Self::RateLimit { code, .. }
            | Self::Server { code, .. }
            | Self::Nft { code, .. }
            | Self::Marketplace { code, .. }
            | Self::Collection { code, .. } => code
                .as_deref()
                .unwrap_or_else(|| self.kind().default_code()),
        }
    }

    /// Whether the failure happened before the server answered and may succeed on retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Whether this is a timeout of the per-call deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { code: Some(code), .. } if code == TIMEOUT_CODE)
    }

    fn code_slot(&mut self) -> &mut Option<String> {
        match self {
            Self::Network { code, .. }
            | Self::Validation { code, .. }
            | Self::Authentication { code, .. }
            | Self::NotFound { code, .. }
            | Self::RateLimit { code, .. }
            | Self::Server { code, .. }
            | Self::Nft { code, .. }
            | Self::Marketplace { code, .. }
            | Self::Collection { code, .. } => code,
        }
    }
}
