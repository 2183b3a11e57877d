// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request execution pipeline for the NFT SDK
//!
//! This crate holds everything between a resource manager and the network:
//! input validation, the error taxonomy, and the executor that sends requests,
//! retries transport failures, and classifies responses.
//!
//! # Core Abstractions
//!
//! - **[`RequestExecutor`]**: builds URLs and headers, applies the per-call
//!   timeout, retries with exponential backoff, and maps status codes
//! - **[`HttpTransport`] Trait**: the seam to the network, implemented by
//!   [`ReqwestTransport`] and by test doubles
//! - **[`ApiError`]**: closed set of error kinds with machine-readable codes
//! - **[`validation`]**: pure checks run before any request is built
//!
//! # Retry Semantics
//!
//! A call gets [`ClientConfig::retries`] attempts in total. Only failures that
//! occur before a response arrives (connection errors, timeouts) are retried;
//! the wait after failed attempt `n` is `initial_delay * 2^(n - 1)`. Any HTTP
//! status, including 5xx, is final.

pub mod config;
pub mod error;
pub mod executor;
pub mod query;
pub mod retry;
pub mod transport;
pub mod validation;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ApiError, ApiResult, ErrorKind};
pub use executor::{ApiRequest, RequestExecutor, classify_response, classify_status};
pub use query::{QueryParams, QueryValue};
pub use retry::RetryPolicy;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
