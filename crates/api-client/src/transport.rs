// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport abstraction
//!
//! The request executor talks to the network only through [`HttpTransport`].
//! [`ReqwestTransport`] is the production implementation; tests substitute
//! their own to observe requests and inject failures.

use reqwest::{Client, Method};
use thiserror::Error;
use url::Url;

/// A fully assembled outbound request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including the query string
    pub url: Url,
    /// Header name/value pairs in the order they were attached
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response as received from the server, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Raw body text, empty when the server sent none
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A failure to obtain any response from the server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Description of what went wrong
    pub message: String,
}

impl TransportError {
    /// Create a transport error
    pub fn new<T: ToString>(message: T) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::new(format!("connection failed: {err}"))
        } else {
            Self::new(err)
        }
    }
}

/// Something that can resolve an [`HttpRequest`] into an [`HttpResponse`]
pub trait HttpTransport: Send + Sync {
    /// Send the request and return the server's answer
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response could be obtained.
    /// Non-success status codes are responses, not errors.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// [`HttpTransport`] backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wrap an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client with default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised
    pub fn with_defaults() -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::new(format!("failed to create HTTP client: {e}")))?;
        Ok(Self::new(client))
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        // A truncated success body is a transport failure. An unreadable
        // error body still leaves the status to classify the call.
        let body = if response.status().is_success() {
            response.text().await?
        } else {
            response.text().await.unwrap_or_default()
        };

        Ok(HttpResponse { status, body })
    }
}
