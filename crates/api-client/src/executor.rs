// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request execution pipeline
//!
//! [`RequestExecutor::execute`] turns an [`ApiRequest`] into a typed result:
//! it builds the URL and headers, bounds every attempt by the configured
//! timeout, retries transport failures with exponential backoff, and maps the
//! final response onto the [`ApiError`] taxonomy.
//!
//! Only failures that happen before the server answers are retried. Once a
//! status code comes back the outcome is classified and returned as is.

use std::{sync::Arc, time::Instant};

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tokio::time::{sleep, timeout};
use tracing::{Span, debug, error, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::{
    config::ClientConfig,
    error::{ApiError, ApiResult, INVALID_RESPONSE_CODE, UNEXPECTED_STATUS_CODE},
    query::QueryParams,
    transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport},
};

/// Value of the `X-API-Version` header
pub const API_VERSION: &str = "1.0";
/// Value of the `X-Platform` header
pub const PLATFORM: &str = "rust-sdk";
/// Value of the `User-Agent` header
pub const USER_AGENT: &str = concat!("nft-sdk-rust/", env!("CARGO_PKG_VERSION"));
/// Message used when an error response carries no usable body
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Description of one logical API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    body: Option<Value>,
    query: QueryParams,
}

impl ApiRequest {
    /// Create a request for the path made of `segments`, each percent-encoded on its own
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            method,
            segments: segments
                .into_iter()
                .map(|segment| segment.as_ref().to_string())
                .collect(),
            body: None,
            query: QueryParams::new(),
        }
    }

    /// `GET` request
    pub fn get<I: IntoIterator<Item = S>, S: AsRef<str>>(segments: I) -> Self {
        Self::new(Method::GET, segments)
    }

    /// `POST` request
    pub fn post<I: IntoIterator<Item = S>, S: AsRef<str>>(segments: I) -> Self {
        Self::new(Method::POST, segments)
    }

    /// `PUT` request
    pub fn put<I: IntoIterator<Item = S>, S: AsRef<str>>(segments: I) -> Self {
        Self::new(Method::PUT, segments)
    }

    /// `DELETE` request
    pub fn delete<I: IntoIterator<Item = S>, S: AsRef<str>>(segments: I) -> Self {
        Self::new(Method::DELETE, segments)
    }

    /// Attach a JSON body
    ///
    /// # Errors
    ///
    /// Returns a validation error if `body` cannot be represented as JSON
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            ApiError::validation(format!("request body could not be serialized: {e}"))
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Attach query parameters
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Unencoded path, for logging
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// JSON body, if any
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Query parameters
    pub fn query(&self) -> &QueryParams {
        &self.query
    }
}

/// Executes [`ApiRequest`]s against the configured API
#[derive(Debug)]
pub struct RequestExecutor<T = ReqwestTransport> {
    config: Arc<ClientConfig>,
    transport: T,
}

impl RequestExecutor<ReqwestTransport> {
    /// Create an executor using a default `reqwest` transport
    ///
    /// # Errors
    ///
    /// Returns a network error if the HTTP client cannot be created
    pub fn with_reqwest(config: Arc<ClientConfig>) -> ApiResult<Self> {
        let transport = ReqwestTransport::with_defaults().map_err(ApiError::network)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: HttpTransport> RequestExecutor<T> {
    /// Create an executor over any transport
    pub fn new(config: Arc<ClientConfig>, transport: T) -> Self {
        Self { config, transport }
    }

    /// The configuration this executor was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve the absolute URL for a request, including present query parameters
    ///
    /// # Errors
    ///
    /// Returns a validation error if the base URL cannot carry a path
    pub fn build_url(&self, request: &ApiRequest) -> ApiResult<Url> {
        let mut url = Url::parse(self.config.base_url())
            .map_err(|e| ApiError::validation(format!("invalid base URL: {e}")))?;

        url.path_segments_mut()
            .map_err(|()| ApiError::validation("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(request.segments.iter().filter(|segment| !segment.is_empty()));

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.to_pairs());
        }

        Ok(url)
    }

    /// Assemble the outbound request: URL, headers, and serialized body
    ///
    /// # Errors
    ///
    /// Returns a validation error if the URL or body cannot be built
    pub fn build_request(&self, request: &ApiRequest) -> ApiResult<HttpRequest> {
        let url = self.build_url(request)?;

        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.api_key()),
            ),
            ("Accept".to_string(), "application/json".to_string()),
            ("X-API-Version".to_string(), API_VERSION.to_string()),
            ("X-Platform".to_string(), PLATFORM.to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];

        let body = match &request.body {
            Some(value) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(serde_json::to_string(value).map_err(|e| {
                    ApiError::validation(format!("request body could not be serialized: {e}"))
                })?)
            }
            None => None,
        };

        Ok(HttpRequest {
            method: request.method.clone(),
            url,
            headers,
            body,
        })
    }

    /// Execute a request and decode the response body into `R`
    ///
    /// An empty success body decodes as JSON `null`, so `()`, `Option<_>`, and
    /// `serde::de::IgnoredAny` are valid targets for endpoints without content.
    ///
    /// # Errors
    ///
    /// Returns a [`ApiError::Network`] once the attempt budget is spent on
    /// transport failures, or the classified error for a non-success status
    #[instrument(
        skip(self, request),
        fields(method = %request.method, path = %request.path(), request_id)
    )]
    pub async fn execute<R: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<R> {
        let request_id = Uuid::new_v4();
        Span::current().record("request_id", request_id.to_string());

        let http_request = self.build_request(&request)?;
        let start_time = Instant::now();
        let response = self.send_with_retry(http_request).await?;

        debug!(
            request_id = %request_id,
            status = response.status,
            duration_ms = start_time.elapsed().as_millis(),
            "received response"
        );

        classify_response(&response)
    }

    /// Send with the configured attempt budget, sleeping between transport failures
    async fn send_with_retry(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let policy = self.config.retry_policy();
        let mut attempt = 1;

        loop {
            debug!(attempt, url = %request.url, "sending request");

            match self.send_once(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(err) if policy.should_retry_after(attempt, &err) => {
                    let delay = policy.delay_for_attempt(attempt);
                    warn!(
                        attempt,
                        max_attempts = policy.max_attempts(),
                        delay_ms = delay.as_millis(),
                        error = %err,
                        "transport failure, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    error!(attempt, error = %err, "request failed");
                    return Err(err);
                }
            }
        }
    }

    /// One attempt bounded by the configured timeout; every failure is a network error
    async fn send_once(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let limit = self.config.timeout();
        match timeout(limit, self.transport.send(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(ApiError::network(err)),
            Err(_) => Err(ApiError::timeout(limit.as_millis())),
        }
    }
}

/// Map a received response onto a decoded value or a classified error
///
/// # Errors
///
/// Returns the classified error for a non-success status, or a server error
/// with code `INVALID_RESPONSE` when a success body cannot be decoded
pub fn classify_response<R: DeserializeOwned>(response: &HttpResponse) -> ApiResult<R> {
    if !response.is_success() {
        return Err(classify_status(response.status, &response.body));
    }

    let decoded = if response.body.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(&response.body)
    };

    decoded.map_err(|e| {
        ApiError::server(format!("failed to decode response body: {e}"))
            .with_code(INVALID_RESPONSE_CODE)
    })
}

/// Map a non-success status code and its body onto the error taxonomy
pub fn classify_status(status: u16, body: &str) -> ApiError {
    let details = ErrorDetails::from_body(body);

    let error = match status {
        400 => ApiError::validation(details.message),
        401 | 403 => ApiError::authentication(details.message),
        404 => ApiError::not_found(details.message),
        429 => ApiError::rate_limit(details.message),
        500 | 502 | 503 | 504 => ApiError::server(details.message),
        other => {
            return ApiError::server(format!("Unexpected status code {other}: {}", details.message))
                .with_code(details.code.as_deref().unwrap_or(UNEXPECTED_STATUS_CODE));
        }
    };

    match details.code {
        Some(code) => error.with_code(code),
        None => error,
    }
}

/// First non-empty string among the `error` and `message` keys
fn message_field(object: &Map<String, Value>) -> Option<&str> {
    ["error", "message"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
}

fn code_field(object: &Map<String, Value>) -> Option<String> {
    object.get("code").and_then(Value::as_str).map(str::to_string)
}

/// Message and code pulled out of an error response body
#[derive(Debug, Clone, PartialEq, Eq)]
struct ErrorDetails {
    message: String,
    code: Option<String>,
}

impl ErrorDetails {
    /// Never fails: malformed bodies degrade to raw text, then to a fixed message
    fn from_body(body: &str) -> Self {
        let raw = body.trim();

        if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(raw) {
            // `{"error": {"message": ..., "code": ...}}` nests the details one level down
            let nested = object.get("error").and_then(Value::as_object);
            let message = nested
                .and_then(message_field)
                .or_else(|| message_field(&object))
                .unwrap_or(raw);
            let code = nested
                .and_then(code_field)
                .or_else(|| code_field(&object));

            return Self {
                message: message.to_string(),
                code,
            };
        }

        let message = if raw.is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            raw.to_string()
        };
        Self {
            message,
            code: None,
        }
    }
}
