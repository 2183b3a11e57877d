// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Test transports for exercising the request executor without a network

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use api_client::{ClientConfig, HttpRequest, HttpResponse, HttpTransport, TransportError};
use tokio::time::Instant;

/// Install a log subscriber once per test binary; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Build a configuration pointing at `base_url`
pub fn test_config(base_url: &str, retries: u32, initial_delay: Duration) -> Arc<ClientConfig> {
    Arc::new(
        ClientConfig::builder("test-api-key")
            .base_url(base_url)
            .retries(retries)
            .initial_delay(initial_delay)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap(),
    )
}

/// What a scripted transport does on one call
#[derive(Debug, Clone)]
pub enum Step {
    /// Answer with this response
    Respond(HttpResponse),
    /// Fail before any response
    Fail(String),
    /// Never answer within any reasonable timeout
    Hang,
}

/// Transport that replays a script and records every call
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Step>>>,
    calls: Arc<Mutex<Vec<(Instant, HttpRequest)>>>,
}

impl ScriptedTransport {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Arc::new(Mutex::new(steps.into_iter().collect())),
            calls: Arc::default(),
        }
    }

    /// Fail `failures` times, then answer `response`
    pub fn failing_then(failures: usize, response: HttpResponse) -> Self {
        let mut steps: Vec<Step> = (0..failures)
            .map(|i| Step::Fail(format!("connection reset #{}", i + 1)))
            .collect();
        steps.push(Step::Respond(response));
        Self::new(steps)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    /// Time elapsed between consecutive calls
    pub fn gaps(&self) -> Vec<Duration> {
        let calls = self.calls.lock().unwrap();
        calls
            .windows(2)
            .map(|pair| pair[1].0.duration_since(pair[0].0))
            .collect()
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push((Instant::now(), request));
        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Step::Fail("script exhausted".to_string()));

        match step {
            Step::Respond(response) => Ok(response),
            Step::Fail(message) => Err(TransportError::new(message)),
            Step::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(TransportError::new("hung transport woke up"))
            }
        }
    }
}
