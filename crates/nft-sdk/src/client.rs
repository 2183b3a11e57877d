// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client facade tying configuration, transport, and managers together

use std::sync::Arc;

use api_client::{ApiResult, ClientConfig, HttpTransport, ReqwestTransport, RequestExecutor};
use tracing::info;

use crate::{marketplace::MarketplaceManager, nfts::NftManager, webhook};

/// Entry point of the SDK
///
/// Cloning is cheap; clones share the configuration and the connection pool.
#[derive(Debug)]
pub struct NftClient<T = ReqwestTransport> {
    executor: Arc<RequestExecutor<T>>,
    nfts: NftManager<T>,
    marketplace: MarketplaceManager<T>,
}

impl<T> Clone for NftClient<T> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            nfts: self.nfts.clone(),
            marketplace: self.marketplace.clone(),
        }
    }
}

impl NftClient<ReqwestTransport> {
    /// Create a client that talks to the API over HTTPS
    ///
    /// # Errors
    ///
    /// Returns a network error if the HTTP client cannot be created
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let executor = RequestExecutor::with_reqwest(Arc::new(config))?;
        Ok(Self::from_executor(executor))
    }
}

impl<T: HttpTransport> NftClient<T> {
    /// Create a client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self::from_executor(RequestExecutor::new(Arc::new(config), transport))
    }

    fn from_executor(executor: RequestExecutor<T>) -> Self {
        info!(
            base_url = executor.config().base_url(),
            retries = executor.config().retries(),
            timeout_ms = executor.config().timeout().as_millis(),
            "NFT client initialized"
        );

        let executor = Arc::new(executor);
        Self {
            nfts: NftManager::new(Arc::clone(&executor)),
            marketplace: MarketplaceManager::new(Arc::clone(&executor)),
            executor,
        }
    }

    /// NFT and collection operations
    pub fn nfts(&self) -> &NftManager<T> {
        &self.nfts
    }

    /// Listing, sale, and transfer operations
    pub fn marketplace(&self) -> &MarketplaceManager<T> {
        &self.marketplace
    }

    /// The configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        self.executor.config()
    }

    /// Check a webhook delivery's HMAC-SHA256 signature
    pub fn verify_webhook(
        &self,
        payload: impl AsRef<[u8]>,
        signature: &str,
        secret: impl AsRef<[u8]>,
    ) -> bool {
        webhook::verify_signature(payload, signature, secret)
    }
}
