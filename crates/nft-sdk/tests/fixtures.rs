// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Shared fixtures for SDK integration tests
//!
//! Provides sample API payloads and a mock server wired to a client.

use std::time::Duration;

use nft_sdk::{ClientConfig, NftClient};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, header},
};

pub const API_KEY: &str = "sdk-test-key";
pub const CONTRACT: &str = "0x1234567890abcdef1234567890abcdef12345678";
pub const OWNER: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";
pub const BUYER: &str = "0x9999999999999999999999999999999999999999";
pub const TIMESTAMP: &str = "2024-05-01T12:00:00Z";

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

/// A mock server and a client pointed at it
pub struct TestContext {
    pub server: MockServer,
    pub client: NftClient,
}

impl TestContext {
    pub async fn new() -> Self {
        init_tracing();
        let server = MockServer::start().await;
        let config = ClientConfig::builder(API_KEY)
            .base_url(server.uri())
            .retries(2)
            .initial_delay(Duration::from_millis(10))
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let client = NftClient::new(config).unwrap();
        Self { server, client }
    }

    /// Fail the test if any request reaches the server
    pub async fn expect_no_requests(&self) {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Mock that only matches authenticated SDK requests
    pub fn authenticated() -> wiremock::MockBuilder {
        Mock::given(header("authorization", format!("Bearer {API_KEY}").as_str()))
            .and(header("x-platform", "rust-sdk"))
    }
}

pub fn wrap(data: Value) -> Value {
    json!({ "data": data })
}

pub fn page(data: Vec<Value>, total: u64, page: u32, limit: u32) -> Value {
    json!({
        "data": data,
        "total": total,
        "page": page,
        "limit": limit,
        "hasMore": u64::from(page) * u64::from(limit) < total,
    })
}

pub fn metadata_json() -> Value {
    json!({
        "name": "Genesis #1",
        "description": "The first token",
        "image": "ipfs://QmGenesis",
        "attributes": [{"traitType": "rarity", "value": "legendary"}]
    })
}

pub fn nft_json(id: &str, token_id: &str) -> Value {
    json!({
        "id": id,
        "tokenId": token_id,
        "contractAddress": CONTRACT,
        "owner": OWNER,
        "metadata": metadata_json(),
        "status": "active",
        "createdAt": TIMESTAMP,
        "updatedAt": TIMESTAMP
    })
}

pub fn collection_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Genesis",
        "symbol": "GEN",
        "description": "Genesis collection",
        "totalSupply": 1000,
        "createdAt": TIMESTAMP,
        "updatedAt": TIMESTAMP
    })
}

pub fn listing_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "nftId": "nft_1",
        "seller": OWNER,
        "price": {"amount": 1.5, "currency": "ETH"},
        "status": status,
        "createdAt": TIMESTAMP,
        "updatedAt": TIMESTAMP
    })
}

pub fn sale_json(id: &str) -> Value {
    json!({
        "id": id,
        "listingId": "listing_1",
        "nftId": "nft_1",
        "seller": OWNER,
        "buyer": BUYER,
        "price": {"amount": 1.5, "currency": "ETH"},
        "transactionHash": "0xfeed",
        "createdAt": TIMESTAMP
    })
}

pub fn transfer_json(id: &str) -> Value {
    json!({
        "id": id,
        "nftId": "nft_1",
        "from": OWNER,
        "to": BUYER,
        "createdAt": TIMESTAMP
    })
}
