// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client SDK for NFT, collection, and marketplace APIs
//!
//! [`NftClient`] is the entry point. It owns an immutable [`ClientConfig`]
//! and hands out two resource managers that share one request executor:
//!
//! - **[`NftManager`]**: NFTs, collections, and their statistics
//! - **[`MarketplaceManager`]**: listings, purchases, sales, and transfers
//!
//! Every operation validates its input before touching the network, retries
//! transport failures with exponential backoff, and reports failures as an
//! [`ApiError`] of a single [`ErrorKind`].
//!
//! ```no_run
//! use nft_sdk::{ClientConfig, ListOptions, NftClient};
//!
//! # async fn run() -> Result<(), nft_sdk::ApiError> {
//! let client = NftClient::new(ClientConfig::new("my-api-key")?)?;
//! let page = client.nfts().list_nfts(&ListOptions::new().limit(10)).await?;
//! println!("{} of {} NFTs", page.len(), page.total);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod marketplace;
pub mod nfts;
pub mod options;
pub mod webhook;

pub use api_client::{ApiError, ApiResult, ClientConfig, ClientConfigBuilder, ErrorKind};
pub use client::NftClient;
pub use config::{ConfigFileError, FileConfig, load_client_config};
pub use marketplace::MarketplaceManager;
pub use nfts::NftManager;
pub use options::{ListOptions, SortOrder};
pub use shared_types as types;
