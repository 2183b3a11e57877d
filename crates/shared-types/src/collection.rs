// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Collection resource types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::Price;

/// A named group of NFTs, usually backed by a single contract
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Platform identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Ticker-style symbol
    pub symbol: String,
    /// Human readable description
    pub description: String,
    /// Backing contract, once deployed
    pub contract_address: Option<String>,
    /// Creator address
    pub creator: Option<String>,
    /// Maximum number of tokens in the collection
    pub total_supply: u64,
    /// Cover image URI
    pub image: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /collections`
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionRequest {
    /// Display name
    pub name: String,
    /// Ticker-style symbol, 1 to 10 ASCII alphanumerics
    pub symbol: String,
    /// Human readable description
    pub description: String,
    /// Maximum number of tokens, must be positive
    pub total_supply: u64,
    /// Existing contract to attach
    pub contract_address: Option<String>,
    /// Cover image URI
    pub image: Option<String>,
}

impl CreateCollectionRequest {
    /// Create a request with the required fields only
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        description: impl Into<String>,
        total_supply: u64,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            description: description.into(),
            total_supply,
            contract_address: None,
            image: None,
        }
    }
}

/// Trading and ownership figures for one collection
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionStats {
    /// Tokens minted so far
    pub total_supply: u64,
    /// Distinct owners
    pub owners_count: u64,
    /// Active listings
    pub listed_count: u64,
    /// Cheapest active listing
    pub floor_price: Option<Price>,
    /// All-time traded volume
    pub total_volume: Option<Price>,
    /// Completed sales
    pub sales_count: u64,
}
