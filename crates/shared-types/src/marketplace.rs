// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Marketplace resource types: listings, sales, and transfers

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A monetary amount in a given currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in whole currency units
    pub amount: f64,
    /// Currency code, e.g. `ETH` or `USDC`
    pub currency: String,
}

impl Price {
    /// Create a price
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Lifecycle status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Open for purchase
    #[default]
    Active,
    /// Bought
    Sold,
    /// Withdrawn by the seller
    Cancelled,
    /// Past its expiration time
    Expired,
}

impl ListingStatus {
    /// Wire representation of the status, as used in query strings
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An NFT offered for sale at a fixed price
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Platform identifier
    pub id: String,
    /// Listed NFT
    pub nft_id: String,
    /// Seller address
    pub seller: String,
    /// Asking price
    pub price: Price,
    /// Lifecycle status
    pub status: ListingStatus,
    /// When the listing stops being purchasable
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /marketplace/listings`
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    /// NFT to list
    pub nft_id: String,
    /// Seller address
    pub seller: String,
    /// Asking price
    pub price: Price,
    /// Optional expiration, must be in the future
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateListingRequest {
    /// Create a listing request without expiration
    pub fn new(nft_id: impl Into<String>, seller: impl Into<String>, price: Price) -> Self {
        Self {
            nft_id: nft_id.into(),
            seller: seller.into(),
            price,
            expires_at: None,
        }
    }
}

/// Payload for `PUT /marketplace/listings/:id`; only the fields that are set are sent
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingRequest {
    /// New asking price
    pub price: Option<Price>,
    /// New expiration
    pub expires_at: Option<DateTime<Utc>>,
}

impl UpdateListingRequest {
    /// Whether the request would change nothing
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.expires_at.is_none()
    }
}

/// Payload for `POST /marketplace/listings/:id/buy`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyListingRequest {
    /// Buyer address
    pub buyer: String,
}

impl BuyListingRequest {
    /// Create a purchase request
    pub fn new(buyer: impl Into<String>) -> Self {
        Self {
            buyer: buyer.into(),
        }
    }
}

/// A completed purchase of a listing
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Platform identifier
    pub id: String,
    /// Listing that was bought
    pub listing_id: String,
    /// NFT that changed hands
    pub nft_id: String,
    /// Seller address
    pub seller: String,
    /// Buyer address
    pub buyer: String,
    /// Settled price
    pub price: Price,
    /// Settlement transaction, once known
    pub transaction_hash: Option<String>,
    /// Settlement timestamp
    pub created_at: DateTime<Utc>,
}

/// An ownership change of an NFT
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Platform identifier
    pub id: String,
    /// NFT that moved
    pub nft_id: String,
    /// Previous owner
    pub from: String,
    /// New owner
    pub to: String,
    /// On-chain transaction, once known
    pub transaction_hash: Option<String>,
    /// Transfer timestamp
    pub created_at: DateTime<Utc>,
}

/// Aggregate sale figures returned by `GET /marketplace/sales/stats`
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesStats {
    /// Number of completed sales
    pub total_sales: u64,
    /// Sum of all sale prices
    pub total_volume: f64,
    /// Mean sale price
    pub average_price: f64,
    /// Highest sale price
    pub highest_price: Option<f64>,
    /// Currency the figures are expressed in
    pub currency: Option<String>,
}
