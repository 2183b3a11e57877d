// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! NFT resource types and request payloads

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Lifecycle status of an NFT as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NftStatus {
    /// Minted and visible
    #[default]
    Active,
    /// Hidden from listings by its owner
    Inactive,
    /// Waiting for on-chain confirmation
    Pending,
    /// Burned on-chain
    Burned,
}

impl NftStatus {
    /// Wire representation of the status, as used in query strings
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Burned => "burned",
        }
    }
}

impl fmt::Display for NftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single trait attached to an NFT
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftAttribute {
    /// Trait name, e.g. `Background`
    pub trait_type: String,
    /// Trait value; strings and numbers are both common
    pub value: serde_json::Value,
    /// Optional rendering hint (`number`, `boost_percentage`, `date`, ...)
    pub display_type: Option<String>,
}

/// Token metadata in the common ERC-721 JSON shape
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftMetadata {
    /// Display name
    pub name: String,
    /// Human readable description
    pub description: String,
    /// Image URI
    pub image: String,
    /// Link to an external page for the token
    pub external_url: Option<String>,
    /// Animation or video URI
    pub animation_url: Option<String>,
    /// Token traits
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<NftAttribute>,
}

impl NftMetadata {
    /// Create metadata with the three required fields
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: image.into(),
            external_url: None,
            animation_url: None,
            attributes: Vec::new(),
        }
    }

    /// Append a trait
    #[must_use]
    pub fn with_attribute(
        mut self,
        trait_type: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.attributes.push(NftAttribute {
            trait_type: trait_type.into(),
            value: value.into(),
            display_type: None,
        });
        self
    }
}

/// An NFT record held by the platform
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nft {
    /// Platform identifier
    pub id: String,
    /// Token id within the contract, as a decimal string
    pub token_id: String,
    /// Address of the token contract
    pub contract_address: String,
    /// Current owner address
    pub owner: String,
    /// Address that minted the token
    pub creator: Option<String>,
    /// Collection the token belongs to
    pub collection_id: Option<String>,
    /// Token metadata
    pub metadata: NftMetadata,
    /// Lifecycle status
    pub status: NftStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /nfts`
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNftRequest {
    /// Address of the token contract
    pub contract_address: String,
    /// Token id within the contract, as a decimal string
    pub token_id: String,
    /// Initial owner, defaults to the caller on the platform side
    pub owner: Option<String>,
    /// Collection to attach the token to
    pub collection_id: Option<String>,
    /// Token metadata
    pub metadata: NftMetadata,
}

impl CreateNftRequest {
    /// Create a request with the required fields only
    pub fn new(
        contract_address: impl Into<String>,
        token_id: impl Into<String>,
        metadata: NftMetadata,
    ) -> Self {
        Self {
            contract_address: contract_address.into(),
            token_id: token_id.into(),
            owner: None,
            collection_id: None,
            metadata,
        }
    }
}

/// Payload for `PUT /nfts/:id`; only the fields that are set are sent
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNftRequest {
    /// Replacement metadata
    pub metadata: Option<NftMetadata>,
    /// New owner address
    pub owner: Option<String>,
    /// New lifecycle status
    pub status: Option<NftStatus>,
    /// New collection
    pub collection_id: Option<String>,
}

impl UpdateNftRequest {
    /// Whether the request would change nothing
    pub fn is_empty(&self) -> bool {
        self.metadata.is_none()
            && self.owner.is_none()
            && self.status.is_none()
            && self.collection_id.is_none()
    }
}

/// Aggregate NFT counters returned by `GET /nfts/stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NftStats {
    /// Number of NFTs known to the platform
    pub total_nfts: u64,
    /// Number of NFTs in the `active` state
    pub active_nfts: u64,
    /// Number of distinct owners
    pub total_owners: u64,
    /// Number of collections
    pub total_collections: u64,
}
