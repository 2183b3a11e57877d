// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the NFT SDK
//!
//! This crate provides the resource records, request payloads, and response
//! wrappers exchanged with the platform API. It performs no I/O and is shared
//! by the request pipeline and the resource managers.

pub mod collection;
pub mod envelope;
pub mod marketplace;
pub mod nft;

pub use collection::{Collection, CollectionStats, CreateCollectionRequest};
pub use envelope::{DataEnvelope, Page};
pub use marketplace::{
    BuyListingRequest, CreateListingRequest, Listing, ListingStatus, Price, Sale, SalesStats,
    Transfer, UpdateListingRequest,
};
pub use nft::{
    CreateNftRequest, Nft, NftAttribute, NftMetadata, NftStats, NftStatus, UpdateNftRequest,
};
