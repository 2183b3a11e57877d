// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! NFT and collection operations

use std::sync::Arc;

use alloy_primitives::Address;
use api_client::{
    ApiError, ApiRequest, ApiResult, HttpTransport, ReqwestTransport, RequestExecutor,
    validation::{
        parse_address, validate_address, validate_metadata, validate_non_empty,
        validate_positive_int, validate_token_id,
    },
};
use serde::de::{DeserializeOwned, IgnoredAny};
use shared_types::{
    Collection, CollectionStats, CreateCollectionRequest, CreateNftRequest, DataEnvelope, Nft,
    NftStats, Page, UpdateNftRequest,
};
use tracing::{debug, info, warn};

use crate::options::ListOptions;

const NFTS: &str = "nfts";
const COLLECTIONS: &str = "collections";
const STATS: &str = "stats";

/// Code of the error returned for an update that changes nothing
pub const EMPTY_UPDATE_CODE: &str = "EMPTY_UPDATE";
/// Code of the error returned for a malformed collection symbol
pub const INVALID_SYMBOL_CODE: &str = "INVALID_SYMBOL";

/// Longest accepted collection symbol
const MAX_SYMBOL_LEN: usize = 10;

/// Operations on NFTs and their collections
#[derive(Debug)]
pub struct NftManager<T = ReqwestTransport> {
    executor: Arc<RequestExecutor<T>>,
}

impl<T> Clone for NftManager<T> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<T: HttpTransport> NftManager<T> {
    /// Create a manager sharing `executor`
    pub fn new(executor: Arc<RequestExecutor<T>>) -> Self {
        Self { executor }
    }

    /// Mint a new NFT record
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed contract address, token id,
    /// owner, or incomplete metadata; otherwise any error from the API
    pub async fn create_nft(&self, request: &CreateNftRequest) -> ApiResult<Nft> {
        let contract = validate_create_nft(request)
            .inspect_err(|e| warn!(error = %e, "rejected NFT creation"))?;

        debug!(contract = %contract, token_id = %request.token_id, "creating NFT");
        let nft: Nft = self
            .fetch(ApiRequest::post([NFTS]).with_body(request)?)
            .await?;

        info!(nft_id = %nft.id, "NFT created");
        Ok(nft)
    }

    /// Fetch an NFT by id
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty id; otherwise any error from the API
    pub async fn get_nft(&self, id: &str) -> ApiResult<Nft> {
        validate_id("id", id)?;
        debug!(nft_id = id, "fetching NFT");
        self.fetch(ApiRequest::get([NFTS, id])).await
    }

    /// Apply a partial update to an NFT
    ///
    /// # Errors
    ///
    /// Returns an NFT error with code `EMPTY_UPDATE` when nothing would
    /// change, a validation error for malformed fields, otherwise any error
    /// from the API
    pub async fn update_nft(&self, id: &str, update: &UpdateNftRequest) -> ApiResult<Nft> {
        validate_id("id", id)?;
        validate_update_nft(update)
            .inspect_err(|e| warn!(nft_id = id, error = %e, "rejected NFT update"))?;

        debug!(nft_id = id, "updating NFT");
        self.fetch(ApiRequest::put([NFTS, id]).with_body(update)?).await
    }

    /// Delete an NFT record
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty id; otherwise any error from the API
    pub async fn delete_nft(&self, id: &str) -> ApiResult<()> {
        validate_id("id", id)?;
        debug!(nft_id = id, "deleting NFT");
        let _: IgnoredAny = self.executor.execute(ApiRequest::delete([NFTS, id])).await?;
        Ok(())
    }

    /// List NFTs matching `options`
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed filters; otherwise any error from the API
    pub async fn list_nfts(&self, options: &ListOptions) -> ApiResult<Page<Nft>> {
        options
            .validate()
            .inspect_err(|e| warn!(error = %e, "rejected NFT list options"))?;
        debug!(?options, "listing NFTs");
        self.executor
            .execute(ApiRequest::get([NFTS]).with_query(options.to_query_params()))
            .await
    }

    /// Platform-wide NFT counters
    ///
    /// # Errors
    ///
    /// Returns any error from the API
    pub async fn get_nft_stats(&self) -> ApiResult<NftStats> {
        self.fetch(ApiRequest::get([NFTS, STATS])).await
    }

    /// Create a collection
    ///
    /// # Errors
    ///
    /// Returns a collection error with code `INVALID_SYMBOL` for a malformed
    /// symbol, a validation error for other malformed fields, otherwise any
    /// error from the API
    pub async fn create_collection(
        &self,
        request: &CreateCollectionRequest,
    ) -> ApiResult<Collection> {
        validate_create_collection(request)
            .inspect_err(|e| warn!(error = %e, "rejected collection creation"))?;

        debug!(name = %request.name, symbol = %request.symbol, "creating collection");
        let collection: Collection = self
            .fetch(ApiRequest::post([COLLECTIONS]).with_body(request)?)
            .await?;

        info!(collection_id = %collection.id, "collection created");
        Ok(collection)
    }

    /// Fetch a collection by id
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty id; otherwise any error from the API
    pub async fn get_collection(&self, id: &str) -> ApiResult<Collection> {
        validate_id("id", id)?;
        debug!(collection_id = id, "fetching collection");
        self.fetch(ApiRequest::get([COLLECTIONS, id])).await
    }

    /// Supply, ownership, and trading figures for a collection
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty id; otherwise any error from the API
    pub async fn get_collection_stats(&self, id: &str) -> ApiResult<CollectionStats> {
        validate_id("id", id)?;
        self.fetch(ApiRequest::get([COLLECTIONS, id, STATS])).await
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<R> {
        let envelope: DataEnvelope<R> = self.executor.execute(request).await?;
        Ok(envelope.into_inner())
    }
}

pub(crate) fn validate_id(field: &str, id: &str) -> ApiResult<()> {
    validate_non_empty(field, id).inspect_err(|e| warn!(error = %e, "rejected empty id"))
}

fn validate_create_nft(request: &CreateNftRequest) -> ApiResult<Address> {
    let contract = parse_address("contractAddress", &request.contract_address)?;
    validate_token_id("tokenId", &request.token_id)?;
    if let Some(owner) = &request.owner {
        validate_address("owner", owner)?;
    }
    validate_metadata(&request.metadata)?;
    Ok(contract)
}

fn validate_update_nft(update: &UpdateNftRequest) -> ApiResult<()> {
    if update.is_empty() {
        return Err(ApiError::nft("update contains no changes").with_code(EMPTY_UPDATE_CODE));
    }
    if let Some(metadata) = &update.metadata {
        validate_metadata(metadata)?;
    }
    if let Some(owner) = &update.owner {
        validate_address("owner", owner)?;
    }
    Ok(())
}

fn validate_create_collection(request: &CreateCollectionRequest) -> ApiResult<()> {
    validate_non_empty("name", &request.name)?;
    validate_non_empty("symbol", &request.symbol)?;
    if request.symbol.len() > MAX_SYMBOL_LEN
        || !request.symbol.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(ApiError::collection(format!(
            "symbol must be 1 to {MAX_SYMBOL_LEN} ASCII letters or digits, got '{}'",
            request.symbol
        ))
        .with_code(INVALID_SYMBOL_CODE));
    }
    validate_non_empty("description", &request.description)?;
    validate_positive_int("totalSupply", request.total_supply)?;
    if let Some(contract_address) = &request.contract_address {
        validate_address("contractAddress", contract_address)?;
    }
    Ok(())
}
