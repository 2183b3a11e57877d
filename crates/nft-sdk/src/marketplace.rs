// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Marketplace operations: listings, purchases, sales, and transfers

use std::sync::Arc;

use api_client::{
    ApiError, ApiRequest, ApiResult, HttpTransport, ReqwestTransport, RequestExecutor,
    validation::{validate_address, validate_non_empty, validate_price},
};
use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, IgnoredAny};
use shared_types::{
    BuyListingRequest, CreateListingRequest, DataEnvelope, Listing, Page, Sale, SalesStats,
    Transfer, UpdateListingRequest,
};
use tracing::{debug, info, warn};

use crate::{
    nfts::{EMPTY_UPDATE_CODE, validate_id},
    options::ListOptions,
};

const MARKETPLACE: &str = "marketplace";
const LISTINGS: &str = "listings";
const SALES: &str = "sales";
const TRANSFERS: &str = "transfers";

/// Code of the error returned for a listing that would already be expired
pub const INVALID_EXPIRATION_CODE: &str = "INVALID_EXPIRATION";

/// Operations on marketplace listings and trading history
#[derive(Debug)]
pub struct MarketplaceManager<T = ReqwestTransport> {
    executor: Arc<RequestExecutor<T>>,
}

impl<T> Clone for MarketplaceManager<T> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<T: HttpTransport> MarketplaceManager<T> {
    /// Create a manager sharing `executor`
    pub fn new(executor: Arc<RequestExecutor<T>>) -> Self {
        Self { executor }
    }

    /// Put an NFT up for sale
    ///
    /// # Errors
    ///
    /// Returns a marketplace error with code `INVALID_EXPIRATION` when the
    /// expiry is not in the future, a validation error for other malformed
    /// fields, otherwise any error from the API
    pub async fn create_listing(&self, request: &CreateListingRequest) -> ApiResult<Listing> {
        validate_create_listing(request, Utc::now())
            .inspect_err(|e| warn!(error = %e, "rejected listing creation"))?;

        debug!(nft_id = %request.nft_id, price = %request.price, "creating listing");
        let listing: Listing = self
            .fetch(ApiRequest::post([MARKETPLACE, LISTINGS]).with_body(request)?)
            .await?;

        info!(listing_id = %listing.id, "listing created");
        Ok(listing)
    }

    /// Fetch a listing by id
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty id; otherwise any error from the API
    pub async fn get_listing(&self, id: &str) -> ApiResult<Listing> {
        validate_id("id", id)?;
        self.fetch(ApiRequest::get([MARKETPLACE, LISTINGS, id])).await
    }

    /// Change the price or expiry of a listing
    ///
    /// # Errors
    ///
    /// Returns a marketplace error with code `EMPTY_UPDATE` when nothing
    /// would change or `INVALID_EXPIRATION` for a past expiry, a validation
    /// error for a malformed price, otherwise any error from the API
    pub async fn update_listing(
        &self,
        id: &str,
        update: &UpdateListingRequest,
    ) -> ApiResult<Listing> {
        validate_id("id", id)?;
        validate_update_listing(update, Utc::now())
            .inspect_err(|e| warn!(listing_id = id, error = %e, "rejected listing update"))?;

        debug!(listing_id = id, "updating listing");
        self.fetch(ApiRequest::put([MARKETPLACE, LISTINGS, id]).with_body(update)?)
            .await
    }

    /// Remove a listing
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty id; otherwise any error from the API
    pub async fn delete_listing(&self, id: &str) -> ApiResult<()> {
        validate_id("id", id)?;
        debug!(listing_id = id, "deleting listing");
        let _: IgnoredAny = self
            .executor
            .execute(ApiRequest::delete([MARKETPLACE, LISTINGS, id]))
            .await?;
        Ok(())
    }

    /// List listings matching `options`
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed filters; otherwise any error from the API
    pub async fn list_listings(&self, options: &ListOptions) -> ApiResult<Page<Listing>> {
        self.list([MARKETPLACE, LISTINGS], options).await
    }

    /// Purchase a listed NFT
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty id or malformed buyer address;
    /// otherwise any error from the API
    pub async fn buy_listing(&self, id: &str, request: &BuyListingRequest) -> ApiResult<Sale> {
        validate_id("id", id)?;
        validate_address("buyer", &request.buyer)
            .inspect_err(|e| warn!(listing_id = id, error = %e, "rejected purchase"))?;

        debug!(listing_id = id, buyer = %request.buyer, "buying listing");
        let sale: Sale = self
            .fetch(ApiRequest::post([MARKETPLACE, LISTINGS, id, "buy"]).with_body(request)?)
            .await?;

        info!(sale_id = %sale.id, listing_id = id, "listing sold");
        Ok(sale)
    }

    /// Withdraw a listing without deleting its history
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty id; otherwise any error from the API
    pub async fn cancel_listing(&self, id: &str) -> ApiResult<Listing> {
        validate_id("id", id)?;
        debug!(listing_id = id, "cancelling listing");
        self.fetch(ApiRequest::post([MARKETPLACE, LISTINGS, id, "cancel"]))
            .await
    }

    /// List completed sales matching `options`
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed filters; otherwise any error from the API
    pub async fn list_sales(&self, options: &ListOptions) -> ApiResult<Page<Sale>> {
        self.list([MARKETPLACE, SALES], options).await
    }

    /// Aggregate figures over the sales matching `options`
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed filters; otherwise any error from the API
    pub async fn get_sales_stats(&self, options: &ListOptions) -> ApiResult<SalesStats> {
        options.validate()?;
        self.fetch(
            ApiRequest::get([MARKETPLACE, SALES, "stats"]).with_query(options.to_query_params()),
        )
        .await
    }

    /// List ownership transfers matching `options`
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed filters; otherwise any error from the API
    pub async fn list_transfers(&self, options: &ListOptions) -> ApiResult<Page<Transfer>> {
        self.list([MARKETPLACE, TRANSFERS], options).await
    }

    async fn list<R: DeserializeOwned>(
        &self,
        segments: [&str; 2],
        options: &ListOptions,
    ) -> ApiResult<Page<R>> {
        options
            .validate()
            .inspect_err(|e| warn!(error = %e, "rejected list options"))?;
        debug!(path = %segments.join("/"), ?options, "listing");
        self.executor
            .execute(ApiRequest::get(segments).with_query(options.to_query_params()))
            .await
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<R> {
        let envelope: DataEnvelope<R> = self.executor.execute(request).await?;
        Ok(envelope.into_inner())
    }
}

fn validate_expiry(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> ApiResult<()> {
    match expires_at {
        Some(expires_at) if expires_at <= now => Err(ApiError::marketplace(format!(
            "expiration {} is not in the future",
            expires_at.to_rfc3339()
        ))
        .with_code(INVALID_EXPIRATION_CODE)),
        _ => Ok(()),
    }
}

fn validate_create_listing(request: &CreateListingRequest, now: DateTime<Utc>) -> ApiResult<()> {
    validate_non_empty("nftId", &request.nft_id)?;
    validate_address("seller", &request.seller)?;
    validate_price("price", &request.price)?;
    validate_expiry(request.expires_at, now)
}

fn validate_update_listing(update: &UpdateListingRequest, now: DateTime<Utc>) -> ApiResult<()> {
    if update.is_empty() {
        return Err(
            ApiError::marketplace("update contains no changes").with_code(EMPTY_UPDATE_CODE)
        );
    }
    if let Some(price) = &update.price {
        validate_price("price", price)?;
    }
    validate_expiry(update.expires_at, now)
}

#[cfg(test)]
mod tests {
    use api_client::ErrorKind;
    use chrono::Duration;
    use shared_types::Price;

    use super::*;

    const SELLER: &str = "0x1234567890abcdef1234567890abcdef12345678";

    fn listing(amount: f64) -> CreateListingRequest {
        CreateListingRequest::new("nft_1", SELLER, Price::new(amount, "ETH"))
    }

    #[test]
    fn listing_price_must_be_positive() {
        let now = Utc::now();
        assert!(validate_create_listing(&listing(1.5), now).is_ok());
        for amount in [0.0, -1.0, f64::NAN] {
            let error = validate_create_listing(&listing(amount), now).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Validation);
            assert!(error.message().contains("price.amount"));
        }
    }

    #[test]
    fn listing_seller_must_be_an_address() {
        let mut request = listing(1.0);
        request.seller = "alice".to_string();
        let error = validate_create_listing(&request, Utc::now()).unwrap_err();
        assert!(error.message().contains("seller"));
    }

    #[test]
    fn expiry_must_be_in_the_future() {
        let now = Utc::now();
        let mut request = listing(1.0);

        request.expires_at = Some(now + Duration::days(7));
        assert!(validate_create_listing(&request, now).is_ok());

        request.expires_at = Some(now - Duration::seconds(1));
        let error = validate_create_listing(&request, now).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Marketplace);
        assert_eq!(error.code(), INVALID_EXPIRATION_CODE);
    }

    #[test]
    fn update_rules() {
        let now = Utc::now();
        let error = validate_update_listing(&UpdateListingRequest::default(), now).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Marketplace);
        assert_eq!(error.code(), EMPTY_UPDATE_CODE);

        let reprice = UpdateListingRequest {
            price: Some(Price::new(2.0, "ETH")),
            expires_at: None,
        };
        assert!(validate_update_listing(&reprice, now).is_ok());

        let free = UpdateListingRequest {
            price: Some(Price::new(0.0, "ETH")),
            expires_at: None,
        };
        assert_eq!(
            validate_update_listing(&free, now).unwrap_err().kind(),
            ErrorKind::Validation
        );
    }
}
