// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Filtering, sorting, and pagination options for list endpoints

use std::fmt;

use api_client::{
    ApiResult, QueryParams,
    validation::{validate_address, validate_price_range},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Sort direction for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first
    Asc,
    /// Largest first
    Desc,
}

impl SortOrder {
    /// Wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options accepted by every list endpoint
///
/// Only the fields below ever reach the query string. Deserializing from JSON
/// ignores any other key, so options forwarded from an untrusted source
/// cannot smuggle extra parameters.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Owner address filter
    pub owner: Option<String>,
    /// Contract address filter
    pub contract_address: Option<String>,
    /// Resource status filter, e.g. `active`
    pub status: Option<String>,
    /// Lower price bound
    pub min_price: Option<f64>,
    /// Upper price bound
    pub max_price: Option<f64>,
    /// Currency filter
    pub currency: Option<String>,
    /// Only resources created after this instant
    pub created_after: Option<DateTime<Utc>>,
    /// Only resources created before this instant
    pub created_before: Option<DateTime<Utc>>,
    /// Field to sort by
    pub sort_by: Option<String>,
    /// Sort direction
    pub sort_order: Option<SortOrder>,
}

impl ListOptions {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filter by owner address
    #[must_use]
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Filter by contract address
    #[must_use]
    pub fn contract_address(mut self, contract_address: impl Into<String>) -> Self {
        self.contract_address = Some(contract_address.into());
        self
    }

    /// Filter by status
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Filter by price range; either bound may be omitted
    #[must_use]
    pub fn price_range(mut self, min_price: Option<f64>, max_price: Option<f64>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    /// Filter by currency
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Filter by creation time; either bound may be omitted
    #[must_use]
    pub fn created_between(
        mut self,
        created_after: Option<DateTime<Utc>>,
        created_before: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_after = created_after;
        self.created_before = created_before;
        self
    }

    /// Sort by `field` in `order`
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Check the filters that can be verified without a round-trip
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed address filter or an
    /// invalid price range
    pub fn validate(&self) -> ApiResult<()> {
        if let Some(owner) = &self.owner {
            validate_address("owner", owner)?;
        }
        if let Some(contract_address) = &self.contract_address {
            validate_address("contractAddress", contract_address)?;
        }
        validate_price_range(self.min_price, self.max_price)
    }

    /// Render as query parameters in a fixed order, absent fields included as `None`
    pub fn to_query_params(&self) -> QueryParams {
        let timestamp = |value: &DateTime<Utc>| value.to_rfc3339_opts(SecondsFormat::Millis, true);

        QueryParams::new()
            .with("page", self.page)
            .with("limit", self.limit)
            .with("owner", self.owner.as_ref())
            .with("contractAddress", self.contract_address.as_ref())
            .with("status", self.status.as_ref())
            .with("minPrice", self.min_price)
            .with("maxPrice", self.max_price)
            .with("currency", self.currency.as_ref())
            .with("createdAfter", self.created_after.as_ref().map(timestamp))
            .with("createdBefore", self.created_before.as_ref().map(timestamp))
            .with("sortBy", self.sort_by.as_ref())
            .with("sortOrder", self.sort_order.map(SortOrder::as_str))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    const OWNER: &str = "0x1234567890abcdef1234567890abcdef12345678";

    #[test]
    fn empty_options_produce_no_query() {
        assert!(ListOptions::new().to_query_params().is_empty());
    }

    #[test]
    fn query_order_follows_allow_list() {
        let options = ListOptions::new()
            .sort("price", SortOrder::Desc)
            .currency("ETH")
            .price_range(Some(0.5), Some(2.0))
            .owner(OWNER)
            .limit(20)
            .page(2);

        let keys: Vec<String> = options
            .to_query_params()
            .to_pairs()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(
            keys,
            [
                "page", "limit", "owner", "minPrice", "maxPrice", "currency", "sortBy",
                "sortOrder"
            ]
        );
    }

    #[test]
    fn values_are_rendered_for_the_wire() {
        let after = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let options = ListOptions::new()
            .created_between(Some(after), None)
            .sort("createdAt", SortOrder::Asc)
            .price_range(Some(1.5), None);

        assert_eq!(
            options.to_query_params().to_pairs(),
            vec![
                ("minPrice".to_string(), "1.5".to_string()),
                ("createdAfter".to_string(), "2024-01-02T03:04:05.000Z".to_string()),
                ("sortBy".to_string(), "createdAt".to_string()),
                ("sortOrder".to_string(), "asc".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let options: ListOptions = serde_json::from_value(json!({
            "page": 3,
            "contractAddress": OWNER,
            "injected": "value",
            "sortOrder": "desc"
        }))
        .unwrap();

        assert_eq!(options.page, Some(3));
        assert_eq!(options.contract_address.as_deref(), Some(OWNER));
        assert_eq!(options.sort_order, Some(SortOrder::Desc));
        assert!(
            options
                .to_query_params()
                .to_pairs()
                .iter()
                .all(|(key, _)| key != "injected")
        );
    }

    #[test]
    fn serializes_only_present_fields() {
        let value = serde_json::to_value(ListOptions::new().limit(5)).unwrap();
        assert_eq!(value, json!({"limit": 5}));
    }

    #[test]
    fn validation() {
        assert!(ListOptions::new().owner(OWNER).validate().is_ok());
        assert!(ListOptions::new().owner("alice").validate().is_err());
        assert!(ListOptions::new().contract_address("0x12").validate().is_err());
        assert!(
            ListOptions::new()
                .price_range(Some(5.0), Some(1.0))
                .validate()
                .is_err()
        );
        assert!(
            ListOptions::new()
                .price_range(Some(-1.0), None)
                .validate()
                .is_err()
        );
    }
}
