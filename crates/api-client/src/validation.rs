// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client-side input validation
//!
//! Format checks return `bool`; presence, positivity, and range checks return
//! an [`ApiError::Validation`] naming the offending field. Nothing here does
//! I/O, so managers run these before spending a network round-trip.

use std::sync::LazyLock;

use alloy_primitives::Address;
use regex::Regex;
use serde_json::Value;
use shared_types::{NftMetadata, Price};

use crate::error::{ApiError, ApiResult};

static ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("address regex is valid"));

static TOKEN_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("token id regex is valid"));

/// Whether `value` is a `0x`-prefixed, 40 hex digit address
pub fn is_valid_address(value: &str) -> bool {
    ADDRESS_REGEX.is_match(value)
}

/// Whether `value` is a non-empty string of decimal digits
pub fn is_valid_token_id(value: &str) -> bool {
    TOKEN_ID_REGEX.is_match(value)
}

/// Require `value` to be a well-formed address
pub fn validate_address(field: &str, value: &str) -> ApiResult<()> {
    if is_valid_address(value) {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "{field} must be a 0x-prefixed 40 character hex address, got '{value}'"
        )))
    }
}

/// Require `value` to be a well-formed address and return it typed
pub fn parse_address(field: &str, value: &str) -> ApiResult<Address> {
    validate_address(field, value)?;
    value
        .parse()
        .map_err(|e| ApiError::validation(format!("{field} is not a valid address: {e}")))
}

/// Require `value` to be a decimal token id
pub fn validate_token_id(field: &str, value: &str) -> ApiResult<()> {
    if is_valid_token_id(value) {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "{field} must be a numeric string, got '{value}'"
        )))
    }
}

/// Require `value` to contain at least one non-whitespace character
pub fn validate_non_empty(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        Err(ApiError::validation(format!("{field} cannot be empty")))
    } else {
        Ok(())
    }
}

/// Require `value` to be a finite number greater than zero
pub fn validate_positive(field: &str, value: f64) -> ApiResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "{field} must be a positive number, got {value}"
        )))
    }
}

/// Require `value` to be greater than zero
pub fn validate_positive_int(field: &str, value: u64) -> ApiResult<()> {
    if value == 0 {
        Err(ApiError::validation(format!(
            "{field} must be greater than zero"
        )))
    } else {
        Ok(())
    }
}

/// Require a positive amount and a currency code
pub fn validate_price(field: &str, price: &Price) -> ApiResult<()> {
    validate_positive(&format!("{field}.amount"), price.amount)?;
    validate_non_empty(&format!("{field}.currency"), &price.currency)
}

/// Require both bounds to be positive when present and `min <= max`
pub fn validate_price_range(min: Option<f64>, max: Option<f64>) -> ApiResult<()> {
    if let Some(min) = min {
        validate_positive("minPrice", min)?;
    }
    if let Some(max) = max {
        validate_positive("maxPrice", max)?;
    }
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        return Err(ApiError::validation(format!(
            "minPrice ({min}) cannot exceed maxPrice ({max})"
        )));
    }
    Ok(())
}

/// Require the metadata fields every token must carry
pub fn validate_metadata(metadata: &NftMetadata) -> ApiResult<()> {
    validate_non_empty("metadata.name", &metadata.name)?;
    validate_non_empty("metadata.description", &metadata.description)?;
    validate_non_empty("metadata.image", &metadata.image)
}

/// Require an untyped metadata document to be an object with string
/// `name`, `description`, and `image` fields
pub fn validate_metadata_value(metadata: &Value) -> ApiResult<()> {
    let Some(object) = metadata.as_object() else {
        return Err(ApiError::validation("metadata must be an object"));
    };

    for field in ["name", "description", "image"] {
        match object.get(field).and_then(Value::as_str) {
            Some(value) => validate_non_empty(&format!("metadata.{field}"), value)?,
            None => {
                return Err(ApiError::validation(format!(
                    "metadata.{field} must be a string"
                )));
            }
        }
    }

    Ok(())
}
