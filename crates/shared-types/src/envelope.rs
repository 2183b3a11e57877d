// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Response wrappers used by the platform API

use serde::{Deserialize, Serialize};

/// The `{ "data": T }` wrapper around single-entity responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    /// Wrapped payload
    pub data: T,
}

impl<T> DataEnvelope<T> {
    /// Unwrap the payload
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// One page of a list endpoint
///
/// The platform returns the items and the pagination counters side by side
/// in a single flat object. Counters default to zero when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub data: Vec<T>,
    /// Total number of items across all pages
    #[serde(default)]
    pub total: u64,
    /// 1-based page number
    #[serde(default)]
    pub page: u32,
    /// Page size used by the server
    #[serde(default)]
    pub limit: u32,
    /// Whether a further page exists
    #[serde(default)]
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this page holds no items
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Total number of pages implied by `total` and `limit`
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.limit))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_unwraps() {
        let envelope: DataEnvelope<u32> = serde_json::from_value(json!({"data": 7})).unwrap();
        assert_eq!(envelope.into_inner(), 7);
    }

    #[test]
    fn page_defaults_missing_counters() {
        let page: Page<String> = serde_json::from_value(json!({"data": ["a", "b"]})).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.total, 0);
        assert!(!page.has_more);
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn page_counts_pages() {
        let page: Page<u8> = serde_json::from_value(json!({
            "data": [],
            "total": 41,
            "page": 1,
            "limit": 20,
            "hasMore": true
        }))
        .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_more);
    }
}
