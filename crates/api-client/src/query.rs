// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Query-string parameters with explicit absence

use std::fmt;

/// A scalar query-string value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Text value
    Str(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value, rendered as `true` / `false`
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Ordered query parameters where absent values are kept as `None`
///
/// Absent entries never reach the URL: they are neither sent as empty
/// strings nor as bare keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, Option<QueryValue>)>,
}

impl QueryParams {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter that may be absent
    pub fn push<V: Into<QueryValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        self.entries.push((key.into(), value.map(Into::into)));
    }

    /// Builder-style [`QueryParams::push`]
    #[must_use]
    pub fn with<V: Into<QueryValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.push(key, value);
        self
    }

    /// Iterate over present entries in insertion order
    pub fn present(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|value| (key.as_str(), value)))
    }

    /// Whether no entry carries a value
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Render present entries as `key=value` pairs
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.present()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}
