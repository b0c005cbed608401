// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed producer output values.
//!
//! Producers used to hand back whatever shape they liked (scalar, tuple,
//! mapping keyed by bare strings). `ProductValue` makes the shape explicit:
//! consumers match on the variant instead of inspecting types at runtime.

use serde::Serialize;
use std::collections::HashMap;

/// A single producer output, or one entry of a cut's side data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ProductValue>),
    Map(HashMap<String, ProductValue>),
}

/// Auxiliary data a cut attaches to its pass/fail decision.
pub type SideData = HashMap<String, ProductValue>;

impl ProductValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ProductValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ProductValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view: integers widen to f64.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ProductValue::Float(f) => Some(*f),
            ProductValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ProductValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ProductValue]> {
        match self {
            ProductValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, ProductValue>> {
        match self {
            ProductValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up an entry of a `Map` value. `None` for other variants.
    pub fn get(&self, key: &str) -> Option<&ProductValue> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl From<bool> for ProductValue {
    fn from(value: bool) -> Self {
        ProductValue::Bool(value)
    }
}

impl From<i64> for ProductValue {
    fn from(value: i64) -> Self {
        ProductValue::Int(value)
    }
}

impl From<f64> for ProductValue {
    fn from(value: f64) -> Self {
        ProductValue::Float(value)
    }
}

impl From<&str> for ProductValue {
    fn from(value: &str) -> Self {
        ProductValue::Text(value.to_string())
    }
}

impl From<String> for ProductValue {
    fn from(value: String) -> Self {
        ProductValue::Text(value)
    }
}

impl From<Vec<ProductValue>> for ProductValue {
    fn from(items: Vec<ProductValue>) -> Self {
        ProductValue::List(items)
    }
}

impl From<HashMap<String, ProductValue>> for ProductValue {
    fn from(entries: HashMap<String, ProductValue>) -> Self {
        ProductValue::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_views_widen_ints() {
        assert_eq!(ProductValue::Int(5).as_float(), Some(5.0));
        assert_eq!(ProductValue::Float(2.5).as_float(), Some(2.5));
        assert_eq!(ProductValue::Int(5).as_int(), Some(5));
        assert_eq!(ProductValue::Float(2.5).as_int(), None);
    }

    #[test]
    fn map_lookup_only_applies_to_maps() {
        let mut entries = HashMap::new();
        entries.insert("x".to_string(), ProductValue::Int(5));
        let value = ProductValue::Map(entries);

        assert_eq!(value.get("x"), Some(&ProductValue::Int(5)));
        assert_eq!(value.get("missing"), None);
        assert_eq!(ProductValue::Int(5).get("x"), None);
    }
}
