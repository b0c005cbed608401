// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Read-only access to one event's raw data.
//!
//! The experiment's row/columnar store is an external collaborator; the
//! pipeline only needs named-field reads. A ROOT-backed implementation would
//! materialize branch values here; tests and the demo binary use [`MapRecord`].

use crate::event::value::ProductValue;
use std::collections::HashMap;

/// Opaque per-event data source with named-field access.
pub trait EventRecord {
    /// Read a named field, `None` if the record has no such field.
    fn get(&self, field: &str) -> Option<ProductValue>;

    fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }
}

/// In-memory record backed by a field map.
#[derive(Debug, Clone, Default)]
pub struct MapRecord {
    fields: HashMap<String, ProductValue>,
}

impl MapRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, name: &str, value: impl Into<ProductValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<ProductValue>) {
        self.fields.insert(name.to_string(), value.into());
    }
}

impl EventRecord for MapRecord {
    fn get(&self, field: &str) -> Option<ProductValue> {
        self.fields.get(field).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_record_round_trips_fields() {
        let record = MapRecord::new()
            .with_field("run", 4952i64)
            .with_field("vtxX", 128.4f64);

        assert_eq!(record.get("run"), Some(ProductValue::Int(4952)));
        assert!(record.has("vtxX"));
        assert!(!record.has("vtxW"));
    }
}
