// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Producer type registry.
//!
//! Registration is explicit and order-independent: callers build a registry
//! at startup from a list of constructors, so there is no import-order
//! sensitivity and no global mutable state. Re-registering a type name is a
//! configuration error raised immediately.

use crate::config::ProducerOptions;
use crate::errors::ConfigError;
use crate::producers::producer::Producer;
use std::collections::HashMap;

/// Constructor for one producer type: `(instance name, options)`.
pub type ProducerCtor =
    Box<dyn Fn(&str, &ProducerOptions) -> Result<Box<dyn Producer>, ConfigError> + Send + Sync>;

/// Name -> constructor map for producer types.
pub struct ProducerRegistry {
    ctors: HashMap<String, ProducerCtor>,
}

impl ProducerRegistry {
    pub fn new() -> Self {
        Self {
            ctors: HashMap::new(),
        }
    }

    /// Registry preloaded with the builtin producer set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::producers::builtin::register_defaults(&mut registry)
            .unwrap_or_else(|e| unreachable!("builtin producer names collide: {e}"));
        registry
    }

    /// Register a producer type. Errors if the name is already taken.
    pub fn register<F>(&mut self, type_name: &str, ctor: F) -> Result<(), ConfigError>
    where
        F: Fn(&str, &ProducerOptions) -> Result<Box<dyn Producer>, ConfigError>
            + Send
            + Sync
            + 'static,
    {
        if self.ctors.contains_key(type_name) {
            return Err(ConfigError::DuplicateRegistration {
                registry: "producer",
                name: type_name.to_string(),
            });
        }
        self.ctors.insert(type_name.to_string(), Box::new(ctor));
        Ok(())
    }

    /// Instantiate a registered type. A failed lookup lists known types.
    pub fn create(
        &self,
        type_name: &str,
        name: &str,
        options: &ProducerOptions,
    ) -> Result<Box<dyn Producer>, ConfigError> {
        let ctor = self
            .ctors
            .get(type_name)
            .ok_or_else(|| ConfigError::UnknownProducerType {
                requested: type_name.to_string(),
                known: self.known_types(),
            })?;
        ctor(name, options)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.ctors.contains_key(type_name)
    }

    /// Registered type names, sorted for stable diagnostics.
    pub fn known_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ctors.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ProducerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProducerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProducerRegistry")
            .field("type_count", &self.ctors.len())
            .field("types", &self.known_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventContext, EventParams, ProductValue};
    use crate::producers::producer::SchemaSink;

    struct NullProducer {
        name: String,
    }

    impl Producer for NullProducer {
        fn name(&self) -> &str {
            &self.name
        }

        fn register_output_schema(&self, _sink: &mut dyn SchemaSink) {}

        fn reset_defaults(&mut self) {}

        fn process_event(
            &mut self,
            _ctx: &EventContext,
            _params: &EventParams,
        ) -> anyhow::Result<ProductValue> {
            Ok(ProductValue::Int(0))
        }
    }

    fn null_ctor(name: &str, _options: &ProducerOptions) -> Result<Box<dyn Producer>, ConfigError> {
        Ok(Box::new(NullProducer {
            name: name.to_string(),
        }))
    }

    #[test]
    fn register_and_create() {
        let mut registry = ProducerRegistry::new();
        registry.register("NullProducer", null_ctor).unwrap();

        let producer = registry
            .create("NullProducer", "my_null", &ProducerOptions::new())
            .unwrap();
        assert_eq!(producer.name(), "my_null");
    }

    #[test]
    fn duplicate_registration_is_an_error() {
        let mut registry = ProducerRegistry::new();
        registry.register("NullProducer", null_ctor).unwrap();

        let err = registry.register("NullProducer", null_ctor).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRegistration { .. }));
    }

    #[test]
    fn unknown_type_lists_known_names() {
        let mut registry = ProducerRegistry::new();
        registry.register("Alpha", null_ctor).unwrap();
        registry.register("Beta", null_ctor).unwrap();

        let err = registry
            .create("Gamma", "g", &ProducerOptions::new())
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Gamma"));
        assert!(msg.contains("Alpha, Beta"));
    }
}
