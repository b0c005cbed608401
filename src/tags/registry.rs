// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Tag function registry.
//!
//! Same shape as the cut registry: explicit registration at startup,
//! duplicate names rejected immediately, failed lookups list known names.

use crate::errors::ConfigError;
use crate::tags::tag::TagFn;
use std::collections::HashMap;

/// Name -> tag-function map.
pub struct TagRegistry {
    tags: HashMap<String, TagFn>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self {
            tags: HashMap::new(),
        }
    }

    /// Registry preloaded with the builtin tag set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::tags::builtin::register_defaults(&mut registry)
            .unwrap_or_else(|e| unreachable!("builtin tag names collide: {e}"));
        registry
    }

    /// Register a tag function. Errors if the name is already taken.
    pub fn register(&mut self, name: &str, tag: TagFn) -> Result<(), ConfigError> {
        if self.tags.contains_key(name) {
            return Err(ConfigError::DuplicateRegistration {
                registry: "tag",
                name: name.to_string(),
            });
        }
        self.tags.insert(name.to_string(), tag);
        Ok(())
    }

    /// Look up a registered tag. A failed lookup lists known names.
    pub fn get(&self, name: &str) -> Result<TagFn, ConfigError> {
        self.tags
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownTag {
                requested: name.to_string(),
                known: self.known_tags(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Registered tag names, sorted for stable diagnostics.
    pub fn known_tags(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tags.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRegistry")
            .field("tag_count", &self.tags.len())
            .field("tags", &self.known_tags())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventRecord;
    use crate::tags::tag::TagParams;

    fn always_label(
        _record: &dyn EventRecord,
        _params: &TagParams,
    ) -> anyhow::Result<Option<String>> {
        Ok(Some("label".to_string()))
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = TagRegistry::new();
        registry.register("always_label", always_label).unwrap();
        assert!(registry.get("always_label").is_ok());
        assert!(registry.contains("always_label"));
    }

    #[test]
    fn duplicate_registration_is_an_error() {
        let mut registry = TagRegistry::new();
        registry.register("always_label", always_label).unwrap();

        let err = registry.register("always_label", always_label).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRegistration { .. }));
    }

    #[test]
    fn unknown_tag_lists_known_names() {
        let mut registry = TagRegistry::new();
        registry.register("one", always_label).unwrap();
        registry.register("two", always_label).unwrap();

        let msg = registry.get("three").unwrap_err().to_string();
        assert!(msg.contains("three"));
        assert!(msg.contains("one, two"));
    }
}
