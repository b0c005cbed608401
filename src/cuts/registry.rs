// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Cut function registry.
//!
//! Same shape as the producer registry: explicit registration at startup,
//! duplicate names rejected immediately, failed lookups list known names.

use crate::cuts::cut::CutFn;
use crate::errors::ConfigError;
use std::collections::HashMap;

/// Name -> cut-function map.
pub struct CutRegistry {
    cuts: HashMap<String, CutFn>,
}

impl CutRegistry {
    pub fn new() -> Self {
        Self {
            cuts: HashMap::new(),
        }
    }

    /// Registry preloaded with the builtin cut set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::cuts::builtin::register_defaults(&mut registry)
            .unwrap_or_else(|e| unreachable!("builtin cut names collide: {e}"));
        registry
    }

    /// Register a cut function. Errors if the name is already taken.
    pub fn register(&mut self, name: &str, cut: CutFn) -> Result<(), ConfigError> {
        if self.cuts.contains_key(name) {
            return Err(ConfigError::DuplicateRegistration {
                registry: "cut",
                name: name.to_string(),
            });
        }
        self.cuts.insert(name.to_string(), cut);
        Ok(())
    }

    /// Look up a registered cut. A failed lookup lists known names.
    pub fn get(&self, name: &str) -> Result<CutFn, ConfigError> {
        self.cuts
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownCut {
                requested: name.to_string(),
                known: self.known_cuts(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cuts.contains_key(name)
    }

    /// Registered cut names, sorted for stable diagnostics.
    pub fn known_cuts(&self) -> Vec<String> {
        let mut names: Vec<String> = self.cuts.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for CutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CutRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CutRegistry")
            .field("cut_count", &self.cuts.len())
            .field("cuts", &self.known_cuts())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuts::cut::{CutOutcome, CutParams};
    use crate::event::EventRecord;

    fn always_pass(_record: &dyn EventRecord, _params: &CutParams) -> anyhow::Result<CutOutcome> {
        Ok(CutOutcome::pass())
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = CutRegistry::new();
        registry.register("always_pass", always_pass).unwrap();
        assert!(registry.get("always_pass").is_ok());
        assert!(registry.contains("always_pass"));
    }

    #[test]
    fn duplicate_registration_is_an_error() {
        let mut registry = CutRegistry::new();
        registry.register("always_pass", always_pass).unwrap();

        let err = registry.register("always_pass", always_pass).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRegistration { .. }));
    }

    #[test]
    fn unknown_cut_lists_known_names() {
        let mut registry = CutRegistry::new();
        registry.register("one", always_pass).unwrap();
        registry.register("two", always_pass).unwrap();

        let msg = registry.get("three").unwrap_err().to_string();
        assert!(msg.contains("three"));
        assert!(msg.contains("one, two"));
    }
}
