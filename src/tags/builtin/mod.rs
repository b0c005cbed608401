// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Builtin tag functions.

mod truth_mode;

pub use truth_mode::truth_mode_tag;

use crate::errors::ConfigError;
use crate::tags::registry::TagRegistry;

/// Register the builtin tag set.
pub fn register_defaults(registry: &mut TagRegistry) -> Result<(), ConfigError> {
    registry.register("truth_mode_tag", truth_mode_tag)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_register_cleanly() {
        let mut registry = TagRegistry::new();
        register_defaults(&mut registry).unwrap();
        assert!(registry.contains("truth_mode_tag"));
    }
}
