// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pre-run configuration validation.
//!
//! Checks everything decidable from the configuration text alone, before any
//! producer is instantiated:
//!
//! 1. **Uniqueness**: producer, cut, and tag names are unique
//! 2. **Logic coverage**: a configured cut-logic expression parses, references
//!    every configured cut, and references nothing else
//!
//! Errors accumulate so a user sees every problem in one pass rather than
//! fixing them one by one. Graph-level checks (unknown declared inputs,
//! cycles) need live producer instances and run during
//! [`crate::producers::ProducerPipeline`] construction — still strictly
//! before the first event.

use crate::config::Config;
use crate::cuts::logic::LogicExpr;
use crate::errors::ConfigError;
use std::collections::HashSet;

/// Validate a loaded configuration, accumulating all errors found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Err(duplicate_errors) = validate_unique_names(config) {
        errors.extend(duplicate_errors);
    }

    if let Err(logic_errors) = validate_cut_logic(config) {
        errors.extend(logic_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_names(config: &Config) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let mut seen_producers = HashSet::new();
    for producer in &config.producers {
        if !seen_producers.insert(&producer.name) {
            errors.push(ConfigError::DuplicateProducerName {
                name: producer.name.clone(),
            });
        }
    }

    let mut seen_cuts = HashSet::new();
    for cut in &config.cuts {
        if !seen_cuts.insert(&cut.name) {
            errors.push(ConfigError::DuplicateCutName {
                name: cut.name.clone(),
            });
        }
    }

    let mut seen_tags = HashSet::new();
    for tag in &config.tags {
        if !seen_tags.insert(&tag.name) {
            errors.push(ConfigError::DuplicateTagName {
                name: tag.name.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse the cut-logic expression and check it against the configured cuts.
///
/// The expression must reference every configured cut (all side data is
/// collected in expression mode, so an unreferenced cut is a configuration
/// mistake) and must not reference names that are not configured.
fn validate_cut_logic(config: &Config) -> Result<(), Vec<ConfigError>> {
    let Some(logic_text) = &config.cut_logic else {
        return Ok(());
    };

    let expr = match LogicExpr::parse(logic_text) {
        Ok(expr) => expr,
        Err(e) => return Err(vec![ConfigError::Logic(e)]),
    };

    let configured: Vec<String> = config.cuts.iter().map(|c| c.name.clone()).collect();
    expr.validate(&configured)
        .map_err(|e| vec![ConfigError::Logic(e)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CutSpec, FailurePolicy, ProducerSpec};
    use std::collections::HashMap;

    fn test_config(producers: Vec<&str>, cuts: Vec<&str>, logic: Option<&str>) -> Config {
        Config {
            producers: producers
                .into_iter()
                .map(|name| ProducerSpec {
                    name: name.to_string(),
                    producer_type: "TestProducer".to_string(),
                    config: HashMap::new(),
                })
                .collect(),
            cuts: cuts
                .into_iter()
                .map(|name| CutSpec {
                    name: name.to_string(),
                    params: HashMap::new(),
                })
                .collect(),
            tags: vec![],
            cut_logic: logic.map(|s| s.to_string()),
            return_on_fail: true,
            failure_policy: FailurePolicy::Abort,
        }
    }

    #[test]
    fn test_valid_empty_config() {
        let config = test_config(vec![], vec![], None);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_valid_config_with_logic() {
        let config = test_config(
            vec!["p1"],
            vec!["cut_a", "cut_b"],
            Some("{cut_a} and not {cut_b}"),
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_duplicate_producer_names() {
        let config = test_config(vec!["a", "b", "a"], vec![], None);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ConfigError::DuplicateProducerName { .. }
        ));
    }

    #[test]
    fn test_duplicate_cut_names() {
        let config = test_config(vec![], vec!["c", "c"], None);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ConfigError::DuplicateCutName { .. }));
    }

    #[test]
    fn test_duplicate_tag_names() {
        let mut config = test_config(vec![], vec![], None);
        config.tags = vec!["t", "t"]
            .into_iter()
            .map(|name| crate::config::TagSpec {
                name: name.to_string(),
                params: HashMap::new(),
            })
            .collect();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ConfigError::DuplicateTagName { .. }));
    }

    #[test]
    fn test_logic_must_reference_every_cut() {
        let config = test_config(vec![], vec!["cut_a", "cut_b"], Some("{cut_a}"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("cut_b"));
    }

    #[test]
    fn test_multiple_errors_accumulate() {
        let config = test_config(vec!["a", "a"], vec!["c", "c"], Some("{c} and {ghost}"));

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
