// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration-time errors.
//!
//! Everything in this enum is detected before the event loop starts and is
//! always fatal: the run never continues with a broken dependency graph, a
//! misspelled cut reference, or an unregistered type.

use crate::cuts::logic::LogicError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("duplicate producer name: '{name}'")]
    DuplicateProducerName { name: String },

    #[error("duplicate cut name: '{name}'")]
    DuplicateCutName { name: String },

    #[error("duplicate tag name: '{name}'")]
    DuplicateTagName { name: String },

    #[error("'{name}' is already registered in the {registry} registry")]
    DuplicateRegistration {
        registry: &'static str,
        name: String,
    },

    #[error("producer type '{requested}' is not registered; known types: {}", known.join(", "))]
    UnknownProducerType {
        requested: String,
        known: Vec<String>,
    },

    #[error("cut '{requested}' is not registered; known cuts: {}", known.join(", "))]
    UnknownCut {
        requested: String,
        known: Vec<String>,
    },

    #[error("tag '{requested}' is not registered; known tags: {}", known.join(", "))]
    UnknownTag {
        requested: String,
        known: Vec<String>,
    },

    /// Contract violation: a declared input is neither a configured producer
    /// nor the reserved record key.
    #[error("producer '{producer}' requires input '{input}' which is neither a configured producer nor the record key")]
    UnknownInput { producer: String, input: String },

    #[error("cyclic producer dependency detected: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    #[error("invalid configuration for producer '{producer}': {reason}")]
    InvalidProducerConfig { producer: String, reason: String },

    #[error(transparent)]
    Logic(#[from] LogicError),

    #[error("configuration validation failed:\n{}", errors.join("\n"))]
    Invalid { errors: Vec<String> },
}
