// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Opaque per-unit option maps, passed through to producer constructors and
/// cut functions untouched.
pub type ProducerOptions = HashMap<String, serde_yaml::Value>;
pub type CutOptions = HashMap<String, serde_yaml::Value>;
pub type TagOptions = HashMap<String, serde_yaml::Value>;

/// Main configuration structure for one analysis pass.
///
/// Loaded from a YAML file; immutable for the run.
///
/// # Example
/// ```yaml
/// producers:
///   - name: event_index
///     type: EventIndexProducer
///   - name: visible_energy
///     type: VisibleEnergyProducer
///     config:
///       min_track_energy: 30.0
/// cuts:
///   - name: fiducial_cut
///     params:
///       width: 10.0
///   - name: visible_energy_cut
///     params:
///       producer: visible_energy
///       min_evis: 50.0
/// cut_logic: "{fiducial_cut} and {visible_energy_cut}"
/// failure_policy: abort
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub producers: Vec<ProducerSpec>,
    #[serde(default)]
    pub cuts: Vec<CutSpec>,
    #[serde(default)]
    pub tags: Vec<TagSpec>,
    /// Optional boolean expression over `{cutname}` placeholders. When
    /// absent, cuts combine by implicit AND.
    #[serde(default)]
    pub cut_logic: Option<String>,
    /// In implicit-AND mode, stop at the first failing cut.
    #[serde(default = "default_return_on_fail")]
    pub return_on_fail: bool,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn default_return_on_fail() -> bool {
    true
}

/// Configuration for a single producer in the pipeline.
///
/// # Fields
/// * `name` - Unique name for this producer instance; other producers refer
///   to it by this name in their required inputs
/// * `producer_type` - Registered type to instantiate (YAML key `type`)
/// * `config` - Producer-specific options
#[derive(Debug, Deserialize)]
pub struct ProducerSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub producer_type: String,
    #[serde(default)]
    pub config: ProducerOptions,
}

/// Configuration for a single cut.
///
/// The name doubles as the registered cut-function name. `ismc` and
/// `producer_outputs` are injected at apply time, never configured here.
#[derive(Debug, Deserialize)]
pub struct CutSpec {
    pub name: String,
    #[serde(default)]
    pub params: CutOptions,
}

/// Configuration for a single event tag.
///
/// The name doubles as the registered tag-function name.
#[derive(Debug, Deserialize)]
pub struct TagSpec {
    pub name: String,
    #[serde(default)]
    pub params: TagOptions,
}

/// How the event loop reacts to a per-event fault.
///
/// Configuration-time errors are always fatal regardless of this setting.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the run on the first failing event.
    #[default]
    Abort,
    /// Log the failing producer/cut and event index, then move on.
    SkipAndLog,
}

/// Load a config from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load and validate a config from a YAML file.
///
/// Validation covers everything checkable from the config text alone:
/// duplicate names and cut-logic coverage. Graph-level checks need producer
/// instances and run at pipeline build.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;

    if let Err(validation_errors) = crate::config::validate_config(&cfg) {
        return Err(ConfigError::Invalid {
            errors: validation_errors.iter().map(|e| e.to_string()).collect(),
        });
    }

    Ok(cfg)
}
