// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::CutOptions;
use crate::event::{EventRecord, ProductValue, SideData};
use std::collections::HashMap;

/// The decision of one cut on one event, with optional side data.
///
/// Cuts used to return either a bare bool or a (bool, dict) pair, sorted out
/// by runtime type inspection; the tagged variant makes any other shape
/// unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum CutOutcome {
    Pass(SideData),
    Fail(SideData),
}

impl CutOutcome {
    pub fn pass() -> Self {
        CutOutcome::Pass(SideData::new())
    }

    pub fn fail() -> Self {
        CutOutcome::Fail(SideData::new())
    }

    pub fn pass_with(side_data: SideData) -> Self {
        CutOutcome::Pass(side_data)
    }

    pub fn fail_with(side_data: SideData) -> Self {
        CutOutcome::Fail(side_data)
    }

    pub fn passed(&self) -> bool {
        matches!(self, CutOutcome::Pass(_))
    }

    pub fn side_data(&self) -> &SideData {
        match self {
            CutOutcome::Pass(data) | CutOutcome::Fail(data) => data,
        }
    }

    pub fn into_side_data(self) -> SideData {
        match self {
            CutOutcome::Pass(data) | CutOutcome::Fail(data) => data,
        }
    }
}

impl From<bool> for CutOutcome {
    fn from(passed: bool) -> Self {
        if passed {
            CutOutcome::pass()
        } else {
            CutOutcome::fail()
        }
    }
}

/// Parameters handed to a cut function for one event.
///
/// `options` carries the configured parameters; `is_simulated` (the original
/// `ismc` flag) and `producer_outputs` are injected by the engine at apply
/// time.
pub struct CutParams<'a> {
    pub is_simulated: bool,
    pub dataset_name: Option<&'a str>,
    pub options: &'a CutOptions,
    pub producer_outputs: Option<&'a HashMap<String, ProductValue>>,
}

impl<'a> CutParams<'a> {
    /// Configured option as f64, with a default when absent. Errors on a
    /// present-but-non-numeric value so typos fail loudly.
    pub fn option_f64(&self, key: &str, default: f64) -> anyhow::Result<f64> {
        match self.options.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_f64()
                .ok_or_else(|| anyhow::anyhow!("cut option '{key}' must be a number")),
        }
    }

    pub fn option_bool(&self, key: &str, default: bool) -> anyhow::Result<bool> {
        match self.options.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| anyhow::anyhow!("cut option '{key}' must be a boolean")),
        }
    }

    pub fn option_str(&self, key: &str) -> anyhow::Result<Option<&str>> {
        match self.options.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| anyhow::anyhow!("cut option '{key}' must be a string")),
        }
    }

    /// Output of a named producer, when producer outputs were provided.
    pub fn producer_output(&self, producer: &str) -> Option<&ProductValue> {
        self.producer_outputs.and_then(|m| m.get(producer))
    }
}

/// A cut: a named boolean predicate over one event.
///
/// Plain function pointers, registered under the name used in configuration;
/// behavior is parametrized through [`CutParams::options`].
pub type CutFn = fn(&dyn EventRecord, &CutParams) -> anyhow::Result<CutOutcome>;
