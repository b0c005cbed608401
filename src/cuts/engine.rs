// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The cut engine: applies ordered cuts to one event and combines their
//! results.
//!
//! Two combination modes:
//!
//! * **Implicit AND** (no logic expression configured): cuts run in
//!   configured order; with `return_on_fail` the first failure stops the
//!   walk and later cuts are absent from the result map.
//! * **Expression mode**: every cut runs — all side data is wanted — and the
//!   parsed [`LogicExpr`] decides the overall result from the per-cut map.

use crate::config::consts::CUTDATA_PREFIX;
use crate::config::{CutOptions, CutSpec};
use crate::cuts::cut::{CutFn, CutParams};
use crate::cuts::logic::LogicExpr;
use crate::cuts::registry::CutRegistry;
use crate::errors::{ConfigError, EventError};
use crate::event::{EventRecord, ProductValue, SideData};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

struct ConfiguredCut {
    name: String,
    func: CutFn,
    options: CutOptions,
}

/// Per-event apply parameters. `is_simulated` and `producer_outputs` are
/// forwarded into every cut's params.
#[derive(Default)]
pub struct ApplyContext<'a> {
    pub is_simulated: bool,
    pub dataset_name: Option<&'a str>,
    pub event_index: Option<u64>,
    /// In implicit-AND mode, stop at the first failing cut.
    pub return_on_fail: bool,
    pub producer_outputs: Option<&'a HashMap<String, ProductValue>>,
}

/// The engine's verdict on one event.
#[derive(Debug)]
pub struct Selection {
    pub passed: bool,
    /// Per-cut pass/fail for every cut that was evaluated. In implicit-AND
    /// mode with `return_on_fail`, cuts after the first failure are absent
    /// (not recorded as failing).
    pub results: HashMap<String, bool>,
    /// Side data per evaluated cut, keyed `cutdata_<cutname>`.
    pub side_data: HashMap<String, SideData>,
}

/// Pass/fail bookkeeping across events.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SelectionStats {
    pub events_processed: u64,
    pub events_passed: u64,
    pub per_cut: HashMap<String, CutStats>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct CutStats {
    pub pass: u64,
    pub fail: u64,
}

impl SelectionStats {
    pub fn efficiency(&self) -> Option<f64> {
        if self.events_processed == 0 {
            return None;
        }
        Some(self.events_passed as f64 / self.events_processed as f64)
    }

    /// Emit a per-cut summary through tracing.
    pub fn log_summary(&self, cut_order: &[&str]) {
        tracing::info!(
            events_processed = self.events_processed,
            events_passed = self.events_passed,
            "selection summary"
        );
        for name in cut_order {
            if let Some(stats) = self.per_cut.get(*name) {
                let total = stats.pass + stats.fail;
                let efficiency = if total > 0 {
                    stats.pass as f64 / total as f64
                } else {
                    0.0
                };
                tracing::info!(
                    cut = *name,
                    pass = stats.pass,
                    fail = stats.fail,
                    efficiency,
                    "cut statistics"
                );
            }
        }
    }
}

/// Applies configured cuts to events.
pub struct CutEngine {
    cuts: Vec<ConfiguredCut>,
    logic: Option<LogicExpr>,
    stats: SelectionStats,
}

impl CutEngine {
    /// Resolve configured cuts through the registry, and parse + validate
    /// the optional logic expression against the configured set. All
    /// configuration errors surface here, before any event is processed.
    pub fn from_config(
        specs: &[CutSpec],
        cut_logic: Option<&str>,
        registry: &CutRegistry,
    ) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut cuts = Vec::with_capacity(specs.len());
        for spec in specs {
            if !seen.insert(spec.name.clone()) {
                return Err(ConfigError::DuplicateCutName {
                    name: spec.name.clone(),
                });
            }
            cuts.push(ConfiguredCut {
                name: spec.name.clone(),
                func: registry.get(&spec.name)?,
                options: spec.params.clone(),
            });
        }

        let logic = match cut_logic {
            Some(text) => {
                let expr = LogicExpr::parse(text)?;
                let configured: Vec<String> = cuts.iter().map(|c| c.name.clone()).collect();
                expr.validate(&configured)?;
                tracing::info!(cut_logic = text, "cut logic configured");
                Some(expr)
            }
            None => None,
        };

        Ok(Self {
            cuts,
            logic,
            stats: SelectionStats::default(),
        })
    }

    /// Apply all configured cuts to one event.
    pub fn apply(
        &mut self,
        record: &dyn EventRecord,
        apply: &ApplyContext,
    ) -> Result<Selection, EventError> {
        // Count the event up front so a faulting cut cannot leave per-cut
        // tallies ahead of the event total.
        self.stats.events_processed += 1;

        let mut results = HashMap::new();
        let mut side_data = HashMap::new();
        let mut passed = true;

        for cut in &self.cuts {
            let params = CutParams {
                is_simulated: apply.is_simulated,
                dataset_name: apply.dataset_name,
                options: &cut.options,
                producer_outputs: apply.producer_outputs,
            };

            let outcome = (cut.func)(record, &params).map_err(|source| EventError::Cut {
                cut: cut.name.clone(),
                event_index: apply.event_index,
                source: source.into(),
            })?;

            let cut_passed = outcome.passed();
            tracing::trace!(cut = %cut.name, passed = cut_passed, "cut evaluated");
            results.insert(cut.name.clone(), cut_passed);
            side_data.insert(
                format!("{CUTDATA_PREFIX}{}", cut.name),
                outcome.into_side_data(),
            );

            let entry = self.stats.per_cut.entry(cut.name.clone()).or_default();
            if cut_passed {
                entry.pass += 1;
            } else {
                entry.fail += 1;
            }

            // Short-circuit only in implicit-AND mode; expression mode
            // always evaluates every cut so all side data is collected.
            if self.logic.is_none() && !cut_passed {
                passed = false;
                if apply.return_on_fail {
                    break;
                }
            }
        }

        if let Some(expr) = &self.logic {
            passed = expr.evaluate(&results)?;
        }

        if passed {
            self.stats.events_passed += 1;
        }

        Ok(Selection {
            passed,
            results,
            side_data,
        })
    }

    /// Configured cut names, in application order.
    pub fn cut_names(&self) -> Vec<&str> {
        self.cuts.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn stats(&self) -> &SelectionStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SelectionStats::default();
    }
}

impl std::fmt::Debug for CutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CutEngine")
            .field("cut_count", &self.cuts.len())
            .field("cuts", &self.cut_names())
            .field("has_logic", &self.logic.is_some())
            .finish()
    }
}
