// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Event-level feature computation and selection for physics ntuples.
//!
//! A YAML configuration names producers (feature computations, ordered by
//! dependency resolution) and cuts (boolean predicates, combined by implicit
//! AND or an explicit logic expression). The [`producers::ProducerPipeline`]
//! runs producers against each event record in topological order; the
//! [`cuts::CutEngine`] then decides whether the event is selected.

pub mod config;    // config loading + validation
pub mod cuts;      // cut functions, logic expressions, cut engine
pub mod errors;    // error handling
pub mod event;     // event records, values, per-event context
pub mod producers; // producer trait, registry, dependency-ordered pipeline
pub mod tags;      // tag functions and the tagger
