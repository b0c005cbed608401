// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-event state threaded through the producer pipeline.

use crate::event::record::EventRecord;
use crate::event::value::ProductValue;
use std::collections::HashMap;

/// Accumulates producer outputs for exactly one event.
///
/// The context borrows the raw record, so it cannot outlive the event being
/// processed. Outputs are inserted strictly in execution order: a producer
/// invoked by the pipeline only ever sees entries written by producers that
/// ran before it.
pub struct EventContext<'a> {
    record: &'a dyn EventRecord,
    outputs: HashMap<String, ProductValue>,
}

impl<'a> EventContext<'a> {
    pub fn new(record: &'a dyn EventRecord) -> Self {
        Self {
            record,
            outputs: HashMap::new(),
        }
    }

    /// The raw record, reachable under the reserved input name
    /// [`crate::config::consts::RECORD_KEY`].
    pub fn record(&self) -> &dyn EventRecord {
        self.record
    }

    /// Output of a producer that already ran this event.
    pub fn output(&self, producer: &str) -> Option<&ProductValue> {
        self.outputs.get(producer)
    }

    pub fn outputs(&self) -> &HashMap<String, ProductValue> {
        &self.outputs
    }

    /// Consume the context, keeping the accumulated outputs.
    pub fn into_outputs(self) -> HashMap<String, ProductValue> {
        self.outputs
    }

    pub(crate) fn insert(&mut self, producer: String, value: ProductValue) {
        self.outputs.insert(producer, value);
    }
}

impl std::fmt::Debug for EventContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventContext")
            .field("output_count", &self.outputs.len())
            .field("producers", &self.outputs.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Auxiliary parameters handed to every producer alongside the context.
#[derive(Debug, Clone, Default)]
pub struct EventParams {
    /// Whether the event comes from simulation rather than detector data.
    pub is_simulated: bool,
    pub dataset_name: Option<String>,
    pub event_index: Option<u64>,
}

impl EventParams {
    pub fn simulated() -> Self {
        Self {
            is_simulated: true,
            ..Self::default()
        }
    }

    pub fn data() -> Self {
        Self::default()
    }

    pub fn with_event_index(mut self, index: u64) -> Self {
        self.event_index = Some(index);
        self
    }

    pub fn with_dataset_name(mut self, name: &str) -> Self {
        self.dataset_name = Some(name.to_string());
        self
    }
}
