// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::RECORD_KEY;
use crate::event::{EventContext, EventParams, ProductValue};
use serde::Serialize;

/// A named computation unit deriving outputs from the record and/or other
/// producers' outputs.
///
/// Lifecycle: constructed once from configuration, then per event
/// `reset_defaults()` followed by `process_event()`, then `finalize()` once
/// after the last event.
///
/// `process_event` must only read context entries it declared in
/// `required_inputs()`; the pipeline orders producers so those entries are
/// already populated. "Not applicable" is expressed through sentinel default
/// values, never through an error — errors are reserved for genuine faults
/// and abort the event.
pub trait Producer {
    fn name(&self) -> &str;

    /// Names of configured producers (or [`RECORD_KEY`]) this producer reads.
    fn required_inputs(&self) -> Vec<String> {
        vec![RECORD_KEY.to_string()]
    }

    /// Declare output columns. Called once at build time, in execution order.
    fn register_output_schema(&self, sink: &mut dyn SchemaSink);

    /// Reset per-event scratch state to sentinel defaults.
    fn reset_defaults(&mut self);

    /// Compute this event's output. The returned value is stored in the
    /// context under the producer's own name.
    fn process_event(
        &mut self,
        ctx: &EventContext,
        params: &EventParams,
    ) -> anyhow::Result<ProductValue>;

    /// Cross-event aggregation hook, called once after the last event.
    fn finalize(&mut self) {}
}

impl std::fmt::Debug for dyn Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Producer")
            .field("name", &self.name())
            .finish()
    }
}

/// Output column type as declared to the schema sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Bool,
    Int,
    Float,
    Text,
}

/// One declared output column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    pub producer: String,
    pub column: String,
    pub kind: ColumnKind,
}

/// Receiver for producer output-schema declarations.
///
/// A ROOT-backed sink would create tree branches here; [`OutputSchema`] just
/// records the declarations.
pub trait SchemaSink {
    fn declare_column(&mut self, producer: &str, column: &str, kind: ColumnKind);
}

/// Schema sink that records declared columns in declaration order.
#[derive(Debug, Default, Serialize)]
pub struct OutputSchema {
    columns: Vec<ColumnSpec>,
}

impl OutputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn for_producer<'a>(&'a self, producer: &'a str) -> impl Iterator<Item = &'a ColumnSpec> {
        self.columns.iter().filter(move |c| c.producer == producer)
    }
}

impl SchemaSink for OutputSchema {
    fn declare_column(&mut self, producer: &str, column: &str, kind: ColumnKind) {
        self.columns.push(ColumnSpec {
            producer: producer.to_string(),
            column: column.to_string(),
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_schema_records_declarations_in_order() {
        let mut schema = OutputSchema::new();
        schema.declare_column("event_index", "run", ColumnKind::Int);
        schema.declare_column("event_index", "event", ColumnKind::Int);
        schema.declare_column("visible_energy", "evis", ColumnKind::Float);

        assert_eq!(schema.columns().len(), 3);
        assert_eq!(schema.columns()[0].column, "run");
        assert_eq!(schema.for_producer("event_index").count(), 2);
        assert_eq!(schema.for_producer("visible_energy").count(), 1);
    }
}
