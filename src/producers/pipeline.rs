// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The producer pipeline: owns the ordered producer instances and threads a
//! per-event context through them.

use crate::config::ProducerSpec;
use crate::errors::{ConfigError, EventError};
use crate::event::{EventContext, EventParams, EventRecord};
use crate::producers::graph::resolve_execution_order;
use crate::producers::producer::{Producer, SchemaSink};
use crate::producers::registry::ProducerRegistry;
use std::collections::HashSet;

/// Owns producer instances in resolved execution order.
///
/// The pipeline exclusively owns the producers and their per-event scratch
/// state; the [`EventContext`] it builds never outlives one event. Execution
/// order is resolved once at build time and reused for every event.
pub struct ProducerPipeline {
    producers: Vec<Box<dyn Producer>>,
    events_processed: u64,
}

impl ProducerPipeline {
    /// Instantiate configured producers through the registry and resolve
    /// their execution order.
    pub fn from_config(
        specs: &[ProducerSpec],
        registry: &ProducerRegistry,
    ) -> Result<Self, ConfigError> {
        let mut producers = Vec::with_capacity(specs.len());
        for spec in specs {
            producers.push(registry.create(&spec.producer_type, &spec.name, &spec.config)?);
        }
        Self::from_producers(producers)
    }

    /// Build a pipeline from already-constructed producers, e.g. for
    /// programmatic setups. Rejects duplicate names and resolves order.
    pub fn from_producers(producers: Vec<Box<dyn Producer>>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for producer in &producers {
            if !seen.insert(producer.name().to_string()) {
                return Err(ConfigError::DuplicateProducerName {
                    name: producer.name().to_string(),
                });
            }
        }

        let declared: Vec<(String, Vec<String>)> = producers
            .iter()
            .map(|p| (p.name().to_string(), p.required_inputs()))
            .collect();
        let order = resolve_execution_order(&declared)?;

        // Reorder instances to match the resolved order.
        let mut by_name: std::collections::HashMap<String, Box<dyn Producer>> = producers
            .into_iter()
            .map(|p| (p.name().to_string(), p))
            .collect();
        let ordered: Vec<Box<dyn Producer>> = order
            .iter()
            .filter_map(|name| by_name.remove(name))
            .collect();

        tracing::info!(
            execution_order = ?order,
            "producer execution order resolved"
        );

        Ok(Self {
            producers: ordered,
            events_processed: 0,
        })
    }

    /// Invoke every producer's schema-registration callback, in execution
    /// order. Call once at build time, before the first event.
    pub fn register_schemas(&self, sink: &mut dyn SchemaSink) {
        for producer in &self.producers {
            producer.register_output_schema(sink);
        }
    }

    /// Run one event through the pipeline.
    ///
    /// Each producer is invoked exactly once, in execution order:
    /// `reset_defaults()` then `process_event()`, with the returned value
    /// stored under the producer's own name before the next producer runs.
    /// A producer error aborts the walk for this event.
    pub fn process_event<'a>(
        &mut self,
        record: &'a dyn EventRecord,
        params: &EventParams,
    ) -> Result<EventContext<'a>, EventError> {
        self.events_processed += 1;
        let mut ctx = EventContext::new(record);

        for producer in &mut self.producers {
            tracing::trace!(producer = producer.name(), "running producer");
            producer.reset_defaults();
            let output =
                producer
                    .process_event(&ctx, params)
                    .map_err(|source| EventError::Producer {
                        producer: producer.name().to_string(),
                        event_index: params.event_index,
                        source: source.into(),
                    })?;
            ctx.insert(producer.name().to_string(), output);
        }

        Ok(ctx)
    }

    /// Cross-event aggregation hook; call once after the last event.
    pub fn finalize(&mut self) {
        for producer in &mut self.producers {
            producer.finalize();
        }
    }

    /// Producer names in execution order.
    pub fn execution_order(&self) -> Vec<&str> {
        self.producers.iter().map(|p| p.name()).collect()
    }

    pub fn has_producer(&self, name: &str) -> bool {
        self.producers.iter().any(|p| p.name() == name)
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }
}

impl std::fmt::Debug for ProducerPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProducerPipeline")
            .field("producer_count", &self.producers.len())
            .field("execution_order", &self.execution_order())
            .field("events_processed", &self.events_processed)
            .finish()
    }
}
