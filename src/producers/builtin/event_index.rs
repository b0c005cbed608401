// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::RECORD_KEY;
use crate::config::ProducerOptions;
use crate::errors::ConfigError;
use crate::event::{EventContext, EventParams, ProductValue};
use crate::producers::producer::{ColumnKind, Producer, SchemaSink};
use std::collections::HashMap;

/// Copies the run/subrun/event indices that uniquely label each event, in
/// both data and simulation. Missing fields fall back to the -1 sentinel.
pub struct EventIndexProducer {
    name: String,
    run: i64,
    subrun: i64,
    event: i64,
}

impl EventIndexProducer {
    pub fn create(name: &str, _options: &ProducerOptions) -> Result<Box<dyn Producer>, ConfigError> {
        Ok(Box::new(Self {
            name: name.to_string(),
            run: -1,
            subrun: -1,
            event: -1,
        }))
    }
}

impl Producer for EventIndexProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_inputs(&self) -> Vec<String> {
        vec![RECORD_KEY.to_string()]
    }

    fn register_output_schema(&self, sink: &mut dyn SchemaSink) {
        sink.declare_column(&self.name, "run", ColumnKind::Int);
        sink.declare_column(&self.name, "subrun", ColumnKind::Int);
        sink.declare_column(&self.name, "event", ColumnKind::Int);
    }

    fn reset_defaults(&mut self) {
        self.run = -1;
        self.subrun = -1;
        self.event = -1;
    }

    fn process_event(
        &mut self,
        ctx: &EventContext,
        _params: &EventParams,
    ) -> anyhow::Result<ProductValue> {
        let record = ctx.record();
        self.run = record.get("run").and_then(|v| v.as_int()).unwrap_or(-1);
        self.subrun = record.get("subrun").and_then(|v| v.as_int()).unwrap_or(-1);
        self.event = record.get("event").and_then(|v| v.as_int()).unwrap_or(-1);

        let mut out = HashMap::new();
        out.insert("run".to_string(), ProductValue::Int(self.run));
        out.insert("subrun".to_string(), ProductValue::Int(self.subrun));
        out.insert("event".to_string(), ProductValue::Int(self.event));
        Ok(ProductValue::Map(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MapRecord;

    #[test]
    fn copies_indices_from_the_record() {
        let mut producer = EventIndexProducer::create("idx", &ProducerOptions::new()).unwrap();
        let record = MapRecord::new()
            .with_field("run", 4952i64)
            .with_field("subrun", 31i64)
            .with_field("event", 10234i64);
        let ctx = EventContext::new(&record);

        producer.reset_defaults();
        let out = producer.process_event(&ctx, &EventParams::data()).unwrap();
        assert_eq!(out.get("run"), Some(&ProductValue::Int(4952)));
        assert_eq!(out.get("event"), Some(&ProductValue::Int(10234)));
    }

    #[test]
    fn missing_fields_become_sentinels() {
        let mut producer = EventIndexProducer::create("idx", &ProducerOptions::new()).unwrap();
        let record = MapRecord::new();
        let ctx = EventContext::new(&record);

        producer.reset_defaults();
        let out = producer.process_event(&ctx, &EventParams::data()).unwrap();
        assert_eq!(out.get("run"), Some(&ProductValue::Int(-1)));
    }
}
