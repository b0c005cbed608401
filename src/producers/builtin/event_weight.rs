// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::RECORD_KEY;
use crate::config::ProducerOptions;
use crate::errors::ConfigError;
use crate::event::{EventContext, EventParams, ProductValue};
use crate::producers::producer::{ColumnKind, Producer, SchemaSink};
use std::collections::HashMap;

/// Per-event weight. Simulation carries a cross-section weight on the
/// record; detector data is unweighted (1.0). A simulated event with no
/// weight branch keeps the 0.0 sentinel so it drops out of weighted sums.
pub struct EventWeightProducer {
    name: String,
    weight_field: String,
    weight: f64,
}

impl EventWeightProducer {
    pub fn create(name: &str, options: &ProducerOptions) -> Result<Box<dyn Producer>, ConfigError> {
        let weight_field = match options.get("weight_field") {
            Some(value) => value
                .as_str()
                .ok_or_else(|| ConfigError::InvalidProducerConfig {
                    producer: name.to_string(),
                    reason: "'weight_field' must be a string".to_string(),
                })?
                .to_string(),
            None => "xsecWeight".to_string(),
        };

        Ok(Box::new(Self {
            name: name.to_string(),
            weight_field,
            weight: 0.0,
        }))
    }
}

impl Producer for EventWeightProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_inputs(&self) -> Vec<String> {
        vec![RECORD_KEY.to_string()]
    }

    fn register_output_schema(&self, sink: &mut dyn SchemaSink) {
        sink.declare_column(&self.name, "weight", ColumnKind::Float);
    }

    fn reset_defaults(&mut self) {
        self.weight = 0.0;
    }

    fn process_event(
        &mut self,
        ctx: &EventContext,
        params: &EventParams,
    ) -> anyhow::Result<ProductValue> {
        self.weight = if params.is_simulated {
            ctx.record()
                .get(&self.weight_field)
                .and_then(|v| v.as_float())
                .unwrap_or(0.0)
        } else {
            1.0
        };

        let mut out = HashMap::new();
        out.insert("weight".to_string(), ProductValue::Float(self.weight));
        Ok(ProductValue::Map(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MapRecord;

    #[test]
    fn simulation_reads_the_weight_branch() {
        let mut producer = EventWeightProducer::create("w", &ProducerOptions::new()).unwrap();
        let record = MapRecord::new().with_field("xsecWeight", 0.83f64);
        let ctx = EventContext::new(&record);

        producer.reset_defaults();
        let out = producer
            .process_event(&ctx, &EventParams::simulated())
            .unwrap();
        assert_eq!(out.get("weight"), Some(&ProductValue::Float(0.83)));
    }

    #[test]
    fn data_is_unweighted() {
        let mut producer = EventWeightProducer::create("w", &ProducerOptions::new()).unwrap();
        let record = MapRecord::new();
        let ctx = EventContext::new(&record);

        producer.reset_defaults();
        let out = producer.process_event(&ctx, &EventParams::data()).unwrap();
        assert_eq!(out.get("weight"), Some(&ProductValue::Float(1.0)));
    }

    #[test]
    fn bad_weight_field_option_is_a_config_error() {
        let mut options = ProducerOptions::new();
        options.insert(
            "weight_field".to_string(),
            serde_yaml::Value::Number(5.into()),
        );

        let err = EventWeightProducer::create("w", &options).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProducerConfig { .. }));
    }
}
