// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::RECORD_KEY;
use crate::config::ProducerOptions;
use crate::errors::ConfigError;
use crate::event::{EventContext, EventParams, ProductValue};
use crate::producers::producer::{ColumnKind, Producer, SchemaSink};
use std::collections::HashMap;

/// Total visible energy: the sum of track and shower energy deposits above a
/// configurable threshold (MeV). Deposits below threshold are detector noise
/// for this purpose and are skipped.
pub struct VisibleEnergyProducer {
    name: String,
    min_track_energy: f64,
    min_shower_energy: f64,
    evis: f64,
}

impl VisibleEnergyProducer {
    pub fn create(name: &str, options: &ProducerOptions) -> Result<Box<dyn Producer>, ConfigError> {
        let min_track_energy = read_threshold(name, options, "min_track_energy")?.unwrap_or(0.0);
        let min_shower_energy = read_threshold(name, options, "min_shower_energy")?.unwrap_or(0.0);

        Ok(Box::new(Self {
            name: name.to_string(),
            min_track_energy,
            min_shower_energy,
            evis: 0.0,
        }))
    }

    fn sum_deposits(&self, deposits: Option<ProductValue>, threshold: f64) -> f64 {
        deposits
            .as_ref()
            .and_then(|v| v.as_list())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|e| e.as_float())
                    .filter(|&e| e >= threshold)
                    .sum()
            })
            .unwrap_or(0.0)
    }
}

fn read_threshold(
    producer: &str,
    options: &ProducerOptions,
    key: &str,
) -> Result<Option<f64>, ConfigError> {
    match options.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| ConfigError::InvalidProducerConfig {
                producer: producer.to_string(),
                reason: format!("'{key}' must be a number"),
            }),
    }
}

impl Producer for VisibleEnergyProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_inputs(&self) -> Vec<String> {
        vec![RECORD_KEY.to_string()]
    }

    fn register_output_schema(&self, sink: &mut dyn SchemaSink) {
        sink.declare_column(&self.name, "evis", ColumnKind::Float);
    }

    fn reset_defaults(&mut self) {
        self.evis = 0.0;
    }

    fn process_event(
        &mut self,
        ctx: &EventContext,
        _params: &EventParams,
    ) -> anyhow::Result<ProductValue> {
        let record = ctx.record();
        let track_sum = self.sum_deposits(record.get("trackEnergies"), self.min_track_energy);
        let shower_sum = self.sum_deposits(record.get("showerEnergies"), self.min_shower_energy);
        self.evis = track_sum + shower_sum;

        let mut out = HashMap::new();
        out.insert("evis".to_string(), ProductValue::Float(self.evis));
        Ok(ProductValue::Map(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MapRecord;

    fn energies(values: &[f64]) -> ProductValue {
        ProductValue::List(values.iter().map(|&v| ProductValue::Float(v)).collect())
    }

    #[test]
    fn sums_tracks_and_showers_above_threshold() {
        let mut options = ProducerOptions::new();
        options.insert(
            "min_track_energy".to_string(),
            serde_yaml::Value::Number(serde_yaml::Number::from(30.0)),
        );
        let mut producer = VisibleEnergyProducer::create("evis", &options).unwrap();

        let record = MapRecord::new()
            .with_field("trackEnergies", energies(&[120.0, 10.0, 45.0]))
            .with_field("showerEnergies", energies(&[60.0]));
        let ctx = EventContext::new(&record);

        producer.reset_defaults();
        let out = producer.process_event(&ctx, &EventParams::data()).unwrap();
        // 10.0 is below the 30 MeV track threshold.
        assert_eq!(out.get("evis"), Some(&ProductValue::Float(225.0)));
    }

    #[test]
    fn missing_branches_yield_zero_sentinel() {
        let mut producer =
            VisibleEnergyProducer::create("evis", &ProducerOptions::new()).unwrap();
        let record = MapRecord::new();
        let ctx = EventContext::new(&record);

        producer.reset_defaults();
        let out = producer.process_event(&ctx, &EventParams::data()).unwrap();
        assert_eq!(out.get("evis"), Some(&ProductValue::Float(0.0)));
    }

    #[test]
    fn non_numeric_threshold_is_rejected() {
        let mut options = ProducerOptions::new();
        options.insert(
            "min_track_energy".to_string(),
            serde_yaml::Value::String("thirty".to_string()),
        );

        let err = VisibleEnergyProducer::create("evis", &options).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProducerConfig { .. }));
    }
}
