// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Visible-energy window cut, fed by the `visible_energy` producer.

use crate::cuts::cut::{CutOutcome, CutParams};
use crate::event::{EventRecord, ProductValue, SideData};

/// Requires the summed visible energy to fall inside a configured window.
///
/// Reads a producer output rather than recomputing from the record, so
/// thresholds applied at production time carry through.
///
/// Options:
/// * `producer` (string, default `visible_energy`): producer to read. Its
///   output may be a bare number or a map with an `evis` entry.
/// * `min_energy` (number, default 0.0): lower edge in MeV, inclusive.
/// * `max_energy` (number, default unbounded): upper edge, inclusive.
///
/// The measured energy is attached as `evis` side data either way.
pub fn visible_energy_cut(
    _record: &dyn EventRecord,
    params: &CutParams,
) -> anyhow::Result<CutOutcome> {
    let min_energy = params.option_f64("min_energy", 0.0)?;
    let max_energy = params.option_f64("max_energy", f64::INFINITY)?;
    let producer = params.option_str("producer")?.unwrap_or("visible_energy");

    let evis = params
        .producer_output(producer)
        .and_then(|v| {
            v.as_float()
                .or_else(|| v.get("evis").and_then(|e| e.as_float()))
        })
        .ok_or_else(|| {
            anyhow::anyhow!("visible_energy_cut requires the '{producer}' producer output")
        })?;

    let mut side_data = SideData::new();
    side_data.insert("evis".to_string(), ProductValue::Float(evis));

    if evis >= min_energy && evis <= max_energy {
        Ok(CutOutcome::pass_with(side_data))
    } else {
        Ok(CutOutcome::fail_with(side_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CutOptions;
    use crate::event::MapRecord;
    use std::collections::HashMap;

    fn outputs(evis: f64) -> HashMap<String, ProductValue> {
        let mut outputs = HashMap::new();
        outputs.insert("visible_energy".to_string(), ProductValue::Float(evis));
        outputs
    }

    fn map_outputs(evis: f64) -> HashMap<String, ProductValue> {
        let mut inner = HashMap::new();
        inner.insert("evis".to_string(), ProductValue::Float(evis));
        let mut outputs = HashMap::new();
        outputs.insert("visible_energy".to_string(), ProductValue::Map(inner));
        outputs
    }

    #[test]
    fn energy_inside_window_passes_with_side_data() {
        let mut options = CutOptions::new();
        options.insert("min_energy".to_string(), serde_yaml::Value::from(200.0));
        options.insert("max_energy".to_string(), serde_yaml::Value::from(1200.0));
        let produced = outputs(650.0);
        let params = CutParams {
            is_simulated: false,
            dataset_name: None,
            options: &options,
            producer_outputs: Some(&produced),
        };

        let record = MapRecord::new();
        let outcome = visible_energy_cut(&record, &params).unwrap();
        assert!(outcome.passed());
        assert_eq!(
            outcome.side_data().get("evis"),
            Some(&ProductValue::Float(650.0))
        );
    }

    #[test]
    fn energy_below_minimum_fails_but_keeps_side_data() {
        let mut options = CutOptions::new();
        options.insert("min_energy".to_string(), serde_yaml::Value::from(200.0));
        let produced = outputs(50.0);
        let params = CutParams {
            is_simulated: false,
            dataset_name: None,
            options: &options,
            producer_outputs: Some(&produced),
        };

        let record = MapRecord::new();
        let outcome = visible_energy_cut(&record, &params).unwrap();
        assert!(!outcome.passed());
        assert_eq!(
            outcome.side_data().get("evis"),
            Some(&ProductValue::Float(50.0))
        );
    }

    #[test]
    fn reads_evis_from_map_shaped_producer_output() {
        let options = CutOptions::new();
        let produced = map_outputs(400.0);
        let params = CutParams {
            is_simulated: false,
            dataset_name: None,
            options: &options,
            producer_outputs: Some(&produced),
        };

        let record = MapRecord::new();
        let outcome = visible_energy_cut(&record, &params).unwrap();
        assert!(outcome.passed());
        assert_eq!(
            outcome.side_data().get("evis"),
            Some(&ProductValue::Float(400.0))
        );
    }

    #[test]
    fn missing_producer_output_is_an_error() {
        let options = CutOptions::new();
        let params = CutParams {
            is_simulated: false,
            dataset_name: None,
            options: &options,
            producer_outputs: None,
        };

        let record = MapRecord::new();
        assert!(visible_energy_cut(&record, &params).is_err());
    }
}
