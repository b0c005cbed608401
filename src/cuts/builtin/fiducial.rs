// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Fiducial-volume cut on the reconstructed (or true) neutrino vertex.

use crate::cuts::cut::{CutOutcome, CutParams};
use crate::event::{EventRecord, ProductValue, SideData};

// Active-volume extent in detector coordinates, centimeters.
const X_MIN: f64 = 0.0;
const X_MAX: f64 = 256.35;
const Y_MIN: f64 = -116.5;
const Y_MAX: f64 = 116.5;
const Z_MIN: f64 = 0.0;
const Z_MAX: f64 = 1036.0;

/// Requires a found vertex at least `width` cm inside the active volume
/// on every axis.
///
/// Options:
/// * `width` (number, default 10.0): margin from the volume boundary.
/// * `use_true_vtx` (bool, default false): test the true vertex instead of
///   the reconstructed one. Data events carry no truth, so in that mode
///   they pass unconditionally.
pub fn fiducial_cut(record: &dyn EventRecord, params: &CutParams) -> anyhow::Result<CutOutcome> {
    let width = params.option_f64("width", 10.0)?;
    let use_true_vtx = params.option_bool("use_true_vtx", false)?;

    if use_true_vtx && !params.is_simulated {
        return Ok(CutOutcome::pass());
    }

    let (found_field, x_field, y_field, z_field) = if use_true_vtx {
        ("trueVtxValid", "trueVtxX", "trueVtxY", "trueVtxZ")
    } else {
        ("foundVertex", "vtxX", "vtxY", "vtxZ")
    };

    let found = record
        .get(found_field)
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    if !found {
        return Ok(CutOutcome::fail());
    }

    let vertex = read_vertex(record, x_field, y_field, z_field)
        .ok_or_else(|| anyhow::anyhow!("vertex flagged found but position fields are missing"))?;

    let inside = vertex.0 >= X_MIN + width
        && vertex.0 <= X_MAX - width
        && vertex.1 >= Y_MIN + width
        && vertex.1 <= Y_MAX - width
        && vertex.2 >= Z_MIN + width
        && vertex.2 <= Z_MAX - width;

    let mut side_data = SideData::new();
    side_data.insert("vtx_x".to_string(), ProductValue::Float(vertex.0));
    side_data.insert("vtx_y".to_string(), ProductValue::Float(vertex.1));
    side_data.insert("vtx_z".to_string(), ProductValue::Float(vertex.2));

    if inside {
        Ok(CutOutcome::pass_with(side_data))
    } else {
        Ok(CutOutcome::fail_with(side_data))
    }
}

fn read_vertex(
    record: &dyn EventRecord,
    x_field: &str,
    y_field: &str,
    z_field: &str,
) -> Option<(f64, f64, f64)> {
    let x = record.get(x_field)?.as_float()?;
    let y = record.get(y_field)?.as_float()?;
    let z = record.get(z_field)?.as_float()?;
    Some((x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CutOptions;
    use crate::event::MapRecord;

    fn params<'a>(options: &'a CutOptions, is_simulated: bool) -> CutParams<'a> {
        CutParams {
            is_simulated,
            dataset_name: None,
            options,
            producer_outputs: None,
        }
    }

    fn vertex_record(found: bool, x: f64, y: f64, z: f64) -> MapRecord {
        MapRecord::new()
            .with_field("foundVertex", ProductValue::Bool(found))
            .with_field("vtxX", ProductValue::Float(x))
            .with_field("vtxY", ProductValue::Float(y))
            .with_field("vtxZ", ProductValue::Float(z))
    }

    #[test]
    fn central_vertex_passes() {
        let options = CutOptions::new();
        let record = vertex_record(true, 128.0, 0.0, 500.0);

        let outcome = fiducial_cut(&record, &params(&options, false)).unwrap();
        assert!(outcome.passed());
        assert_eq!(
            outcome.side_data().get("vtx_x"),
            Some(&ProductValue::Float(128.0))
        );
    }

    #[test]
    fn vertex_inside_margin_fails() {
        let options = CutOptions::new();
        // 5 cm from the x boundary, default margin is 10.
        let record = vertex_record(true, 5.0, 0.0, 500.0);

        let outcome = fiducial_cut(&record, &params(&options, false)).unwrap();
        assert!(!outcome.passed());
    }

    #[test]
    fn width_option_tightens_the_volume() {
        let mut options = CutOptions::new();
        options.insert("width".to_string(), serde_yaml::Value::from(30.0));
        let record = vertex_record(true, 25.0, 0.0, 500.0);

        let outcome = fiducial_cut(&record, &params(&options, false)).unwrap();
        assert!(!outcome.passed());
    }

    #[test]
    fn missing_vertex_fails() {
        let options = CutOptions::new();
        let record = vertex_record(false, 128.0, 0.0, 500.0);

        let outcome = fiducial_cut(&record, &params(&options, false)).unwrap();
        assert!(!outcome.passed());
    }

    #[test]
    fn true_vertex_mode_passes_data_unconditionally() {
        let mut options = CutOptions::new();
        options.insert("use_true_vtx".to_string(), serde_yaml::Value::from(true));
        let record = MapRecord::new();

        let outcome = fiducial_cut(&record, &params(&options, false)).unwrap();
        assert!(outcome.passed());
    }

    #[test]
    fn true_vertex_mode_tests_truth_on_simulation() {
        let mut options = CutOptions::new();
        options.insert("use_true_vtx".to_string(), serde_yaml::Value::from(true));
        let record = MapRecord::new()
            .with_field("trueVtxValid", ProductValue::Bool(true))
            .with_field("trueVtxX", ProductValue::Float(128.0))
            .with_field("trueVtxY", ProductValue::Float(0.0))
            .with_field("trueVtxZ", ProductValue::Float(500.0));

        let outcome = fiducial_cut(&record, &params(&options, true)).unwrap();
        assert!(outcome.passed());
    }

    #[test]
    fn found_vertex_without_position_is_an_error() {
        let options = CutOptions::new();
        let record = MapRecord::new().with_field("foundVertex", ProductValue::Bool(true));

        assert!(fiducial_cut(&record, &params(&options, false)).is_err());
    }
}
