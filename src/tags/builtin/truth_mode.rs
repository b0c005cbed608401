// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Truth interaction-mode label for simulated events.

use crate::event::EventRecord;
use crate::tags::tag::TagParams;

/// Labels a simulated event by true neutrino flavor and current, e.g.
/// `numuCC` or `nueNC`. Data events carry no truth and get no label, as
/// does simulation missing the truth fields.
///
/// Options:
/// * `ignore_taus` (bool, default false): leave nutau events unlabeled.
pub fn truth_mode_tag(
    record: &dyn EventRecord,
    params: &TagParams,
) -> anyhow::Result<Option<String>> {
    if !params.is_simulated {
        return Ok(None);
    }
    let ignore_taus = params.option_bool("ignore_taus", false)?;

    let pdg = record.get("trueNuPDG").and_then(|v| v.as_int());
    let ccnc = record.get("trueNuCCNC").and_then(|v| v.as_int());
    let (Some(pdg), Some(ccnc)) = (pdg, ccnc) else {
        return Ok(None);
    };

    let flavor = match pdg.abs() {
        12 => "nue",
        14 => "numu",
        16 if ignore_taus => return Ok(None),
        16 => "nutau",
        _ => return Ok(None),
    };
    let current = if ccnc == 0 { "CC" } else { "NC" };

    Ok(Some(format!("{flavor}{current}")))
}
