// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Builtin cut functions.

mod fiducial;
mod visible_energy;

pub use fiducial::fiducial_cut;
pub use visible_energy::visible_energy_cut;

use crate::cuts::registry::CutRegistry;
use crate::errors::ConfigError;

/// Register the builtin cut set.
pub fn register_defaults(registry: &mut CutRegistry) -> Result<(), ConfigError> {
    registry.register("fiducial_cut", fiducial_cut)?;
    registry.register("visible_energy_cut", visible_energy_cut)?;
    Ok(())
}
