// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Builtin producer set.
//!
//! Registered explicitly at startup via [`register_defaults`]; nothing here
//! self-registers at import time.

mod event_index;
mod event_weight;
mod visible_energy;

pub use event_index::EventIndexProducer;
pub use event_weight::EventWeightProducer;
pub use visible_energy::VisibleEnergyProducer;

use crate::errors::ConfigError;
use crate::producers::registry::ProducerRegistry;

/// Register the builtin producer types under their canonical names.
pub fn register_defaults(registry: &mut ProducerRegistry) -> Result<(), ConfigError> {
    registry.register("EventIndexProducer", EventIndexProducer::create)?;
    registry.register("EventWeightProducer", EventWeightProducer::create)?;
    registry.register("VisibleEnergyProducer", VisibleEnergyProducer::create)?;
    Ok(())
}
