// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod validation;

pub mod consts;

pub use loader::{
    load_and_validate_config, load_config, Config, CutOptions, CutSpec, FailurePolicy,
    ProducerOptions, ProducerSpec, TagOptions, TagSpec,
};
pub use validation::validate_config;
