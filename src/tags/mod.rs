// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod registry;
mod tag;
mod tagger;

pub mod builtin;

pub use registry::TagRegistry;
pub use tag::{TagFn, TagParams};
pub use tagger::Tagger;
