// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod cut;
mod engine;
mod registry;

pub mod builtin;
pub mod logic;

pub use cut::{CutFn, CutOutcome, CutParams};
pub use engine::{ApplyContext, CutEngine, CutStats, Selection, SelectionStats};
pub use logic::{LogicError, LogicExpr};
pub use registry::CutRegistry;
