// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod graph;
mod pipeline;
mod producer;
mod registry;

pub mod builtin;

pub use graph::resolve_execution_order;
pub use pipeline::ProducerPipeline;
pub use producer::{ColumnKind, ColumnSpec, OutputSchema, Producer, SchemaSink};
pub use registry::{ProducerCtor, ProducerRegistry};
