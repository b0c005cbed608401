// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-event runtime faults.
//!
//! A producer or cut failure aborts the current event's walk and surfaces
//! here with enough context to report the failing unit and event index. The
//! recovery policy (abort the run or skip and log) is the caller's decision,
//! driven by [`crate::config::FailurePolicy`].
//!
//! "Not applicable" conditions are not faults: producers represent them with
//! sentinel default values.

use crate::cuts::logic::LogicError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("producer '{producer}' failed{}: {source}", describe_event(*event_index))]
    Producer {
        producer: String,
        event_index: Option<u64>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("cut '{cut}' failed{}: {source}", describe_event(*event_index))]
    Cut {
        cut: String,
        event_index: Option<u64>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("tag '{tag}' failed{}: {source}", describe_event(*event_index))]
    Tag {
        tag: String,
        event_index: Option<u64>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("cut logic evaluation failed: {0}")]
    Logic(#[from] LogicError),
}

impl EventError {
    /// Name of the failing unit, for skip-and-log reporting.
    pub fn unit(&self) -> Option<&str> {
        match self {
            EventError::Producer { producer, .. } => Some(producer),
            EventError::Cut { cut, .. } => Some(cut),
            EventError::Tag { tag, .. } => Some(tag),
            EventError::Logic(_) => None,
        }
    }

    pub fn event_index(&self) -> Option<u64> {
        match self {
            EventError::Producer { event_index, .. }
            | EventError::Cut { event_index, .. }
            | EventError::Tag { event_index, .. } => *event_index,
            EventError::Logic(_) => None,
        }
    }
}

fn describe_event(event_index: Option<u64>) -> String {
    match event_index {
        Some(index) => format!(" at event {}", index),
        None => String::new(),
    }
}
