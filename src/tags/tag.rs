// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::TagOptions;
use crate::event::EventRecord;

/// Parameters handed to a tag function for one event.
pub struct TagParams<'a> {
    pub is_simulated: bool,
    pub options: &'a TagOptions,
}

impl<'a> TagParams<'a> {
    /// Configured option as bool, with a default when absent. Errors on a
    /// present-but-non-boolean value so typos fail loudly.
    pub fn option_bool(&self, key: &str, default: bool) -> anyhow::Result<bool> {
        match self.options.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| anyhow::anyhow!("tag option '{key}' must be a boolean")),
        }
    }
}

/// A tag: a named labeler over one event.
///
/// `Ok(None)` means the tag does not apply to this event; errors are
/// reserved for genuine faults and abort the event.
pub type TagFn = fn(&dyn EventRecord, &TagParams) -> anyhow::Result<Option<String>>;
