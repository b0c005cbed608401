// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Reserved input name for the raw event record. Declaring it as a required
/// input imposes no ordering constraint on the producer graph.
pub const RECORD_KEY: &str = "record";

/// Prefix for per-cut side-data keys in a [`crate::cuts::Selection`].
pub const CUTDATA_PREFIX: &str = "cutdata_";
