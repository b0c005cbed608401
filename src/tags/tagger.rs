// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Applies configured tags to events, collecting the labels that apply.

use crate::config::{TagOptions, TagSpec};
use crate::errors::{ConfigError, EventError};
use crate::event::{EventParams, EventRecord};
use crate::tags::registry::TagRegistry;
use crate::tags::tag::{TagFn, TagParams};
use std::collections::HashSet;

struct ConfiguredTag {
    name: String,
    func: TagFn,
    options: TagOptions,
}

/// Runs configured tags against one event at a time, in configured order.
pub struct Tagger {
    tags: Vec<ConfiguredTag>,
}

impl Tagger {
    /// Resolve configured tags through the registry. Duplicate names and
    /// unknown tags surface here, before any event is processed.
    pub fn from_config(specs: &[TagSpec], registry: &TagRegistry) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut tags = Vec::with_capacity(specs.len());
        for spec in specs {
            if !seen.insert(spec.name.clone()) {
                return Err(ConfigError::DuplicateTagName {
                    name: spec.name.clone(),
                });
            }
            tags.push(ConfiguredTag {
                name: spec.name.clone(),
                func: registry.get(&spec.name)?,
                options: spec.params.clone(),
            });
        }
        Ok(Self { tags })
    }

    /// Apply every configured tag to one event, collecting the labels of
    /// tags that apply. Tags that return `None` contribute nothing.
    pub fn apply(
        &self,
        record: &dyn EventRecord,
        event: &EventParams,
    ) -> Result<Vec<String>, EventError> {
        let mut labels = Vec::new();
        for tag in &self.tags {
            let params = TagParams {
                is_simulated: event.is_simulated,
                options: &tag.options,
            };
            let label = (tag.func)(record, &params).map_err(|source| EventError::Tag {
                tag: tag.name.clone(),
                event_index: event.event_index,
                source: source.into(),
            })?;
            if let Some(label) = label {
                tracing::trace!(tag = %tag.name, label = %label, "tag applied");
                labels.push(label);
            }
        }
        Ok(labels)
    }

    /// Configured tag names, in application order.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl std::fmt::Debug for Tagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tagger")
            .field("tag_count", &self.tags.len())
            .field("tags", &self.tag_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MapRecord;

    fn labels_sim(
        _record: &dyn EventRecord,
        params: &TagParams,
    ) -> anyhow::Result<Option<String>> {
        if params.is_simulated {
            Ok(Some("sim".to_string()))
        } else {
            Ok(None)
        }
    }

    fn labels_all(
        _record: &dyn EventRecord,
        _params: &TagParams,
    ) -> anyhow::Result<Option<String>> {
        Ok(Some("all".to_string()))
    }

    fn faulty(_record: &dyn EventRecord, _params: &TagParams) -> anyhow::Result<Option<String>> {
        Err(anyhow::anyhow!("corrupt branch"))
    }

    fn registry() -> TagRegistry {
        let mut registry = TagRegistry::new();
        registry.register("sim_only", labels_sim).unwrap();
        registry.register("everything", labels_all).unwrap();
        registry.register("faulty", faulty).unwrap();
        registry
    }

    fn specs(names: &[&str]) -> Vec<TagSpec> {
        names
            .iter()
            .map(|name| TagSpec {
                name: name.to_string(),
                params: TagOptions::new(),
            })
            .collect()
    }

    #[test]
    fn collects_labels_in_configured_order() {
        let tagger = Tagger::from_config(&specs(&["sim_only", "everything"]), &registry()).unwrap();

        let record = MapRecord::new();
        let labels = tagger.apply(&record, &EventParams::simulated()).unwrap();
        assert_eq!(labels, vec!["sim".to_string(), "all".to_string()]);
    }

    #[test]
    fn non_applicable_tags_contribute_nothing() {
        let tagger = Tagger::from_config(&specs(&["sim_only", "everything"]), &registry()).unwrap();

        let record = MapRecord::new();
        let labels = tagger.apply(&record, &EventParams::data()).unwrap();
        assert_eq!(labels, vec!["all".to_string()]);
    }

    #[test]
    fn duplicate_configured_tag_fails_at_build() {
        let err =
            Tagger::from_config(&specs(&["sim_only", "sim_only"]), &registry()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTagName { .. }));
    }

    #[test]
    fn unknown_configured_tag_fails_at_build() {
        let err = Tagger::from_config(&specs(&["ghost"]), &registry()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTag { .. }));
    }

    #[test]
    fn faulty_tag_aborts_the_event() {
        let tagger = Tagger::from_config(&specs(&["faulty"]), &registry()).unwrap();

        let record = MapRecord::new();
        let err = tagger
            .apply(&record, &EventParams::simulated().with_event_index(9))
            .unwrap_err();
        match err {
            EventError::Tag {
                tag, event_index, ..
            } => {
                assert_eq!(tag, "faulty");
                assert_eq!(event_index, Some(9));
            }
            other => panic!("expected Tag error, got {other:?}"),
        }
    }
}
