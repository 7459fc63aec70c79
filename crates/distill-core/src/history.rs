//! Version histories of a class and its members.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::model::{EntityType, StructureEntityVersion};

/// Consecutive versions of one named entity, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityHistory {
    pub unique_name: String,
    versions: Vec<StructureEntityVersion>,
}

impl EntityHistory {
    pub fn new(unique_name: impl Into<String>) -> Self {
        Self {
            unique_name: unique_name.into(),
            versions: Vec::new(),
        }
    }

    pub fn add_version(&mut self, version: StructureEntityVersion) {
        self.versions.push(version);
    }

    pub fn versions(&self) -> &[StructureEntityVersion] {
        &self.versions
    }

    pub fn latest(&self) -> Option<&StructureEntityVersion> {
        self.versions.last()
    }

    pub fn has_changes(&self) -> bool {
        self.versions.iter().any(StructureEntityVersion::has_changes)
    }

    /// Sum over all versions.
    pub fn significance_level(&self) -> u32 {
        self.versions.iter().map(StructureEntityVersion::significance_level).sum()
    }
}

/// History of a class: its own versions plus one timeline per attribute,
/// method and inner class, keyed by unique name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassHistory {
    class: EntityHistory,
    attributes: BTreeMap<String, EntityHistory>,
    methods: BTreeMap<String, EntityHistory>,
    inner_classes: BTreeMap<String, EntityHistory>,
}

impl ClassHistory {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class: EntityHistory::new(class_name),
            ..Default::default()
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class.unique_name
    }

    /// File a version under the timeline its type and name select.
    pub fn add_version(&mut self, version: StructureEntityVersion) {
        let timelines = match version.entity_type {
            EntityType::Class if version.unique_name == self.class.unique_name => {
                self.class.add_version(version);
                return;
            }
            EntityType::Class => &mut self.inner_classes,
            EntityType::Method => &mut self.methods,
            EntityType::Field => &mut self.attributes,
            other => {
                debug!(entity_type = %other, name = %version.unique_name, "Ignoring non-structure version");
                return;
            }
        };
        timelines
            .entry(version.unique_name.clone())
            .or_insert_with(|| EntityHistory::new(version.unique_name.clone()))
            .add_version(version);
    }

    pub fn class_versions(&self) -> &[StructureEntityVersion] {
        self.class.versions()
    }

    pub fn attribute_history(&self, name: &str) -> Option<&EntityHistory> {
        self.attributes.get(name)
    }

    pub fn method_history(&self, name: &str) -> Option<&EntityHistory> {
        self.methods.get(name)
    }

    pub fn inner_class_history(&self, name: &str) -> Option<&EntityHistory> {
        self.inner_classes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &EntityHistory> {
        self.attributes.values()
    }

    pub fn methods(&self) -> impl Iterator<Item = &EntityHistory> {
        self.methods.values()
    }

    pub fn inner_classes(&self) -> impl Iterator<Item = &EntityHistory> {
        self.inner_classes.values()
    }

    fn timelines(&self) -> impl Iterator<Item = &EntityHistory> {
        std::iter::once(&self.class)
            .chain(self.attributes.values())
            .chain(self.methods.values())
            .chain(self.inner_classes.values())
    }

    pub fn has_changes(&self) -> bool {
        self.timelines().any(EntityHistory::has_changes)
    }

    /// Sum over all versions of the class and its members.
    pub fn significance_level(&self) -> u32 {
        self.timelines().map(EntityHistory::significance_level).sum()
    }
}
