//! Versions of classes, methods and fields.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::entity::Modifiers;
use super::entity_type::EntityType;
use crate::change::SourceCodeChange;

/// One version of a named class, method or field, together with the changes
/// that turned the previous version into this one.
///
/// Identity is the type, unique name, modifiers and version label; the change
/// list and the memoized significance do not take part in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureEntityVersion {
    pub entity_type: EntityType,
    pub unique_name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    changes: Vec<SourceCodeChange>,
    #[serde(skip)]
    significance: OnceCell<u32>,
}

impl StructureEntityVersion {
    pub fn new(entity_type: EntityType, unique_name: impl Into<String>) -> Self {
        Self {
            entity_type,
            unique_name: unique_name.into(),
            modifiers: Modifiers::empty(),
            version: None,
            changes: Vec::new(),
            significance: OnceCell::new(),
        }
    }

    pub fn class(unique_name: impl Into<String>) -> Self {
        Self::new(EntityType::Class, unique_name)
    }

    pub fn method(unique_name: impl Into<String>) -> Self {
        Self::new(EntityType::Method, unique_name)
    }

    pub fn field(unique_name: impl Into<String>) -> Self {
        Self::new(EntityType::Field, unique_name)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The same version carrying `changes`. The significance cache starts empty.
    pub fn with_changes(&self, changes: Vec<SourceCodeChange>) -> Self {
        Self {
            entity_type: self.entity_type,
            unique_name: self.unique_name.clone(),
            modifiers: self.modifiers,
            version: self.version.clone(),
            changes,
            significance: OnceCell::new(),
        }
    }

    pub fn changes(&self) -> &[SourceCodeChange] {
        &self.changes
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Sum of the significance values of all contained changes, computed once.
    pub fn significance_level(&self) -> u32 {
        *self
            .significance
            .get_or_init(|| self.changes.iter().map(|c| c.significance_level().value()).sum())
    }
}

impl PartialEq for StructureEntityVersion {
    fn eq(&self, other: &Self) -> bool {
        self.entity_type == other.entity_type
            && self.unique_name == other.unique_name
            && self.modifiers == other.modifiers
            && self.version == other.version
    }
}

impl Eq for StructureEntityVersion {}

impl Hash for StructureEntityVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entity_type.hash(state);
        self.unique_name.hash(state);
        self.modifiers.hash(state);
        self.version.hash(state);
    }
}

impl fmt::Display for StructureEntityVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} {}@{}", self.entity_type, self.unique_name, version),
            None => write!(f, "{} {}", self.entity_type, self.unique_name),
        }
    }
}
