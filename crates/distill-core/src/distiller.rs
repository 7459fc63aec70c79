//! Entry point tying classification and comment association together.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::change::{ChangeType, TreeEditOperation};
use crate::classifier::ChangeClassifier;
use crate::comments::{Association, Comment, CommentAssociator, CommentCleaner};
use crate::config::Config;
use crate::model::{EntityTree, EntityType, StructureEntityVersion, TreeError};

/// Runs the distilling steps of one (old version, new version) comparison.
#[derive(Debug, Clone)]
pub struct Distiller {
    config: Config,
    classifier: ChangeClassifier,
    cleaner: CommentCleaner,
}

impl Default for Distiller {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Distiller {
    pub fn new(config: Config) -> Self {
        let classifier = ChangeClassifier::new(config.classification.clone());
        let cleaner = CommentCleaner::new(&config.comments);
        Self {
            config,
            classifier,
            cleaner,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Classify the edit script of `root` and return the new version carrying
    /// the resulting changes.
    pub fn distill<I>(&self, root: &StructureEntityVersion, operations: I) -> StructureEntityVersion
    where
        I: IntoIterator<Item = TreeEditOperation>,
    {
        let changes = self.classifier.classify(operations);
        let version = root.with_changes(changes);
        info!(
            entity = %version,
            changes = version.changes().len(),
            significance = version.significance_level(),
            "Distilled changes"
        );
        version
    }

    /// Clean `comments` and attach them to the code of `tree`.
    pub fn associate_comments(
        &self,
        tree: &mut EntityTree,
        source: &str,
        comments: Vec<Comment>,
    ) -> Result<Vec<Association>, TreeError> {
        let comments = self.cleaner.clean(source, comments)?;
        CommentAssociator::new(source, &self.config.association).associate(tree, comments)
    }
}

/// Summary of the changes carried by one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistillReport {
    pub entity: String,
    pub entity_type: EntityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub total_changes: usize,
    pub significance: u32,
    pub change_types: BTreeMap<ChangeType, usize>,
}

impl DistillReport {
    pub fn from_version(version: &StructureEntityVersion) -> Self {
        let mut change_types = BTreeMap::new();
        for change in version.changes() {
            *change_types.entry(change.change_type()).or_insert(0) += 1;
        }
        Self {
            entity: version.unique_name.clone(),
            entity_type: version.entity_type,
            version: version.version.clone(),
            total_changes: version.changes().len(),
            significance: version.significance_level(),
            change_types,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
