//! Primitive edit operations: raw differencer output and validated changes.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::change_type::{ChangeType, SignificanceLevel};
use super::error::ChangeError;
use crate::model::{SourceCodeEntity, StructureEntityVersion, Visibility};

/// The four primitive edit kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    Insert,
    Delete,
    Move,
    Update,
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => write!(f, "Insert"),
            Self::Delete => write!(f, "Delete"),
            Self::Move => write!(f, "Move"),
            Self::Update => write!(f, "Update"),
        }
    }
}

/// An edit operation as delivered by the structural differencer.
///
/// Entity references are optional here; [`SourceCodeChange::try_from`]
/// checks that the ones required by `kind` are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEditOperation {
    pub kind: EditKind,
    #[serde(default)]
    pub change_type: ChangeType,
    pub root_entity: Option<Arc<StructureEntityVersion>>,
    pub changed_entity: Option<SourceCodeEntity>,
    pub parent_entity: Option<SourceCodeEntity>,
    #[serde(default)]
    pub new_entity: Option<SourceCodeEntity>,
    #[serde(default)]
    pub new_parent_entity: Option<SourceCodeEntity>,
}

impl TreeEditOperation {
    fn empty(kind: EditKind, root: &Arc<StructureEntityVersion>) -> Self {
        Self {
            kind,
            change_type: ChangeType::Unclassified,
            root_entity: Some(Arc::clone(root)),
            changed_entity: None,
            parent_entity: None,
            new_entity: None,
            new_parent_entity: None,
        }
    }

    /// `changed` was added as a child of `parent`.
    pub fn insert(root: &Arc<StructureEntityVersion>, changed: SourceCodeEntity, parent: SourceCodeEntity) -> Self {
        Self {
            changed_entity: Some(changed),
            parent_entity: Some(parent),
            ..Self::empty(EditKind::Insert, root)
        }
    }

    /// `changed` was removed from `parent`.
    pub fn delete(root: &Arc<StructureEntityVersion>, changed: SourceCodeEntity, parent: SourceCodeEntity) -> Self {
        Self {
            changed_entity: Some(changed),
            parent_entity: Some(parent),
            ..Self::empty(EditKind::Delete, root)
        }
    }

    /// `changed` moved from `parent` to `new_parent`, becoming `new_entity`.
    pub fn moved(
        root: &Arc<StructureEntityVersion>,
        changed: SourceCodeEntity,
        new_entity: SourceCodeEntity,
        parent: SourceCodeEntity,
        new_parent: SourceCodeEntity,
    ) -> Self {
        Self {
            changed_entity: Some(changed),
            new_entity: Some(new_entity),
            parent_entity: Some(parent),
            new_parent_entity: Some(new_parent),
            ..Self::empty(EditKind::Move, root)
        }
    }

    /// `changed` was replaced in place by `new_entity`.
    pub fn update(
        root: &Arc<StructureEntityVersion>,
        changed: SourceCodeEntity,
        new_entity: SourceCodeEntity,
        parent: SourceCodeEntity,
    ) -> Self {
        Self {
            changed_entity: Some(changed),
            new_entity: Some(new_entity),
            parent_entity: Some(parent),
            ..Self::empty(EditKind::Update, root)
        }
    }

    /// Mark the operation as already classified by the differencer.
    pub fn with_change_type(mut self, change_type: ChangeType) -> Self {
        self.change_type = change_type;
        self
    }
}

/// Fields shared by all four edit kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeHeader {
    change_type: ChangeType,
    root_entity: Arc<StructureEntityVersion>,
    changed_entity: SourceCodeEntity,
    parent_entity: SourceCodeEntity,
    #[serde(skip)]
    significance: OnceCell<SignificanceLevel>,
}

impl ChangeHeader {
    fn new(
        change_type: ChangeType,
        root_entity: Arc<StructureEntityVersion>,
        changed_entity: SourceCodeEntity,
        parent_entity: SourceCodeEntity,
    ) -> Self {
        Self {
            change_type,
            root_entity,
            changed_entity,
            parent_entity,
            significance: OnceCell::new(),
        }
    }
}

impl PartialEq for ChangeHeader {
    fn eq(&self, other: &Self) -> bool {
        self.change_type == other.change_type
            && self.root_entity == other.root_entity
            && self.changed_entity == other.changed_entity
            && self.parent_entity == other.parent_entity
    }
}

impl Eq for ChangeHeader {}

impl Hash for ChangeHeader {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.change_type.hash(state);
        self.root_entity.hash(state);
        self.changed_entity.hash(state);
        self.parent_entity.hash(state);
    }
}

/// A validated edit operation carrying its semantic change type.
///
/// Equality and hashing are structural, so changes can be deduplicated and
/// looked up by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum SourceCodeChange {
    Insert(ChangeHeader),
    Delete(ChangeHeader),
    Move {
        #[serde(flatten)]
        header: ChangeHeader,
        new_parent_entity: SourceCodeEntity,
        new_entity: SourceCodeEntity,
    },
    Update {
        #[serde(flatten)]
        header: ChangeHeader,
        new_entity: SourceCodeEntity,
    },
}

impl SourceCodeChange {
    pub fn insert(
        change_type: ChangeType,
        root: Arc<StructureEntityVersion>,
        changed: SourceCodeEntity,
        parent: SourceCodeEntity,
    ) -> Self {
        Self::Insert(ChangeHeader::new(change_type, root, changed, parent))
    }

    pub fn delete(
        change_type: ChangeType,
        root: Arc<StructureEntityVersion>,
        changed: SourceCodeEntity,
        parent: SourceCodeEntity,
    ) -> Self {
        Self::Delete(ChangeHeader::new(change_type, root, changed, parent))
    }

    pub fn moved(
        change_type: ChangeType,
        root: Arc<StructureEntityVersion>,
        changed: SourceCodeEntity,
        new_entity: SourceCodeEntity,
        parent: SourceCodeEntity,
        new_parent: SourceCodeEntity,
    ) -> Self {
        Self::Move {
            header: ChangeHeader::new(change_type, root, changed, parent),
            new_parent_entity: new_parent,
            new_entity,
        }
    }

    pub fn update(
        change_type: ChangeType,
        root: Arc<StructureEntityVersion>,
        changed: SourceCodeEntity,
        new_entity: SourceCodeEntity,
        parent: SourceCodeEntity,
    ) -> Self {
        Self::Update {
            header: ChangeHeader::new(change_type, root, changed, parent),
            new_entity,
        }
    }

    pub fn kind(&self) -> EditKind {
        match self {
            Self::Insert(_) => EditKind::Insert,
            Self::Delete(_) => EditKind::Delete,
            Self::Move { .. } => EditKind::Move,
            Self::Update { .. } => EditKind::Update,
        }
    }

    fn header(&self) -> &ChangeHeader {
        match self {
            Self::Insert(header) | Self::Delete(header) => header,
            Self::Move { header, .. } | Self::Update { header, .. } => header,
        }
    }

    fn header_mut(&mut self) -> &mut ChangeHeader {
        match self {
            Self::Insert(header) | Self::Delete(header) => header,
            Self::Move { header, .. } | Self::Update { header, .. } => header,
        }
    }

    pub fn change_type(&self) -> ChangeType {
        self.header().change_type
    }

    pub fn root_entity(&self) -> &Arc<StructureEntityVersion> {
        &self.header().root_entity
    }

    pub fn changed_entity(&self) -> &SourceCodeEntity {
        &self.header().changed_entity
    }

    pub fn parent_entity(&self) -> &SourceCodeEntity {
        &self.header().parent_entity
    }

    /// Entity after the change, for moves and updates.
    pub fn new_entity(&self) -> Option<&SourceCodeEntity> {
        match self {
            Self::Move { new_entity, .. } | Self::Update { new_entity, .. } => Some(new_entity),
            _ => None,
        }
    }

    /// Parent after the change, for moves.
    pub fn new_parent_entity(&self) -> Option<&SourceCodeEntity> {
        match self {
            Self::Move { new_parent_entity, .. } => Some(new_parent_entity),
            _ => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        self.change_type().is_classified()
    }

    /// The same operation labelled with `change_type`, with an empty
    /// significance cache.
    pub fn with_change_type(mut self, change_type: ChangeType) -> Self {
        let header = self.header_mut();
        header.change_type = change_type;
        header.significance = OnceCell::new();
        self
    }

    /// Significance of this change, computed once.
    pub fn significance_level(&self) -> SignificanceLevel {
        *self.header().significance.get_or_init(|| self.compute_significance())
    }

    fn compute_significance(&self) -> SignificanceLevel {
        let change_type = self.change_type();
        if !change_type.has_unstable_significance() {
            return change_type.static_significance();
        }

        match change_type {
            ChangeType::DecreasingAccessibilityChange => {
                if self.visibility_before().is_exposed() {
                    SignificanceLevel::Crucial
                } else {
                    SignificanceLevel::Medium
                }
            }
            ChangeType::IncreasingAccessibilityChange => {
                if self.visibility_after() == Visibility::Public {
                    SignificanceLevel::Medium
                } else {
                    SignificanceLevel::Low
                }
            }
            ChangeType::RemovedClass | ChangeType::RemovedFunctionality | ChangeType::RemovedObjectState => {
                match self.changed_entity().modifiers.visibility() {
                    Visibility::Public | Visibility::Protected => SignificanceLevel::Crucial,
                    Visibility::Package => SignificanceLevel::Medium,
                    Visibility::Private => SignificanceLevel::Low,
                }
            }
            other => other.static_significance(),
        }
    }

    /// Visibility given up by an accessibility change. An inserted visibility
    /// modifier replaces package access.
    fn visibility_before(&self) -> Visibility {
        match self {
            Self::Insert(_) => Visibility::Package,
            _ => self.changed_entity().visibility_keyword().unwrap_or(Visibility::Package),
        }
    }

    /// Visibility reached by an accessibility change. A deleted visibility
    /// modifier leaves package access.
    fn visibility_after(&self) -> Visibility {
        let keyword = match self {
            Self::Insert(_) => self.changed_entity().visibility_keyword(),
            Self::Delete(_) => None,
            Self::Move { new_entity, .. } | Self::Update { new_entity, .. } => new_entity.visibility_keyword(),
        };
        keyword.unwrap_or(Visibility::Package)
    }
}

impl TryFrom<TreeEditOperation> for SourceCodeChange {
    type Error = ChangeError;

    fn try_from(op: TreeEditOperation) -> Result<Self, Self::Error> {
        let kind = op.kind;
        let missing = |field: &'static str| ChangeError::MissingEntity { kind, field };

        let root = op.root_entity.ok_or_else(|| missing("root entity"))?;
        let changed = op.changed_entity.ok_or_else(|| missing("changed entity"))?;
        let parent = op.parent_entity.ok_or_else(|| missing("parent entity"))?;
        let change_type = op.change_type;

        let change = match kind {
            EditKind::Insert => Self::insert(change_type, root, changed, parent),
            EditKind::Delete => Self::delete(change_type, root, changed, parent),
            EditKind::Move => {
                let new_entity = op.new_entity.ok_or_else(|| missing("new entity"))?;
                let new_parent = op.new_parent_entity.ok_or_else(|| missing("new parent entity"))?;
                Self::moved(change_type, root, changed, new_entity, parent, new_parent)
            }
            EditKind::Update => {
                let new_entity = op.new_entity.ok_or_else(|| missing("new entity"))?;
                Self::update(change_type, root, changed, new_entity, parent)
            }
        };
        Ok(change)
    }
}

impl fmt::Display for SourceCodeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.kind(), self.change_type(), self.changed_entity())?;
        if let Some(new_entity) = self.new_entity() {
            write!(f, " -> [{}]", new_entity)?;
        }
        write!(f, " in {}", self.root_entity())
    }
}
