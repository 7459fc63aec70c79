//! Change classification.
//!
//! Turns the primitive edit script of one structural diff into semantically
//! labelled changes. Operations are partitioned by kind and visited in the
//! order inserts, deletes, moves, updates; a rule may pair the operation it
//! classifies with pending operations from any list, which are then consumed
//! and never visited on their own.
//!
//! Rules that depend on the declaration part being edited (modifiers,
//! documentation, signature, supertypes) live in [`declaration`]; the
//! statement-level fallbacks live in [`body`].

mod body;
mod declaration;
mod worklist;

use std::sync::Arc;
use tracing::{debug, trace};

use crate::change::{ChangeType, EditKind, SourceCodeChange, TreeEditOperation};
use crate::config::ClassificationConfig;
use crate::model::{EntityType, SourceCodeEntity, StructureEntityVersion, Visibility};
use worklist::{Lookup, Worklist};

/// Outcome of applying the rule set to one operation.
#[derive(Debug)]
enum Verdict {
    /// The operation, possibly merged with a partner, carries this meaning.
    Classified(SourceCodeChange),
    /// The operation is an artifact of another change and yields nothing.
    Discard,
    /// No specific rule applies; try the generic statement rules.
    Pass,
}

impl Verdict {
    fn of(change: &SourceCodeChange, change_type: ChangeType) -> Self {
        Verdict::Classified(change.clone().with_change_type(change_type))
    }

    fn of_opt(change: &SourceCodeChange, change_type: Option<ChangeType>) -> Self {
        match change_type {
            Some(change_type) => Self::of(change, change_type),
            None => Verdict::Discard,
        }
    }
}

/// Classifies edit scripts.
///
/// The classifier holds no state between calls; every call to
/// [`classify`](ChangeClassifier::classify) works on its own lists.
#[derive(Debug, Clone, Default)]
pub struct ChangeClassifier {
    config: ClassificationConfig,
}

impl ChangeClassifier {
    pub fn new(config: ClassificationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    /// Classify one edit script.
    ///
    /// Malformed operations and operations no rule gives a meaning to are
    /// dropped. The result never contains two equal changes and never an
    /// unclassified one.
    pub fn classify<I>(&self, operations: I) -> Vec<SourceCodeChange>
    where
        I: IntoIterator<Item = TreeEditOperation>,
    {
        let mut session = Session::new(&self.config);
        for op in operations {
            match SourceCodeChange::try_from(op) {
                Ok(change) => session.push(change),
                Err(e) => debug!("Dropping malformed edit operation: {}", e),
            }
        }
        session.run()
    }

    /// Classify operations that were already validated.
    pub fn classify_changes<I>(&self, changes: I) -> Vec<SourceCodeChange>
    where
        I: IntoIterator<Item = SourceCodeChange>,
    {
        let mut session = Session::new(&self.config);
        for change in changes {
            session.push(change);
        }
        session.run()
    }
}

/// Working state of one classification run.
struct Session<'c> {
    config: &'c ClassificationConfig,
    inserts: Worklist,
    deletes: Worklist,
    moves: Worklist,
    updates: Worklist,
    classified: Vec<SourceCodeChange>,
}

impl<'c> Session<'c> {
    fn new(config: &'c ClassificationConfig) -> Self {
        Self {
            config,
            inserts: Worklist::new(EditKind::Insert),
            deletes: Worklist::new(EditKind::Delete),
            moves: Worklist::new(EditKind::Move),
            updates: Worklist::new(EditKind::Update),
            classified: Vec::new(),
        }
    }

    fn list_mut(&mut self, kind: EditKind) -> &mut Worklist {
        match kind {
            EditKind::Insert => &mut self.inserts,
            EditKind::Delete => &mut self.deletes,
            EditKind::Move => &mut self.moves,
            EditKind::Update => &mut self.updates,
        }
    }

    fn push(&mut self, change: SourceCodeChange) {
        self.list_mut(change.kind()).push(change);
    }

    fn run(mut self) -> Vec<SourceCodeChange> {
        for kind in [EditKind::Insert, EditKind::Delete, EditKind::Move, EditKind::Update] {
            let mut idx = 0;
            while idx < self.list_mut(kind).len() {
                if let Some(change) = self.list_mut(kind).begin(idx) {
                    self.process(change);
                }
                idx += 1;
            }
        }
        debug!(count = self.classified.len(), "Classification finished");
        self.classified
    }

    fn process(&mut self, change: SourceCodeChange) {
        if change.is_classified() {
            trace!(%change, "Keeping pre-classified change");
            self.emit(change);
            return;
        }

        let verdict = match change.kind() {
            EditKind::Insert => self.classify_insert(&change),
            EditKind::Delete => self.classify_delete(&change),
            EditKind::Move => self.classify_move(&change),
            EditKind::Update => self.classify_update(&change),
        };
        let verdict = match verdict {
            Verdict::Pass => body::classify(&change),
            verdict => verdict,
        };

        match verdict {
            Verdict::Classified(result) => self.emit(result),
            Verdict::Discard => trace!(%change, "Discarding artifact"),
            Verdict::Pass => debug!(%change, "No rule matched"),
        }
    }

    fn emit(&mut self, change: SourceCodeChange) {
        if self.classified.contains(&change) {
            trace!(%change, "Skipping duplicate");
            return;
        }
        self.classified.push(change);
    }

    fn classify_insert(&mut self, change: &SourceCodeChange) -> Verdict {
        let changed = change.changed_entity();
        if let Some(change_type) = member_change(EditKind::Insert, changed.entity_type) {
            return Verdict::of(change, change_type);
        }

        let root_type = change.root_entity().entity_type;
        if change.parent_entity().entity_type == EntityType::Modifiers {
            self.insert_modifier(change)
        } else if changed.entity_type == EntityType::Javadoc {
            self.insert_javadoc(change)
        } else if root_type.is_method() {
            self.insert_in_method(change)
        } else if root_type.is_field() {
            self.insert_in_field(change)
        } else if root_type.is_class() {
            self.insert_in_class(change)
        } else {
            Verdict::Pass
        }
    }

    /// Two statements swapped in one block reach us as two crossing Moves;
    /// the first one carries the ordering change, the second is consumed.
    fn classify_move(&mut self, change: &SourceCodeChange) -> Verdict {
        let verdict = body::classify(change);
        if let Verdict::Classified(result) = &verdict {
            if result.change_type() == ChangeType::StatementOrderingChange {
                self.consume_crossing_move(change);
            }
        }
        verdict
    }

    fn consume_crossing_move(&mut self, change: &SourceCodeChange) {
        let Some(new_entity) = change.new_entity() else {
            return;
        };
        let old = change.changed_entity();
        let lookup = Lookup::new().root(change.root_entity()).parent(change.parent_entity());
        let partner = self.moves.find(&lookup, |m| {
            let (Some(other_new), Some(other_new_parent)) = (m.new_entity(), m.new_parent_entity()) else {
                return false;
            };
            let other_old = m.changed_entity();
            other_old.entity_type.is_statement()
                && other_new_parent.is_same_construct(m.parent_entity())
                && (old.range.start < other_old.range.start) != (new_entity.range.start < other_new.range.start)
        });
        if let Some(crossing) = partner.and_then(|idx| self.moves.consume(idx)) {
            trace!(%change, %crossing, "Folding crossing move into ordering change");
        }
    }

    fn classify_delete(&mut self, change: &SourceCodeChange) -> Verdict {
        let changed = change.changed_entity();
        if let Some(change_type) = member_change(EditKind::Delete, changed.entity_type) {
            return Verdict::of(change, change_type);
        }

        let root_type = change.root_entity().entity_type;
        if change.parent_entity().entity_type == EntityType::Modifiers {
            delete_modifier(change)
        } else if changed.entity_type == EntityType::Javadoc {
            Verdict::of(change, ChangeType::DocDelete)
        } else if root_type.is_method() {
            self.delete_in_method(change)
        } else if root_type.is_class() {
            delete_in_class(change)
        } else {
            Verdict::Pass
        }
    }

    fn classify_update(&mut self, change: &SourceCodeChange) -> Verdict {
        let Some(new_entity) = change.new_entity() else {
            return Verdict::Pass;
        };
        let renaming = match new_entity.entity_type {
            EntityType::Method => Some(ChangeType::MethodRenaming),
            EntityType::Field => Some(ChangeType::AttributeRenaming),
            EntityType::Class => Some(ChangeType::ClassRenaming),
            _ => None,
        };
        if let Some(change_type) = renaming {
            return Verdict::of(change, change_type);
        }

        let root_type = change.root_entity().entity_type;
        if change.parent_entity().entity_type == EntityType::Modifiers {
            update_modifier(change, new_entity)
        } else if change.changed_entity().entity_type == EntityType::Javadoc {
            Verdict::of(change, ChangeType::DocUpdate)
        } else if root_type.is_method() {
            self.update_in_method(change, new_entity)
        } else if root_type.is_field() {
            update_in_field(change)
        } else if root_type.is_class() {
            update_in_class(change)
        } else {
            Verdict::Pass
        }
    }

    /// Merge a Delete partner and the classified Insert into one Update.
    fn merged(
        change_type: ChangeType,
        deleted: &SourceCodeChange,
        inserted: &SourceCodeChange,
    ) -> Verdict {
        Verdict::Classified(SourceCodeChange::update(
            change_type,
            Arc::clone(inserted.root_entity()),
            deleted.changed_entity().clone(),
            inserted.changed_entity().clone(),
            inserted.parent_entity().clone(),
        ))
    }
}

/// Whole class, method or field added or removed.
fn member_change(kind: EditKind, entity_type: EntityType) -> Option<ChangeType> {
    let change_type = match (kind, entity_type) {
        (EditKind::Insert, EntityType::Method) => ChangeType::AdditionalFunctionality,
        (EditKind::Insert, EntityType::Field) => ChangeType::AdditionalObjectState,
        (EditKind::Insert, EntityType::Class) => ChangeType::AdditionalClass,
        (EditKind::Delete, EntityType::Method) => ChangeType::RemovedFunctionality,
        (EditKind::Delete, EntityType::Field) => ChangeType::RemovedObjectState,
        (EditKind::Delete, EntityType::Class) => ChangeType::RemovedClass,
        _ => return None,
    };
    Some(change_type)
}

/// Inserting `final` removes a capability, deleting it adds one back.
fn final_change(kind: EditKind, root: &StructureEntityVersion) -> Option<ChangeType> {
    let inserted = match kind {
        EditKind::Insert => true,
        EditKind::Delete => false,
        _ => return None,
    };
    let root_type = root.entity_type;
    let change_type = if root_type.is_class() {
        if inserted {
            ChangeType::RemovingClassDerivability
        } else {
            ChangeType::AddingClassDerivability
        }
    } else if root_type.is_method() {
        if inserted {
            ChangeType::RemovingMethodOverridability
        } else {
            ChangeType::AddingMethodOverridability
        }
    } else if root_type.is_field() {
        if inserted {
            ChangeType::RemovingAttributeModifiability
        } else {
            ChangeType::AddingAttributeModifiability
        }
    } else {
        return None;
    };
    Some(change_type)
}

/// Direction of a visibility change; `None` when nothing changed.
fn accessibility_change(old: Visibility, new: Visibility) -> Option<ChangeType> {
    match new.cmp(&old) {
        std::cmp::Ordering::Greater => Some(ChangeType::IncreasingAccessibilityChange),
        std::cmp::Ordering::Less => Some(ChangeType::DecreasingAccessibilityChange),
        std::cmp::Ordering::Equal => None,
    }
}

fn delete_modifier(change: &SourceCodeChange) -> Verdict {
    let changed = change.changed_entity();
    if changed.is_final_modifier() {
        return match final_change(EditKind::Delete, change.root_entity()) {
            Some(change_type) => Verdict::of(change, change_type),
            None => Verdict::Pass,
        };
    }
    match changed.visibility_keyword() {
        Some(old) => Verdict::of_opt(change, accessibility_change(old, Visibility::Package)),
        None => Verdict::Discard,
    }
}

fn update_modifier(change: &SourceCodeChange, new_entity: &SourceCodeEntity) -> Verdict {
    let old = change.changed_entity().visibility_keyword();
    match (old, new_entity.visibility_keyword()) {
        (Some(old), Some(new)) => Verdict::of_opt(change, accessibility_change(old, new)),
        _ => Verdict::Discard,
    }
}

fn update_in_field(change: &SourceCodeChange) -> Verdict {
    let is_field_type = change.changed_entity().entity_type.is_type()
        && change.parent_entity().entity_type == EntityType::FieldDeclaration;
    if is_field_type {
        Verdict::of(change, ChangeType::AttributeTypeChange)
    } else {
        Verdict::Pass
    }
}

fn delete_in_class(change: &SourceCodeChange) -> Verdict {
    supertype_change(change, ChangeType::ParentInterfaceDelete, ChangeType::ParentClassDelete)
}

fn update_in_class(change: &SourceCodeChange) -> Verdict {
    supertype_change(change, ChangeType::ParentInterfaceChange, ChangeType::ParentClassChange)
}

fn supertype_change(change: &SourceCodeChange, interface: ChangeType, class: ChangeType) -> Verdict {
    if !change.changed_entity().entity_type.is_type() {
        return Verdict::Pass;
    }
    match change.parent_entity().entity_type {
        EntityType::SuperInterfaceTypes => Verdict::of(change, interface),
        EntityType::TypeDeclaration => Verdict::of(change, class),
        _ => Verdict::Pass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessibility_direction() {
        assert_eq!(
            accessibility_change(Visibility::Private, Visibility::Public),
            Some(ChangeType::IncreasingAccessibilityChange)
        );
        assert_eq!(
            accessibility_change(Visibility::Protected, Visibility::Package),
            Some(ChangeType::DecreasingAccessibilityChange)
        );
        assert_eq!(accessibility_change(Visibility::Public, Visibility::Public), None);
    }

    #[test]
    fn test_final_change_depends_on_root() {
        let class = StructureEntityVersion::class("C");
        let field = StructureEntityVersion::field("f");
        assert_eq!(
            final_change(EditKind::Insert, &class),
            Some(ChangeType::RemovingClassDerivability)
        );
        assert_eq!(
            final_change(EditKind::Delete, &field),
            Some(ChangeType::AddingAttributeModifiability)
        );
        assert_eq!(final_change(EditKind::Update, &field), None);
    }

    #[test]
    fn test_member_change() {
        assert_eq!(
            member_change(EditKind::Delete, EntityType::Field),
            Some(ChangeType::RemovedObjectState)
        );
        assert_eq!(member_change(EditKind::Insert, EntityType::MethodDeclaration), None);
    }
}
