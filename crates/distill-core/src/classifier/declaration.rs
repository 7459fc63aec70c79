//! Rules for changes to declaration parts: modifiers, Javadoc, method
//! signatures, field types and supertypes.
//!
//! These are the rules that pair an Insert with a pending Delete (or drop it
//! in favour of a pending Move) so that one logical edit yields one change.

use tracing::{debug, trace};

use super::worklist::Lookup;
use super::{accessibility_change, final_change, Session, Verdict};
use crate::change::{ChangeType, EditKind, SourceCodeChange};
use crate::model::{EntityType, SourceCodeEntity, Visibility};

impl Session<'_> {
    pub(super) fn insert_modifier(&mut self, change: &SourceCodeChange) -> Verdict {
        let changed = change.changed_entity();
        if changed.is_final_modifier() {
            return match final_change(EditKind::Insert, change.root_entity()) {
                Some(change_type) => Verdict::of(change, change_type),
                None => Verdict::Pass,
            };
        }
        let Some(new) = changed.visibility_keyword() else {
            return Verdict::Discard;
        };

        let lookup = Lookup::new()
            .root(change.root_entity())
            .parent(change.parent_entity());
        let partner = self
            .deletes
            .find(&lookup, |d| d.changed_entity().visibility_keyword().is_some());
        if let Some(deleted) = partner.and_then(|idx| self.deletes.consume(idx)) {
            let old = deleted
                .changed_entity()
                .visibility_keyword()
                .unwrap_or(Visibility::Package);
            debug!(old_modifier = %deleted.changed_entity(), new_modifier = %changed, "Paired visibility modifiers");
            return match accessibility_change(old, new) {
                Some(change_type) => Self::merged(change_type, &deleted, change),
                None => Verdict::Discard,
            };
        }

        Verdict::of_opt(change, accessibility_change(Visibility::Package, new))
    }

    pub(super) fn insert_javadoc(&mut self, change: &SourceCodeChange) -> Verdict {
        let lookup = Lookup::new().root(change.root_entity());
        let partner = self
            .deletes
            .find(&lookup, |d| d.changed_entity().entity_type == EntityType::Javadoc);
        match partner.and_then(|idx| self.deletes.consume(idx)) {
            Some(deleted) => Self::merged(ChangeType::DocUpdate, &deleted, change),
            None => Verdict::of(change, ChangeType::DocInsert),
        }
    }

    pub(super) fn insert_in_method(&mut self, change: &SourceCodeChange) -> Verdict {
        let changed = change.changed_entity().entity_type;
        match change.parent_entity().entity_type {
            EntityType::Parameters if changed == EntityType::Parameter => self.insert_parameter(change),
            EntityType::Parameter if changed.is_type() => self.insert_parameter_type(change),
            EntityType::MethodDeclaration if changed.is_type() => self.insert_return_type(change),
            _ => Verdict::Pass,
        }
    }

    fn insert_parameter(&mut self, change: &SourceCodeChange) -> Verdict {
        let root = change.root_entity().as_ref();
        let parameter = change.changed_entity();

        // Same name deleted: the declaration was replaced, so the type changed.
        let same_name = Lookup::new().root(root).changed(parameter);
        if let Some(deleted) = self
            .deletes
            .find(&same_name, |_| true)
            .and_then(|idx| self.deletes.consume(idx))
        {
            return Self::merged(ChangeType::ParameterTypeChange, &deleted, change);
        }

        // Kept but reordered: the Move yields the ordering change.
        if self.moves.find(&same_name, |_| true).is_some() {
            trace!(parameter = %parameter, "Parameter insert shadowed by a move");
            return Verdict::Discard;
        }

        if let Some(verdict) = self.renamed_parameter(change) {
            return verdict;
        }
        Verdict::of(change, ChangeType::ParameterInsert)
    }

    /// Pair an inserted parameter with a deleted one of the same declared type.
    fn renamed_parameter(&mut self, change: &SourceCodeChange) -> Option<Verdict> {
        let root = change.root_entity().as_ref();
        let parameter = change.changed_entity();

        let new_type_idx = self.inserts.find_any(&Lookup::new().root(root).parent(parameter), |c| {
            c.changed_entity().entity_type.is_type()
        })?;
        let new_type = self.inserts.get(new_type_idx)?.clone();
        let type_name = new_type.changed_entity().unique_name.as_str();

        let deletes = &self.deletes;
        let old_type_under = |old_parameter: &SourceCodeEntity| {
            deletes.find(&Lookup::new().root(root).parent(old_parameter), |t| {
                t.changed_entity().entity_type.is_type() && t.changed_entity().unique_name == type_name
            })
        };
        let candidate = deletes.find(&Lookup::new().root(root), |d| {
            d.changed_entity().entity_type == EntityType::Parameter
                && old_type_under(d.changed_entity()).is_some()
        })?;
        let old_type_idx = deletes
            .get(candidate)
            .and_then(|d| old_type_under(d.changed_entity()))?;

        let deleted = self.deletes.consume(candidate)?;
        self.deletes.consume(old_type_idx);
        self.inserts.remove(&new_type);
        debug!(
            old = %deleted.changed_entity().unique_name,
            new = %parameter.unique_name,
            "Paired renamed parameter"
        );
        Some(Self::merged(ChangeType::ParameterRenaming, &deleted, change))
    }

    fn insert_parameter_type(&mut self, change: &SourceCodeChange) -> Verdict {
        let root = change.root_entity().as_ref();
        let parameter = change.parent_entity();

        let parameter_inserted = Lookup::new().root(root).changed(parameter);
        if self
            .inserts
            .find_any(&parameter_inserted, |c| c.parent_entity().entity_type == EntityType::Parameters)
            .is_some()
        {
            return Verdict::Discard;
        }

        let old_type = Lookup::new().root(root).parent(parameter);
        match self
            .deletes
            .find(&old_type, |d| d.changed_entity().entity_type.is_type())
            .and_then(|idx| self.deletes.consume(idx))
        {
            Some(deleted) => Self::merged(ChangeType::ParameterTypeChange, &deleted, change),
            None => Verdict::of(change, ChangeType::ParameterTypeChange),
        }
    }

    fn insert_return_type(&mut self, change: &SourceCodeChange) -> Verdict {
        let config = self.config;
        let lookup = Lookup::new()
            .root(change.root_entity())
            .parent(change.parent_entity());
        let partner = self.deletes.find(&lookup, |d| {
            d.changed_entity().entity_type.is_type() && !config.is_void(&d.changed_entity().unique_name)
        });
        let deleted = partner.and_then(|idx| self.deletes.consume(idx));

        // A new `void` means the old return type went away.
        if config.is_void(&change.changed_entity().unique_name) {
            return match deleted {
                Some(deleted) => Verdict::of(&deleted, ChangeType::ReturnTypeDelete),
                None => Verdict::of(change, ChangeType::ReturnTypeDelete),
            };
        }
        match deleted {
            Some(deleted) => Self::merged(ChangeType::ReturnTypeChange, &deleted, change),
            None => Verdict::of(change, ChangeType::ReturnTypeInsert),
        }
    }

    pub(super) fn insert_in_field(&mut self, change: &SourceCodeChange) -> Verdict {
        let is_field_type = change.changed_entity().entity_type.is_type()
            && change.parent_entity().entity_type == EntityType::FieldDeclaration;
        if !is_field_type {
            return Verdict::Pass;
        }

        let lookup = Lookup::new()
            .root(change.root_entity())
            .parent(change.parent_entity());
        match self
            .deletes
            .find(&lookup, |d| d.changed_entity().entity_type.is_type())
            .and_then(|idx| self.deletes.consume(idx))
        {
            Some(deleted) => Self::merged(ChangeType::AttributeTypeChange, &deleted, change),
            None => Verdict::Pass,
        }
    }

    pub(super) fn insert_in_class(&mut self, change: &SourceCodeChange) -> Verdict {
        if !change.changed_entity().entity_type.is_type() {
            return Verdict::Pass;
        }
        match change.parent_entity().entity_type {
            EntityType::SuperInterfaceTypes => Verdict::of(change, ChangeType::ParentInterfaceInsert),
            EntityType::TypeDeclaration => {
                let lookup = Lookup::new()
                    .root(change.root_entity())
                    .parent(change.parent_entity());
                match self
                    .deletes
                    .find(&lookup, |d| d.changed_entity().entity_type.is_type())
                    .and_then(|idx| self.deletes.consume(idx))
                {
                    Some(deleted) => Self::merged(ChangeType::ParentClassChange, &deleted, change),
                    None => Verdict::of(change, ChangeType::ParentClassInsert),
                }
            }
            _ => Verdict::Pass,
        }
    }

    pub(super) fn delete_in_method(&mut self, change: &SourceCodeChange) -> Verdict {
        let changed = change.changed_entity().entity_type;
        match change.parent_entity().entity_type {
            EntityType::Parameters if changed == EntityType::Parameter => {
                Verdict::of(change, ChangeType::ParameterDelete)
            }
            EntityType::Parameter if changed.is_type() => {
                let parameter_deleted = Lookup::new()
                    .root(change.root_entity())
                    .changed(change.parent_entity());
                let removed_with_parameter = self
                    .deletes
                    .find_any(&parameter_deleted, |d| d.parent_entity().entity_type == EntityType::Parameters)
                    .is_some();
                if removed_with_parameter {
                    Verdict::Discard
                } else {
                    Verdict::of(change, ChangeType::ParameterTypeChange)
                }
            }
            // A deleted `void` is covered by the insert of the new return type.
            EntityType::MethodDeclaration if changed.is_type() => {
                if self.config.is_void(&change.changed_entity().unique_name) {
                    Verdict::Discard
                } else {
                    Verdict::of(change, ChangeType::ReturnTypeDelete)
                }
            }
            _ => Verdict::Pass,
        }
    }

    pub(super) fn update_in_method(&self, change: &SourceCodeChange, new_entity: &SourceCodeEntity) -> Verdict {
        let changed = change.changed_entity();
        match change.parent_entity().entity_type {
            EntityType::Parameters if changed.entity_type == EntityType::Parameter => {
                Verdict::of(change, ChangeType::ParameterRenaming)
            }
            EntityType::Parameter if changed.entity_type.is_type() => {
                Verdict::of(change, ChangeType::ParameterTypeChange)
            }
            EntityType::MethodDeclaration if changed.entity_type.is_type() => {
                let was_void = self.config.is_void(&changed.unique_name);
                let is_void = self.config.is_void(&new_entity.unique_name);
                let change_type = match (was_void, is_void) {
                    (true, false) => ChangeType::ReturnTypeInsert,
                    (false, true) => ChangeType::ReturnTypeDelete,
                    (false, false) => ChangeType::ReturnTypeChange,
                    (true, true) => return Verdict::Discard,
                };
                Verdict::of(change, change_type)
            }
            _ => Verdict::Pass,
        }
    }
}
