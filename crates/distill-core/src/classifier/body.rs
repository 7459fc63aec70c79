//! Generic rules for statements and comments of a method body.

use super::Verdict;
use crate::change::{ChangeType, SourceCodeChange};
use crate::model::EntityType;

pub(super) fn classify(change: &SourceCodeChange) -> Verdict {
    let changed = change.changed_entity().entity_type;
    let change_type = match change {
        SourceCodeChange::Insert(_) => insert_type(changed),
        SourceCodeChange::Delete(_) => delete_type(changed),
        SourceCodeChange::Move { .. } => move_type(change),
        SourceCodeChange::Update { .. } => {
            if matches!(changed, EntityType::ThenStatement | EntityType::ElseStatement) {
                return Verdict::Discard;
            }
            update_type(changed)
        }
    };
    match change_type {
        Some(change_type) => Verdict::of(change, change_type),
        None => Verdict::Pass,
    }
}

fn insert_type(entity_type: EntityType) -> Option<ChangeType> {
    if entity_type == EntityType::ElseStatement {
        Some(ChangeType::AlternativePartInsert)
    } else if entity_type.is_comment() {
        Some(ChangeType::CommentInsert)
    } else if entity_type.is_statement() {
        Some(ChangeType::StatementInsert)
    } else {
        None
    }
}

fn delete_type(entity_type: EntityType) -> Option<ChangeType> {
    if entity_type == EntityType::ElseStatement {
        Some(ChangeType::AlternativePartDelete)
    } else if entity_type.is_comment() {
        Some(ChangeType::CommentDelete)
    } else if entity_type.is_statement() {
        Some(ChangeType::StatementDelete)
    } else {
        None
    }
}

fn update_type(entity_type: EntityType) -> Option<ChangeType> {
    if entity_type.is_comment() {
        Some(ChangeType::CommentUpdate)
    } else if entity_type.has_condition() {
        Some(ChangeType::ConditionExpressionChange)
    } else if entity_type.is_statement() {
        Some(ChangeType::StatementUpdate)
    } else {
        None
    }
}

fn move_type(change: &SourceCodeChange) -> Option<ChangeType> {
    let changed = change.changed_entity().entity_type;
    let parent = change.parent_entity();
    let new_parent = change.new_parent_entity()?;

    if changed == EntityType::Parameter {
        let between_parameter_lists =
            parent.entity_type == EntityType::Parameters && new_parent.entity_type == EntityType::Parameters;
        return between_parameter_lists.then_some(ChangeType::ParameterOrderingChange);
    }
    if changed.is_comment() {
        return Some(ChangeType::CommentMove);
    }
    if changed.is_statement() {
        // Old and new parent come from different trees.
        return if parent.is_same_construct(new_parent) {
            Some(ChangeType::StatementOrderingChange)
        } else {
            Some(ChangeType::StatementParentChange)
        };
    }
    None
}
