//! Change type taxonomy and significance levels.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Ordinal importance of a classified change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignificanceLevel {
    None,
    Low,
    Medium,
    High,
    Crucial,
}

impl SignificanceLevel {
    /// Numeric weight used when summing significance over a version.
    pub fn value(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Crucial => 4,
        }
    }
}

impl fmt::Display for SignificanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Crucial => write!(f, "CRUCIAL"),
        }
    }
}

/// Semantic label assigned to an edit operation by the classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    // === Declaration: modifiers ===
    AddingAttributeModifiability,
    AddingClassDerivability,
    AddingMethodOverridability,
    RemovingAttributeModifiability,
    RemovingClassDerivability,
    RemovingMethodOverridability,
    DecreasingAccessibilityChange,
    IncreasingAccessibilityChange,

    // === Declaration: members ===
    AdditionalClass,
    AdditionalFunctionality,
    AdditionalObjectState,
    RemovedClass,
    RemovedFunctionality,
    RemovedObjectState,

    // === Declaration: renames and types ===
    AttributeRenaming,
    AttributeTypeChange,
    ClassRenaming,
    MethodRenaming,

    // === Declaration: signature ===
    ParameterDelete,
    ParameterInsert,
    ParameterOrderingChange,
    ParameterRenaming,
    ParameterTypeChange,
    ReturnTypeChange,
    ReturnTypeDelete,
    ReturnTypeInsert,

    // === Declaration: supertypes ===
    ParentClassChange,
    ParentClassDelete,
    ParentClassInsert,
    ParentInterfaceChange,
    ParentInterfaceDelete,
    ParentInterfaceInsert,

    // === Documentation ===
    CommentDelete,
    CommentInsert,
    CommentMove,
    CommentUpdate,
    DocDelete,
    DocInsert,
    DocUpdate,

    // === Body ===
    AlternativePartDelete,
    AlternativePartInsert,
    ConditionExpressionChange,
    StatementDelete,
    StatementInsert,
    StatementOrderingChange,
    StatementParentChange,
    StatementUpdate,

    #[default]
    #[serde(rename = "UNCLASSIFIED_CHANGE")]
    Unclassified,
}

static SIGNIFICANCE: Lazy<HashMap<ChangeType, SignificanceLevel>> = Lazy::new(|| {
    use ChangeType::*;
    use SignificanceLevel as S;

    HashMap::from([
        (AddingAttributeModifiability, S::Medium),
        (AddingClassDerivability, S::Medium),
        (AddingMethodOverridability, S::Medium),
        (RemovingAttributeModifiability, S::Crucial),
        (RemovingClassDerivability, S::Crucial),
        (RemovingMethodOverridability, S::Crucial),
        (DecreasingAccessibilityChange, S::Crucial),
        (IncreasingAccessibilityChange, S::Medium),
        (AdditionalClass, S::Low),
        (AdditionalFunctionality, S::Low),
        (AdditionalObjectState, S::Low),
        (RemovedClass, S::Crucial),
        (RemovedFunctionality, S::Crucial),
        (RemovedObjectState, S::Crucial),
        (AttributeRenaming, S::High),
        (AttributeTypeChange, S::High),
        (ClassRenaming, S::High),
        (MethodRenaming, S::High),
        (ParameterDelete, S::Crucial),
        (ParameterInsert, S::Crucial),
        (ParameterOrderingChange, S::Crucial),
        (ParameterRenaming, S::Medium),
        (ParameterTypeChange, S::Crucial),
        (ReturnTypeChange, S::Crucial),
        (ReturnTypeDelete, S::Crucial),
        (ReturnTypeInsert, S::Crucial),
        (ParentClassChange, S::Crucial),
        (ParentClassDelete, S::Crucial),
        (ParentClassInsert, S::Crucial),
        (ParentInterfaceChange, S::Crucial),
        (ParentInterfaceDelete, S::Crucial),
        (ParentInterfaceInsert, S::Crucial),
        (CommentDelete, S::None),
        (CommentInsert, S::None),
        (CommentMove, S::None),
        (CommentUpdate, S::None),
        (DocDelete, S::None),
        (DocInsert, S::None),
        (DocUpdate, S::None),
        (AlternativePartDelete, S::Medium),
        (AlternativePartInsert, S::Medium),
        (ConditionExpressionChange, S::Medium),
        (StatementDelete, S::Medium),
        (StatementInsert, S::Low),
        (StatementOrderingChange, S::Low),
        (StatementParentChange, S::Medium),
        (StatementUpdate, S::Low),
        (Unclassified, S::None),
    ])
});

impl ChangeType {
    /// Significance from the static table.
    pub fn static_significance(&self) -> SignificanceLevel {
        SIGNIFICANCE.get(self).copied().unwrap_or(SignificanceLevel::None)
    }

    /// Types whose significance depends on the visibility of the affected
    /// entity and is recomputed per change.
    pub fn has_unstable_significance(&self) -> bool {
        matches!(
            self,
            Self::DecreasingAccessibilityChange
                | Self::IncreasingAccessibilityChange
                | Self::RemovedClass
                | Self::RemovedFunctionality
                | Self::RemovedObjectState
        )
    }

    /// True for changes inside a method body rather than in a declaration.
    pub fn is_body_change(&self) -> bool {
        matches!(
            self,
            Self::AlternativePartDelete
                | Self::AlternativePartInsert
                | Self::ConditionExpressionChange
                | Self::StatementDelete
                | Self::StatementInsert
                | Self::StatementOrderingChange
                | Self::StatementParentChange
                | Self::StatementUpdate
                | Self::CommentDelete
                | Self::CommentInsert
                | Self::CommentMove
                | Self::CommentUpdate
        )
    }

    pub fn is_classified(&self) -> bool {
        *self != Self::Unclassified
    }

    /// All classified change types, in declaration order.
    pub fn all() -> impl Iterator<Item = ChangeType> {
        let mut types: Vec<ChangeType> = SIGNIFICANCE.keys().copied().filter(ChangeType::is_classified).collect();
        types.sort();
        types.into_iter()
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        f.write_str(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_a_static_level() {
        assert_eq!(ChangeType::all().count(), SIGNIFICANCE.len() - 1);
        assert!(ChangeType::all().all(|t| SIGNIFICANCE.contains_key(&t)));
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(SignificanceLevel::Crucial > SignificanceLevel::High);
        assert!(SignificanceLevel::Low > SignificanceLevel::None);
        assert!(SignificanceLevel::Crucial.value() > SignificanceLevel::Low.value());
    }

    #[test]
    fn test_display_uses_taxonomy_names() {
        assert_eq!(ChangeType::ReturnTypeChange.to_string(), "RETURN_TYPE_CHANGE");
        assert_eq!(ChangeType::Unclassified.to_string(), "UNCLASSIFIED_CHANGE");
    }
}
