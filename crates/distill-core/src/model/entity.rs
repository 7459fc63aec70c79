//! Source code entities: the payload of a single tree node.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::entity_type::EntityType;

/// Half-open byte range `[start, end)` into the source text of one version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: usize,
    pub end: usize,
}

impl SourceRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `other` lies completely inside this range.
    pub fn contains(&self, other: &SourceRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest range covering both.
    pub fn union(&self, other: &SourceRange) -> SourceRange {
        SourceRange::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

bitflags! {
    /// Java modifier set of a declaration.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const FINAL = 1 << 4;
        const ABSTRACT = 1 << 5;
        const NATIVE = 1 << 6;
        const SYNCHRONIZED = 1 << 7;
        const TRANSIENT = 1 << 8;
        const VOLATILE = 1 << 9;
        const STRICTFP = 1 << 10;
    }
}

impl Modifiers {
    /// Modifier flag for a Java keyword, if it is one.
    pub fn from_keyword(keyword: &str) -> Option<Modifiers> {
        let flag = match keyword {
            "public" => Self::PUBLIC,
            "protected" => Self::PROTECTED,
            "private" => Self::PRIVATE,
            "static" => Self::STATIC,
            "final" => Self::FINAL,
            "abstract" => Self::ABSTRACT,
            "native" => Self::NATIVE,
            "synchronized" => Self::SYNCHRONIZED,
            "transient" => Self::TRANSIENT,
            "volatile" => Self::VOLATILE,
            "strictfp" => Self::STRICTFP,
            _ => return None,
        };
        Some(flag)
    }

    /// Visibility implied by the set; no visibility flag means package access.
    pub fn visibility(&self) -> Visibility {
        if self.contains(Self::PUBLIC) {
            Visibility::Public
        } else if self.contains(Self::PROTECTED) {
            Visibility::Protected
        } else if self.contains(Self::PRIVATE) {
            Visibility::Private
        } else {
            Visibility::Package
        }
    }
}

/// Java accessibility, ordered from most restrictive to most open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Package,
    Protected,
    Public,
}

impl Visibility {
    /// Visibility named by a modifier keyword. Package access has no keyword.
    pub fn from_keyword(keyword: &str) -> Option<Visibility> {
        match keyword {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    /// Public and protected members are part of the API seen by other packages.
    pub fn is_exposed(&self) -> bool {
        matches!(self, Self::Public | Self::Protected)
    }
}

/// Payload of one entity tree node, and the subject of every edit operation.
///
/// Equality and hashing use the unique name, type, modifiers and source range.
/// Associated entities are a weak, symmetric relation and take no part in
/// identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceCodeEntity {
    /// Human-readable name, also used as the diff key.
    pub unique_name: String,

    pub entity_type: EntityType,

    #[serde(default)]
    pub modifiers: Modifiers,

    #[serde(default)]
    pub range: SourceRange,

    /// Entities linked to this one, e.g. the comment documenting a statement.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associated_entities: Vec<SourceCodeEntity>,
}

impl SourceCodeEntity {
    pub fn new(unique_name: impl Into<String>, entity_type: EntityType, range: SourceRange) -> Self {
        Self {
            unique_name: unique_name.into(),
            entity_type,
            modifiers: Modifiers::empty(),
            range,
            associated_entities: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Same construct regardless of where it sits in the source.
    ///
    /// Old and new trees lay out the same element at different offsets, so
    /// comparisons across versions ignore the range.
    pub fn is_same_construct(&self, other: &SourceCodeEntity) -> bool {
        self.entity_type == other.entity_type && self.unique_name == other.unique_name
    }

    /// Visibility named by this entity if it is a visibility `MODIFIER`.
    pub fn visibility_keyword(&self) -> Option<Visibility> {
        if self.entity_type == EntityType::Modifier {
            Visibility::from_keyword(&self.unique_name)
        } else {
            None
        }
    }

    pub fn is_final_modifier(&self) -> bool {
        self.entity_type == EntityType::Modifier && self.unique_name == "final"
    }
}

impl PartialEq for SourceCodeEntity {
    fn eq(&self, other: &Self) -> bool {
        self.unique_name == other.unique_name
            && self.entity_type == other.entity_type
            && self.modifiers == other.modifiers
            && self.range == other.range
    }
}

impl Eq for SourceCodeEntity {}

impl Hash for SourceCodeEntity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unique_name.hash(state);
        self.entity_type.hash(state);
        self.modifiers.hash(state);
        self.range.hash(state);
    }
}

impl fmt::Display for SourceCodeEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entity_type, self.unique_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_order() {
        assert!(Visibility::Private < Visibility::Package);
        assert!(Visibility::Package < Visibility::Protected);
        assert!(Visibility::Protected < Visibility::Public);
    }

    #[test]
    fn test_modifiers_visibility() {
        assert_eq!((Modifiers::PUBLIC | Modifiers::FINAL).visibility(), Visibility::Public);
        assert_eq!(Modifiers::STATIC.visibility(), Visibility::Package);
        assert_eq!(Modifiers::from_keyword("volatile"), Some(Modifiers::VOLATILE));
        assert_eq!(Modifiers::from_keyword("@Override"), None);
    }

    #[test]
    fn test_associated_entities_do_not_affect_identity() {
        let range = SourceRange::new(10, 20);
        let a = SourceCodeEntity::new("a = 1;", EntityType::Assignment, range);
        let mut b = a.clone();
        b.associated_entities.push(SourceCodeEntity::new(
            "// x",
            EntityType::LineComment,
            SourceRange::new(0, 4),
        ));
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_construct_ignores_range() {
        let a = SourceCodeEntity::new("foo()", EntityType::MethodInvocation, SourceRange::new(1, 6));
        let b = SourceCodeEntity::new("foo()", EntityType::MethodInvocation, SourceRange::new(40, 45));
        assert_ne!(a, b);
        assert!(a.is_same_construct(&b));
    }
}
