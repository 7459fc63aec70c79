//! Entity tree model shared by comment association and change classification.
//!
//! ## Components
//!
//! - [`EntityType`] - closed tag set with classification predicates
//! - [`SourceCodeEntity`] - node payload: name, type, modifiers, range
//! - [`EntityTree`] - arena tree with symmetric "associated" links
//! - [`StructureEntityVersion`] - one version of a class, method or field

mod entity;
mod entity_type;
mod error;
mod structure;
mod tree;

pub use entity::{Modifiers, SourceCodeEntity, SourceRange, Visibility};
pub use entity_type::EntityType;
pub use error::TreeError;
pub use structure::StructureEntityVersion;
pub use tree::{EntityTree, Node, NodeId};
