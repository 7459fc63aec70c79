//! Fine-grained source code change distilling.
//!
//! Given the primitive edit script between two versions of a class, method or
//! field, the crate labels every edit with a semantic change type and a
//! significance level, and attaches the comments of a method body to the code
//! they document.

pub mod change;
pub mod classifier;
pub mod comments;
pub mod config;
pub mod distiller;
pub mod history;
pub mod model;

pub use change::{ChangeType, EditKind, SignificanceLevel, SourceCodeChange, TreeEditOperation};
pub use classifier::ChangeClassifier;
pub use comments::{Comment, CommentKind};
pub use config::Config;
pub use distiller::{DistillReport, Distiller};
pub use history::{ClassHistory, EntityHistory};
pub use model::{EntityTree, EntityType, SourceCodeEntity, SourceRange, StructureEntityVersion};
