//! Change operation model.
//!
//! The differencer hands over [`TreeEditOperation`]s; the classifier turns
//! the well-formed ones into [`SourceCodeChange`]s, a sum type over the four
//! primitive edit kinds carrying a [`ChangeType`] and a memoized
//! [`SignificanceLevel`].

mod change_type;
mod error;
mod operation;

pub use change_type::{ChangeType, SignificanceLevel};
pub use error::ChangeError;
pub use operation::{ChangeHeader, EditKind, SourceCodeChange, TreeEditOperation};
