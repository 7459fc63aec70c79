//! Change operation error types.

use thiserror::Error;

use super::operation::EditKind;

/// Errors raised while validating edit operations from the differencer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChangeError {
    /// A required entity reference is missing.
    #[error("{kind} operation is missing its {field}")]
    MissingEntity { kind: EditKind, field: &'static str },
}
