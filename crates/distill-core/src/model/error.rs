//! Entity tree error types.

use thiserror::Error;

use super::entity::SourceRange;
use super::tree::NodeId;

/// Errors that can occur while building or annotating an entity tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A node id that does not belong to this tree.
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// A range that does not fit the source text it refers to.
    #[error("Range {range} is outside the source text (length {len})")]
    InvalidRange { range: SourceRange, len: usize },

    /// A range that is not inside the range of its parent node.
    #[error("Range {child} does not fit inside parent range {parent}")]
    Misplaced { child: SourceRange, parent: SourceRange },
}
