//! Comments and their association with code.
//!
//! ## Components
//!
//! - [`Comment`] - a comment as extracted by the tree provider
//! - [`CommentCleaner`] - pre-pass dropping commented-out code and merging
//!   consecutive line comments
//! - [`CommentAssociator`] - inserts comments into an entity tree and links
//!   each to the code it most likely documents

mod associator;
mod cleaner;
pub mod patterns;
mod rating;

use serde::{Deserialize, Serialize};

use crate::model::{EntityType, SourceRange, TreeError};

pub use associator::{Association, CommentAssociator};
pub use cleaner::CommentCleaner;
pub use rating::{word_overlap, ProximityRater};

/// Syntactic kind of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    Line,
    Block,
    Javadoc,
}

impl CommentKind {
    /// Tree label of comment nodes of this kind.
    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::Line => EntityType::LineComment,
            Self::Block => EntityType::BlockComment,
            Self::Javadoc => EntityType::Javadoc,
        }
    }
}

/// A comment of one source version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub range: SourceRange,
    /// Raw text including the comment markers.
    pub text: String,
}

impl Comment {
    pub fn new(kind: CommentKind, range: SourceRange, text: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            text: text.into(),
        }
    }

    /// A comment whose text is sliced out of `source`.
    pub fn from_source(kind: CommentKind, range: SourceRange, source: &str) -> Result<Self, TreeError> {
        let text = slice(source, range)?;
        Ok(Self::new(kind, range, text))
    }

    pub fn is_javadoc(&self) -> bool {
        self.kind == CommentKind::Javadoc || self.text.starts_with("/**")
    }

    /// Comment text without markers, one entry per non-blank line.
    pub fn body_lines(&self) -> Vec<&str> {
        let text = self.text.trim();
        let inner = match self.kind {
            CommentKind::Line => text,
            CommentKind::Block | CommentKind::Javadoc => {
                let text = text.strip_prefix("/*").unwrap_or(text);
                text.strip_suffix("*/").unwrap_or(text)
            }
        };
        inner
            .lines()
            .map(|line| {
                let line = line.trim();
                let line = line.trim_start_matches("//");
                line.trim_start_matches('*').trim()
            })
            .filter(|line| !line.is_empty())
            .collect()
    }
}

/// Text of `range` in `source`.
pub(crate) fn slice(source: &str, range: SourceRange) -> Result<&str, TreeError> {
    source
        .get(range.start..range.end)
        .ok_or(TreeError::InvalidRange { range, len: source.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_lines_strip_markers() {
        let line = Comment::new(CommentKind::Line, SourceRange::new(0, 10), "// a = 1;");
        assert_eq!(line.body_lines(), vec!["a = 1;"]);

        let block = Comment::new(
            CommentKind::Block,
            SourceRange::new(0, 30),
            "/*\n * first\n *\n * second\n */",
        );
        assert_eq!(block.body_lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_from_source_checks_range() {
        let source = "int a; // x";
        let comment = Comment::from_source(CommentKind::Line, SourceRange::new(7, 11), source).unwrap();
        assert_eq!(comment.text, "// x");
        assert!(Comment::from_source(CommentKind::Line, SourceRange::new(7, 40), source).is_err());
    }

    #[test]
    fn test_javadoc_detected_by_marker() {
        let doc = Comment::new(CommentKind::Block, SourceRange::new(0, 8), "/** x */");
        assert!(doc.is_javadoc());
    }
}
