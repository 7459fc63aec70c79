//! Comment pre-pass run before association.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::patterns::COMMENTED_CODE_PATTERNS;
use super::{slice, Comment, CommentKind};
use crate::config::CommentConfig;
use crate::model::TreeError;

static CODE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    COMMENTED_CODE_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// Drops commented-out code and merges runs of line comments.
#[derive(Debug, Clone)]
pub struct CommentCleaner {
    merge_line_comments: bool,
    drop_commented_code: bool,
    translator_marker: String,
    extra_patterns: Vec<Regex>,
}

impl Default for CommentCleaner {
    fn default() -> Self {
        Self::new(&CommentConfig::default())
    }
}

impl CommentCleaner {
    pub fn new(config: &CommentConfig) -> Self {
        let extra_patterns = config
            .extra_code_patterns
            .iter()
            .filter_map(|p| match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Ignoring invalid code pattern '{}': {}", p, e);
                    None
                }
            })
            .collect();

        Self {
            merge_line_comments: config.merge_line_comments,
            drop_commented_code: config.drop_commented_code,
            translator_marker: config.translator_marker.clone(),
            extra_patterns,
        }
    }

    /// Clean the comments of one source text.
    ///
    /// The result is ordered by start offset. Fails if a comment range does
    /// not fit `source`.
    pub fn clean(&self, source: &str, mut comments: Vec<Comment>) -> Result<Vec<Comment>, TreeError> {
        for comment in &comments {
            slice(source, comment.range)?;
        }
        comments.sort_by_key(|c| (c.range.start, c.range.end));

        if self.drop_commented_code {
            comments.retain(|c| {
                let code = self.is_commented_code(c);
                if code {
                    debug!(range = %c.range, "Dropping commented-out code");
                }
                !code
            });
        }

        if self.merge_line_comments {
            comments = self.merge(source, comments)?;
        }
        Ok(comments)
    }

    /// True if every line of a non-Javadoc comment looks like a statement.
    pub fn is_commented_code(&self, comment: &Comment) -> bool {
        if comment.is_javadoc() {
            return false;
        }
        let lines = comment.body_lines();
        !lines.is_empty()
            && lines.iter().all(|line| {
                CODE_PATTERNS
                    .iter()
                    .chain(self.extra_patterns.iter())
                    .any(|re| re.is_match(line))
            })
    }

    fn is_mergeable(&self, comment: &Comment) -> bool {
        comment.kind == CommentKind::Line && !comment.text.contains(self.translator_marker.as_str())
    }

    fn merge(&self, source: &str, comments: Vec<Comment>) -> Result<Vec<Comment>, TreeError> {
        let mut merged: Vec<Comment> = Vec::with_capacity(comments.len());
        for comment in comments {
            if let Some(last) = merged.last_mut() {
                let adjacent = last.range.end <= comment.range.start
                    && source
                        .get(last.range.end..comment.range.start)
                        .map_or(false, |gap| gap.chars().all(char::is_whitespace));
                if adjacent && self.is_mergeable(last) && self.is_mergeable(&comment) {
                    let range = last.range.union(&comment.range);
                    debug!(%range, "Merging consecutive line comments");
                    last.text = slice(source, range)?.to_string();
                    last.range = range;
                    continue;
                }
            }
            merged.push(comment);
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceRange;

    fn line_comments(source: &str) -> Vec<Comment> {
        let mut comments = Vec::new();
        let mut offset = 0;
        for line in source.split_inclusive('\n') {
            if let Some(pos) = line.find("//") {
                let end = offset + line.trim_end_matches('\n').len();
                comments.push(Comment::new(
                    CommentKind::Line,
                    SourceRange::new(offset + pos, end),
                    &source[offset + pos..end],
                ));
            }
            offset += line.len();
        }
        comments
    }

    #[test]
    fn test_commented_out_code_is_dropped() {
        let cleaner = CommentCleaner::default();
        let code = [
            "// int x = 5;",
            "// foo.bar(baz);",
            "// return x;",
            "// if (x > 0) {",
            "// } catch (IOException e) {",
            "// }",
        ];
        for text in code {
            let comment = Comment::new(CommentKind::Line, SourceRange::new(0, text.len()), text);
            assert!(cleaner.is_commented_code(&comment), "{}", text);
        }

        let prose = ["// TODO fix this later", "// the value of x", "// see Foo.bar"];
        for text in prose {
            let comment = Comment::new(CommentKind::Line, SourceRange::new(0, text.len()), text);
            assert!(!cleaner.is_commented_code(&comment), "{}", text);
        }
    }

    #[test]
    fn test_javadoc_is_never_code() {
        let cleaner = CommentCleaner::default();
        let doc = Comment::new(CommentKind::Javadoc, SourceRange::new(0, 14), "/** x = 1; */");
        assert!(!cleaner.is_commented_code(&doc));
    }

    #[test]
    fn test_consecutive_line_comments_merge() {
        let source = "a();\n// first\n   // second\nb();\n";
        let cleaned = CommentCleaner::default()
            .clean(source, line_comments(source))
            .unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].text, "// first\n   // second");
        assert_eq!(cleaned[0].range, SourceRange::new(5, 26));
    }

    #[test]
    fn test_translator_marker_prevents_merge() {
        let source = "// label\n// $NON-NLS-1$\n";
        let cleaned = CommentCleaner::default()
            .clean(source, line_comments(source))
            .unwrap();
        assert_eq!(cleaned.len(), 2);
    }

    #[test]
    fn test_block_comments_never_merge() {
        let source = "/* one */\n/* two */";
        let comments = vec![
            Comment::from_source(CommentKind::Block, SourceRange::new(0, 9), source).unwrap(),
            Comment::from_source(CommentKind::Block, SourceRange::new(10, 19), source).unwrap(),
        ];
        let cleaned = CommentCleaner::default().clean(source, comments).unwrap();
        assert_eq!(cleaned.len(), 2);
    }

    #[test]
    fn test_code_between_comments_prevents_merge() {
        let source = "a(); // one\nb(); // two\n";
        let cleaned = CommentCleaner::default()
            .clean(source, line_comments(source))
            .unwrap();
        assert_eq!(cleaned.len(), 2);
    }
}
