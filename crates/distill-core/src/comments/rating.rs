//! Proximity and word-overlap scoring between a comment and code.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::patterns::{JAVADOC_PATTERN, WORD_SEPARATORS};
use crate::config::AssociationConfig;
use crate::model::SourceRange;

static JAVADOC: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(JAVADOC_PATTERN).ok());

/// Scores how closely a comment sits to a piece of code.
#[derive(Debug, Clone, Copy)]
pub struct ProximityRater<'a> {
    source: &'a str,
    config: &'a AssociationConfig,
}

impl<'a> ProximityRater<'a> {
    pub fn new(source: &'a str, config: &'a AssociationConfig) -> Self {
        Self { source, config }
    }

    /// Rating of `first` followed by `second`.
    ///
    /// Only whitespace in between: the adjacent rating without a line break,
    /// the line-break rating with exactly one. Anything else rates 0.
    pub fn rating(&self, first: SourceRange, second: SourceRange) -> u32 {
        if first.end > second.start {
            return 0;
        }
        let Some(gap) = self.source.get(first.end..second.start) else {
            return 0;
        };
        if !gap.chars().all(char::is_whitespace) {
            return 0;
        }
        match gap.matches('\n').count() {
            0 => self.config.adjacent_rating,
            1 => self.config.line_break_rating,
            _ => 0,
        }
    }
}

/// Number of distinct words shared by a comment and a code fragment.
///
/// Declarations carry their own Javadoc in their text; it is removed first
/// when `strip_javadoc` is set so the comment is not matched against it.
pub fn word_overlap(comment: &str, code: &str, strip_javadoc: bool) -> usize {
    let code = match (strip_javadoc, JAVADOC.as_ref()) {
        (true, Some(re)) => re.replace_all(code, " ").into_owned(),
        _ => code.to_string(),
    };
    let comment_words = words(comment);
    words(&code).intersection(&comment_words).count()
}

fn words(text: &str) -> HashSet<String> {
    text.split(WORD_SEPARATORS)
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}
