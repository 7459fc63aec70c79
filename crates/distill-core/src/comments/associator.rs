//! Comment-to-code association.
//!
//! Code nodes are walked in source order with an explicit stack. Before a
//! node is entered, every queued comment that ends before it is inserted into
//! the tree and recorded as a pending decision between the closest visited
//! node ending before the comment and the node about to be entered. Pending
//! decisions are kept per depth and resolved when their succeeding node is
//! left.

use std::collections::VecDeque;
use std::mem;
use tracing::{debug, trace};

use super::rating::{word_overlap, ProximityRater};
use super::{slice, Comment};
use crate::config::AssociationConfig;
use crate::model::{EntityTree, EntityType, NodeId, SourceRange, TreeError};

/// Where one comment ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Association {
    /// The comment node inserted into the tree.
    pub comment: NodeId,
    /// The code node it documents, if any.
    pub code: Option<NodeId>,
}

/// Proximity rating and shared words of one candidate.
type Score = (u32, usize);

#[derive(Debug)]
struct Pending {
    preceding: Option<NodeId>,
    comment: NodeId,
    succeeding: Option<NodeId>,
}

enum Step {
    Enter(NodeId, usize),
    Exit(NodeId, usize),
}

/// Explicit state of one traversal.
#[derive(Default)]
struct Context {
    queue: VecDeque<Comment>,
    /// Left code nodes with their end offsets, in exit order.
    visited: Vec<(usize, NodeId)>,
    pending: Vec<Vec<Pending>>,
    associations: Vec<Association>,
}

impl Context {
    fn defer(&mut self, depth: usize, pending: Pending) {
        if self.pending.len() <= depth {
            self.pending.resize_with(depth + 1, Vec::new);
        }
        self.pending[depth].push(pending);
    }

    fn take(&mut self, depth: usize) -> Vec<Pending> {
        self.pending.get_mut(depth).map(mem::take).unwrap_or_default()
    }

    /// The visited node ending closest before `range`. On equal ends the
    /// node left last, the enclosing one, wins.
    fn preceding(&self, range: &SourceRange) -> Option<NodeId> {
        self.visited
            .iter()
            .filter(|(end, _)| *end <= range.start)
            .max_by_key(|(end, _)| *end)
            .map(|(_, id)| *id)
    }
}

/// Inserts comments into an entity tree and links them to code.
#[derive(Debug, Clone, Copy)]
pub struct CommentAssociator<'a> {
    source: &'a str,
    config: &'a AssociationConfig,
}

impl<'a> CommentAssociator<'a> {
    pub fn new(source: &'a str, config: &'a AssociationConfig) -> Self {
        Self { source, config }
    }

    /// Insert `comments` into `tree` and associate each with at most one code
    /// node.
    ///
    /// Comments outside the range of the tree root are ignored. The tree's
    /// code nodes must carry ranges into `source`.
    pub fn associate(&self, tree: &mut EntityTree, mut comments: Vec<Comment>) -> Result<Vec<Association>, TreeError> {
        let root = tree.root();
        let root_range = tree.get(root)?.range;
        slice(self.source, root_range)?;

        comments.sort_by_key(|c| (c.range.start, c.range.end));
        let mut ctx = Context::default();
        for comment in comments {
            slice(self.source, comment.range)?;
            if root_range.contains(&comment.range) {
                ctx.queue.push_back(comment);
            } else {
                trace!(range = %comment.range, "Comment outside of tree");
            }
        }

        let mut stack = vec![Step::Enter(root, 0)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(id, depth) => {
                    let start = tree.get(id)?.range.start;
                    while ctx.queue.front().map_or(false, |c| c.range.end <= start) {
                        let Some(comment) = ctx.queue.pop_front() else { break };
                        let preceding = ctx.preceding(&comment.range);
                        let comment = self.insert(tree, &comment)?;
                        ctx.defer(depth, Pending { preceding, comment, succeeding: Some(id) });
                    }

                    stack.push(Step::Exit(id, depth));
                    let node = tree.get(id)?;
                    for child in node.children().iter().rev() {
                        let label = tree.get(*child)?.label;
                        if !label.is_comment() && label != EntityType::Javadoc {
                            stack.push(Step::Enter(*child, depth + 1));
                        }
                    }
                }
                Step::Exit(id, depth) => {
                    if id != root {
                        let end = tree.get(id)?.range.end;
                        ctx.visited.push((end, id));
                    }
                    for pending in ctx.take(depth) {
                        let association = self.resolve(tree, pending)?;
                        ctx.associations.push(association);
                    }
                }
            }
        }

        while let Some(comment) = ctx.queue.pop_front() {
            let preceding = ctx.preceding(&comment.range);
            let comment = self.insert(tree, &comment)?;
            let pending = Pending { preceding, comment, succeeding: None };
            let association = self.resolve(tree, pending)?;
            ctx.associations.push(association);
        }

        Ok(ctx.associations)
    }

    fn insert(&self, tree: &mut EntityTree, comment: &Comment) -> Result<NodeId, TreeError> {
        let parent = tree.deepest_enclosing(&comment.range).unwrap_or_else(|| tree.root());
        tree.insert_child_in_order(parent, comment.kind.entity_type(), comment.text.clone(), comment.range)
    }

    fn resolve(&self, tree: &mut EntityTree, pending: Pending) -> Result<Association, TreeError> {
        let comment = tree.get(pending.comment)?;
        let comment_range = comment.range;
        let comment_text = comment.value.clone();
        let rater = ProximityRater::new(self.source, self.config);

        let score = |id: NodeId, first: SourceRange, second: SourceRange| -> Result<(NodeId, Score), TreeError> {
            let node = tree.get(id)?;
            let overlap = word_overlap(&comment_text, &node.value, node.label.is_declaration());
            Ok((id, (rater.rating(first, second), overlap)))
        };
        let preceding = match pending.preceding {
            Some(id) => Some(score(id, tree.get(id)?.range, comment_range)?),
            None => None,
        };
        let succeeding = match pending.succeeding {
            Some(id) => Some(score(id, comment_range, tree.get(id)?.range)?),
            None => None,
        };

        let code = choose(preceding, succeeding, self.config.prefer_succeeding);
        match code {
            Some(code) => {
                tree.associate(pending.comment, code)?;
                debug!(comment = %comment_range, code = %code, "Associated comment");
            }
            None => trace!(comment = %comment_range, "Comment left unassociated"),
        }
        Ok(Association { comment: pending.comment, code })
    }
}

/// Pick the better candidate by rating, then shared words, then position.
///
/// A candidate with neither proximity nor shared words is never chosen.
fn choose(
    preceding: Option<(NodeId, Score)>,
    succeeding: Option<(NodeId, Score)>,
    prefer_succeeding: bool,
) -> Option<NodeId> {
    let winner = match (preceding, succeeding) {
        (None, None) => return None,
        (Some(only), None) | (None, Some(only)) => only,
        (Some(before), Some(after)) => {
            if before.1 > after.1 || (before.1 == after.1 && !prefer_succeeding) {
                before
            } else {
                after
            }
        }
    };
    (winner.1 != (0, 0)).then_some(winner.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::CommentKind;

    #[test]
    fn test_choose() {
        let mut tree = EntityTree::new(EntityType::Method, "m()", SourceRange::new(0, 10));
        let a = tree.root();
        let b = tree
            .add_child(a, EntityType::Assignment, "b", SourceRange::new(1, 2))
            .unwrap();

        assert_eq!(choose(Some((a, (2, 0))), Some((b, (4, 0))), true), Some(b));
        assert_eq!(choose(Some((a, (4, 0))), Some((b, (2, 3))), true), Some(a));
        assert_eq!(choose(Some((a, (2, 1))), Some((b, (2, 0))), true), Some(a));
        assert_eq!(choose(Some((a, (2, 1))), Some((b, (2, 1))), true), Some(b));
        assert_eq!(choose(Some((a, (2, 1))), Some((b, (2, 1))), false), Some(a));
        assert_eq!(choose(Some((a, (0, 0))), None, true), None);
        assert_eq!(choose(Some((a, (0, 0))), Some((b, (0, 0))), true), None);
    }

    #[test]
    fn test_trailing_comment_goes_to_statement_on_same_line() {
        let source = "{\n  a = 1; // set a\n\n  b = 2;\n}";
        let mut tree = EntityTree::new(EntityType::Method, "m()", SourceRange::new(0, source.len()));
        let root = tree.root();
        let a = tree
            .add_child(root, EntityType::Assignment, "a = 1;", SourceRange::new(4, 10))
            .unwrap();
        tree.add_child(root, EntityType::Assignment, "b = 2;", SourceRange::new(23, 29))
            .unwrap();

        let comment = Comment::from_source(CommentKind::Line, SourceRange::new(11, 19), source).unwrap();
        let config = AssociationConfig::default();
        let associations = CommentAssociator::new(source, &config)
            .associate(&mut tree, vec![comment])
            .unwrap();

        assert_eq!(associations.len(), 1);
        assert_eq!(associations[0].code, Some(a));
        assert_eq!(tree.get(a).unwrap().associated(), &[associations[0].comment]);
    }
}
