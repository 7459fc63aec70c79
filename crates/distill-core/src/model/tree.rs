//! Arena-backed entity tree.
//!
//! Nodes are addressed by [`NodeId`] handles. Besides the parent/child edges
//! every node keeps a list of associated nodes: a symmetric, non-owning
//! relation used to attach comments to the code they document.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{Modifiers, SourceCodeEntity, SourceRange};
use super::entity_type::EntityType;
use super::error::TreeError;

/// Handle of a node inside one [`EntityTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A labeled, valued tree node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub label: EntityType,
    pub value: String,
    pub range: SourceRange,
    #[serde(default)]
    pub modifiers: Modifiers,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    associated: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn associated(&self) -> &[NodeId] {
        &self.associated
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Entity payload of this node without its associations.
    pub fn to_entity(&self) -> SourceCodeEntity {
        SourceCodeEntity::new(self.value.clone(), self.label, self.range).with_modifiers(self.modifiers)
    }
}

/// Tree of one version of a class, method or field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTree {
    nodes: Vec<Node>,
}

impl EntityTree {
    /// Create a tree holding only its root.
    pub fn new(label: EntityType, value: impl Into<String>, range: SourceRange) -> Self {
        Self {
            nodes: vec![Node {
                label,
                value: value.into(),
                range,
                modifiers: Modifiers::empty(),
                parent: None,
                children: Vec::new(),
                associated: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(id.0).ok_or(TreeError::UnknownNode(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(id.0).ok_or(TreeError::UnknownNode(id))
    }

    /// Append a child as the last child of `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        label: EntityType,
        value: impl Into<String>,
        range: SourceRange,
    ) -> Result<NodeId, TreeError> {
        let index = self.get(parent)?.children.len();
        self.insert_child(parent, index, label, value, range)
    }

    /// Insert a child at `index` among the children of `parent`.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        label: EntityType,
        value: impl Into<String>,
        range: SourceRange,
    ) -> Result<NodeId, TreeError> {
        let parent_range = self.get(parent)?.range;
        if !parent_range.contains(&range) {
            return Err(TreeError::Misplaced { child: range, parent: parent_range });
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            label,
            value: value.into(),
            range,
            modifiers: Modifiers::empty(),
            parent: Some(parent),
            children: Vec::new(),
            associated: Vec::new(),
        });

        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, id);
        Ok(id)
    }

    /// Insert a child at the position its start offset occupies among the
    /// existing children.
    pub fn insert_child_in_order(
        &mut self,
        parent: NodeId,
        label: EntityType,
        value: impl Into<String>,
        range: SourceRange,
    ) -> Result<NodeId, TreeError> {
        let index = self
            .get(parent)?
            .children
            .iter()
            .position(|c| self.nodes[c.0].range.start >= range.start)
            .unwrap_or_else(|| self.nodes[parent.0].children.len());
        self.insert_child(parent, index, label, value, range)
    }

    /// Link two nodes symmetrically. Linking twice is a no-op.
    pub fn associate(&mut self, a: NodeId, b: NodeId) -> Result<(), TreeError> {
        self.get(a)?;
        self.get(b)?;
        if !self.nodes[a.0].associated.contains(&b) {
            self.nodes[a.0].associated.push(b);
        }
        if !self.nodes[b.0].associated.contains(&a) {
            self.nodes[b.0].associated.push(a);
        }
        Ok(())
    }

    /// Entity of a node, with the entities of its associated nodes attached.
    pub fn entity(&self, id: NodeId) -> Result<SourceCodeEntity, TreeError> {
        let node = self.get(id)?;
        let mut entity = node.to_entity();
        entity.associated_entities = node
            .associated
            .iter()
            .map(|a| self.nodes[a.0].to_entity())
            .collect();
        Ok(entity)
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> Result<usize, TreeError> {
        let mut depth = 0;
        let mut current = self.get(id)?.parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent.0].parent;
        }
        Ok(depth)
    }

    /// Deepest node whose range contains `range`, starting from the root.
    pub fn deepest_enclosing(&self, range: &SourceRange) -> Option<NodeId> {
        let root = self.root();
        if !self.nodes.first()?.range.contains(range) {
            return None;
        }
        let mut current = root;
        'descend: loop {
            for child in &self.nodes[current.0].children {
                let node = &self.nodes[child.0];
                if !node.label.is_comment() && node.range.contains(range) {
                    current = *child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// Node ids in pre-order (source order for well-formed trees).
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method_tree() -> (EntityTree, NodeId, NodeId) {
        let mut tree = EntityTree::new(EntityType::Method, "m()", SourceRange::new(0, 40));
        let root = tree.root();
        let a = tree
            .add_child(root, EntityType::Assignment, "a = 1;", SourceRange::new(10, 16))
            .unwrap();
        let b = tree
            .add_child(root, EntityType::Assignment, "b = 2;", SourceRange::new(20, 26))
            .unwrap();
        (tree, a, b)
    }

    #[test]
    fn test_associate_is_symmetric_and_idempotent() {
        let (mut tree, a, b) = method_tree();
        tree.associate(a, b).unwrap();
        tree.associate(b, a).unwrap();
        assert_eq!(tree.get(a).unwrap().associated(), &[b]);
        assert_eq!(tree.get(b).unwrap().associated(), &[a]);
        assert_eq!(tree.entity(a).unwrap().associated_entities.len(), 1);
    }

    #[test]
    fn test_insert_child_in_order() {
        let (mut tree, a, b) = method_tree();
        let root = tree.root();
        let c = tree
            .insert_child_in_order(root, EntityType::LineComment, "// c", SourceRange::new(17, 19))
            .unwrap();
        assert_eq!(tree.get(root).unwrap().children(), &[a, c, b]);
        assert_eq!(tree.pre_order(), vec![root, a, c, b]);
    }

    #[test]
    fn test_misplaced_child_is_rejected() {
        let (mut tree, a, _) = method_tree();
        let err = tree
            .add_child(a, EntityType::MethodInvocation, "f()", SourceRange::new(30, 33))
            .unwrap_err();
        assert!(matches!(err, TreeError::Misplaced { .. }));
    }

    #[test]
    fn test_deepest_enclosing() {
        let (tree, a, _) = method_tree();
        assert_eq!(tree.deepest_enclosing(&SourceRange::new(11, 12)), Some(a));
        assert_eq!(tree.deepest_enclosing(&SourceRange::new(17, 19)), Some(tree.root()));
        assert_eq!(tree.deepest_enclosing(&SourceRange::new(35, 50)), None);
        assert_eq!(tree.depth(a).unwrap(), 1);
    }
}
