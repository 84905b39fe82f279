//! Ordered collection of trees for cross-module queries

use crate::tree::Tree;
use ql_intern::{Interner, Symbol};
use ql_model::{Genus, Node, NodeId};

/// Location of a node in a forest: which tree, and which slot within it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ForestNode {
    pub tree: usize,
    pub node: NodeId,
}

/// An ordered list of trees sharing one interner
///
/// The first tree is the primary tree under construction; the rest are
/// companion modules consulted read-only. Searches visit trees in list
/// order and stop at the first hit.
pub struct Forest {
    interner: Interner,
    trees: Vec<Tree>,
}

impl Forest {
    pub fn new(interner: Interner) -> Self {
        Self {
            interner,
            trees: Vec::new(),
        }
    }

    /// A forest holding just the primary tree.
    pub fn with_primary(tree: Tree) -> Self {
        let mut forest = Self::new(tree.interner().clone());
        forest.push(tree);
        forest
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Appends a tree at the end of the search order.
    pub fn push(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    pub fn primary(&self) -> Option<&Tree> {
        self.trees.first()
    }

    pub fn primary_mut(&mut self) -> Option<&mut Tree> {
        self.trees.first_mut()
    }

    pub fn tree(&self, index: usize) -> &Tree {
        &self.trees[index]
    }

    pub fn tree_mut(&mut self, index: usize) -> &mut Tree {
        &mut self.trees[index]
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Finds `path` in the first tree that has it, searching each tree from
    /// its root.
    pub fn find_node(&self, path: &[Symbol], genus: Genus) -> Option<ForestNode> {
        self.trees.iter().enumerate().find_map(|(index, tree)| {
            tree.find_node(path, tree.root(), genus)
                .map(|node| ForestNode { tree: index, node })
        })
    }

    /// Finds the class/struct/union at `path` in the first tree that has it.
    pub fn find_class_node(&self, path: &[Symbol]) -> Option<ForestNode> {
        self.trees.iter().enumerate().find_map(|(index, tree)| {
            tree.find_class_node(path)
                .map(|node| ForestNode { tree: index, node })
        })
    }

    /// Finds a UI type by qualified or unqualified name across the forest.
    pub fn find_qml_type_by_name(&self, name: &str) -> Option<ForestNode> {
        self.trees.iter().enumerate().find_map(|(index, tree)| {
            tree.find_qml_type_by_name(name)
                .map(|node| ForestNode { tree: index, node })
        })
    }

    pub fn node(&self, location: ForestNode) -> &Node {
        self.trees[location.tree].node(location.node)
    }
}
