//! Serializable index entries
//!
//! One entry per linkable entity, suitable for a cross-run link index or
//! search database.

use crate::resolver::LinkResolver;
use ql_model::{NodeId, NodeKind};
use ql_tree::Tree;
use serde::Serialize;

/// A single linkable entity in the index
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IndexEntry {
    pub kind: NodeKind,
    pub qualified_name: String,
    pub anchor: String,
}

impl IndexEntry {
    /// Builds the entry for `node`, deriving its anchor through `resolver`
    /// so index anchors agree with resolved-link anchors.
    pub fn for_node(resolver: &mut LinkResolver<'_>, tree: &Tree, node: NodeId) -> Self {
        Self {
            kind: tree.node(node).kind(),
            qualified_name: tree.qualified_name(node),
            anchor: resolver.ref_for_node(tree, node),
        }
    }
}

/// Collects an entry for every named entity under `scope`, depth first in
/// declaration order.
pub fn collect_entries(
    resolver: &mut LinkResolver<'_>,
    tree: &Tree,
    scope: NodeId,
    entries: &mut Vec<IndexEntry>,
) {
    for &child in tree.pool().children(scope) {
        if tree.interner().resolve(&tree.node(child).name).is_empty() {
            continue;
        }
        entries.push(IndexEntry::for_node(resolver, tree, child));
        if tree.node(child).is_aggregate() {
            collect_entries(resolver, tree, child, entries);
        }
    }
}
