//! Base-chain traversal shared by the later passes

use ql_model::NodeId;
use ql_tree::Tree;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// The resolved base classes of `class` in nearest-first order: direct
/// bases in declaration order, then their bases, breadth first. Safe on
/// cyclic inheritance records.
pub(crate) fn base_chain(tree: &Tree, class: NodeId) -> Vec<NodeId> {
    let mut order = Vec::new();
    let mut seen = FxHashSet::default();
    seen.insert(class);
    let mut queue = VecDeque::from([class]);
    while let Some(current) = queue.pop_front() {
        let Some(data) = tree.node(current).class() else {
            continue;
        };
        for base in data.resolved_bases() {
            if seen.insert(base) {
                order.push(base);
                queue.push_back(base);
            }
        }
    }
    order
}

/// The resolved UI base types of `qml_type`, nearest first, with the same
/// cycle guard.
pub(crate) fn qml_base_chain(tree: &Tree, qml_type: NodeId) -> Vec<NodeId> {
    let mut order = Vec::new();
    let mut seen = FxHashSet::default();
    seen.insert(qml_type);
    let mut cursor = tree.node(qml_type).qml_type().and_then(|data| data.base_type);
    while let Some(base) = cursor {
        if !seen.insert(base) {
            break;
        }
        order.push(base);
        cursor = tree.node(base).qml_type().and_then(|data| data.base_type);
    }
    order
}
