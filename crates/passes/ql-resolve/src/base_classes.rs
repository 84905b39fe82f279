//! Base-class resolution

use crate::error::{DiagnosticSink, ResolveError};
use ql_intern::Symbol;
use ql_model::{Node, NodeId};
use ql_tree::Tree;

/// Resolves every class's recorded base-class paths.
///
/// Each unresolved `(access, path)` entry is looked up from the root with a
/// class-restricted search; an unqualified name that misses is retried from
/// each enclosing namespace, innermost first. On success the edge is set in
/// both directions in the same step: the deriving class's entry gains the
/// node, and the base gains a derived-class back-reference. On failure a
/// diagnostic is recorded and the path-only entry is kept for display.
pub fn resolve_base_classes(tree: &mut Tree, sink: &mut DiagnosticSink) {
    let classes: Vec<NodeId> = tree
        .pool()
        .iter()
        .filter(|(_, node)| node.is_class_node())
        .map(|(id, _)| id)
        .collect();

    for class in classes {
        let Some(data) = tree.node(class).class() else {
            continue;
        };
        let bases = data.bases.clone();
        let mut resolved = Vec::new();
        for (index, base) in bases.iter().enumerate() {
            if base.node.is_some() {
                continue;
            }
            match lookup_base(tree, class, &base.path) {
                Some(base_id) => resolved.push((index, base_id, base.access)),
                None => sink.push(ResolveError::UnresolvedBaseClass {
                    class: tree.qualified_name(class),
                    base: display_path(tree, &base.path),
                    location: tree.node(class).declared_at,
                }),
            }
        }
        for (index, base_id, access) in resolved {
            if let Some(data) = tree.node_mut(class).class_mut() {
                data.bases[index].node = Some(base_id);
            }
            if let Some(base_data) = tree.node_mut(base_id).class_mut() {
                base_data.add_derived(access, class);
            }
        }
    }
}

fn lookup_base(tree: &Tree, class: NodeId, path: &[Symbol]) -> Option<NodeId> {
    let found = tree.find_class_node(path);
    if found.is_some() && found != Some(class) {
        return found;
    }
    // An unqualified base name may live beside the class rather than at the
    // top level; retry from each enclosing namespace.
    if path.len() == 1 {
        let mut ancestor = tree.node(class).parent;
        while let Some(scope) = ancestor {
            if tree.node(scope).is_namespace() {
                let found = tree.find_node_recursive(path, scope, Node::is_class_node);
                if found.is_some() && found != Some(class) {
                    return found;
                }
            }
            ancestor = tree.node(scope).parent;
        }
    }
    None
}

fn display_path(tree: &Tree, path: &[Symbol]) -> String {
    path.iter()
        .map(|symbol| tree.interner().resolve(symbol))
        .collect::<Vec<_>>()
        .join("::")
}
