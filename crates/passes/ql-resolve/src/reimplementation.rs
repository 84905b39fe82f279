//! Reimplemented-function resolution

use crate::error::{DiagnosticSink, ResolveError};
use crate::hierarchy::base_chain;
use ql_model::{Genus, NodeId, Parameters};
use ql_tree::Tree;

/// Resolves every function's reimplements marker to the base-class function
/// it overrides.
///
/// An empty marker means "same name and signature somewhere up the base
/// chain", searched nearest base first. A non-empty marker is parsed as
/// `path(types)`: a bare name restricts the chain search to that name, a
/// qualified path is looked up from the root. Misses are reported and the
/// marker is left in place. Runs after base-class resolution.
pub fn resolve_reimplementations(tree: &mut Tree, sink: &mut DiagnosticSink) {
    let functions: Vec<NodeId> = tree
        .pool()
        .iter()
        .filter(|(_, node)| {
            node.function()
                .is_some_and(|data| data.reimplements.is_some() && data.overrides.is_none())
        })
        .map(|(id, _)| id)
        .collect();

    for function in functions {
        let Some(data) = tree.node(function).function() else {
            continue;
        };
        let marker = data.reimplements.clone().unwrap_or_default();
        let own_parameters = data.parameters.clone();
        let found = resolve_target(tree, function, &marker, &own_parameters);
        match found {
            Some(target) if target != function => {
                if let Some(data) = tree.node_mut(function).function_mut() {
                    data.overrides = Some(target);
                }
            }
            _ => sink.push(ResolveError::UnresolvedReimplements {
                function: tree.qualified_name(function),
                target: marker,
                location: tree.node(function).declared_at,
            }),
        }
    }
}

fn resolve_target(
    tree: &Tree,
    function: NodeId,
    marker: &str,
    own_parameters: &Parameters,
) -> Option<NodeId> {
    let (path_text, parameters) = split_signature(marker);
    let parameters = match parameters {
        Some(signature) => Parameters::from_signature(signature),
        None => own_parameters.clone(),
    };

    if path_text.is_empty() || !path_text.contains("::") {
        // Search the enclosing class's base chain, nearest first.
        let name = if path_text.is_empty() {
            tree.node(function).name
        } else {
            tree.interner().intern(path_text)
        };
        let parent = tree.node(function).parent?;
        return base_chain(tree, parent)
            .into_iter()
            .find_map(|base| tree.pool().find_function_child(base, name, &parameters));
    }

    // Qualified target: resolve the enclosing scope from the root, then the
    // function within it.
    let path = tree.interner().intern_path(path_text);
    let (name, scope_path) = path.split_last()?;
    let scope = if scope_path.is_empty() {
        tree.root()
    } else {
        tree.find_node(scope_path, tree.root(), Genus::Cpp)?
    };
    tree.pool().find_function_child(scope, *name, &parameters)
}

/// Splits `f(int, bool)` into the path part and the signature text.
fn split_signature(marker: &str) -> (&str, Option<&str>) {
    match marker.find('(') {
        Some(open) => {
            let path = marker[..open].trim();
            let rest = &marker[open + 1..];
            let inner = rest.strip_suffix(')').unwrap_or(rest);
            (path, Some(inner))
        }
        None => (marker.trim(), None),
    }
}
