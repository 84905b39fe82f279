//! Property/function association and property overriding

use crate::error::{DiagnosticSink, ResolveError};
use crate::hierarchy::base_chain;
use ql_model::{FlagValue, NodeId, PropertyRole};
use ql_tree::Tree;

const ROLE_NAMES: [&str; 4] = ["getter", "setter", "resetter", "notifier"];

/// Resolves every property's textual role hints against the enclosing
/// aggregate's function chains.
///
/// A hint matches the first chain entry with the property's access level
/// whose status also matches, or which carries no documentation of its own.
/// A match is recorded on both sides; a miss drains the hint and reports.
pub fn resolve_property_functions(tree: &mut Tree, sink: &mut DiagnosticSink) {
    let properties: Vec<NodeId> = tree
        .pool()
        .iter()
        .filter(|(_, node)| node.is_property())
        .map(|(id, _)| id)
        .collect();

    for property in properties {
        let Some(parent) = tree.node(property).parent else {
            continue;
        };
        let access = tree.node(property).access;
        let status = tree.node(property).status;
        let Some(pending) = tree
            .node_mut(property)
            .property_mut()
            .map(|data| std::mem::take(&mut data.pending))
        else {
            continue;
        };

        for role in PropertyRole::ALL {
            for name in &pending[role.index()] {
                let symbol = tree.interner().intern(name);
                let mut chosen = None;
                let mut cursor = tree.pool().chain_head(parent, symbol);
                while let Some(id) = cursor {
                    let node = tree.node(id);
                    let Some(function) = node.function() else {
                        break;
                    };
                    if node.access == access && (node.status == status || !node.has_doc()) {
                        chosen = Some(id);
                        break;
                    }
                    cursor = function.next_overload;
                }

                match chosen {
                    Some(function) => {
                        if let Some(data) = tree.node_mut(property).property_mut() {
                            data.add_function(role, function);
                        }
                        if let Some(data) = tree.node_mut(function).function_mut() {
                            if !data.associated_properties.contains(&property) {
                                data.associated_properties.push(property);
                            }
                        }
                    }
                    None => sink.push(ResolveError::UnresolvedPropertyFunction {
                        property: tree.qualified_name(property),
                        function: name.clone(),
                        role: ROLE_NAMES[role.index()],
                        location: tree.node(property).declared_at,
                    }),
                }
            }
        }
    }
}

/// Links each property to the nearest same-named property in its class's
/// resolved base chain.
///
/// Only what the derived property left unset is inherited: role lists that
/// are still empty and attribute flags still at their default. Explicitly
/// set values are never overwritten. Runs after base-class resolution and
/// role association.
pub fn resolve_property_overrides(tree: &mut Tree) {
    let properties: Vec<NodeId> = tree
        .pool()
        .iter()
        .filter(|(_, node)| node.is_property())
        .map(|(id, _)| id)
        .collect();

    for property in properties {
        let already = tree
            .node(property)
            .property()
            .is_none_or(|data| data.overridden_from.is_some());
        if already {
            continue;
        }
        let Some(parent) = tree.node(property).parent else {
            continue;
        };
        if !tree.node(parent).is_class_node() {
            continue;
        }
        let name = tree.node(property).name;

        let base_property = base_chain(tree, parent).into_iter().find_map(|base| {
            tree.pool()
                .children(base)
                .iter()
                .copied()
                .find(|&child| tree.node(child).is_property() && tree.node(child).name == name)
        });
        let Some(base_property) = base_property else {
            continue;
        };

        let Some(base_data) = tree.node(base_property).property().cloned() else {
            continue;
        };
        if let Some(data) = tree.node_mut(property).property_mut() {
            for role in PropertyRole::ALL {
                if data.functions[role.index()].is_empty() {
                    data.functions[role.index()] = base_data.functions[role.index()].clone();
                }
            }
            if data.stored.is_default() {
                data.stored = FlagValue::from_bool(base_data.stored.to_bool(true));
            }
            if data.writable.is_default() {
                data.writable = FlagValue::from_bool(base_data.writable.to_bool(true));
            }
            if data.required.is_default() {
                data.required = FlagValue::from_bool(base_data.required.to_bool(false));
            }
            data.overridden_from = Some(base_property);
        }
    }
}
