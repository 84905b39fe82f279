//! Resolution driver and high-level APIs
//!
//! This crate orchestrates the per-tree resolution pipeline and exposes the
//! resolved forest to the query layer. Callers build trees elsewhere, run
//! [`resolve_forest`], then ask for sections, links, and index entries.

use anyhow::Result;
use ql_link::{IndexEntry, LinkResolver, collect_entries};
use ql_resolve::{DiagnosticSink, ResolveError};
use ql_tree::{Forest, Tree};

/// Runs every resolution pass over one tree, in dependency order.
///
/// Passes are non-fatal: each records what it could not resolve and leaves
/// the textual reference in place, so the returned diagnostics are warnings
/// about the input, not reasons to abort.
pub fn resolve_tree(tree: &mut Tree) -> Vec<ResolveError> {
    let mut sink = DiagnosticSink::new();
    ql_resolve::resolve_base_classes(tree, &mut sink);
    ql_resolve::resolve_qml_inheritance(tree, &mut sink);
    ql_resolve::resolve_cpp_class_links(tree, &mut sink);
    ql_resolve::resolve_property_functions(tree, &mut sink);
    ql_resolve::resolve_property_overrides(tree);
    ql_resolve::resolve_reimplementations(tree, &mut sink);
    ql_resolve::normalize_overloads(tree, &mut sink);
    ql_resolve::mark_undocumented_internal(tree);
    sink.into_vec()
}

/// Resolves every tree of the forest and collects all diagnostics.
pub fn resolve_forest(forest: &mut Forest) -> Vec<ResolveError> {
    let mut diagnostics = Vec::new();
    for index in 0..forest.len() {
        diagnostics.append(&mut resolve_tree(forest.tree_mut(index)));
    }
    diagnostics
}

/// Builds the full link index for a resolved forest as a JSON value.
///
/// Anchors come from one resolver instance, so collisions across trees get
/// the same disambiguation a live link resolution would see.
pub fn link_index(forest: &Forest) -> Result<serde_json::Value> {
    let mut resolver = LinkResolver::new(forest);
    let mut entries: Vec<IndexEntry> = Vec::new();
    for tree in forest.iter() {
        collect_entries(&mut resolver, tree, tree.root(), &mut entries);
    }
    Ok(serde_json::to_value(entries)?)
}
