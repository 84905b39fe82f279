//! Overload-chain normalization pass

use crate::error::{DiagnosticSink, ResolveError};
use ql_tree::Tree;

/// Normalizes every overload chain in the tree and reports duplicate
/// documentation.
///
/// The chain mechanics live in the node pool; this pass adds the
/// tree-level sweep from the root and turns each duplicate-signature pair
/// into a diagnostic naming the later function.
pub fn normalize_overloads(tree: &mut Tree, sink: &mut DiagnosticSink) {
    let root = tree.root();
    let duplicates = tree.pool_mut().normalize_overloads(root);
    for duplicate in duplicates {
        let location = tree
            .node(duplicate.node)
            .doc
            .as_ref()
            .and_then(|doc| doc.location)
            .or(tree.node(duplicate.node).declared_at);
        sink.push(ResolveError::DuplicateOverloadDoc {
            function: tree.qualified_name(duplicate.node),
            location,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{class, function, tree};

    #[test]
    fn test_duplicates_become_diagnostics() {
        let mut tree = tree();
        let root = tree.root();
        let widget = class(&mut tree, root, "Widget");
        function(&mut tree, widget, "show", &["bool"]);
        let repeat = function(&mut tree, widget, "show", &["bool"]);

        let mut sink = DiagnosticSink::new();
        normalize_overloads(&mut tree, &mut sink);

        assert_eq!(sink.len(), 1);
        assert!(tree.node(repeat).function().unwrap().duplicate);
    }
}
