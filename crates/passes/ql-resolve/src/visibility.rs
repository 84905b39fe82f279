//! Undocumented-member sweep

use ql_model::{Access, NodeData, NodeId, Status};
use ql_tree::Tree;

/// Demotes undocumented leaf members to private/internal so they never
/// reach the sections builder.
///
/// A member is spared when it shares a comment, is already excluded with
/// `DontDocument`, serves a property as an access function, or is a typedef
/// with an associated enum. Aggregates, pages and collections are skipped:
/// their documentation may legitimately live elsewhere.
pub fn mark_undocumented_internal(tree: &mut Tree) {
    let root = tree.root();
    sweep(tree, root);
}

fn sweep(tree: &mut Tree, parent: NodeId) {
    let children = tree.pool().children(parent).to_vec();
    for child in children {
        let node = tree.node(child);
        let exempt = node.is_sharing_comment()
            || node.has_doc()
            || node.status == Status::DontDocument
            || node.is_aggregate()
            || node.is_page()
            || node.is_shared_comment()
            || matches!(node.data, NodeData::Group(_) | NodeData::Module(_));
        if !exempt {
            let keeps_access = match &node.data {
                NodeData::Function(function) => function.has_associated_properties(),
                NodeData::Typedef(typedef) => typedef.associated_enum.is_some(),
                _ => false,
            };
            if !keeps_access {
                let node = tree.node_mut(child);
                node.access = Access::Private;
                node.status = Status::Internal;
            }
        }
        if tree.node(child).is_aggregate() {
            sweep(tree, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{class, function, property, tree};
    use ql_model::Doc;

    #[test]
    fn test_undocumented_members_become_internal() {
        let mut tree = tree();
        let root = tree.root();
        let widget = class(&mut tree, root, "Widget");
        let bare = function(&mut tree, widget, "helper", &[]);
        let documented = function(&mut tree, widget, "show", &[]);
        tree.node_mut(documented).doc = Some(Doc::new("Shows the widget.", None));

        mark_undocumented_internal(&mut tree);

        assert_eq!(tree.node(bare).status, Status::Internal);
        assert_eq!(tree.node(bare).access, Access::Private);
        assert_eq!(tree.node(documented).status, Status::Active);
        // The class itself is an aggregate and is left alone.
        assert_eq!(tree.node(widget).status, Status::Active);
    }

    #[test]
    fn test_property_access_functions_are_spared() {
        let mut tree = tree();
        let root = tree.root();
        let widget = class(&mut tree, root, "Widget");
        let prop = property(&mut tree, widget, "value", "int");
        let getter = function(&mut tree, widget, "value", &[]);
        tree.node_mut(getter)
            .function_mut()
            .unwrap()
            .associated_properties
            .push(prop);

        mark_undocumented_internal(&mut tree);

        assert_eq!(tree.node(getter).status, Status::Active);
        // The property itself carries no doc and is demoted.
        assert_eq!(tree.node(prop).status, Status::Internal);
    }
}
