//! Member categorization for reference pages
//!
//! Partitions an aggregate's members (and its ancestors') into the fixed,
//! ordered buckets a reference page lays out: summary tables, detailed
//! documentation, and the all-members index, with deprecated members
//! isolated into parallel obsolete lists. Built read-only after the
//! resolution passes have run.

pub mod builder;
pub mod section;
pub mod sort;

pub use builder::{ClassDetails, ClassSummary, NamespaceSummary, QmlSummary, Sections};
pub use section::{Section, SectionStyle};
pub use sort::sort_name;

#[cfg(test)]
mod tests {
    use crate::builder::{ClassSummary, QmlSummary, Sections};
    use expect_test::expect;
    use ql_intern::Interner;
    use ql_model::{
        Access, ClassData, Doc, FunctionData, Genus, Metaness, Node, NodeData, NodeId,
        QmlPropertyData, QmlTypeData, RelatedClass, Status, VariableData,
    };
    use ql_tree::Tree;
    use rustc_hash::FxHashSet;

    fn alloc_class(tree: &mut Tree, parent: NodeId, name: &str) -> NodeId {
        let symbol = tree.interner().intern(name);
        let id = tree.pool_mut().alloc(Node::new(
            symbol,
            Genus::Cpp,
            NodeData::Class(ClassData::default()),
        ));
        tree.pool_mut().add_child(parent, id);
        id
    }

    fn alloc_function(tree: &mut Tree, parent: NodeId, name: &str, metaness: Metaness) -> NodeId {
        let symbol = tree.interner().intern(name);
        let id = tree.pool_mut().alloc(Node::new(
            symbol,
            Genus::Cpp,
            NodeData::Function(FunctionData::new(metaness)),
        ));
        tree.pool_mut().add_child(parent, id);
        id
    }

    fn alloc_qml_type(tree: &mut Tree, name: &str) -> NodeId {
        let symbol = tree.interner().intern(name);
        let id = tree.pool_mut().alloc(Node::new(
            symbol,
            Genus::Qml,
            NodeData::QmlType(QmlTypeData::default()),
        ));
        let root = tree.root();
        tree.pool_mut().add_child(root, id);
        id
    }

    fn alloc_qml_property(tree: &mut Tree, parent: NodeId, name: &str) -> NodeId {
        let symbol = tree.interner().intern(name);
        let id = tree.pool_mut().alloc(Node::new(
            symbol,
            Genus::Qml,
            NodeData::QmlProperty(QmlPropertyData::default()),
        ));
        tree.pool_mut().add_child(parent, id);
        id
    }

    fn widget_fixture() -> (Tree, NodeId) {
        let mut tree = Tree::new(Interner::new());
        let root = tree.root();
        let base = alloc_class(&mut tree, root, "Base");
        alloc_function(&mut tree, base, "inheritedHelper", Metaness::Plain);
        let widget = alloc_class(&mut tree, root, "Widget");
        tree.node_mut(widget)
            .class_mut()
            .unwrap()
            .bases
            .push(RelatedClass::resolved(Access::Public, base));

        alloc_function(&mut tree, widget, "Widget", Metaness::Ctor);
        alloc_function(&mut tree, widget, "show", Metaness::Plain);
        alloc_function(&mut tree, widget, "setValue", Metaness::Plain);
        alloc_function(&mut tree, widget, "valueChanged", Metaness::Signal);
        let helper = alloc_function(&mut tree, widget, "helper", Metaness::Plain);
        tree.node_mut(helper).function_mut().unwrap().is_static = true;
        let symbol = tree.interner().intern("count");
        let count = tree.pool_mut().alloc(Node::new(
            symbol,
            Genus::Cpp,
            NodeData::Variable(VariableData::default()),
        ));
        tree.pool_mut().add_child(widget, count);
        (tree, widget)
    }

    fn render_summary(tree: &Tree, sections: &Sections) -> String {
        let mut out = String::new();
        for section in sections.summary() {
            if section.is_empty() {
                continue;
            }
            let names: Vec<String> = section
                .members()
                .iter()
                .map(|&id| tree.interner().resolve(&tree.node(id).name))
                .collect();
            out.push_str(section.title());
            out.push_str(": ");
            out.push_str(&names.join(", "));
            for (owner, count) in section.inherited() {
                let owner_name = tree.interner().resolve(&tree.node(*owner).name);
                out.push_str(&format!(" [+{count} inherited from {owner_name}]"));
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_class_summary_layout() {
        let (tree, widget) = widget_fixture();
        let sections = Sections::for_aggregate(&tree, widget);
        expect![[r#"
            Public Functions: Widget, setValue, show [+1 inherited from Base]
            Signals: valueChanged
            Public Variables: count
            Static Public Members: helper
        "#]]
        .assert_eq(&render_summary(&tree, &sections));
    }

    #[test]
    fn test_summary_buckets_are_disjoint_and_complete() {
        let (mut tree, widget) = widget_fixture();
        let hidden = alloc_function(&mut tree, widget, "secret", Metaness::Plain);
        tree.node_mut(hidden).status = Status::Internal;

        let sections = Sections::for_aggregate(&tree, widget);
        let mut placed = FxHashSet::default();
        for section in sections.summary() {
            for &member in section.members().iter().chain(section.obsolete_members()) {
                assert!(placed.insert(member), "member listed twice");
            }
        }
        for &child in tree.pool().children(widget) {
            let node = tree.node(child);
            let excluded = node.is_private() || node.is_internal();
            assert_eq!(placed.contains(&child), !excluded);
        }
    }

    #[test]
    fn test_reimplemented_function_not_double_listed() {
        let (mut tree, widget) = widget_fixture();
        let base = tree.node(widget).class().unwrap().bases[0].node.unwrap();
        let base_f = alloc_function(&mut tree, base, "paint", Metaness::Plain);
        let own_f = alloc_function(&mut tree, widget, "paint", Metaness::Plain);
        tree.node_mut(own_f).function_mut().unwrap().overrides = Some(base_f);

        let sections = Sections::for_aggregate(&tree, widget);
        let functions = sections.class_summary(ClassSummary::PublicFunctions);
        let listed = functions.members().iter().filter(|&&id| id == own_f).count();
        assert_eq!(listed, 1);
        assert_eq!(functions.reimplemented_members(), &[own_f]);
        // The overridden base function still counts as inherited alongside
        // the other base member.
        assert_eq!(functions.inherited().first().map(|&(owner, _)| owner), Some(base));
    }

    #[test]
    fn test_qml_abstract_ancestor_members_document_here() {
        let mut tree = Tree::new(Interner::new());
        let ancestor = alloc_qml_type(&mut tree, "BaseItem");
        tree.node_mut(ancestor).qml_type_mut().unwrap().is_abstract = true;
        let item = alloc_qml_type(&mut tree, "Item");
        tree.node_mut(item).qml_type_mut().unwrap().base_type = Some(ancestor);

        let shared = alloc_qml_property(&mut tree, ancestor, "opacity");
        tree.node_mut(shared).doc = Some(Doc::new("Opacity.", None));
        // Re-declared below with documentation; the ancestor's undocumented
        // twin is skipped.
        let twin = alloc_qml_property(&mut tree, ancestor, "visible");
        assert!(!tree.node(twin).has_doc());
        let own = alloc_qml_property(&mut tree, item, "visible");
        tree.node_mut(own).doc = Some(Doc::new("Visibility.", None));

        let sections = Sections::for_aggregate(&tree, item);
        let properties = sections.qml_summary(QmlSummary::Properties);
        assert!(properties.members().contains(&own));
        assert!(properties.members().contains(&shared));
        assert!(!properties.members().contains(&twin));
    }

    #[test]
    fn test_qml_self_inheritance_does_not_loop() {
        let mut tree = Tree::new(Interner::new());
        let item = alloc_qml_type(&mut tree, "Item");
        tree.node_mut(item).qml_type_mut().unwrap().base_type = Some(item);
        alloc_qml_property(&mut tree, item, "width");

        let sections = Sections::for_aggregate(&tree, item);
        assert_eq!(sections.qml_summary(QmlSummary::Properties).members().len(), 1);
    }
}
