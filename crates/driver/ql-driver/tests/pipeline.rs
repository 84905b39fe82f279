//! End-to-end pipeline tests
//!
//! Builds small trees by hand, runs the full resolution pipeline, then
//! queries sections and links the way a page generator would.

use expect_test::expect;
use ql_driver::{link_index, resolve_forest, resolve_tree};
use ql_intern::Interner;
use ql_model::{
    Access, ClassData, Doc, FunctionData, Genus, Metaness, Node, NodeData, NodeId, QmlTypeData,
};
use ql_resolve::ResolveError;
use ql_sections::{ClassSummary, Sections};
use ql_tree::{Forest, Tree};

fn class(tree: &mut Tree, parent: NodeId, name: &str) -> NodeId {
    let symbol = tree.interner().intern(name);
    let id = tree.pool_mut().alloc(Node::new(
        symbol,
        Genus::Cpp,
        NodeData::Class(ClassData::default()),
    ));
    tree.pool_mut().add_child(parent, id);
    id
}

fn documented_function(tree: &mut Tree, parent: NodeId, name: &str) -> NodeId {
    let symbol = tree.interner().intern(name);
    let id = tree.pool_mut().alloc(Node::new(
        symbol,
        Genus::Cpp,
        NodeData::Function(FunctionData::new(Metaness::Plain)),
    ));
    tree.node_mut(id).doc = Some(Doc::new(format!("Documents {name}."), None));
    tree.pool_mut().add_child(parent, id);
    id
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
fn test_reimplementation_flows_into_sections() {
    let mut tree = Tree::new(Interner::new());
    let root = tree.root();
    let base = class(&mut tree, root, "Base");
    let base_paint = documented_function(&mut tree, base, "paint");
    let derived = class(&mut tree, root, "Derived");
    let path = tree.interner().intern_path("Base");
    tree.node_mut(derived)
        .class_mut()
        .unwrap()
        .add_unresolved_base(Access::Public, path);
    let own_paint = documented_function(&mut tree, derived, "paint");
    tree.node_mut(own_paint).function_mut().unwrap().reimplements = Some(String::new());

    let diagnostics = resolve_tree(&mut tree);
    assert!(diagnostics.is_empty(), "unexpected: {diagnostics:?}");

    // Base resolution is bidirectional and the marker resolved to a handle.
    assert_eq!(
        tree.node(derived).class().unwrap().bases[0].node,
        Some(base)
    );
    assert_eq!(
        tree.node(base).class().unwrap().derived[0].node,
        Some(derived)
    );
    assert_eq!(
        tree.node(own_paint).function().unwrap().overrides,
        Some(base_paint)
    );

    let sections = Sections::for_aggregate(&tree, derived);
    let functions = sections.class_summary(ClassSummary::PublicFunctions);
    let listed = functions.members().iter().filter(|&&id| id == own_paint).count();
    assert_eq!(listed, 1);
    assert_eq!(functions.reimplemented_members(), &[own_paint]);
    expect![[r#"
        Public Functions: paint [+1 inherited from Base]
    "#]]
    .assert_eq(&render_summary(&tree, &sections));
}

#[test]
fn test_undocumented_member_becomes_internal() {
    let mut tree = Tree::new(Interner::new());
    let root = tree.root();
    let widget = class(&mut tree, root, "Widget");
    let documented = documented_function(&mut tree, widget, "show");
    let hidden = documented_function(&mut tree, widget, "hide");
    tree.node_mut(hidden).doc = None;

    resolve_tree(&mut tree);

    assert!(!tree.node(documented).is_internal());
    assert!(tree.node(hidden).is_internal());
    let sections = Sections::for_aggregate(&tree, widget);
    let functions = sections.class_summary(ClassSummary::PublicFunctions);
    assert_eq!(functions.members(), &[documented]);
}

#[test]
fn test_qml_self_inheritance_reports_and_terminates() {
    let mut tree = Tree::new(Interner::new());
    let root = tree.root();
    let symbol = tree.interner().intern("Item");
    let item = tree.pool_mut().alloc(Node::new(
        symbol,
        Genus::Qml,
        NodeData::QmlType(QmlTypeData::with_base_name("Item")),
    ));
    tree.pool_mut().add_child(root, item);
    tree.insert_qml_type("Controls::Item", item);

    let mut forest = Forest::with_primary(tree);
    let diagnostics = resolve_forest(&mut forest);
    assert!(matches!(
        diagnostics.as_slice(),
        [ResolveError::InheritanceCycle { .. }]
    ));
    // The cycle stays unresolved rather than looping the section builder.
    let tree = forest.primary().unwrap();
    assert_eq!(tree.node(item).qml_type().unwrap().base_type, None);
    let sections = Sections::for_aggregate(tree, item);
    assert!(sections.all_members().is_empty());
}

#[test]
fn test_link_anchors_are_deterministic() {
    let mut tree = Tree::new(Interner::new());
    let root = tree.root();
    class(&mut tree, root, "Foo");
    documented_function(&mut tree, root, "foo");

    let mut forest = Forest::with_primary(tree);
    resolve_forest(&mut forest);

    // Case-insensitive anchor collision resolves by suffixing, in
    // declaration order, every run.
    let index = link_index(&forest).unwrap();
    let entries = index.as_array().unwrap();
    assert_eq!(entries[0]["anchor"], "Foo");
    assert_eq!(entries[1]["anchor"], "foox");
    assert_eq!(entries[1]["qualified_name"], "foo");
}
