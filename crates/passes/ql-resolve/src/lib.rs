//! Fixed-order resolution passes over a tree
//!
//! The passes turn the textual cross-references recorded at build time
//! (base-class paths, UI base-type names, property role hints, reimplements
//! markers) into resolved node handles. Each pass is total over the tree and
//! non-fatal: problems become [`ResolveError`] diagnostics in a
//! [`DiagnosticSink`] and the unresolved reference stays in place.
//!
//! The driver runs the passes in this order: base classes, UI inheritance,
//! C++/UI association links, property functions, property overrides,
//! reimplementations, overload normalization, then the undocumented-member
//! sweep. Later passes rely on the resolved edges of earlier ones.

pub mod base_classes;
pub mod error;
mod hierarchy;
pub mod normalize;
pub mod properties;
pub mod qml_inheritance;
pub mod reimplementation;
pub mod visibility;

pub use base_classes::resolve_base_classes;
pub use error::{DiagnosticSink, ResolveError};
pub use normalize::normalize_overloads;
pub use properties::{resolve_property_functions, resolve_property_overrides};
pub use qml_inheritance::{resolve_cpp_class_links, resolve_qml_inheritance};
pub use reimplementation::resolve_reimplementations;
pub use visibility::mark_undocumented_internal;

#[cfg(test)]
pub(crate) mod testutil {
    use ql_intern::Interner;
    use ql_model::{
        ClassData, FunctionData, Genus, Metaness, Node, NodeData, NodeId, Parameter, PropertyData,
        QmlTypeData,
    };
    use ql_tree::Tree;

    pub fn tree() -> Tree {
        Tree::new(Interner::new())
    }

    pub fn class(tree: &mut Tree, parent: NodeId, name: &str) -> NodeId {
        let symbol = tree.interner().intern(name);
        let id = tree.pool_mut().alloc(Node::new(
            symbol,
            Genus::Cpp,
            NodeData::Class(ClassData::default()),
        ));
        tree.pool_mut().add_child(parent, id);
        id
    }

    pub fn namespace(tree: &mut Tree, parent: NodeId, name: &str) -> NodeId {
        let symbol = tree.interner().intern(name);
        let id = tree.pool_mut().alloc(Node::new(
            symbol,
            Genus::Cpp,
            NodeData::Namespace(Default::default()),
        ));
        tree.pool_mut().add_child(parent, id);
        id
    }

    pub fn function(tree: &mut Tree, parent: NodeId, name: &str, types: &[&str]) -> NodeId {
        let mut data = FunctionData::new(Metaness::Plain);
        for data_type in types {
            data.parameters.push(Parameter::new(*data_type, ""));
        }
        let symbol = tree.interner().intern(name);
        let id = tree
            .pool_mut()
            .alloc(Node::new(symbol, Genus::Cpp, NodeData::Function(data)));
        tree.pool_mut().add_child(parent, id);
        id
    }

    pub fn property(tree: &mut Tree, parent: NodeId, name: &str, data_type: &str) -> NodeId {
        let symbol = tree.interner().intern(name);
        let id = tree.pool_mut().alloc(Node::new(
            symbol,
            Genus::Cpp,
            NodeData::Property(PropertyData::new(data_type)),
        ));
        tree.pool_mut().add_child(parent, id);
        id
    }

    pub fn qml_type(tree: &mut Tree, name: &str, module: &str) -> NodeId {
        let symbol = tree.interner().intern(name);
        let id = tree.pool_mut().alloc(Node::new(
            symbol,
            Genus::Qml,
            NodeData::QmlType(QmlTypeData::default()),
        ));
        let root = tree.root();
        tree.pool_mut().add_child(root, id);
        tree.insert_qml_type(&format!("{module}::{name}"), id);
        id
    }
}
