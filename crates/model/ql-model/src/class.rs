//! Class and UI-type entities and their inheritance edges

use crate::node::{Access, AggregateData, NodeId, NodeKind};
use ql_intern::Symbol;

/// Which record flavor a class entity is
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum ClassKind {
    #[default]
    Class,
    Struct,
    Union,
}

impl ClassKind {
    pub fn node_kind(self) -> NodeKind {
        match self {
            ClassKind::Class => NodeKind::Class,
            ClassKind::Struct => NodeKind::Struct,
            ClassKind::Union => NodeKind::Union,
        }
    }
}

/// One base-class or derived-class edge
///
/// An edge starts out path-only. The base-class pass fills in `node` on
/// success; the path is retained either way so an unresolved base can still
/// be displayed by name.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedClass {
    pub access: Access,
    pub node: Option<NodeId>,
    pub path: Vec<Symbol>,
}

impl RelatedClass {
    /// An unresolved edge, as recorded by the parser.
    pub fn unresolved(access: Access, path: Vec<Symbol>) -> Self {
        Self {
            access,
            node: None,
            path,
        }
    }

    /// A resolved edge, as recorded for derived-class back-references.
    pub fn resolved(access: Access, node: NodeId) -> Self {
        Self {
            access,
            node: Some(node),
            path: Vec::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.node.is_some()
    }
}

/// Class/struct/union entity payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassData {
    pub aggregate: AggregateData,
    pub kind: ClassKind,
    /// Base classes, in declaration order
    pub bases: Vec<RelatedClass>,
    /// Classes that list this one as a base; maintained by the base-class
    /// pass in lock-step with `bases`
    pub derived: Vec<RelatedClass>,
    pub is_abstract: bool,
    /// The UI type whose implementation this class provides, if any
    pub qml_element: Option<NodeId>,
}

impl ClassData {
    pub fn new(kind: ClassKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Records an unresolved base-class path for the resolution pass.
    pub fn add_unresolved_base(&mut self, access: Access, path: Vec<Symbol>) {
        self.bases.push(RelatedClass::unresolved(access, path));
    }

    /// Records a derived-class back-reference.
    pub fn add_derived(&mut self, access: Access, node: NodeId) {
        self.derived.push(RelatedClass::resolved(access, node));
    }

    /// The resolved base-class nodes, in declaration order.
    pub fn resolved_bases(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.bases.iter().filter_map(|base| base.node)
    }
}

/// UI-type entity payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QmlTypeData {
    pub aggregate: AggregateData,
    /// Unresolved base-type name, as written in the comment
    pub base_name: Option<String>,
    /// Resolved base type
    pub base_type: Option<NodeId>,
    /// UI types that inherit this one
    pub inherited_by: Vec<NodeId>,
    /// Unresolved name of the host-language class implementing this type
    pub cpp_class_name: Option<String>,
    /// The host-language class implementing this type, if any
    pub cpp_class: Option<NodeId>,
    pub is_abstract: bool,
    /// Modules to try first when resolving the base name
    pub imports: Vec<String>,
}

impl QmlTypeData {
    pub fn with_base_name(base_name: impl Into<String>) -> Self {
        Self {
            base_name: Some(base_name.into()),
            ..Self::default()
        }
    }
}
