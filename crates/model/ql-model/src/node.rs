//! The `Node` entity and its kind-specific payloads

use crate::class::{ClassData, QmlTypeData};
use crate::function::FunctionData;
use crate::property::PropertyData;
use indexmap::IndexMap;
use ql_arena::Idx;
use ql_intern::Symbol;
use ql_span::FileSpan;
use serde::{Deserialize, Serialize};

/// Handle to a node in the entity arena
pub type NodeId = Idx<Node>;

/// Which source-language family an entity was parsed from
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Genus {
    /// No preference; only meaningful in lookup queries
    DontCare,
    /// The statically-typed host language
    Cpp,
    /// The declarative UI description language
    Qml,
    /// The scripting variant of the UI language
    Js,
    /// Documentation-only entities (pages, groups, modules)
    Doc,
}

impl Genus {
    /// Whether a query for `self` accepts an entity of genus `other`.
    pub fn matches(self, other: Genus) -> bool {
        self == Genus::DontCare || other == Genus::DontCare || self == other
    }
}

/// Member access level
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Access {
    Public,
    Protected,
    Private,
}

/// Documentation status of an entity
///
/// `Deprecated` covers what older documentation styles called "obsolete";
/// deprecated members are still documented, but isolated into the obsolete
/// section buckets. `Internal` members are never documented.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Status {
    Active,
    Preliminary,
    Deprecated,
    Internal,
    DontDocument,
}

/// Closed set of entity kinds, used for index entries and kind-restricted
/// lookups
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Namespace,
    Class,
    Struct,
    Union,
    Enum,
    Typedef,
    TypeAlias,
    Function,
    Property,
    Variable,
    QmlType,
    QmlProperty,
    SharedComment,
    Proxy,
    Page,
    Group,
    Module,
}

/// Opaque documentation-body payload
///
/// The core never parses the prose; structural markers extracted from the
/// comment (overload, deprecation, reimplements) are recorded by the parser
/// as explicit fields on the entity itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Doc {
    /// Raw comment body, interpreted only by renderers
    pub body: String,
    /// Where the comment appeared
    pub location: Option<FileSpan>,
}

impl Doc {
    pub fn new(body: impl Into<String>, location: Option<FileSpan>) -> Self {
        Self {
            body: body.into(),
            location,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Explicit page-navigation links attached to an entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkTable {
    pub next: Option<String>,
    pub previous: Option<String>,
    pub start: Option<String>,
    pub contents: Option<String>,
}

/// Owned children of an aggregate entity
///
/// The child sequence preserves declaration order, which is output
/// significant. `functions` maps a function name to the head of that name's
/// overload chain; the chain itself is threaded through the function nodes'
/// `next_overload` links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateData {
    /// Ordered child sequence
    pub children: Vec<NodeId>,
    /// Function-name to overload-chain-head map
    pub functions: IndexMap<Symbol, NodeId>,
}

/// One enumerator of an enum entity
#[derive(Debug, Clone, PartialEq)]
pub struct EnumItem {
    pub name: Symbol,
    pub value: Option<String>,
    pub since: Option<String>,
}

/// Enum entity payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumData {
    pub items: Vec<EnumItem>,
}

impl EnumData {
    /// Whether `name` is one of this enum's enumerators.
    pub fn has_item(&self, name: Symbol) -> bool {
        self.items.iter().any(|item| item.name == name)
    }
}

/// Typedef or type-alias payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedefData {
    /// Textual aliased type, as written
    pub aliased_type: String,
    /// The enum this typedef accompanies (for flag typedefs)
    pub associated_enum: Option<NodeId>,
    /// True for `using`-style aliases
    pub is_alias: bool,
}

/// Variable payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableData {
    pub data_type: String,
    pub is_static: bool,
}

/// UI-language property payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QmlPropertyData {
    pub data_type: String,
    pub is_attached: bool,
    pub is_readonly: bool,
    pub is_required: bool,
}

/// Several entities documented by one shared comment
///
/// Used for UI property groups and for several declared overloads that
/// share a single documentation block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedCommentData {
    pub collective: Vec<NodeId>,
}

/// Documentation-only page payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageData {
    pub title: String,
    pub subtitle: String,
}

/// Group or module payload: a non-owning collection of members
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionData {
    pub members: Vec<NodeId>,
}

/// Kind-specific payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Namespace(AggregateData),
    Class(ClassData),
    Enum(EnumData),
    Typedef(TypedefData),
    Function(FunctionData),
    Property(PropertyData),
    Variable(VariableData),
    QmlType(QmlTypeData),
    QmlProperty(QmlPropertyData),
    SharedComment(SharedCommentData),
    Proxy(AggregateData),
    Page(PageData),
    Group(CollectionData),
    Module(CollectionData),
}

/// One documented entity
///
/// Every non-root node has exactly one owner at any time; ownership transfer
/// is an explicit re-parent operation on the pool, never implicit aliasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unqualified name
    pub name: Symbol,
    /// Owning parent; `None` only for a tree root
    pub parent: Option<NodeId>,
    pub access: Access,
    pub genus: Genus,
    pub status: Status,
    /// Where the entity was declared
    pub declared_at: Option<FileSpan>,
    /// Where the entity was defined, if distinct from the declaration
    pub defined_at: Option<FileSpan>,
    /// Documentation body, if the entity is documented
    pub doc: Option<Doc>,
    /// Version in which the entity first appeared
    pub since: Option<String>,
    /// Explicit page-navigation links
    pub links: LinkTable,
    /// Enclosing shared comment, when documentation is shared with others
    pub shared_comment: Option<NodeId>,
    /// True for members hosted here through a relates-to declaration
    pub related: bool,
    pub data: NodeData,
}

impl Node {
    /// Creates a node with default access, status and no locations.
    pub fn new(name: Symbol, genus: Genus, data: NodeData) -> Self {
        Self {
            name,
            parent: None,
            access: Access::Public,
            genus,
            status: Status::Active,
            declared_at: None,
            defined_at: None,
            doc: None,
            since: None,
            links: LinkTable::default(),
            shared_comment: None,
            related: false,
            data,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match &self.data {
            NodeData::Namespace(_) => NodeKind::Namespace,
            NodeData::Class(class) => class.kind.node_kind(),
            NodeData::Enum(_) => NodeKind::Enum,
            NodeData::Typedef(typedef) => {
                if typedef.is_alias {
                    NodeKind::TypeAlias
                } else {
                    NodeKind::Typedef
                }
            }
            NodeData::Function(_) => NodeKind::Function,
            NodeData::Property(_) => NodeKind::Property,
            NodeData::Variable(_) => NodeKind::Variable,
            NodeData::QmlType(_) => NodeKind::QmlType,
            NodeData::QmlProperty(_) => NodeKind::QmlProperty,
            NodeData::SharedComment(_) => NodeKind::SharedComment,
            NodeData::Proxy(_) => NodeKind::Proxy,
            NodeData::Page(_) => NodeKind::Page,
            NodeData::Group(_) => NodeKind::Group,
            NodeData::Module(_) => NodeKind::Module,
        }
    }

    /// The aggregate payload, for kinds that own children.
    pub fn aggregate(&self) -> Option<&AggregateData> {
        match &self.data {
            NodeData::Namespace(agg) | NodeData::Proxy(agg) => Some(agg),
            NodeData::Class(class) => Some(&class.aggregate),
            NodeData::QmlType(qml) => Some(&qml.aggregate),
            _ => None,
        }
    }

    pub fn aggregate_mut(&mut self) -> Option<&mut AggregateData> {
        match &mut self.data {
            NodeData::Namespace(agg) | NodeData::Proxy(agg) => Some(agg),
            NodeData::Class(class) => Some(&mut class.aggregate),
            NodeData::QmlType(qml) => Some(&mut qml.aggregate),
            _ => None,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        self.aggregate().is_some()
    }

    pub fn function(&self) -> Option<&FunctionData> {
        match &self.data {
            NodeData::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn function_mut(&mut self) -> Option<&mut FunctionData> {
        match &mut self.data {
            NodeData::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn class(&self) -> Option<&ClassData> {
        match &self.data {
            NodeData::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn class_mut(&mut self) -> Option<&mut ClassData> {
        match &mut self.data {
            NodeData::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn property(&self) -> Option<&PropertyData> {
        match &self.data {
            NodeData::Property(property) => Some(property),
            _ => None,
        }
    }

    pub fn property_mut(&mut self) -> Option<&mut PropertyData> {
        match &mut self.data {
            NodeData::Property(property) => Some(property),
            _ => None,
        }
    }

    pub fn qml_type(&self) -> Option<&QmlTypeData> {
        match &self.data {
            NodeData::QmlType(qml) => Some(qml),
            _ => None,
        }
    }

    pub fn qml_type_mut(&mut self) -> Option<&mut QmlTypeData> {
        match &mut self.data {
            NodeData::QmlType(qml) => Some(qml),
            _ => None,
        }
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self.data, NodeData::Namespace(_))
    }

    /// True for class, struct and union entities.
    pub fn is_class_node(&self) -> bool {
        matches!(self.data, NodeData::Class(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self.data, NodeData::Function(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.data, NodeData::Enum(_))
    }

    pub fn is_typedef(&self) -> bool {
        matches!(self.data, NodeData::Typedef(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.data, NodeData::Variable(_))
    }

    pub fn is_property(&self) -> bool {
        matches!(self.data, NodeData::Property(_))
    }

    pub fn is_qml_type(&self) -> bool {
        matches!(self.data, NodeData::QmlType(_))
    }

    pub fn is_qml_property(&self) -> bool {
        matches!(self.data, NodeData::QmlProperty(_))
    }

    pub fn is_shared_comment(&self) -> bool {
        matches!(self.data, NodeData::SharedComment(_))
    }

    pub fn is_proxy(&self) -> bool {
        matches!(self.data, NodeData::Proxy(_))
    }

    pub fn is_page(&self) -> bool {
        matches!(self.data, NodeData::Page(_))
    }

    pub fn is_module(&self) -> bool {
        matches!(self.data, NodeData::Module(_))
    }

    /// True for kinds a textual type reference may legally resolve to.
    pub fn is_relatable_type(&self) -> bool {
        self.is_class_node() || self.is_enum() || self.is_typedef() || self.is_qml_type()
    }

    pub fn is_public(&self) -> bool {
        self.access == Access::Public
    }

    pub fn is_private(&self) -> bool {
        self.access == Access::Private
    }

    pub fn is_internal(&self) -> bool {
        self.status == Status::Internal
    }

    pub fn is_deprecated(&self) -> bool {
        self.status == Status::Deprecated
    }

    pub fn has_doc(&self) -> bool {
        self.doc.as_ref().is_some_and(|doc| !doc.is_empty())
    }

    /// Whether the documentation for this node lives in a shared comment.
    pub fn is_sharing_comment(&self) -> bool {
        self.shared_comment.is_some()
    }

    pub fn is_static(&self) -> bool {
        match &self.data {
            NodeData::Function(function) => function.is_static,
            NodeData::Variable(variable) => variable.is_static,
            _ => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        match &self.data {
            NodeData::Function(function) => function.is_attached,
            NodeData::QmlProperty(property) => property.is_attached,
            _ => false,
        }
    }

    pub fn is_abstract(&self) -> bool {
        match &self.data {
            NodeData::Class(class) => class.is_abstract,
            NodeData::QmlType(qml) => qml.is_abstract,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_intern::Interner;

    #[test]
    fn test_genus_matching() {
        assert!(Genus::DontCare.matches(Genus::Cpp));
        assert!(Genus::Qml.matches(Genus::DontCare));
        assert!(Genus::Cpp.matches(Genus::Cpp));
        assert!(!Genus::Cpp.matches(Genus::Qml));
    }

    #[test]
    fn test_typedef_kind_tracks_alias_flavor() {
        let interner = Interner::new();
        let name = interner.intern("Handle");
        let mut node = Node::new(
            name,
            Genus::Cpp,
            NodeData::Typedef(TypedefData::default()),
        );
        assert_eq!(node.kind(), NodeKind::Typedef);
        if let NodeData::Typedef(typedef) = &mut node.data {
            typedef.is_alias = true;
        }
        assert_eq!(node.kind(), NodeKind::TypeAlias);
    }

    #[test]
    fn test_aggregate_access_covers_all_owning_kinds() {
        let interner = Interner::new();
        let name = interner.intern("Thing");
        let namespace = Node::new(name, Genus::Cpp, NodeData::Namespace(AggregateData::default()));
        let class = Node::new(name, Genus::Cpp, NodeData::Class(ClassData::default()));
        let qml = Node::new(name, Genus::Qml, NodeData::QmlType(QmlTypeData::default()));
        let proxy = Node::new(name, Genus::Cpp, NodeData::Proxy(AggregateData::default()));
        let page = Node::new(name, Genus::Doc, NodeData::Page(PageData::default()));
        assert!(namespace.is_aggregate());
        assert!(class.is_aggregate());
        assert!(qml.is_aggregate());
        assert!(proxy.is_aggregate());
        assert!(!page.is_aggregate());
    }
}
