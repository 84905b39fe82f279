//! Entity model for the documentation tree
//!
//! Every documented entity is a [`Node`] allocated in an arena owned by a
//! [`NodePool`]. A node's kind-specific payload lives in the [`NodeData`]
//! tagged union; aggregates own an ordered child sequence plus a
//! name-to-overload-chain map for their function children. All cross
//! references (base classes, next-overload links, associated properties,
//! shared comments) are plain [`NodeId`] handles that stay unresolved until
//! the resolution passes run.

pub mod class;
pub mod function;
pub mod node;
pub mod pool;
pub mod property;

pub use class::{ClassData, ClassKind, QmlTypeData, RelatedClass};
pub use function::{FunctionData, Metaness, Parameter, Parameters, Virtualness};
pub use node::{
    Access, AggregateData, CollectionData, Doc, EnumData, EnumItem, Genus, LinkTable, Node,
    NodeData, NodeId, NodeKind, PageData, QmlPropertyData, SharedCommentData, Status, TypedefData,
    VariableData,
};
pub use pool::{DuplicateDoc, NodePool};
pub use property::{FlagValue, PropertyData, PropertyRole};
