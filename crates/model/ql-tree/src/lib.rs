//! Tree and forest containers over the entity model
//!
//! A [`Tree`] owns one module's node pool plus the secondary indices built
//! alongside it; a [`Forest`] is an ordered list of trees sharing one
//! interner, searched in a fixed order for cross-module queries.

pub mod forest;
pub mod tree;

pub use forest::{Forest, ForestNode};
pub use tree::Tree;
