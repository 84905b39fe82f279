//! Link-target resolution over a documentation forest
//!
//! Turns free-text link targets like `Widget::show(bool)#details` into
//! entity references plus page anchors. Anchors are issued through a
//! per-run registry so they stay unique on case-insensitive filesystems,
//! and every linkable entity can be exported as a serializable index
//! entry.

pub mod error;
pub mod index;
pub mod registry;
pub mod resolver;
pub mod target;

pub use error::LinkError;
pub use index::{IndexEntry, collect_entries};
pub use registry::RefRegistry;
pub use resolver::LinkResolver;
pub use target::LinkTarget;
