//! Indexed arena allocator for entity nodes
//!
//! This is a re-export of `la-arena` which is used by rust-analyzer
//! and provides a robust, well-tested arena implementation. Only the
//! parent-to-child edges of the entity tree imply ownership; every
//! other relationship is stored as a plain `Idx` handle.

pub use la_arena::{Arena, ArenaMap, Idx};
