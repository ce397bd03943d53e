//! Section tree building
//!
//! [`TreeBuilder`] consumes normalized lines, tracks the numbering context and
//! grows an arena of nodes; [`body`] turns each node's accumulated text into its
//! opening statement and title when the builder finishes.

pub mod body;
pub mod tree_builder;

pub use body::{derive_title, truncate_body};
pub use tree_builder::{NodeHandle, TreeBuilder};
