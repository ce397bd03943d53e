//! Section tree data model
//!
//! The tree has a single node type, [`SectionNode`]. A parsed document is a forest: a
//! `Vec<SectionNode>` of roots, each owning its children. Nodes are plain data; they
//! serialize to the interchange record shape consumed by outer surfaces.

pub mod lookup;
pub mod section;
pub mod section_id;

pub use lookup::{count_sections, find_section, walk_sections};
pub use section::{NumberingContext, SectionNode, MAX_LEVEL};
pub use section_id::SectionId;

/// A parsed document: the ordered list of root sections.
pub type Forest = Vec<SectionNode>;
