//! Forest traversal helpers

use super::section::{NumberingContext, SectionNode};

/// Find the node with `id` in `context`, searching the whole forest depth-first.
pub fn find_section<'a>(
    forest: &'a [SectionNode],
    context: NumberingContext,
    id: &str,
) -> Option<&'a SectionNode> {
    walk_sections(forest).find(|node| node.context == context && node.id == id)
}

/// Total number of nodes in the forest, descendants included.
pub fn count_sections(forest: &[SectionNode]) -> usize {
    forest
        .iter()
        .map(|node| 1 + count_sections(&node.children))
        .sum()
}

/// Pre-order depth-first iterator over every node of the forest.
pub fn walk_sections(forest: &[SectionNode]) -> SectionWalk<'_> {
    SectionWalk {
        stack: forest.iter().rev().collect(),
    }
}

pub struct SectionWalk<'a> {
    stack: Vec<&'a SectionNode>,
}

impl<'a> Iterator for SectionWalk<'a> {
    type Item = &'a SectionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
