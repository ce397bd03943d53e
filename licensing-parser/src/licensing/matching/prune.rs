//! Tree pruning
//!
//! A relevant node keeps its whole subtree. The subtree is rebuilt from a flat,
//! per-context index of every node whose id the relevant node's id covers, so
//! sections the builder attached elsewhere (orphans promoted past a missing level)
//! still show up beneath the match. A node that is not relevant survives only as a
//! path to a relevant descendant.

use std::collections::{BTreeMap, HashMap};

use crate::licensing::ast::{walk_sections, Forest, NumberingContext, SectionId, SectionNode};

/// Every numerically keyed node, per context. The first node seen for a key wins.
#[derive(Debug, Default)]
pub struct FlatIndex<'a> {
    by_context: HashMap<NumberingContext, BTreeMap<SectionId, &'a SectionNode>>,
}

impl<'a> FlatIndex<'a> {
    pub fn build(forest: &'a [SectionNode]) -> Self {
        let mut by_context: HashMap<NumberingContext, BTreeMap<SectionId, &'a SectionNode>> =
            HashMap::new();
        for node in walk_sections(forest) {
            if let Some(id) = node.section_id() {
                by_context
                    .entry(node.context)
                    .or_default()
                    .entry(id)
                    .or_insert(node);
            }
        }
        FlatIndex { by_context }
    }

    /// Strict descendants of `id` in `context`, in numeric order.
    pub fn descendants(
        &self,
        context: NumberingContext,
        id: &SectionId,
    ) -> Vec<(SectionId, &'a SectionNode)> {
        let Some(members) = self.by_context.get(&context) else {
            return Vec::new();
        };
        members
            .range(id.clone()..)
            .take_while(|(key, _)| id.covers(key))
            .filter(|(key, _)| key.depth() > id.depth())
            .map(|(key, node)| (key.clone(), *node))
            .collect()
    }
}

/// True when every descendant's id lies under the node's own id.
fn numerically_nested(node: &SectionNode, id: &SectionId) -> bool {
    walk_sections(&node.children).all(|d| d.section_id().is_some_and(|key| id.covers(&key)))
}

/// The node with its complete subtree, as fresh copies.
pub fn full_subtree(node: &SectionNode, index: &FlatIndex<'_>) -> SectionNode {
    let Some(id) = node.section_id() else {
        return node.clone();
    };
    if !numerically_nested(node, &id) {
        return node.clone();
    }

    struct Slot {
        node: SectionNode,
        children: Vec<usize>,
    }

    let mut slots = vec![Slot {
        node: node.detached(),
        children: Vec::new(),
    }];
    let mut positions: HashMap<SectionId, usize> = HashMap::new();
    positions.insert(id.clone(), 0);

    for (key, member) in index.descendants(node.context, &id) {
        let parent = (id.depth()..key.depth())
            .rev()
            .find_map(|depth| key.prefix(depth).and_then(|p| positions.get(&p).copied()))
            .unwrap_or(0);
        let position = slots.len();
        slots.push(Slot {
            node: member.detached(),
            children: Vec::new(),
        });
        slots[parent].children.push(position);
        positions.insert(key, position);
    }

    fn assemble(slots: &mut [Option<Slot>], at: usize) -> Option<SectionNode> {
        let slot = slots.get_mut(at)?.take()?;
        let mut node = slot.node;
        node.children = slot
            .children
            .into_iter()
            .filter_map(|child| assemble(slots, child))
            .collect();
        Some(node)
    }

    let mut slots: Vec<Option<Slot>> = slots.into_iter().map(Some).collect();
    assemble(&mut slots, 0).unwrap_or_else(|| node.detached())
}

/// Prune the forest down to relevant nodes, their subtrees and their ancestor paths.
pub fn prune<F>(forest: &[SectionNode], is_relevant: F) -> Forest
where
    F: Fn(&SectionNode) -> bool,
{
    let index = FlatIndex::build(forest);
    forest
        .iter()
        .filter_map(|node| prune_node(node, &index, &is_relevant))
        .collect()
}

fn prune_node<F>(node: &SectionNode, index: &FlatIndex<'_>, is_relevant: &F) -> Option<SectionNode>
where
    F: Fn(&SectionNode) -> bool,
{
    if is_relevant(node) {
        return Some(full_subtree(node, index));
    }
    let kept: Vec<SectionNode> = node
        .children
        .iter()
        .filter_map(|child| prune_node(child, index, is_relevant))
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(node.detached().with_children(kept))
    }
}
