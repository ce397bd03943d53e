//! Section tree builder
//!
//! Nodes live in an arena for the duration of a parse and are addressed by
//! [`NodeHandle`]. The builder keeps one slot table per level, keyed by
//! `(context, id)`, so a header can find its parent by numeric prefix even when the
//! parent was opened many lines earlier. Deeper slots are never cleared: a later
//! header simply resolves against whichever ancestors are still registered.
//!
//! Lines enter through a FIFO work queue. Each physical line is split into
//! one-header-per-segment units first, and the segments are processed in order.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace};

use crate::licensing::ast::{Forest, NumberingContext, SectionId, SectionNode, MAX_LEVEL};
use crate::licensing::bounds::extract_bounds;
use crate::licensing::context::{group_label, ContextTracker};
use crate::licensing::lexing::{split_headers, HeaderLine, Segment};
use crate::licensing::vocabulary::Vocabulary;

use super::body::{derive_title, truncate_body};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(usize);

#[derive(Debug)]
struct Entry {
    node: SectionNode,
    raw: String,
    children: Vec<NodeHandle>,
}

type SlotTable = HashMap<(NumberingContext, SectionId), NodeHandle>;

#[derive(Debug)]
pub struct TreeBuilder<'v> {
    vocabulary: &'v Vocabulary,
    tracker: ContextTracker<'v>,
    arena: Vec<Entry>,
    roots: Vec<NodeHandle>,
    slots: [SlotTable; MAX_LEVEL as usize],
    current: Option<NodeHandle>,
    queue: VecDeque<Segment>,
}

impl<'v> TreeBuilder<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        TreeBuilder {
            vocabulary,
            tracker: ContextTracker::new(vocabulary),
            arena: Vec::new(),
            roots: Vec::new(),
            slots: Default::default(),
            current: None,
            queue: VecDeque::new(),
        }
    }

    /// Feed one normalized line.
    pub fn push_line(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        self.queue.extend(split_headers(line, self.vocabulary));
        while let Some(segment) = self.queue.pop_front() {
            self.process(segment);
        }
    }

    fn process(&mut self, segment: Segment) {
        let Some(context) = self.tracker.admit(&segment) else {
            trace!(line = %segment.as_line(), "outside parsed region");
            return;
        };
        match segment {
            Segment::Header(header) => self.open(header, context),
            Segment::Text(text) => self.append(&text),
        }
    }

    fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.current {
            Some(handle) => {
                let raw = &mut self.arena[handle.0].raw;
                if !raw.is_empty() {
                    raw.push(' ');
                }
                raw.push_str(text);
            }
            None => trace!(line = text, "no open section, line dropped"),
        }
    }

    fn open(&mut self, header: HeaderLine, context: NumberingContext) {
        let level = header.level();

        if level == 1 && context == NumberingContext::Normal {
            debug!(id = %header.id, "chapter heading discarded");
            self.current = None;
            return;
        }

        let key = (context, header.id.clone());
        let slot = usize::from(level) - 1;
        if let Some(&existing) = self.slots[slot].get(&key) {
            debug!(id = %header.id, %context, "repeated header, reopening section");
            self.current = Some(existing);
            self.append(&header.body);
            return;
        }

        let handle = NodeHandle(self.arena.len());
        let mut node = SectionNode::new(header.id.to_string(), context);
        node.group_level = group_label(context, node.level);
        self.arena.push(Entry {
            node,
            raw: header.body,
            children: Vec::new(),
        });

        match self.resolve_parent(context, &header.id) {
            Some(parent) => self.arena[parent.0].children.push(handle),
            None => {
                if header.id.depth() > 1 {
                    debug!(id = %header.id, %context, "no ancestor found, promoted to root");
                }
                self.roots.push(handle);
            }
        }

        self.slots[slot].insert(key, handle);
        self.current = Some(handle);
    }

    /// Nearest registered ancestor by numeric prefix, deepest first.
    fn resolve_parent(&self, context: NumberingContext, id: &SectionId) -> Option<NodeHandle> {
        (1..id.depth()).rev().find_map(|depth| {
            let prefix = id.prefix(depth)?;
            let slot = usize::from(prefix.level()) - 1;
            self.slots[slot].get(&(context, prefix)).copied()
        })
    }

    /// Finalize every node and assemble the (unsorted) forest.
    pub fn finish(self) -> Forest {
        let vocabulary = self.vocabulary;
        let mut arena: Vec<Option<Entry>> = self
            .arena
            .into_iter()
            .map(|mut entry| {
                finalize(&mut entry, vocabulary);
                Some(entry)
            })
            .collect();
        self.roots
            .iter()
            .filter_map(|&root| assemble(&mut arena, root))
            .collect()
    }
}

fn finalize(entry: &mut Entry, vocabulary: &Vocabulary) {
    let text = truncate_body(&entry.node.id, &entry.raw, vocabulary);
    entry.node.title = derive_title(&text, vocabulary.title_words);
    extract_bounds(&text, vocabulary).apply_to(&mut entry.node);
    entry.node.text = text;
}

fn assemble(arena: &mut [Option<Entry>], handle: NodeHandle) -> Option<SectionNode> {
    let entry = arena.get_mut(handle.0)?.take()?;
    let mut node = entry.node;
    node.children = entry
        .children
        .into_iter()
        .filter_map(|child| assemble(arena, child))
        .collect();
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::licensing::vocabulary::DEFAULT_VOCABULARY;

    fn build(lines: &[&str]) -> Forest {
        let mut builder = TreeBuilder::new(&DEFAULT_VOCABULARY);
        for line in lines {
            builder.push_line(line);
        }
        builder.finish()
    }

    #[test]
    fn test_nests_by_numeric_prefix() {
        let forest = build(&["פרק 1", "1.1 כללי", "1.1.1 משנה", "1.2 אחר"]);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].id, "1.1");
        assert_eq!(forest[0].children[0].id, "1.1.1");
        assert_eq!(forest[1].id, "1.2");
    }

    #[test]
    fn test_orphan_attaches_to_nearest_ancestor() {
        let forest = build(&["פרק 1", "2.1 עליון", "2.1.3.1 עמוק"]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children[0].id, "2.1.3.1");
        assert_eq!(forest[0].children[0].level, 4);
    }

    #[test]
    fn test_orphan_without_ancestor_becomes_root() {
        let forest = build(&["פרק 1", "7.2.1 יתום"]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, "7.2.1");
    }

    #[test]
    fn test_continuation_lines_are_appended() {
        let forest = build(&["פרק 1", "2.1 תחילת הסעיף", "והמשכו בשורה הבאה"]);
        assert_eq!(forest[0].text, "תחילת הסעיף והמשכו בשורה הבאה");
    }

    #[test]
    fn test_normal_chapter_heading_closes_open_node() {
        let forest = build(&["פרק 1", "2.1 סעיף", "3. דרישות כלליות", "שורה יתומה"]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].text, "סעיף");
    }

    #[test]
    fn test_repeated_header_reopens_section() {
        let forest = build(&["פרק 1", "2.1 חלק א", "2.2 אחר", "2.1 חלק ב"]);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].text, "חלק א חלק ב");
    }

    #[test]
    fn test_annex_level_one_is_kept() {
        let forest = build(&["פרק 1", "נספחים", "1. טבלה", "1.1 שורה"]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].context, NumberingContext::AnnexA);
        assert_eq!(forest[0].group_level.as_deref(), Some("4.1"));
        assert_eq!(forest[0].children[0].group_level.as_deref(), Some("4.1"));
    }
}
