//! Forest ordering
//!
//! Ids compare component-wise as integers (`3.9` < `3.10`). Roots additionally
//! order by numbering context: normal, then annex-A, then annex-B.

use std::cmp::Ordering;

use crate::licensing::ast::{SectionId, SectionNode};

/// Numeric id comparison; falls back to plain string order for non-numeric ids.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (SectionId::parse(a), SectionId::parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sort a child list and every list beneath it by id.
pub fn sort_children(nodes: &mut [SectionNode]) {
    nodes.sort_by(|a, b| compare_ids(&a.id, &b.id));
    for node in nodes.iter_mut() {
        sort_children(&mut node.children);
    }
}

/// Sort the root forest by `(context rank, id)` and every child list by id.
pub fn sort_forest(forest: &mut [SectionNode]) {
    forest.sort_by(|a, b| {
        a.context
            .rank()
            .cmp(&b.context.rank())
            .then_with(|| compare_ids(&a.id, &b.id))
    });
    for node in forest.iter_mut() {
        sort_children(&mut node.children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::licensing::ast::NumberingContext;
    use rstest::rstest;

    #[rstest]
    #[case("3.9", "3.10", Ordering::Less)]
    #[case("3.10", "3.9", Ordering::Greater)]
    #[case("3", "3.1", Ordering::Less)]
    #[case("10.1", "9.12", Ordering::Greater)]
    #[case("2.1", "2.1", Ordering::Equal)]
    #[case("2.1", "x", Ordering::Less)]
    fn test_compare_ids(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(compare_ids(a, b), expected);
    }

    #[test]
    fn test_roots_by_context_then_id() {
        let mut forest = vec![
            SectionNode::new("1.1", NumberingContext::AnnexB),
            SectionNode::new("4.1", NumberingContext::AnnexA),
            SectionNode::new("3.10", NumberingContext::Normal),
            SectionNode::new("3.9", NumberingContext::Normal),
        ];
        sort_forest(&mut forest);
        let order: Vec<_> = forest
            .iter()
            .map(|n| format!("{}:{}", n.context, n.id))
            .collect();
        assert_eq!(order, vec!["normal:3.9", "normal:3.10", "annex-A:4.1", "annex-B:1.1"]);
    }

    #[test]
    fn test_children_sorted_recursively() {
        let mut forest = vec![SectionNode::new("2.1", NumberingContext::Normal).with_children(vec![
            SectionNode::new("2.1.10", NumberingContext::Normal),
            SectionNode::new("2.1.2", NumberingContext::Normal).with_children(vec![
                SectionNode::new("2.1.2.3", NumberingContext::Normal),
                SectionNode::new("2.1.2.1", NumberingContext::Normal),
            ]),
        ])];
        sort_forest(&mut forest);
        let child = &forest[0].children;
        assert_eq!(child[0].id, "2.1.2");
        assert_eq!(child[1].id, "2.1.10");
        assert_eq!(child[0].children[0].id, "2.1.2.1");
    }
}
