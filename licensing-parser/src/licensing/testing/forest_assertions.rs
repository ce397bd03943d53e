//! Fluent assertion API for parsed forests

use crate::licensing::ast::{find_section, NumberingContext, SectionNode};
use crate::licensing::sorting::compare_ids;

use std::cmp::Ordering;

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a forest
pub fn assert_forest(forest: &[SectionNode]) -> ForestAssertion<'_> {
    ForestAssertion { forest }
}

fn summarize(nodes: &[SectionNode]) -> String {
    nodes
        .iter()
        .map(|n| format!("{}:{}", n.context, n.id))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Forest Assertions
// ============================================================================

pub struct ForestAssertion<'a> {
    forest: &'a [SectionNode],
}

impl<'a> ForestAssertion<'a> {
    pub fn root_count(self, expected: usize) -> Self {
        assert_eq!(
            self.forest.len(),
            expected,
            "forest: Expected {} roots, found {}: [{}]",
            expected,
            self.forest.len(),
            summarize(self.forest)
        );
        self
    }

    pub fn root_ids(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.forest.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            actual, expected,
            "forest: Expected root ids {:?}, found [{}]",
            expected,
            summarize(self.forest)
        );
        self
    }

    pub fn root<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SectionAssertion<'a>),
    {
        assert!(
            index < self.forest.len(),
            "forest: Root index {} out of bounds ({} roots: [{}])",
            index,
            self.forest.len(),
            summarize(self.forest)
        );
        assertion(SectionAssertion {
            node: &self.forest[index],
            context: format!("forest:root[{}]", index),
        });
        self
    }

    /// Locate a node anywhere in the forest by `(context, id)`.
    pub fn section<F>(self, context: NumberingContext, id: &str, assertion: F) -> Self
    where
        F: FnOnce(SectionAssertion<'a>),
    {
        let node = find_section(self.forest, context, id)
            .unwrap_or_else(|| panic!("forest: Expected section {}:{} to exist", context, id));
        assertion(SectionAssertion {
            node,
            context: format!("forest:{}:{}", context, id),
        });
        self
    }

    pub fn no_section(self, context: NumberingContext, id: &str) -> Self {
        assert!(
            find_section(self.forest, context, id).is_none(),
            "forest: Expected no section {}:{}",
            context,
            id
        );
        self
    }

    /// Roots ordered by `(context rank, id)`, every child list strictly increasing.
    pub fn is_sorted(self) -> Self {
        for pair in self.forest.windows(2) {
            let order = pair[0]
                .context
                .rank()
                .cmp(&pair[1].context.rank())
                .then_with(|| compare_ids(&pair[0].id, &pair[1].id));
            assert_eq!(
                order,
                Ordering::Less,
                "forest: Roots out of order: [{}]",
                summarize(self.forest)
            );
        }
        for node in self.forest {
            assert_children_sorted(node);
        }
        self
    }
}

fn assert_children_sorted(node: &SectionNode) {
    for pair in node.children.windows(2) {
        assert_eq!(
            compare_ids(&pair[0].id, &pair[1].id),
            Ordering::Less,
            "{}: Children out of order: [{}]",
            node.id,
            summarize(&node.children)
        );
    }
    for child in &node.children {
        assert_children_sorted(child);
    }
}

// ============================================================================
// Section Assertions
// ============================================================================

pub struct SectionAssertion<'a> {
    pub(crate) node: &'a SectionNode,
    pub(crate) context: String,
}

macro_rules! field_assertion {
    ($name:ident, $field:ident, $ty:ty) => {
        pub fn $name(self, expected: $ty) -> Self {
            assert_eq!(
                self.node.$field, expected,
                "{}: Expected {} to be {:?}, but got {:?}",
                self.context,
                stringify!($field),
                expected,
                self.node.$field
            );
            self
        }
    };
}

impl<'a> SectionAssertion<'a> {
    pub fn id(self, expected: &str) -> Self {
        assert_eq!(
            self.node.id, expected,
            "{}: Expected id to be '{}', but got '{}'",
            self.context, expected, self.node.id
        );
        self
    }

    pub fn title(self, expected: &str) -> Self {
        assert_eq!(
            self.node.title, expected,
            "{}: Expected title to be '{}', but got '{}'",
            self.context, expected, self.node.title
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.node.text, expected,
            "{}: Expected text to be '{}', but got '{}'",
            self.context, expected, self.node.text
        );
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        assert!(
            self.node.text.contains(substring),
            "{}: Expected text to contain '{}', but got '{}'",
            self.context,
            substring,
            self.node.text
        );
        self
    }

    pub fn text_lacks(self, substring: &str) -> Self {
        assert!(
            !self.node.text.contains(substring),
            "{}: Expected text not to contain '{}', but got '{}'",
            self.context,
            substring,
            self.node.text
        );
        self
    }

    pub fn group_level(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.node.group_level.as_deref(),
            expected,
            "{}: Expected group_level {:?}, but got {:?}",
            self.context,
            expected,
            self.node.group_level
        );
        self
    }

    field_assertion!(level, level, u8);
    field_assertion!(context_is, context, NumberingContext);
    field_assertion!(min_area, min_area_sqm, Option<f64>);
    field_assertion!(max_area, max_area_sqm, Option<f64>);
    field_assertion!(min_seats, min_seats, Option<u32>);
    field_assertion!(max_seats, max_seats, Option<u32>);
    field_assertion!(requires_gas, requires_gas, Option<bool>);
    field_assertion!(serves_meat, serves_meat, Option<bool>);
    field_assertion!(offers_delivery, offers_delivery, Option<bool>);

    pub fn no_constraints(self) -> Self {
        assert!(
            !self.node.has_structured_constraint(),
            "{}: Expected no structured constraints, but got {:?}",
            self.context,
            self.node
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {} children: [{}]",
            self.context,
            expected,
            actual,
            summarize(&self.node.children)
        );
        self
    }

    pub fn child_ids(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.node.children.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            actual, expected,
            "{}: Expected child ids {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SectionAssertion<'a>),
    {
        let children = &self.node.children;
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds ({} children)",
            self.context,
            index,
            children.len()
        );
        assertion(SectionAssertion {
            node: &children[index],
            context: format!("{}:child[{}]", self.context, index),
        });
        self
    }
}
