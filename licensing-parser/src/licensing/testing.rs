//! Testing utilities for forest assertions
//!
//!     Testing the parser follows two rules.
//!
//! Why Testing is Different
//!
//!     The parser's input is text extracted from a real regulatory document: Hebrew,
//!     right-to-left, full of PDF extraction artifacts and numbering quirks. Hand-typed
//!     test strings drift from what extraction actually produces (quote variants, bidi
//!     marks, headers glued onto one line), and a parser tuned against made-up input is
//!     tuned to the wrong thing.
//!
//!     This is why document-level tests follow two rules:
//!
//!         1. Use the curated sample documents (via [samples])
//!         2. Assert on the whole shape of the result (via [assert_forest])
//!
//! Rule 1: Use the sample corpus for document content
//!
//!     ```rust,ignore
//!     use licensing_parser::licensing::testing::samples::{Sample, Samples};
//!
//!     let forest = Samples::full_specification();
//!     let lines = Sample::Orphans.lines();
//!     ```
//!
//!     Unit tests of a single stage (one header line, one bound phrase) may still use
//!     inline strings; whole-document tests should not.
//!
//! Rule 2: Use assert_forest for verification
//!
//!     Counting nodes says little. Check ids, contexts, nesting and derived fields at
//!     once with the fluent API:
//!
//!     ```rust,ignore
//!     use licensing_parser::licensing::ast::NumberingContext;
//!     use licensing_parser::licensing::testing::assert_forest;
//!
//!     assert_forest(&forest)
//!         .is_sorted()
//!         .section(NumberingContext::Normal, "3.2", |s| {
//!             s.requires_gas(Some(true)).child_ids(&["3.2.1", "3.2.2"]);
//!         })
//!         .section(NumberingContext::AnnexA, "4.1", |s| {
//!             s.group_level(Some("4.1")).level(2);
//!         });
//!     ```
//!
//!     Failures carry the path to the offending node (`forest:root[3]:child[1]`).

pub mod forest_assertions;
pub mod samples;

pub use forest_assertions::{assert_forest, ForestAssertion, SectionAssertion};
