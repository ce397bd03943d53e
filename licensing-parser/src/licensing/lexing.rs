//! Lexing: normalization and header recognition
//!
//! Source lines are normalized first ([`normalization`]), then split into
//! one-header-per-segment units ([`headers`]). Both stages are pure functions of a
//! line, so they are shared by the builder, the bound extractor and the matcher.

pub mod headers;
pub mod normalization;

pub use headers::{split_headers, HeaderLine, Segment};
pub use normalization::{normalize_line, normalize_lines};
