//! Bound extraction
//!
//! Derives structured constraints from a node's natural-language body:
//!
//! - area bounds from comparative phrases ([`rules`]), attempted only when the text
//!   mentions an area term;
//! - seat bounds from integers directly followed by a seating noun;
//! - facility flags (gas, meat service, delivery) from whole-word term sets ([`terms`]).
//!
//! The matcher reuses [`rules::area_constraints`] to evaluate the same phrases against
//! a concrete profile, so extraction and matching never disagree on what a phrase says.

pub mod extractor;
pub mod rules;
pub mod terms;

pub use extractor::{extract_bounds, Bounds};
pub use rules::{area_constraints, AreaConstraint, Comparison};
pub use terms::TermSet;
