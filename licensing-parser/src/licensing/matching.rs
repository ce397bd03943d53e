//! Structural matching
//!
//! Walks a parsed forest, decides per node whether it concerns a given business
//! ([`relevance`]) and rebuilds a pruned forest that keeps every matched subtree whole
//! and every ancestor on the way down to a match ([`prune`]). The input forest is
//! only read; every node in the output is a fresh copy.
//!
//! ```rust
//! use licensing_parser::licensing::matching::{match_sections, BusinessProfile};
//! use licensing_parser::licensing::pipeline::parse_document;
//!
//! let forest = parse_document("פרק 1\n3.2.1 דרישה לגז בשטח מעל 100 מ\"ר\n");
//! let profile = BusinessProfile::new(150.0, 50, true, false, false).unwrap();
//! assert_eq!(match_sections(&profile, &forest).len(), 1);
//! ```

pub mod profile;
pub mod prune;
pub mod relevance;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::licensing::ast::{count_sections, Forest, SectionNode};
use crate::licensing::vocabulary::Vocabulary;

pub use profile::{BusinessProfile, ProfileError};
pub use relevance::{Gate, MatchPolicy, SeatCarveOut, Signal, Verdict};

/// Summary of one match run, in the shape the outer surfaces return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub total_sections: usize,
    pub matched_sections: usize,
    pub matched: Forest,
}

#[derive(Debug, Clone, Default)]
pub struct StructuralMatcher {
    vocabulary: Vocabulary,
    policy: MatchPolicy,
}

impl StructuralMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(vocabulary: Vocabulary, policy: MatchPolicy) -> Self {
        StructuralMatcher { vocabulary, policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    pub fn evaluate(&self, profile: &BusinessProfile, node: &SectionNode) -> Verdict {
        let verdict = relevance::evaluate(profile, node, &self.vocabulary, &self.policy);
        trace!(id = %node.id, context = %node.context, ?verdict, "evaluated section");
        verdict
    }

    pub fn is_relevant(&self, profile: &BusinessProfile, node: &SectionNode) -> bool {
        self.evaluate(profile, node).is_relevant()
    }

    /// The pruned forest for `profile`.
    pub fn match_forest(&self, profile: &BusinessProfile, forest: &[SectionNode]) -> Forest {
        let matched = prune::prune(forest, |node| self.is_relevant(profile, node));
        debug!(
            input = count_sections(forest),
            output = count_sections(&matched),
            "matched forest"
        );
        matched
    }

    pub fn report(&self, profile: &BusinessProfile, forest: &[SectionNode]) -> MatchReport {
        let matched = self.match_forest(profile, forest);
        MatchReport {
            total_sections: count_sections(forest),
            matched_sections: count_sections(&matched),
            matched,
        }
    }
}

/// Match with the built-in vocabulary and policy.
pub fn match_sections(profile: &BusinessProfile, forest: &[SectionNode]) -> Forest {
    StructuralMatcher::new().match_forest(profile, forest)
}

/// Relevance of a single node under the built-in vocabulary and policy.
pub fn is_relevant(profile: &BusinessProfile, node: &SectionNode) -> bool {
    StructuralMatcher::new().is_relevant(profile, node)
}
