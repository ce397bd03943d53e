//! Whole-word term sets
//!
//! `\b` in the regex crate is Unicode-aware, but Hebrew attaches the one-letter
//! prepositions and conjunctions (`ו ב כ ל מ ש ה`) directly to the following word:
//! "לגז" is "for gas". A term therefore matches when it is bounded by non-letters,
//! optionally carrying up to two such proclitic letters in front.

use regex::{Regex, RegexBuilder};

use crate::licensing::lexing::normalize_line;
use crate::licensing::vocabulary::VocabularyError;

const PROCLITICS: &str = "[ובכלמשה]{0,2}";

/// Escaped alternation of the terms, longest first so multi-word terms win.
pub fn alternation(terms: &[String]) -> String {
    let mut normalized: Vec<String> = terms
        .iter()
        .map(|t| normalize_line(t))
        .filter(|t| !t.is_empty())
        .collect();
    normalized.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    normalized.dedup();
    normalized
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|")
}

/// A compiled set of terms matched on letter boundaries.
#[derive(Debug, Clone)]
pub struct TermSet {
    terms: Vec<String>,
    regex: Regex,
}

impl TermSet {
    pub fn new(name: &'static str, terms: &[String]) -> Result<Self, VocabularyError> {
        let alternatives = alternation(terms);
        if alternatives.is_empty() {
            return Err(VocabularyError::EmptyTerms(name));
        }
        let pattern = format!(r"(?:^|[^\p{{L}}]){PROCLITICS}(?:{alternatives})(?:$|[^\p{{L}}])");
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| VocabularyError::Pattern { name, source })?;
        Ok(TermSet {
            terms: terms.to_vec(),
            regex,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}
