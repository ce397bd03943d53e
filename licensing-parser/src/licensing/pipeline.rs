//! Parsing pipeline
//!
//! Source text goes through four sequential stages:
//!
//! 1. **Normalization** - bidi marks, quote variants and whitespace are folded
//! 2. **Header splitting** - one logical segment per section header
//! 3. **Tree building** - context tracking, parent resolution, body truncation and
//!    bound extraction
//! 4. **Sorting** - numeric ordering of the forest
//!
//! [`parse_document`] runs the pipeline with the built-in vocabulary. Use
//! [`SectionParser`] to parse with a configured one.
//!
//! ```rust
//! use licensing_parser::licensing::pipeline::parse_document;
//!
//! let forest = parse_document("פרק 1\n2.1 טקסט א 2.2 טקסט ב\n");
//! assert_eq!(forest.len(), 2);
//! ```

use tracing::debug;

use crate::licensing::ast::{count_sections, Forest};
use crate::licensing::building::TreeBuilder;
use crate::licensing::lexing::normalize_line;
use crate::licensing::sorting::sort_forest;
use crate::licensing::vocabulary::{Vocabulary, VocabularyError, VocabularySpec};

/// Parser bound to a compiled vocabulary. Holds no per-parse state, so one instance
/// can serve any number of parses.
#[derive(Debug, Clone, Default)]
pub struct SectionParser {
    vocabulary: Vocabulary,
}

impl SectionParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        SectionParser { vocabulary }
    }

    pub fn from_spec(spec: &VocabularySpec) -> Result<Self, VocabularyError> {
        Ok(Self::with_vocabulary(spec.compile()?))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Parse an ordered sequence of text lines into a sorted forest.
    pub fn parse_lines<I, S>(&self, lines: I) -> Forest
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = TreeBuilder::new(&self.vocabulary);
        for line in lines {
            builder.push_line(&normalize_line(line.as_ref()));
        }
        let mut forest = builder.finish();
        sort_forest(&mut forest);
        debug!(
            roots = forest.len(),
            sections = count_sections(&forest),
            "parsed document"
        );
        forest
    }

    /// Parse a whole document. A leading BOM is tolerated.
    pub fn parse_str(&self, source: &str) -> Forest {
        self.parse_lines(source.lines())
    }
}

/// Parse a document with the built-in vocabulary.
pub fn parse_document(source: &str) -> Forest {
    SectionParser::new().parse_str(source)
}

/// Parse pre-split lines with the built-in vocabulary.
pub fn parse_lines<I, S>(lines: I) -> Forest
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SectionParser::new().parse_lines(lines)
}
