//! Curated sample documents
//!
//! The sample files live in `docs/samples/` and are embedded at compile time, so tests
//! never depend on the working directory. Each one exercises a specific part of the
//! parser:
//!
//! - `full_specification`: front matter, chapter headings, normal numbering, both
//!   annexes, the skipped region after the sub-annex, the resume chapter and the
//!   sentence-truncated legacy section
//! - `multi_header_lines`: several headers printed on one physical line
//! - `orphans`: sections whose parent is missing or appears later
//! - `front_matter_only`: a table of contents with no body

use crate::licensing::ast::Forest;
use crate::licensing::loader::DocumentLoader;
use crate::licensing::pipeline::parse_document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    FullSpecification,
    MultiHeaderLines,
    Orphans,
    FrontMatterOnly,
}

impl Sample {
    pub const ALL: [Sample; 4] = [
        Sample::FullSpecification,
        Sample::MultiHeaderLines,
        Sample::Orphans,
        Sample::FrontMatterOnly,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Sample::FullSpecification => "full_specification",
            Sample::MultiHeaderLines => "multi_header_lines",
            Sample::Orphans => "orphans",
            Sample::FrontMatterOnly => "front_matter_only",
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            Sample::FullSpecification => {
                include_str!("../../../docs/samples/full_specification.txt")
            }
            Sample::MultiHeaderLines => {
                include_str!("../../../docs/samples/multi_header_lines.txt")
            }
            Sample::Orphans => include_str!("../../../docs/samples/orphans.txt"),
            Sample::FrontMatterOnly => include_str!("../../../docs/samples/front_matter_only.txt"),
        }
    }

    pub fn lines(self) -> Vec<&'static str> {
        self.source().lines().collect()
    }

    pub fn loader(self) -> DocumentLoader {
        DocumentLoader::from_string(self.source())
    }

    /// Parse with the built-in vocabulary.
    pub fn parse(self) -> Forest {
        parse_document(self.source())
    }
}

/// Shorthand accessors, mirroring the sample file names.
pub struct Samples;

impl Samples {
    pub fn full_specification() -> Forest {
        Sample::FullSpecification.parse()
    }

    pub fn multi_header_lines() -> Forest {
        Sample::MultiHeaderLines.parse()
    }

    pub fn orphans() -> Forest {
        Sample::Orphans.parse()
    }

    pub fn front_matter_only() -> Forest {
        Sample::FrontMatterOnly.parse()
    }
}
