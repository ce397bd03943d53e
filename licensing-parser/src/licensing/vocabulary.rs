//! Document vocabulary
//!
//! Everything language-specific the parser and matcher look for lives here: sentinel
//! phrases that drive the numbering context, term lists for the facility flags, the
//! area and seat nouns used by the bound extractor, and measurement units that keep
//! quantities (`2.5 מ"ר`) from being read as section numbers.
//!
//! [`VocabularySpec`] is plain serde data with the built-in Hebrew/English defaults;
//! [`VocabularySpec::compile`] turns it into a [`Vocabulary`] of ready matchers.
//! The `licensing-config` crate layers user TOML over the same records.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::licensing::bounds::terms::{alternation, TermSet};
use crate::licensing::lexing::normalize_line;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("term list `{0}` is empty")]
    EmptyTerms(&'static str),
    #[error("marker `{0}` is empty")]
    EmptyMarker(&'static str),
    #[error("failed to compile `{name}` matcher: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// Sentinel phrases of the numbering context state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Word introducing a chapter line (`פרק 3`).
    pub chapter_word: String,
    /// Chapter that ends the front matter.
    pub first_chapter: u32,
    /// Chapter that returns the stream to the main numbering.
    pub resume_chapter: u32,
    pub annex: String,
    pub sub_annex: String,
    pub sub_annex_end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Markers {
            chapter_word: "פרק".to_string(),
            first_chapter: 1,
            resume_chapter: 5,
            annex: "נספחים".to_string(),
            sub_annex: "נספח 1 (לנספח א'".to_string(),
            sub_annex_end: "סוף נספח 1".to_string(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Serializable vocabulary configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularySpec {
    pub markers: Markers,
    /// Ids whose body is cut at the first sentence end.
    pub sentence_truncated_ids: Vec<String>,
    pub title_words: usize,
    pub area_terms: Vec<String>,
    pub seat_nouns: Vec<String>,
    pub measurement_units: Vec<String>,
    pub gas_terms: Vec<String>,
    pub meat_terms: Vec<String>,
    pub delivery_terms: Vec<String>,
}

impl Default for VocabularySpec {
    fn default() -> Self {
        VocabularySpec {
            markers: Markers::default(),
            sentence_truncated_ids: strings(&["8.5.9"]),
            title_words: 8,
            area_terms: strings(&[
                "שטח",
                "מ\"ר",
                "מטר רבוע",
                "מטרים רבועים",
                "sqm",
                "m2",
                "square meters",
            ]),
            seat_nouns: strings(&[
                "מקומות ישיבה",
                "מקומות",
                "מושבים",
                "כסאות",
                "סועדים",
                "seats",
            ]),
            measurement_units: strings(&[
                "מ\"ר",
                "מטר",
                "מטרים",
                "ס\"מ",
                "מ\"מ",
                "ק\"ג",
                "טון",
                "ליטר",
                "ליטרים",
                "דונם",
                "אחוז",
                "%",
                "sqm",
                "m",
                "cm",
                "mm",
                "kg",
            ]),
            gas_terms: strings(&["גז", "גפ\"מ", "gas", "lpg"]),
            meat_terms: strings(&["בשר", "מזון מן החי", "עוף", "meat", "poultry"]),
            delivery_terms: strings(&["משלוח", "משלוחים", "שליח", "שליחים", "delivery"]),
        }
    }
}

fn required_marker(name: &'static str, value: &str) -> Result<String, VocabularyError> {
    let normalized = normalize_line(value);
    if normalized.is_empty() {
        Err(VocabularyError::EmptyMarker(name))
    } else {
        Ok(normalized)
    }
}

fn build(name: &'static str, pattern: &str) -> Result<Regex, VocabularyError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| VocabularyError::Pattern { name, source })
}

impl VocabularySpec {
    pub fn compile(&self) -> Result<Vocabulary, VocabularyError> {
        let chapter_word = regex::escape(&required_marker(
            "chapter_word",
            &self.markers.chapter_word,
        )?);
        let annex = required_marker("annex", &self.markers.annex)?;
        let sub_annex = required_marker("sub_annex", &self.markers.sub_annex)?;
        let sub_annex_end = required_marker("sub_annex_end", &self.markers.sub_annex_end)?;

        let seat_nouns = alternation(&self.seat_nouns);
        if seat_nouns.is_empty() {
            return Err(VocabularyError::EmptyTerms("seat_nouns"));
        }
        let mut measurement = alternation(&self.measurement_units);
        if measurement.is_empty() {
            // no units configured: match nothing
            measurement = r"[^\s\S]".to_string();
        }
        let mut unit_list = self.measurement_units.clone();
        unit_list.extend(self.seat_nouns.iter().cloned());
        let units = alternation(&unit_list);

        Ok(Vocabulary {
            chapter_line: build(
                "chapter_line",
                &format!(r"^{chapter_word}\s+(\d+)(?:[^\d]|$)"),
            )?,
            chapter_mention: build(
                "chapter_mention",
                &format!(r"(?:^|\s)({chapter_word}\s+\d+)"),
            )?,
            quantity_prefix: build(
                "measurement_units",
                &format!(r"^(?:{units})(?:$|[^\p{{L}}])"),
            )?,
            measurement_prefix: build(
                "measurement_units",
                &format!(r"^(?:{measurement})(?:$|[^\p{{L}}])"),
            )?,
            seat_count: build(
                "seat_nouns",
                &format!(r"(\d{{1,3}}(?:,\d{{3}})+|\d+)\s*(?:{seat_nouns})(?:$|[^\p{{L}}])"),
            )?,
            seat_suffix: build(
                "seat_nouns",
                &format!(r"^\s*(?:{seat_nouns})(?:$|[^\p{{L}}])"),
            )?,
            area: TermSet::new("area_terms", &self.area_terms)?,
            gas: TermSet::new("gas_terms", &self.gas_terms)?,
            meat: TermSet::new("meat_terms", &self.meat_terms)?,
            delivery: TermSet::new("delivery_terms", &self.delivery_terms)?,
            first_chapter: self.markers.first_chapter,
            resume_chapter: self.markers.resume_chapter,
            annex,
            sub_annex,
            sub_annex_end,
            sentence_truncated_ids: self
                .sentence_truncated_ids
                .iter()
                .map(|id| id.trim().trim_end_matches('.').to_string())
                .collect(),
            title_words: self.title_words.max(1),
        })
    }
}

/// Compiled vocabulary shared by the builder, bound extractor and matcher.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    chapter_line: Regex,
    chapter_mention: Regex,
    quantity_prefix: Regex,
    measurement_prefix: Regex,
    seat_count: Regex,
    seat_suffix: Regex,
    pub area: TermSet,
    pub gas: TermSet,
    pub meat: TermSet,
    pub delivery: TermSet,
    pub first_chapter: u32,
    pub resume_chapter: u32,
    pub annex: String,
    pub sub_annex: String,
    pub sub_annex_end: String,
    sentence_truncated_ids: HashSet<String>,
    pub title_words: usize,
}

/// The built-in vocabulary.
pub static DEFAULT_VOCABULARY: Lazy<Vocabulary> = Lazy::new(|| {
    VocabularySpec::default()
        .compile()
        .expect("built-in vocabulary compiles")
});

impl Default for Vocabulary {
    fn default() -> Self {
        DEFAULT_VOCABULARY.clone()
    }
}

impl Vocabulary {
    /// Chapter number when `line` is a chapter line (`פרק 5`, `פרק 5 - סיום`).
    ///
    /// Table-of-contents entries (dot leaders before a page number) are not chapter lines.
    pub fn chapter_number(&self, line: &str) -> Option<u32> {
        if line.contains("...") || line.contains('…') {
            return None;
        }
        self.chapter_line
            .captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Byte offset of the first chapter-line marker inside running text.
    pub fn chapter_mention(&self, text: &str) -> Option<usize> {
        self.chapter_mention
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.start())
    }

    /// True when `body` opens with a measurement unit or seat noun.
    pub fn starts_with_quantity_unit(&self, body: &str) -> bool {
        self.quantity_prefix.is_match(body)
    }

    /// True when `body` opens with a measurement unit. Seat nouns do not count.
    pub fn starts_with_measurement_unit(&self, body: &str) -> bool {
        self.measurement_prefix.is_match(body)
    }

    /// True when `rest` (text right after a number) opens with a seat noun.
    pub fn starts_with_seat_noun(&self, rest: &str) -> bool {
        self.seat_suffix.is_match(rest)
    }

    /// Every integer immediately followed by a seat noun.
    pub fn seat_counts<'a>(&'a self, text: &'a str) -> impl Iterator<Item = u32> + 'a {
        self.seat_count.captures_iter(text).filter_map(|caps| {
            caps.get(1)
                .and_then(|m| m.as_str().replace(',', "").parse().ok())
        })
    }

    pub fn truncates_at_sentence(&self, id: &str) -> bool {
        self.sentence_truncated_ids.contains(id)
    }
}
