//! Comparative area phrase rules
//!
//! The rules are data: an ordered table of `(Comparison, pattern)` pairs, compiled
//! once. Patterns are written with three placeholders expanded at compile time:
//!
//! - `{B}` a word start, optionally carrying a `ו`/`ש` proclitic
//! - `{N}` the captured number (thousands separators and decimals allowed)
//! - `{U}` an optional area unit between a number and a postfix keyword
//!
//! Table order matters. Negated forms ("not more than") come before the forms they
//! contain ("more than"), and a span claimed by an earlier rule is not matched again
//! by a later one.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::licensing::vocabulary::Vocabulary;

/// The direction a phrase constrains the area in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    AtLeast,
    LessThan,
    AtMost,
}

impl Comparison {
    /// True for comparisons that set a minimum.
    pub fn is_lower_bound(self) -> bool {
        matches!(self, Comparison::GreaterThan | Comparison::AtLeast)
    }

    /// Whether `value` satisfies `comparison bound`.
    pub fn admits(self, value: f64, bound: f64) -> bool {
        match self {
            Comparison::GreaterThan => value > bound,
            Comparison::AtLeast => value >= bound,
            Comparison::LessThan => value < bound,
            Comparison::AtMost => value <= bound,
        }
    }
}

/// One comparative phrase found in a text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaConstraint {
    pub comparison: Comparison,
    pub value: f64,
}

impl AreaConstraint {
    pub fn admits(&self, area: f64) -> bool {
        self.comparison.admits(area, self.value)
    }
}

const WORD_START: &str = r"(?:^|[^\p{L}])[וש]?";
const NUMBER: &str = r"\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?";
const AREA_UNIT: &str =
    r#"(?:\s*(?:מ"ר|מטר(?:ים)?(?:\s+רבוע(?:ים)?)?|sqm|m2|square\s+met(?:er|re)s?))?"#;

const BETWEEN_PATTERNS: &[&str] = &[
    r"{B}בין\s+(?P<a>{N}){U}\s*(?:ל|עד|ו)[-\s]?\s*(?P<b>{N})",
    r"(?i)\bbetween\s+(?P<a>{N}){U}\s*(?:and|to|-)\s*(?P<b>{N})",
];

const AREA_RULE_PATTERNS: &[(Comparison, &str)] = &[
    // negated forms first
    (
        Comparison::AtMost,
        r"{B}(?:אינו|אינה|לא)\s+(?:עולה|יעלה|יותר)\s+(?:על|מ)[-\s]?\s*(?P<n>{N})",
    ),
    (
        Comparison::AtMost,
        r"(?i)\b(?:not|no)\s+(?:more\s+than|greater\s+than|exceeding)\s+(?P<n>{N})",
    ),
    (
        Comparison::AtLeast,
        r"{B}לא\s+(?:פחות|קטן|קטנה)\s+מ[-\s]?\s*(?P<n>{N})",
    ),
    (
        Comparison::AtLeast,
        r"(?i)\b(?:not|no)\s+(?:less|smaller)\s+than\s+(?P<n>{N})",
    ),
    // greater than
    (
        Comparison::GreaterThan,
        r"{B}(?:מעל(?:\s+ל)?|העולה\s+על|עולה\s+על|יותר\s+מ|גדול\s+מ|גדולה\s+מ)[-\s]?\s*(?P<n>{N})",
    ),
    (
        Comparison::GreaterThan,
        r"(?i)\b(?:greater|more|larger|bigger)\s+than\s+(?P<n>{N})",
    ),
    (
        Comparison::GreaterThan,
        r"(?i)\b(?:over|above|exceeding)\s+(?P<n>{N})",
    ),
    // at least
    (
        Comparison::AtLeast,
        r"{B}(?:לפחות|מינימום(?:\s+של)?)[-\s]?\s*(?P<n>{N})",
    ),
    (
        Comparison::AtLeast,
        r"(?i)\b(?:at\s+least|minimum(?:\s+of)?)\s+(?P<n>{N})",
    ),
    (Comparison::AtLeast, r"(?P<n>{N}){U}\s+ומעלה"),
    (
        Comparison::AtLeast,
        r"(?i)(?P<n>{N}){U}\s+or\s+(?:more|above|over)",
    ),
    // less than
    (
        Comparison::LessThan,
        r"{B}(?:פחות\s+מ|מתחת\s+ל|קטן\s+מ|קטנה\s+מ)[-\s]?\s*(?P<n>{N})",
    ),
    (
        Comparison::LessThan,
        r"(?i)\b(?:less|smaller)\s+than\s+(?P<n>{N})",
    ),
    (Comparison::LessThan, r"(?i)\b(?:under|below)\s+(?P<n>{N})"),
    // at most
    (
        Comparison::AtMost,
        r"{B}(?:עד|לכל\s+היותר|מקסימום(?:\s+של)?)[-\s]?\s*(?P<n>{N})",
    ),
    (
        Comparison::AtMost,
        r"(?i)\b(?:at\s+most|up\s+to|maximum(?:\s+of)?)\s+(?P<n>{N})",
    ),
    (Comparison::AtMost, r"(?P<n>{N}){U}\s+ומטה"),
    (
        Comparison::AtMost,
        r"(?i)(?P<n>{N}){U}\s+or\s+(?:less|below|under)",
    ),
];

fn expand(pattern: &str) -> String {
    pattern
        .replace("{B}", WORD_START)
        .replace("{N}", NUMBER)
        .replace("{U}", AREA_UNIT)
}

static BETWEEN_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    BETWEEN_PATTERNS
        .iter()
        .map(|pattern| Regex::new(&expand(pattern)).unwrap())
        .collect()
});

static AREA_RULES: Lazy<Vec<(Comparison, Regex)>> = Lazy::new(|| {
    AREA_RULE_PATTERNS
        .iter()
        .map(|(comparison, pattern)| (*comparison, Regex::new(&expand(pattern)).unwrap()))
        .collect()
});

/// Parse a captured number, dropping thousands separators.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse().ok()
}

/// True when the number ending at `end` counts seats rather than area.
fn counts_seats(text: &str, end: usize, vocabulary: &Vocabulary) -> bool {
    vocabulary.starts_with_seat_noun(&text[end..])
}

fn overlaps(taken: &[Range<usize>], span: &Range<usize>) -> bool {
    taken
        .iter()
        .any(|t| t.start < span.end && span.start < t.end)
}

/// `between X and Y` phrase, as `(low, high)`.
pub fn between(text: &str, vocabulary: &Vocabulary) -> Option<(f64, f64)> {
    BETWEEN_RULES.iter().find_map(|rule| {
        rule.captures_iter(text).find_map(|caps| {
            let a = caps.name("a")?;
            let b = caps.name("b")?;
            if counts_seats(text, a.end(), vocabulary) || counts_seats(text, b.end(), vocabulary)
            {
                return None;
            }
            let (a, b) = (parse_number(a.as_str())?, parse_number(b.as_str())?);
            Some((a.min(b), a.max(b)))
        })
    })
}

/// Every comparative phrase in `text`, in table order.
pub fn comparisons(text: &str, vocabulary: &Vocabulary) -> Vec<AreaConstraint> {
    let mut taken: Vec<Range<usize>> = Vec::new();
    let mut found = Vec::new();
    for (comparison, rule) in AREA_RULES.iter() {
        for caps in rule.captures_iter(text) {
            let (Some(whole), Some(number)) = (caps.get(0), caps.name("n")) else {
                continue;
            };
            let span = whole.range();
            if overlaps(&taken, &span) || counts_seats(text, number.end(), vocabulary) {
                continue;
            }
            if let Some(value) = parse_number(number.as_str()) {
                taken.push(span);
                found.push(AreaConstraint {
                    comparison: *comparison,
                    value,
                });
            }
        }
    }
    found
}

/// Area constraints stated by `text`.
///
/// Empty unless the text mentions an area term. A `between` phrase short-circuits the
/// comparative rules and yields an inclusive pair.
pub fn area_constraints(text: &str, vocabulary: &Vocabulary) -> Vec<AreaConstraint> {
    if !vocabulary.area.is_match(text) {
        return Vec::new();
    }
    if let Some((low, high)) = between(text, vocabulary) {
        return vec![
            AreaConstraint {
                comparison: Comparison::AtLeast,
                value: low,
            },
            AreaConstraint {
                comparison: Comparison::AtMost,
                value: high,
            },
        ];
    }
    comparisons(text, vocabulary)
}

/// Fold constraints into `(min, max)`; the most restrictive bound wins on each side.
pub fn fold(constraints: &[AreaConstraint]) -> (Option<f64>, Option<f64>) {
    constraints
        .iter()
        .fold((None, None), |(min, max): (Option<f64>, Option<f64>), c| {
            if c.comparison.is_lower_bound() {
                (Some(min.map_or(c.value, |m| m.max(c.value))), max)
            } else {
                (min, Some(max.map_or(c.value, |m| m.min(c.value))))
            }
        })
}
