//! Section-number recognition and multi-header line splitting
//!
//! A header token is a dotted numeric key (`3.2.1`, optionally followed by a period)
//! that starts the line or follows whitespace and is followed by whitespace or the
//! end of the line. Line-initial single-component keys are headers only in the
//! `N. body` form.
//!
//! Numbers that read as quantities are skipped. Inside running text a key followed by
//! a measurement unit or seat noun is a quantity (`2.5 מ"ר`, `1.5 מקומות`). At the
//! start of a line only a two-component key followed by a measurement unit is, so a
//! section titled with a seat noun (`3.2 מקומות ישיבה`) still opens a node.
//!
//! A physical line may hold several headers when a whole sub-hierarchy was printed
//! on one line. [`split_headers`] turns such a line into one segment per header, each
//! carrying the body text up to the next header, so downstream stages see a simple
//! one-header-per-segment stream.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::licensing::ast::SectionId;
use crate::licensing::vocabulary::Vocabulary;

/// Two to six components of one to three digits each.
static EMBEDDED_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,3}(?:\.\d{1,3}){1,5}\.?").unwrap());

/// Line-initial chapter-level header: `3. body`.
static LEVEL_ONE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,3})\.(?:\s+|$)").unwrap());

/// One logical line of the work stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// A recognized header and the body text that follows it on the same line.
    Header(HeaderLine),
    /// Plain text: continuation lines, sentinel phrases, front matter.
    Text(String),
}

impl Segment {
    /// The segment rendered back as a line.
    pub fn as_line(&self) -> String {
        match self {
            Segment::Header(header) if header.body.is_empty() => header.id.to_string(),
            Segment::Header(header) => format!("{} {}", header.id, header.body),
            Segment::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLine {
    pub id: SectionId,
    pub body: String,
}

impl HeaderLine {
    pub fn level(&self) -> u8 {
        self.id.level()
    }
}

struct Candidate {
    start: usize,
    end: usize,
    id: SectionId,
}

fn preceded_by_boundary(line: &str, start: usize) -> bool {
    line[..start]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace)
}

fn followed_by_boundary(line: &str, end: usize) -> bool {
    line[end..].chars().next().map_or(true, char::is_whitespace)
}

fn reads_as_quantity(start: usize, id: &SectionId, body: &str, vocabulary: &Vocabulary) -> bool {
    if start > 0 {
        return vocabulary.starts_with_quantity_unit(body);
    }
    id.depth() == 2 && vocabulary.starts_with_measurement_unit(body)
}

fn find_candidates(line: &str, vocabulary: &Vocabulary) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for found in EMBEDDED_HEADER.find_iter(line) {
        if !preceded_by_boundary(line, found.start()) || !followed_by_boundary(line, found.end()) {
            continue;
        }
        let body = line[found.end()..].trim_start();
        if found.start() > 0 && body.is_empty() {
            continue;
        }
        let Some(id) = SectionId::parse(found.as_str()) else {
            continue;
        };
        if reads_as_quantity(found.start(), &id, body, vocabulary) {
            continue;
        }
        candidates.push(Candidate {
            start: found.start(),
            end: found.end(),
            id,
        });
    }

    let starts_at_zero = candidates.first().is_some_and(|c| c.start == 0);
    if !starts_at_zero {
        if let Some(caps) = LEVEL_ONE_HEADER.captures(line) {
            let whole = caps.get(0).map_or(0, |m| m.end());
            if let Some(id) = caps.get(1).and_then(|m| SectionId::parse(m.as_str())) {
                candidates.insert(
                    0,
                    Candidate {
                        start: 0,
                        end: whole,
                        id,
                    },
                );
            }
        }
    }

    candidates
}

/// Split a normalized line into segments.
///
/// A line without header tokens comes back as a single [`Segment::Text`]. Text ahead
/// of the first header becomes its own text segment.
pub fn split_headers(line: &str, vocabulary: &Vocabulary) -> Vec<Segment> {
    let candidates = find_candidates(line, vocabulary);
    if candidates.is_empty() {
        return vec![Segment::Text(line.to_string())];
    }

    let mut segments = Vec::with_capacity(candidates.len() + 1);
    let lead = line[..candidates[0].start].trim();
    if !lead.is_empty() {
        segments.push(Segment::Text(lead.to_string()));
    }

    for (index, candidate) in candidates.iter().enumerate() {
        let body_end = candidates
            .get(index + 1)
            .map_or(line.len(), |next| next.start);
        let body = line[candidate.end..body_end].trim();
        segments.push(Segment::Header(HeaderLine {
            id: candidate.id.clone(),
            body: body.to_string(),
        }));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::licensing::vocabulary::DEFAULT_VOCABULARY;

    fn split(line: &str) -> Vec<Segment> {
        split_headers(line, &DEFAULT_VOCABULARY)
    }

    fn header(id: &str, body: &str) -> Segment {
        Segment::Header(HeaderLine {
            id: SectionId::parse(id).unwrap(),
            body: body.to_string(),
        })
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(
            split("טקסט ללא מספור"),
            vec![Segment::Text("טקסט ללא מספור".into())]
        );
    }

    #[test]
    fn test_single_header() {
        assert_eq!(
            split("3.2.1 דרישה לגז"),
            vec![header("3.2.1", "דרישה לגז")]
        );
    }

    #[test]
    fn test_two_headers_on_one_line() {
        assert_eq!(
            split("2.1 טקסט א 2.2 טקסט ב"),
            vec![header("2.1", "טקסט א"), header("2.2", "טקסט ב")]
        );
    }

    #[test]
    fn test_trailing_period_on_key() {
        assert_eq!(split("4.1. דרישות"), vec![header("4.1", "דרישות")]);
    }

    #[test]
    fn test_lead_text_becomes_own_segment() {
        assert_eq!(
            split("המשך משפט קודם 3.4 סעיף חדש"),
            vec![
                Segment::Text("המשך משפט קודם".into()),
                header("3.4", "סעיף חדש")
            ]
        );
    }

    #[test]
    fn test_level_one_needs_period() {
        assert_eq!(split("3. דרישות כלליות"), vec![header("3", "דרישות כלליות")]);
        assert_eq!(
            split("3 דרישות כלליות"),
            vec![Segment::Text("3 דרישות כלליות".into())]
        );
    }

    #[test]
    fn test_quantities_are_not_headers() {
        assert_eq!(
            split("בשטח של 2.5 מ\"ר לפחות"),
            vec![Segment::Text("בשטח של 2.5 מ\"ר לפחות".into())]
        );
    }

    #[test]
    fn test_mid_line_seat_count_is_not_a_header() {
        assert_eq!(
            split("3.4 הסעדה עד 1.5 מקומות לכל מ\"ר"),
            vec![header("3.4", "הסעדה עד 1.5 מקומות לכל מ\"ר")]
        );
    }

    #[test]
    fn test_line_initial_seat_noun_title_is_a_header() {
        assert_eq!(
            split("3.2 מקומות ישיבה בעסק"),
            vec![header("3.2", "מקומות ישיבה בעסק")]
        );
        assert_eq!(split("4.1.2 מושבים"), vec![header("4.1.2", "מושבים")]);
        assert_eq!(split("5.3.1 טון פסולת"), vec![header("5.3.1", "טון פסולת")]);
    }

    #[test]
    fn test_line_initial_measurement_stays_text() {
        assert_eq!(
            split("2.5 מ\"ר לפחות"),
            vec![Segment::Text("2.5 מ\"ר לפחות".into())]
        );
    }

    #[test]
    fn test_dates_are_not_headers() {
        assert_eq!(
            split("עודכן בתאריך 18.07.2022 לפי"),
            vec![Segment::Text("עודכן בתאריך 18.07.2022 לפי".into())]
        );
    }

    #[test]
    fn test_glued_numbers_are_not_headers() {
        assert_eq!(split("v1.2 גרסה"), vec![Segment::Text("v1.2 גרסה".into())]);
    }

    #[test]
    fn test_bare_key_line() {
        assert_eq!(split("5.1"), vec![header("5.1", "")]);
    }

    #[test]
    fn test_as_line_round_trip() {
        assert_eq!(header("2.1", "טקסט").as_line(), "2.1 טקסט");
        assert_eq!(header("2.1", "").as_line(), "2.1");
    }
}
