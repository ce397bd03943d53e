//! JSON interchange format
//!
//! The forest serializes as an array of node records (see [`SectionNode`]) with unset
//! optional fields written as `null`. [`forest_from_json`] reads the same shape back.

use crate::licensing::ast::{Forest, SectionNode};
use crate::licensing::matching::MatchReport;

use super::registry::{FormatError, Formatter};

pub fn to_json_string(forest: &[SectionNode]) -> Result<String, FormatError> {
    serde_json::to_string_pretty(forest).map_err(|e| FormatError::SerializationError(e.to_string()))
}

/// Load a forest saved by the `json` format.
pub fn forest_from_json(source: &str) -> Result<Forest, FormatError> {
    serde_json::from_str(source).map_err(|e| FormatError::DeserializationError(e.to_string()))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, forest: &[SectionNode]) -> Result<String, FormatError> {
        to_json_string(forest)
    }

    fn serialize_report(&self, report: &MatchReport) -> Result<String, FormatError> {
        serde_json::to_string_pretty(report)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Section tree interchange records (pretty-printed JSON)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::licensing::ast::NumberingContext;

    #[test]
    fn test_round_trip_preserves_everything() {
        let mut child = SectionNode::new("4.1.1", NumberingContext::AnnexA).with_text("שורה");
        child.group_level = Some("4.2".into());
        child.min_area_sqm = Some(12.5);
        child.requires_gas = Some(false);
        let mut root = SectionNode::new("4.1", NumberingContext::AnnexA).with_children(vec![child]);
        root.title = "דרישות תברואה".into();
        let forest = vec![root];

        let json = to_json_string(&forest).unwrap();
        assert_eq!(forest_from_json(&json).unwrap(), forest);
    }

    #[test]
    fn test_reads_legacy_records() {
        let json = r#"[{"id": "4.1", "level": 2, "text": "x", "context": "annex4", "children": []}]"#;
        let forest = forest_from_json(json).unwrap();
        assert_eq!(forest[0].context, NumberingContext::AnnexA);
        assert_eq!(forest[0].title, "");
        assert_eq!(forest[0].min_seats, None);
    }

    #[test]
    fn test_invalid_json_is_a_format_error() {
        assert!(matches!(
            forest_from_json("{"),
            Err(FormatError::DeserializationError(_))
        ));
    }

    #[test]
    fn test_report_shape() {
        let report = MatchReport {
            total_sections: 3,
            matched_sections: 1,
            matched: vec![SectionNode::new("2.1", NumberingContext::Normal)],
        };
        let json = JsonFormatter.serialize_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_sections"], 3);
        assert_eq!(value["matched"][0]["id"], "2.1");
    }
}
