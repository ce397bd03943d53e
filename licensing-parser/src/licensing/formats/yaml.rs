//! YAML rendering of the interchange records

use crate::licensing::ast::SectionNode;
use crate::licensing::matching::MatchReport;

use super::registry::{FormatError, Formatter};

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, forest: &[SectionNode]) -> Result<String, FormatError> {
        serde_yaml::to_string(forest).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn serialize_report(&self, report: &MatchReport) -> Result<String, FormatError> {
        serde_yaml::to_string(report).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Section tree interchange records as YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::licensing::ast::{Forest, NumberingContext};

    #[test]
    fn test_yaml_reads_back() {
        let forest = vec![SectionNode::new("5.1", NumberingContext::AnnexB)];
        let yaml = YamlFormatter.serialize(&forest).unwrap();
        assert!(yaml.contains("context: annex-B"), "{yaml}");
        let back: Forest = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, forest);
    }
}
