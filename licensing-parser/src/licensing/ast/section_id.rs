//! Dotted numeric section keys (`3.2.1`)

use std::cmp::Ordering;
use std::fmt;

use super::section::MAX_LEVEL;

/// A parsed dotted key. Components compare as integers, so `3.10` sorts after `3.9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionId {
    components: Vec<u32>,
}

impl SectionId {
    /// Parse a dotted key. Every component must be a non-empty run of ASCII digits.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().trim_end_matches('.');
        if raw.is_empty() {
            return None;
        }
        let components = raw
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    part.parse::<u32>().ok()
                }
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { components })
    }

    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// Number of components.
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// Nesting level: depth capped at [`MAX_LEVEL`].
    pub fn level(&self) -> u8 {
        self.depth().clamp(1, MAX_LEVEL as usize) as u8
    }

    /// The key made of the first `depth` components, if that is a strict prefix.
    pub fn prefix(&self, depth: usize) -> Option<SectionId> {
        if depth == 0 || depth >= self.depth() {
            return None;
        }
        Some(Self {
            components: self.components[..depth].to_vec(),
        })
    }

    /// The immediate numeric parent (`3.2.1` → `3.2`).
    pub fn parent(&self) -> Option<SectionId> {
        self.prefix(self.depth().saturating_sub(1))
    }

    /// True when `other` equals this key or lies beneath it (`3.2` covers `3.2.1`).
    pub fn covers(&self, other: &SectionId) -> bool {
        other.components.starts_with(&self.components)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.components {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
            first = false;
        }
        Ok(())
    }
}

impl PartialOrd for SectionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SectionId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components.cmp(&other.components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id = SectionId::parse("3.2.1").unwrap();
        assert_eq!(id.components(), &[3, 2, 1]);
        assert_eq!(id.to_string(), "3.2.1");
        assert_eq!(id.level(), 3);
    }

    #[test]
    fn test_parse_tolerates_trailing_period() {
        assert_eq!(SectionId::parse("4.").unwrap().components(), &[4]);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(SectionId::parse("4.2A").is_none());
        assert!(SectionId::parse("").is_none());
        assert!(SectionId::parse("3..1").is_none());
    }

    #[test]
    fn test_numeric_ordering() {
        let nine = SectionId::parse("3.9").unwrap();
        let ten = SectionId::parse("3.10").unwrap();
        assert!(nine < ten);
        assert!(SectionId::parse("3").unwrap() < SectionId::parse("3.1").unwrap());
    }

    #[test]
    fn test_prefix_and_parent() {
        let id = SectionId::parse("3.2.1").unwrap();
        assert_eq!(id.parent().unwrap().to_string(), "3.2");
        assert_eq!(id.prefix(1).unwrap().to_string(), "3");
        assert!(id.prefix(3).is_none());
        assert!(SectionId::parse("3").unwrap().parent().is_none());
    }

    #[test]
    fn test_level_is_capped() {
        let id = SectionId::parse("1.2.3.4.5.6.7").unwrap();
        assert_eq!(id.depth(), 7);
        assert_eq!(id.level(), 6);
    }

    #[test]
    fn test_covers() {
        let parent = SectionId::parse("3.2").unwrap();
        assert!(parent.covers(&SectionId::parse("3.2").unwrap()));
        assert!(parent.covers(&SectionId::parse("3.2.1").unwrap()));
        assert!(!parent.covers(&SectionId::parse("3.20").unwrap()));
        assert!(!parent.covers(&SectionId::parse("3").unwrap()));
    }
}
