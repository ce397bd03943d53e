//! Per-node bound extraction

use crate::licensing::ast::SectionNode;
use crate::licensing::vocabulary::Vocabulary;

use super::rules::{area_constraints, fold};

/// Structured bounds and facility flags derived from a node body.
///
/// Flags are `Some(true)` or `None`: absence of a term means "no constraint", never
/// "excluded".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bounds {
    pub min_area_sqm: Option<f64>,
    pub max_area_sqm: Option<f64>,
    pub min_seats: Option<u32>,
    pub max_seats: Option<u32>,
    pub requires_gas: Option<bool>,
    pub serves_meat: Option<bool>,
    pub offers_delivery: Option<bool>,
}

impl Bounds {
    pub fn is_empty(&self) -> bool {
        *self == Bounds::default()
    }

    pub fn apply_to(&self, node: &mut SectionNode) {
        node.min_area_sqm = self.min_area_sqm;
        node.max_area_sqm = self.max_area_sqm;
        node.min_seats = self.min_seats;
        node.max_seats = self.max_seats;
        node.requires_gas = self.requires_gas;
        node.serves_meat = self.serves_meat;
        node.offers_delivery = self.offers_delivery;
    }
}

fn flag(present: bool) -> Option<bool> {
    present.then_some(true)
}

pub fn extract_bounds(text: &str, vocabulary: &Vocabulary) -> Bounds {
    let (min_area_sqm, max_area_sqm) = fold(&area_constraints(text, vocabulary));

    let (min_seats, max_seats) = vocabulary
        .seat_counts(text)
        .fold((None, None), |(lo, hi): (Option<u32>, Option<u32>), n| {
            (
                Some(lo.map_or(n, |v| v.min(n))),
                Some(hi.map_or(n, |v| v.max(n))),
            )
        });

    Bounds {
        min_area_sqm,
        max_area_sqm,
        min_seats,
        max_seats,
        requires_gas: flag(vocabulary.gas.is_match(text)),
        serves_meat: flag(vocabulary.meat.is_match(text)),
        offers_delivery: flag(vocabulary.delivery.is_match(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::licensing::ast::NumberingContext;
    use crate::licensing::vocabulary::DEFAULT_VOCABULARY;

    #[test]
    fn test_gas_and_area() {
        let bounds = extract_bounds("דרישה לגז בשטח מעל 100 מ\"ר", &DEFAULT_VOCABULARY);
        assert_eq!(bounds.requires_gas, Some(true));
        assert_eq!(bounds.min_area_sqm, Some(100.0));
        assert_eq!(bounds.max_area_sqm, None);
        assert_eq!(bounds.serves_meat, None);
        assert_eq!(bounds.offers_delivery, None);
    }

    #[test]
    fn test_seat_range_uses_literal_values() {
        let bounds = extract_bounds(
            "עסק עם 200 מקומות ישיבה או יותר, עד 500 מושבים",
            &DEFAULT_VOCABULARY,
        );
        assert_eq!(bounds.min_seats, Some(200));
        assert_eq!(bounds.max_seats, Some(500));
        assert_eq!(bounds.min_area_sqm, None);
    }

    #[test]
    fn test_meat_and_delivery_flags() {
        let bounds = extract_bounds("הגשת בשר ומשלוחים לבית הלקוח", &DEFAULT_VOCABULARY);
        assert_eq!(bounds.serves_meat, Some(true));
        assert_eq!(bounds.offers_delivery, Some(true));
        assert_eq!(bounds.requires_gas, None);
    }

    #[test]
    fn test_plain_text_has_no_bounds() {
        assert!(extract_bounds("הוראות כלליות לעסק", &DEFAULT_VOCABULARY).is_empty());
    }

    #[test]
    fn test_apply_to_node() {
        let mut node = SectionNode::new("3.2.1", NumberingContext::Normal);
        extract_bounds("שימוש בגז", &DEFAULT_VOCABULARY).apply_to(&mut node);
        assert_eq!(node.requires_gas, Some(true));
        assert!(node.has_structured_constraint());
    }
}
