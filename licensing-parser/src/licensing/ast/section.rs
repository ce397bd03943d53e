//! Section node - one numbered clause of the source document

use std::fmt;

use serde::{Deserialize, Serialize};

use super::section_id::SectionId;

/// Deepest nesting level a node can have.
pub const MAX_LEVEL: u8 = 6;

/// The numbering regime a header was read under.
///
/// The same numeric key means different things in each context, so `(context, id)` is
/// the identity of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum NumberingContext {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "annex-A", alias = "annex4")]
    AnnexA,
    #[serde(rename = "annex-B", alias = "annex5")]
    AnnexB,
}

impl NumberingContext {
    /// Root ordering precedence: normal, then annex-A, then annex-B.
    pub fn rank(self) -> u8 {
        match self {
            NumberingContext::Normal => 0,
            NumberingContext::AnnexA => 1,
            NumberingContext::AnnexB => 2,
        }
    }

    /// Chapter number the annex's group labels hang from (`4.x`, `5.x`).
    pub fn group_prefix(self) -> Option<u32> {
        match self {
            NumberingContext::Normal => None,
            NumberingContext::AnnexA => Some(4),
            NumberingContext::AnnexB => Some(5),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NumberingContext::Normal => "normal",
            NumberingContext::AnnexA => "annex-A",
            NumberingContext::AnnexB => "annex-B",
        }
    }
}

impl fmt::Display for NumberingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numbered section and its owned subtree.
///
/// Bound fields are tri-state: `None` means "no constraint", never "excluded".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionNode {
    pub id: String,
    pub level: u8,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub context: NumberingContext,
    #[serde(default)]
    pub group_level: Option<String>,
    #[serde(default)]
    pub min_area_sqm: Option<f64>,
    #[serde(default)]
    pub max_area_sqm: Option<f64>,
    #[serde(default)]
    pub min_seats: Option<u32>,
    #[serde(default)]
    pub max_seats: Option<u32>,
    #[serde(default)]
    pub requires_gas: Option<bool>,
    #[serde(default)]
    pub serves_meat: Option<bool>,
    #[serde(default)]
    pub offers_delivery: Option<bool>,
    #[serde(default)]
    pub children: Vec<SectionNode>,
}

impl SectionNode {
    /// Create an empty node; the level is derived from the id's depth.
    pub fn new(id: impl Into<String>, context: NumberingContext) -> Self {
        let id = id.into();
        let level = level_of(&id);
        SectionNode {
            id,
            level,
            title: String::new(),
            text: String::new(),
            context,
            group_level: None,
            min_area_sqm: None,
            max_area_sqm: None,
            min_seats: None,
            max_seats: None,
            requires_gas: None,
            serves_meat: None,
            offers_delivery: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_children(mut self, children: Vec<SectionNode>) -> Self {
        self.children = children;
        self
    }

    /// The parsed numeric key, if the id is purely numeric.
    pub fn section_id(&self) -> Option<SectionId> {
        SectionId::parse(&self.id)
    }

    /// True when the node carries any structured bound or flag.
    pub fn has_structured_constraint(&self) -> bool {
        self.min_area_sqm.is_some()
            || self.max_area_sqm.is_some()
            || self.min_seats.is_some()
            || self.max_seats.is_some()
            || self.requires_gas.is_some()
            || self.serves_meat.is_some()
            || self.offers_delivery.is_some()
    }

    /// A copy of this node without its children.
    pub fn detached(&self) -> SectionNode {
        SectionNode {
            id: self.id.clone(),
            level: self.level,
            title: self.title.clone(),
            text: self.text.clone(),
            context: self.context,
            group_level: self.group_level.clone(),
            min_area_sqm: self.min_area_sqm,
            max_area_sqm: self.max_area_sqm,
            min_seats: self.min_seats,
            max_seats: self.max_seats,
            requires_gas: self.requires_gas,
            serves_meat: self.serves_meat,
            offers_delivery: self.offers_delivery,
            children: Vec::new(),
        }
    }
}

/// Level for an id string: number of dot-separated components, capped at [`MAX_LEVEL`].
pub fn level_of(id: &str) -> u8 {
    let depth = id.trim_end_matches('.').split('.').count();
    depth.clamp(1, MAX_LEVEL as usize) as u8
}
