//! Per-node relevance
//!
//! Evaluation order:
//!
//! 1. the seat carve-out: a reserved section is never relevant to small venues;
//! 2. structured gates: declared area/seat bounds and facility flags must agree with
//!    the profile, otherwise the node is excluded outright;
//! 3. heuristic signals read from the node text: an area phrase satisfied by the
//!    profile's area, and a facility term for each facility the profile has.
//!
//! A node that survives the gates is relevant when it raised at least one signal or
//! declares a structured constraint (which it has then satisfied). Gates are
//! inclusive; heuristic area phrases keep their strictness.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::licensing::ast::{NumberingContext, SectionNode};
use crate::licensing::bounds::area_constraints;
use crate::licensing::vocabulary::Vocabulary;

use super::profile::BusinessProfile;

/// Sections withheld from venues below a seat threshold.
///
/// `context` narrows the carve-out to one numbering context; unset means the
/// reserved id is withheld wherever it appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatCarveOut {
    pub enabled: bool,
    pub id: String,
    pub context: Option<NumberingContext>,
    pub seat_threshold: u32,
}

impl Default for SeatCarveOut {
    fn default() -> Self {
        SeatCarveOut {
            enabled: true,
            id: "3.5".to_string(),
            context: None,
            seat_threshold: 200,
        }
    }
}

impl SeatCarveOut {
    pub fn applies(&self, profile: &BusinessProfile, node: &SectionNode) -> bool {
        self.enabled
            && self.context.map_or(true, |context| node.context == context)
            && node.id == self.id
            && profile.seat_count() < self.seat_threshold
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    pub carve_out: SeatCarveOut,
}

/// A structured field that rejected the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    MinArea,
    MaxArea,
    MinSeats,
    MaxSeats,
    Gas,
    Meat,
    Delivery,
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gate::MinArea => "min_area_sqm",
            Gate::MaxArea => "max_area_sqm",
            Gate::MinSeats => "min_seats",
            Gate::MaxSeats => "max_seats",
            Gate::Gas => "requires_gas",
            Gate::Meat => "serves_meat",
            Gate::Delivery => "offers_delivery",
        };
        f.write_str(name)
    }
}

/// What made a node relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    AreaPhrase,
    GasTerm,
    MeatTerm,
    DeliveryTerm,
    StructuredConstraint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    CarvedOut,
    Excluded(Gate),
    Relevant(Vec<Signal>),
    NoSignal,
}

impl Verdict {
    pub fn is_relevant(&self) -> bool {
        matches!(self, Verdict::Relevant(_))
    }
}

fn within<T: PartialOrd + Copy>(value: T, min: Option<T>, max: Option<T>) -> Result<(), bool> {
    if min.is_some_and(|m| value < m) {
        return Err(true);
    }
    if max.is_some_and(|m| value > m) {
        return Err(false);
    }
    Ok(())
}

fn flag_agrees(declared: Option<bool>, actual: bool) -> bool {
    declared.map_or(true, |d| d == actual)
}

/// First structured field the profile fails, if any.
pub fn failed_gate(profile: &BusinessProfile, node: &SectionNode) -> Option<Gate> {
    if let Err(below) = within(profile.area(), node.min_area_sqm, node.max_area_sqm) {
        return Some(if below { Gate::MinArea } else { Gate::MaxArea });
    }
    if let Err(below) = within(profile.seat_count(), node.min_seats, node.max_seats) {
        return Some(if below { Gate::MinSeats } else { Gate::MaxSeats });
    }
    if !flag_agrees(node.requires_gas, profile.uses_gas()) {
        return Some(Gate::Gas);
    }
    if !flag_agrees(node.serves_meat, profile.serves_meat()) {
        return Some(Gate::Meat);
    }
    if !flag_agrees(node.offers_delivery, profile.offers_delivery()) {
        return Some(Gate::Delivery);
    }
    None
}

/// Heuristic signals the node text raises for this profile.
pub fn text_signals(
    profile: &BusinessProfile,
    node: &SectionNode,
    vocabulary: &Vocabulary,
) -> Vec<Signal> {
    let text = node.text.as_str();
    let mut signals = Vec::new();

    let phrases = area_constraints(text, vocabulary);
    if !phrases.is_empty() && phrases.iter().all(|c| c.admits(profile.area())) {
        signals.push(Signal::AreaPhrase);
    }
    if profile.uses_gas() && vocabulary.gas.is_match(text) {
        signals.push(Signal::GasTerm);
    }
    if profile.serves_meat() && vocabulary.meat.is_match(text) {
        signals.push(Signal::MeatTerm);
    }
    if profile.offers_delivery() && vocabulary.delivery.is_match(text) {
        signals.push(Signal::DeliveryTerm);
    }
    signals
}

pub fn evaluate(
    profile: &BusinessProfile,
    node: &SectionNode,
    vocabulary: &Vocabulary,
    policy: &MatchPolicy,
) -> Verdict {
    if policy.carve_out.applies(profile, node) {
        return Verdict::CarvedOut;
    }
    if let Some(gate) = failed_gate(profile, node) {
        return Verdict::Excluded(gate);
    }
    let mut signals = text_signals(profile, node, vocabulary);
    if node.has_structured_constraint() {
        signals.push(Signal::StructuredConstraint);
    }
    if signals.is_empty() {
        Verdict::NoSignal
    } else {
        Verdict::Relevant(signals)
    }
}
