//! Treeviz formatter for section forests
//!
//! One line per node, nesting drawn with box connectors, which makes a parsed
//! document quick to scan:
//!
//!     ⧉ 4 sections
//!     ├─ § 2.1 דרישות כלליות
//!     │ └─ § 2.1.1 תאורה
//!     └─ Ⓐ 4.1 דרישות תברואה
//!       └─ Ⓐ 4.1.1 ניקיון
//!
//! Icons
//!     Document: ⧉
//!     Section, normal numbering: §
//!     Section, annex-A: Ⓐ
//!     Section, annex-B: Ⓑ
//!
//! Labels are `<id> <title>`, truncated to 30 characters. The `show-bounds` parameter
//! appends the node's structured constraints (`[gas area≥100]`).

use std::collections::HashMap;

use crate::licensing::ast::{count_sections, NumberingContext, SectionNode};

use super::registry::{FormatError, Formatter};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(context: NumberingContext) -> &'static str {
    match context {
        NumberingContext::Normal => "§",
        NumberingContext::AnnexA => "Ⓐ",
        NumberingContext::AnnexB => "Ⓑ",
    }
}

fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn bounds_summary(node: &SectionNode) -> String {
    let mut parts = Vec::new();
    if let Some(min) = node.min_area_sqm {
        parts.push(format!("area≥{}", fmt_number(min)));
    }
    if let Some(max) = node.max_area_sqm {
        parts.push(format!("area≤{}", fmt_number(max)));
    }
    if let Some(min) = node.min_seats {
        parts.push(format!("seats≥{min}"));
    }
    if let Some(max) = node.max_seats {
        parts.push(format!("seats≤{max}"));
    }
    for (flag, name) in [
        (node.requires_gas, "gas"),
        (node.serves_meat, "meat"),
        (node.offers_delivery, "delivery"),
    ] {
        match flag {
            Some(true) => parts.push(name.to_string()),
            Some(false) => parts.push(format!("no-{name}")),
            None => {}
        }
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" [{}]", parts.join(" "))
    }
}

fn label(node: &SectionNode) -> String {
    if node.title.is_empty() {
        node.id.clone()
    } else {
        format!("{} {}", node.id, node.title)
    }
}

fn format_node(
    node: &SectionNode,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    show_bounds: bool,
) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let bounds = if show_bounds {
        bounds_summary(node)
    } else {
        String::new()
    };

    output.push_str(&format!(
        "{}{} {} {}{}\n",
        prefix,
        connector,
        get_icon(node.context),
        truncate(&label(node), 30),
        bounds
    ));

    if !node.children.is_empty() {
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let child_count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            output.push_str(&format_node(child, &child_prefix, i, child_count, show_bounds));
        }
    }

    output
}

pub fn to_treeviz_str(forest: &[SectionNode]) -> String {
    to_treeviz_str_with_params(forest, &HashMap::new())
}

pub fn to_treeviz_str_with_params(
    forest: &[SectionNode],
    params: &HashMap<String, String>,
) -> String {
    let show_bounds = params
        .get("show-bounds")
        .map(|v| v != "false")
        .unwrap_or(false);

    let mut output = format!("⧉ {} sections\n", count_sections(forest));
    for (i, node) in forest.iter().enumerate() {
        output.push_str(&format_node(node, "", i, forest.len(), show_bounds));
    }
    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, forest: &[SectionNode]) -> Result<String, FormatError> {
        Ok(to_treeviz_str(forest))
    }

    fn description(&self) -> &str {
        "Visual tree representation with box connectors and context icons"
    }
}
