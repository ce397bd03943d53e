//! Body truncation and title derivation
//!
//! A node accumulates every continuation line read while it is open. Only the
//! opening statement belongs to the node: the body is cut at the earliest of
//!
//! - a chapter line marker (`פרק 4`) anywhere in the text,
//! - the annex or sub-annex marker phrase,
//! - an enumeration bullet preceded by whitespace (`א.`, `3.`, `(2)`),
//! - for ids configured as sentence-truncated, the first sentence end.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::licensing::vocabulary::Vocabulary;

static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s(?:[א-ת]|\d{1,2})\.(?:\s|$)|\s\(\d{1,2}\)").unwrap());

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?](?:\s|$)").unwrap());

fn earliest(cuts: impl IntoIterator<Item = Option<usize>>) -> Option<usize> {
    cuts.into_iter().flatten().min()
}

/// The node's opening statement.
pub fn truncate_body(id: &str, raw: &str, vocabulary: &Vocabulary) -> String {
    let sentence = if vocabulary.truncates_at_sentence(id) {
        SENTENCE_END.find(raw).map(|m| m.start() + 1)
    } else {
        None
    };
    let cut = earliest([
        vocabulary.chapter_mention(raw),
        raw.find(vocabulary.annex.as_str()),
        raw.find(vocabulary.sub_annex.as_str()),
        BULLET.find(raw).map(|m| m.start()),
        sentence,
    ]);
    match cut {
        Some(at) => raw[..at].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

/// First `words` whitespace-separated tokens of the first line.
pub fn derive_title(text: &str, words: usize) -> String {
    text.lines()
        .next()
        .unwrap_or_default()
        .split_whitespace()
        .take(words)
        .collect::<Vec<_>>()
        .join(" ")
}
