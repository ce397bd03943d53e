//! Line normalization
//!
//! Text extracted from PDF/DOCX sources carries invisible bidi controls, zero-width
//! joiners, non-breaking spaces and typographic quote variants. Every matcher in the
//! crate runs against normalized text, so the same folding is applied to source
//! lines and to configured vocabulary terms.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Characters removed outright.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{feff}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2066}'..='\u{2069}'
            | '\u{00ad}'
    )
}

fn fold_char(c: char) -> char {
    match c {
        '\u{05f4}' | '\u{201c}' | '\u{201d}' | '\u{201e}' => '"',
        '\u{05f3}' | '\u{2018}' | '\u{2019}' | '\u{201a}' => '\'',
        '\u{00a0}' | '\u{2007}' | '\u{202f}' => ' ',
        '\u{2013}' | '\u{2014}' | '\u{05be}' => '-',
        other => other,
    }
}

/// Normalize one physical line. Returns an empty string for blank lines.
pub fn normalize_line(line: &str) -> String {
    let folded: String = line
        .chars()
        .filter(|c| !is_invisible(*c))
        .map(fold_char)
        .collect();
    WHITESPACE_RUN.replace_all(folded.trim(), " ").into_owned()
}

/// Normalize a sequence of lines, dropping the ones that end up empty.
pub fn normalize_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| normalize_line(line.as_ref()))
        .filter(|line| !line.is_empty())
        .collect()
}
