//! Numbering context tracking
//!
//! The document restarts its numbering inside the annexes, so the same key (`4.1`)
//! names different clauses depending on where it appears. The tracker is a small
//! state machine fed one segment at a time:
//!
//!     Preamble ──(chapter 1)──▶ Active(normal)
//!     Active(*) ──(annex marker)──▶ Active(annex-A)
//!     Active(*) ──(sub-annex marker)──▶ Active(annex-B)
//!     Active(annex-B) ──(sub-annex end)──▶ SkippingToResume
//!     SkippingToResume ──(chapter 5)──▶ Active(normal)
//!     Active(*) ──(chapter 5)──▶ Active(normal)
//!
//! Lines read in `Preamble` or `SkippingToResume` are discarded. The line that leaves
//! either of those phases is itself processed in the new context.

use tracing::debug;

use crate::licensing::ast::NumberingContext;
use crate::licensing::lexing::Segment;
use crate::licensing::vocabulary::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Front matter before the first chapter.
    Preamble,
    Active(NumberingContext),
    /// After the sub-annex ends, until the resume chapter.
    SkippingToResume,
}

#[derive(Debug)]
pub struct ContextTracker<'v> {
    vocabulary: &'v Vocabulary,
    phase: Phase,
}

impl<'v> ContextTracker<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        ContextTracker {
            vocabulary,
            phase: Phase::Preamble,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Feed one segment. Returns the context it should be processed in, or `None` when
    /// the segment is discarded.
    pub fn admit(&mut self, segment: &Segment) -> Option<NumberingContext> {
        match segment {
            Segment::Text(line) => self.observe_text(line),
            Segment::Header(_) => match self.phase {
                Phase::Active(context) => Some(context),
                Phase::Preamble | Phase::SkippingToResume => None,
            },
        }
    }

    fn observe_text(&mut self, line: &str) -> Option<NumberingContext> {
        let chapter = self.vocabulary.chapter_number(line);
        match self.phase {
            Phase::Preamble => {
                if chapter == Some(self.vocabulary.first_chapter) {
                    self.enter(NumberingContext::Normal, line);
                    Some(NumberingContext::Normal)
                } else {
                    None
                }
            }
            Phase::SkippingToResume => {
                if chapter == Some(self.vocabulary.resume_chapter) {
                    self.enter(NumberingContext::Normal, line);
                    Some(NumberingContext::Normal)
                } else {
                    None
                }
            }
            Phase::Active(current) => {
                if current == NumberingContext::AnnexB
                    && line.starts_with(self.vocabulary.sub_annex_end.as_str())
                {
                    debug!(line, "sub-annex ended, skipping to resume chapter");
                    self.phase = Phase::SkippingToResume;
                    return None;
                }
                let next = if line.starts_with(self.vocabulary.sub_annex.as_str()) {
                    NumberingContext::AnnexB
                } else if line.starts_with(self.vocabulary.annex.as_str()) {
                    NumberingContext::AnnexA
                } else if chapter == Some(self.vocabulary.resume_chapter) {
                    NumberingContext::Normal
                } else {
                    current
                };
                if next != current {
                    self.enter(next, line);
                }
                Some(next)
            }
        }
    }

    fn enter(&mut self, context: NumberingContext, line: &str) {
        debug!(%context, line, "numbering context changed");
        self.phase = Phase::Active(context);
    }
}

/// Presentation group label for a node read in `context` at `level`.
///
/// Inside an annex the label hangs off the annex's chapter number: depth 2 is the
/// first sub-group, depth 3 the second, depth 4 the third, anything else falls back
/// to the first. Normal context has no label.
///
/// The depth-to-group mapping is shifted one down from a literal "depth 3 is `x.3`"
/// reading so that `4.1` read right after `נספחים` is labelled `"4.1"` and its
/// depth-3 children `"4.2"`.
pub fn group_label(context: NumberingContext, level: u8) -> Option<String> {
    let prefix = context.group_prefix()?;
    let group = match level {
        3 => 2,
        4 => 3,
        _ => 1,
    };
    Some(format!("{prefix}.{group}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::licensing::lexing::split_headers;
    use crate::licensing::vocabulary::DEFAULT_VOCABULARY;

    fn feed(tracker: &mut ContextTracker, line: &str) -> Vec<Option<NumberingContext>> {
        split_headers(line, &DEFAULT_VOCABULARY)
            .iter()
            .map(|segment| tracker.admit(segment))
            .collect()
    }

    #[test]
    fn test_preamble_is_skipped() {
        let mut tracker = ContextTracker::new(&DEFAULT_VOCABULARY);
        assert_eq!(feed(&mut tracker, "תוכן עניינים"), vec![None]);
        assert_eq!(feed(&mut tracker, "3.2.1 גז ....... 12"), vec![None]);
        assert_eq!(feed(&mut tracker, "פרק 2"), vec![None]);
        assert_eq!(
            feed(&mut tracker, "פרק 1"),
            vec![Some(NumberingContext::Normal)]
        );
        assert_eq!(
            feed(&mut tracker, "1.1 כללי"),
            vec![Some(NumberingContext::Normal)]
        );
    }

    #[test]
    fn test_annex_transitions() {
        let mut tracker = ContextTracker::new(&DEFAULT_VOCABULARY);
        feed(&mut tracker, "פרק 1");
        assert_eq!(
            feed(&mut tracker, "נספחים"),
            vec![Some(NumberingContext::AnnexA)]
        );
        assert_eq!(
            feed(&mut tracker, "4.1 דרישות תברואה"),
            vec![Some(NumberingContext::AnnexA)]
        );
        assert_eq!(
            feed(&mut tracker, "נספח 1 (לנספח א' - טבלת שטחים)"),
            vec![Some(NumberingContext::AnnexB)]
        );
        assert_eq!(
            feed(&mut tracker, "1.1 שורה"),
            vec![Some(NumberingContext::AnnexB)]
        );
    }

    #[test]
    fn test_sub_annex_end_skips_to_resume_chapter() {
        let mut tracker = ContextTracker::new(&DEFAULT_VOCABULARY);
        feed(&mut tracker, "פרק 1");
        feed(&mut tracker, "נספחים");
        feed(&mut tracker, "נספח 1 (לנספח א'");
        assert_eq!(feed(&mut tracker, "סוף נספח 1"), vec![None]);
        assert_eq!(tracker.phase(), Phase::SkippingToResume);
        assert_eq!(feed(&mut tracker, "2.1 טבלה נוספת"), vec![None]);
        assert_eq!(feed(&mut tracker, "פרק 4"), vec![None]);
        assert_eq!(
            feed(&mut tracker, "פרק 5"),
            vec![Some(NumberingContext::Normal)]
        );
        assert_eq!(
            tracker.phase(),
            Phase::Active(NumberingContext::Normal)
        );
    }

    #[test]
    fn test_sub_annex_end_ignored_outside_annex_b() {
        let mut tracker = ContextTracker::new(&DEFAULT_VOCABULARY);
        feed(&mut tracker, "פרק 1");
        feed(&mut tracker, "נספחים");
        assert_eq!(
            feed(&mut tracker, "סוף נספח 1"),
            vec![Some(NumberingContext::AnnexA)]
        );
    }

    #[test]
    fn test_resume_chapter_leaves_annex() {
        let mut tracker = ContextTracker::new(&DEFAULT_VOCABULARY);
        feed(&mut tracker, "פרק 1");
        feed(&mut tracker, "נספחים");
        assert_eq!(
            feed(&mut tracker, "פרק 5"),
            vec![Some(NumberingContext::Normal)]
        );
    }

    #[test]
    fn test_group_labels() {
        assert_eq!(group_label(NumberingContext::Normal, 2), None);
        assert_eq!(group_label(NumberingContext::AnnexA, 2).as_deref(), Some("4.1"));
        assert_eq!(group_label(NumberingContext::AnnexA, 3).as_deref(), Some("4.2"));
        assert_eq!(group_label(NumberingContext::AnnexA, 4).as_deref(), Some("4.3"));
        assert_eq!(group_label(NumberingContext::AnnexA, 1).as_deref(), Some("4.1"));
        assert_eq!(group_label(NumberingContext::AnnexB, 6).as_deref(), Some("5.1"));
        assert_eq!(group_label(NumberingContext::AnnexB, 3).as_deref(), Some("5.2"));
    }
}
