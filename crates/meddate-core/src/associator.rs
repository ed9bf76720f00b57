//! Start/stop date association within a single window.
//!
//! Clinical narrative usually names the medication first and the keyword
//! and date after it: "Aspirin, started 1/1/2000, stopped 12/31/2000".
//! The associator therefore walks the window's spans from the end back to
//! the start. A date that begins inside the proximity bracket of a keyword
//! becomes the pending start or stop date, and the next event span reached
//! (the one preceding it in the text) receives whatever is pending.
//!
//! Keyword cursors point at the highest keyword offset that can still
//! bracket a span. A keyword is retired once the walk reaches a span that
//! begins at or before it. Several dates inside one bracket all match, and
//! the lowest offset is applied last.

use std::collections::HashSet;

use tracing::trace;

use meddate_model::{AssociationResult, CalendarDate, DateMention, EventId, TextSpan};

use crate::keywords::KeywordOccurrences;

/// Width of the window following a keyword offset in which a date may begin.
pub const PROXIMITY_BRACKET: usize = 15;

/// What a candidate span contributes to the reverse scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// An event that can receive dates.
    Event(EventId),
    /// A date resolved to a known day.
    Date(CalendarDate),
    /// A span that is neither; it only matters under [`ResetPolicy::ResetOnInterrupt`].
    Inert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub span: TextSpan,
    pub kind: CandidateKind,
}

impl Candidate {
    pub fn event(span: TextSpan, id: EventId) -> Self {
        Self {
            span,
            kind: CandidateKind::Event(id),
        }
    }

    pub fn date(span: TextSpan, date: CalendarDate) -> Self {
        Self {
            span,
            kind: CandidateKind::Date(date),
        }
    }

    pub fn inert(span: TextSpan) -> Self {
        Self {
            span,
            kind: CandidateKind::Inert,
        }
    }
}

/// How spans that neither match a bracket nor are events affect pending dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Unmatched dates and inert spans leave pending dates alone.
    #[default]
    Inert,
    /// Unmatched dates and inert spans clear both pending dates.
    ResetOnInterrupt,
}

/// Reverse-scan matcher for one window.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanAssociator {
    policy: ResetPolicy,
}

impl SpanAssociator {
    pub fn new(policy: ResetPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ResetPolicy {
        self.policy
    }

    /// Attaches pending start/stop dates to event spans.
    ///
    /// Candidates repeating an earlier candidate's span are dropped. The
    /// result holds one entry per event that received at least one date,
    /// ordered by event begin offset.
    pub fn associate(
        &self,
        candidates: &[Candidate],
        keywords: &KeywordOccurrences,
    ) -> Vec<AssociationResult> {
        if keywords.is_empty() || candidates.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::with_capacity(candidates.len());
        let mut ordered: Vec<&Candidate> = candidates
            .iter()
            .filter(|candidate| seen.insert(candidate.span))
            .collect();
        ordered.sort_by_key(|candidate| candidate.span.begin());

        let mut starts = KeywordCursor::new(&keywords.starts);
        let mut stops = KeywordCursor::new(&keywords.stops);
        let mut pending_start: Option<DateMention> = None;
        let mut pending_stop: Option<DateMention> = None;
        let mut results = Vec::new();

        for candidate in ordered.iter().rev() {
            let begin = candidate.span.begin();
            starts.retire_from(begin);
            stops.retire_from(begin);

            match candidate.kind {
                CandidateKind::Event(event) => {
                    if pending_start.is_none() && pending_stop.is_none() {
                        continue;
                    }
                    trace!(
                        %event,
                        span = %candidate.span,
                        start = ?pending_start.map(|d| d.date),
                        stop = ?pending_stop.map(|d| d.date),
                        "attaching dates"
                    );
                    results.push(AssociationResult {
                        event,
                        event_span: candidate.span,
                        start_date: pending_start,
                        stop_date: pending_stop,
                    });
                }
                CandidateKind::Date(date) => {
                    let mention = DateMention::new(candidate.span, date);
                    if stops.brackets(begin) {
                        pending_stop = Some(mention);
                        pending_start = None;
                    } else if starts.brackets(begin) {
                        pending_start = Some(mention);
                    } else if self.policy == ResetPolicy::ResetOnInterrupt {
                        pending_start = None;
                        pending_stop = None;
                    }
                }
                CandidateKind::Inert => {
                    if self.policy == ResetPolicy::ResetOnInterrupt {
                        pending_start = None;
                        pending_stop = None;
                    }
                }
            }
        }

        results.reverse();
        results
    }
}

/// Walks one ascending keyword list from its highest offset downwards.
struct KeywordCursor<'a> {
    offsets: &'a [usize],
    /// Number of keywords not yet retired; the current one is `offsets[live - 1]`.
    live: usize,
}

impl<'a> KeywordCursor<'a> {
    fn new(offsets: &'a [usize]) -> Self {
        Self {
            offsets,
            live: offsets.len(),
        }
    }

    fn current(&self) -> Option<usize> {
        self.live.checked_sub(1).map(|index| self.offsets[index])
    }

    /// Retires keywords that begin at or after `begin`.
    fn retire_from(&mut self, begin: usize) {
        while self.current().is_some_and(|offset| offset >= begin) {
            self.live -= 1;
        }
    }

    /// True when `begin` lies strictly inside `(offset, offset + PROXIMITY_BRACKET)`.
    fn brackets(&self, begin: usize) -> bool {
        self.current().is_some_and(|offset| {
            begin > offset && begin < offset.saturating_add(PROXIMITY_BRACKET)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(begin: usize, end: usize) -> TextSpan {
        TextSpan::new(begin, end).unwrap()
    }

    fn day(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).unwrap()
    }

    #[test]
    fn cursor_retires_keywords_at_or_after_span() {
        let offsets = [3, 10, 20];
        let mut cursor = KeywordCursor::new(&offsets);
        cursor.retire_from(25);
        assert_eq!(cursor.current(), Some(20));
        cursor.retire_from(20);
        assert_eq!(cursor.current(), Some(10));
        cursor.retire_from(4);
        assert_eq!(cursor.current(), Some(3));
        cursor.retire_from(0);
        assert_eq!(cursor.current(), None);
        assert!(!cursor.brackets(5));
    }

    #[test]
    fn bracket_is_open_on_both_ends() {
        let offsets = [10];
        let cursor = KeywordCursor::new(&offsets);
        assert!(!cursor.brackets(10));
        assert!(cursor.brackets(11));
        assert!(cursor.brackets(24));
        assert!(!cursor.brackets(25));
    }

    #[test]
    fn stop_match_clears_pending_start() {
        // "aspirin stopped 1/1/2000 started 2/2/2000"
        let candidates = [
            Candidate::event(span(0, 7), EventId::new(0)),
            Candidate::date(span(16, 24), day(2000, 1, 1)),
            Candidate::date(span(33, 41), day(2000, 2, 2)),
        ];
        let keywords = KeywordOccurrences::new(vec![25], vec![8]);
        let results = SpanAssociator::default().associate(&candidates, &keywords);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].start_date, None);
        assert_eq!(results[0].stop_date.map(|d| d.date), Some(day(2000, 1, 1)));
    }

    #[test]
    fn reset_policy_clears_on_inert_span() {
        // "metformin xx started 1/1/2000" with an inert span over "xx"
        let candidates = [
            Candidate::event(span(0, 9), EventId::new(0)),
            Candidate::inert(span(10, 12)),
            Candidate::date(span(21, 29), day(2000, 1, 1)),
        ];
        let keywords = KeywordOccurrences::new(vec![13], vec![]);

        let inert = SpanAssociator::new(ResetPolicy::Inert).associate(&candidates, &keywords);
        assert_eq!(inert.len(), 1);
        assert_eq!(inert[0].start_date.map(|d| d.date), Some(day(2000, 1, 1)));

        let reset =
            SpanAssociator::new(ResetPolicy::ResetOnInterrupt).associate(&candidates, &keywords);
        assert!(reset.is_empty());
    }

    #[test]
    fn duplicate_spans_keep_first_candidate() {
        let candidates = [
            Candidate::event(span(0, 7), EventId::new(0)),
            Candidate::date(span(16, 24), day(2000, 1, 1)),
            Candidate::date(span(16, 24), day(1999, 9, 9)),
        ];
        let keywords = KeywordOccurrences::new(vec![8], vec![]);
        let results = SpanAssociator::default().associate(&candidates, &keywords);
        assert_eq!(results[0].start_date.map(|d| d.date), Some(day(2000, 1, 1)));
    }
}
