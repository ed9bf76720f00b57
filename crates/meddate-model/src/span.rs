//! Half-open character ranges over a document or a window.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// A half-open byte range `[begin, end)` with `begin < end`.
///
/// Spans are either document-absolute or relative to the window that
/// contains them; [`TextSpan::relative_to`] and [`TextSpan::shifted`]
/// convert between the two.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "RawSpan")]
pub struct TextSpan {
    begin: usize,
    end: usize,
}

#[derive(Deserialize)]
struct RawSpan {
    begin: usize,
    end: usize,
}

impl TryFrom<RawSpan> for TextSpan {
    type Error = ModelError;

    fn try_from(raw: RawSpan) -> Result<Self, Self::Error> {
        Self::new(raw.begin, raw.end)
    }
}

impl TextSpan {
    pub fn new(begin: usize, end: usize) -> crate::Result<Self> {
        if begin >= end {
            return Err(ModelError::InvalidSpan { begin, end });
        }
        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }

    /// True when `other` lies entirely inside this span.
    pub fn covers(&self, other: &TextSpan) -> bool {
        other.begin >= self.begin && other.end <= self.end
    }

    /// True when `offset` falls inside `[begin, end)`.
    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.begin && offset < self.end
    }

    /// Re-expresses this span relative to a window starting at `base`.
    ///
    /// Returns `None` when the span starts before the window.
    pub fn relative_to(&self, base: usize) -> Option<TextSpan> {
        let begin = self.begin.checked_sub(base)?;
        Some(Self {
            begin,
            end: self.end - base,
        })
    }

    /// Moves a window-relative span back to absolute offsets.
    pub fn shifted(&self, base: usize) -> TextSpan {
        Self {
            begin: self.begin + base,
            end: self.end + base,
        }
    }

    /// Slice of `text` covered by this span, if the offsets are valid for it.
    pub fn covered_text<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.begin..self.end)
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_inverted_spans() {
        assert_eq!(
            TextSpan::new(4, 4),
            Err(ModelError::InvalidSpan { begin: 4, end: 4 })
        );
        assert!(TextSpan::new(5, 2).is_err());
        assert!(TextSpan::new(0, 1).is_ok());
    }

    #[test]
    fn relative_and_shifted_are_inverse() {
        let span = TextSpan::new(120, 127).unwrap();
        let relative = span.relative_to(100).unwrap();
        assert_eq!((relative.begin(), relative.end()), (20, 27));
        assert_eq!(relative.shifted(100), span);
        assert_eq!(span.relative_to(121), None);
    }

    #[test]
    fn orders_by_begin_then_end() {
        let mut spans = vec![
            TextSpan::new(8, 12).unwrap(),
            TextSpan::new(0, 7).unwrap(),
            TextSpan::new(8, 10).unwrap(),
        ];
        spans.sort();
        let begins: Vec<_> = spans.iter().map(|s| (s.begin(), s.end())).collect();
        assert_eq!(begins, vec![(0, 7), (8, 10), (8, 12)]);
    }

    #[test]
    fn deserialization_validates_offsets() {
        let ok: TextSpan = serde_json::from_str(r#"{"begin":1,"end":3}"#).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(serde_json::from_str::<TextSpan>(r#"{"begin":3,"end":1}"#).is_err());
    }

    #[test]
    fn covered_text_respects_bounds() {
        let span = TextSpan::new(0, 7).unwrap();
        assert_eq!(span.covered_text("aspirin 81mg"), Some("aspirin"));
        assert_eq!(span.covered_text("asp"), None);
    }
}
