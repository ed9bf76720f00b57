//! Start/stop date attachments produced for medication events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, EventKind, StructuredDate, TextSpan};

/// Opaque handle back to the caller's event object.
///
/// The document finder uses the annotation's index in
/// [`Document::annotations`](crate::Document::annotations).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(usize);

impl EventId {
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event#{}", self.0)
    }
}

/// A date span together with the calendar day it resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMention {
    pub span: TextSpan,
    pub date: CalendarDate,
}

impl DateMention {
    pub fn new(span: TextSpan, date: CalendarDate) -> Self {
        Self { span, date }
    }

    pub fn shifted(&self, base: usize) -> Self {
        Self {
            span: self.span.shifted(base),
            date: self.date,
        }
    }
}

/// Dates attached to one event span within one window.
///
/// Spans are window-relative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationResult {
    pub event: EventId,
    pub event_span: TextSpan,
    pub start_date: Option<DateMention>,
    pub stop_date: Option<DateMention>,
}

/// Document-level record for a medication annotation that received dates.
///
/// Spans are absolute document offsets. `start_fields` and `stop_fields`
/// carry the attached dates in the structured form of a time mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationDates {
    pub annotation: String,
    pub kind: EventKind,
    pub span: TextSpan,
    pub text: String,
    pub start_date: Option<DateMention>,
    pub stop_date: Option<DateMention>,
    pub start_fields: Option<StructuredDate>,
    pub stop_fields: Option<StructuredDate>,
}

impl MedicationDates {
    /// Builds the record, deriving the structured fields from the dates.
    pub fn new(
        annotation: impl Into<String>,
        kind: EventKind,
        span: TextSpan,
        text: impl Into<String>,
        start_date: Option<DateMention>,
        stop_date: Option<DateMention>,
    ) -> Self {
        Self {
            annotation: annotation.into(),
            kind,
            span,
            text: text.into(),
            start_date,
            stop_date,
            start_fields: start_date.map(|mention| mention.date.to_structured()),
            stop_fields: stop_date.map(|mention| mention.date.to_structured()),
        }
    }
}
