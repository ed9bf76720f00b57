//! Annotated clinical documents as produced by upstream taggers.

use serde::{Deserialize, Serialize};

use crate::{StructuredDate, TextSpan};

/// A clinical note with its annotations and structural regions.
///
/// All offsets are byte offsets into `text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub paragraphs: Vec<TextSpan>,
    #[serde(default)]
    pub sentences: Vec<TextSpan>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Text covered by `span`, or the empty string for offsets outside the text.
    pub fn covered_text(&self, span: &TextSpan) -> &str {
        span.covered_text(&self.text).unwrap_or("")
    }

    /// Span over the whole text, `None` for an empty document.
    pub fn full_span(&self) -> Option<TextSpan> {
        TextSpan::new(0, self.text.len()).ok()
    }
}

/// A typed annotation over part of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub id: String,
    pub begin: usize,
    pub end: usize,
    pub kind: AnnotationKind,
}

impl Annotation {
    pub fn new(id: impl Into<String>, begin: usize, end: usize, kind: AnnotationKind) -> Self {
        Self {
            id: id.into(),
            begin,
            end,
            kind,
        }
    }

    /// The annotation's span, `None` when its offsets are not a valid span.
    pub fn span(&self) -> Option<TextSpan> {
        TextSpan::new(self.begin, self.end).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnnotationKind {
    /// Medication event mention with its concept codes.
    MedicationEvent {
        #[serde(default)]
        cuis: Vec<String>,
    },
    /// Medication mention with its concept codes.
    MedicationMention {
        #[serde(default)]
        cuis: Vec<String>,
    },
    /// Normalized time expression, optionally with structured date fields.
    TimeMention {
        #[serde(default)]
        date: Option<StructuredDate>,
    },
    /// Date found by a date pattern tagger.
    DateAnnotation,
    /// Syntactic chunk; slash-formatted chunks are read as dates.
    Chunk,
    /// Anything else the upstream pipeline produced.
    Other,
}

impl AnnotationKind {
    /// Medication kind and concept codes, for annotations that can receive dates.
    pub fn medication(&self) -> Option<(EventKind, &[String])> {
        match self {
            Self::MedicationEvent { cuis } => Some((EventKind::MedicationEvent, cuis)),
            Self::MedicationMention { cuis } => Some((EventKind::MedicationMention, cuis)),
            _ => None,
        }
    }
}

/// The two medication annotation kinds that receive start/stop dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    MedicationEvent,
    MedicationMention,
}

/// A document section with its identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub span: TextSpan,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub preferred_text: String,
}

impl Section {
    pub fn new(span: TextSpan, id: impl Into<String>, preferred_text: impl Into<String>) -> Self {
        Self {
            span,
            id: id.into(),
            preferred_text: preferred_text.into(),
        }
    }
}
