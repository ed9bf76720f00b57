//! Lookup windows: the text regions inside which dates are associated.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use meddate_model::{Document, Section, TextSpan};

use crate::error::FinderError;

/// Region type used as the association window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    #[default]
    Paragraph,
    Sentence,
    Section,
    Document,
}

impl WindowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Sentence => "sentence",
            Self::Section => "section",
            Self::Document => "document",
        }
    }

    /// Regions of this kind in `document`.
    fn regions(self, document: &Document) -> Vec<TextSpan> {
        match self {
            Self::Paragraph => document.paragraphs.clone(),
            Self::Sentence => document.sentences.clone(),
            Self::Section => document.sections.iter().map(|s| s.span).collect(),
            Self::Document => document.full_span().into_iter().collect(),
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowKind {
    type Err = FinderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "paragraph" => Ok(Self::Paragraph),
            "sentence" => Ok(Self::Sentence),
            "section" | "segment" => Ok(Self::Section),
            "document" => Ok(Self::Document),
            _ => Err(FinderError::UnknownWindowKind {
                name: value.to_string(),
            }),
        }
    }
}

/// A window span and the indices of the document annotations inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub span: TextSpan,
    pub annotations: Vec<usize>,
}

/// Selects the windows of `kind` and assigns annotations to them.
///
/// With an empty `section_list` every region of `kind` is a window and an
/// annotation belongs to each window that fully covers it. Otherwise only
/// sections whose preferred text or id is listed are searched: section
/// windows are the approved sections themselves; any other kind uses its
/// regions inside approved sections, and an annotation of the section
/// belongs to each such region containing its begin offset.
pub fn select_windows(
    document: &Document,
    kind: WindowKind,
    section_list: &BTreeSet<String>,
) -> Vec<Window> {
    let spans = annotation_spans(document);
    let mut windows = if section_list.is_empty() {
        kind.regions(document)
            .into_iter()
            .map(|region| covered_window(region, &spans))
            .collect()
    } else {
        let approved = document
            .sections
            .iter()
            .filter(|section| is_approved(section, section_list));
        if kind == WindowKind::Section {
            approved
                .map(|section| covered_window(section.span, &spans))
                .collect()
        } else {
            let regions = kind.regions(document);
            let mut windows = Vec::new();
            for section in approved {
                let in_section: Vec<(usize, TextSpan)> = spans
                    .iter()
                    .filter(|(_, span)| section.span.covers(span))
                    .copied()
                    .collect();
                for region in regions.iter().filter(|r| section.span.covers(r)) {
                    windows.push(Window {
                        span: *region,
                        annotations: in_section
                            .iter()
                            .filter(|(_, span)| region.contains_offset(span.begin()))
                            .map(|(index, _)| *index)
                            .collect(),
                    });
                }
            }
            windows
        }
    };
    windows.sort_by_key(|window| window.span);
    windows
}

fn is_approved(section: &Section, section_list: &BTreeSet<String>) -> bool {
    section_list.contains(&section.preferred_text) || section_list.contains(&section.id)
}

fn annotation_spans(document: &Document) -> Vec<(usize, TextSpan)> {
    document
        .annotations
        .iter()
        .enumerate()
        .filter_map(|(index, annotation)| annotation.span().map(|span| (index, span)))
        .collect()
}

fn covered_window(region: TextSpan, spans: &[(usize, TextSpan)]) -> Window {
    Window {
        span: region,
        annotations: spans
            .iter()
            .filter(|(_, span)| region.covers(span))
            .map(|(index, _)| *index)
            .collect(),
    }
}
