//! Document-level medication date finder.
//!
//! For instance "Aspirin, 10mg.  Started 1/1/2000.  Stopped 12/31/2000."
//! gives the aspirin mention a start date of 2000-01-01 and a stop date of
//! 2000-12-31. Each lookup window is processed on its own; windows are
//! independent, so they are fanned out with rayon.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use meddate_model::{
    Annotation, AnnotationKind, AssociationResult, CalendarValue, Document, EventId,
    MedicationDates, TextSpan,
};

use crate::associator::{Candidate, ResetPolicy, SpanAssociator};
use crate::calendar::{from_slash_text, is_chunk_date, resolve_text, resolve_time_mention};
use crate::config::FinderConfig;
use crate::error::Result;
use crate::filter_list::load_filter_list;
use crate::keywords::{KeywordOccurrences, START_KEYWORD, STOP_KEYWORD};
use crate::phrase::{DatePhraseParser, DisabledPhraseParser};
use crate::window::{Window, WindowKind, select_windows};

/// Shortest chunk text read as a slash date (`//2000`).
const MIN_CHUNK_DATE_LEN: usize = 6;
/// Longest chunk text read as a slash date (`12/31/2000`).
const MAX_CHUNK_DATE_LEN: usize = 10;

/// Finds start and stop dates for medication mentions in a document.
#[derive(Clone)]
pub struct MedDatesFinder {
    window: WindowKind,
    section_list: BTreeSet<String>,
    cui_list: BTreeSet<String>,
    associator: SpanAssociator,
    start_keyword: String,
    stop_keyword: String,
    phrase_parser: Arc<dyn DatePhraseParser>,
}

impl Default for MedDatesFinder {
    fn default() -> Self {
        Self {
            window: WindowKind::default(),
            section_list: BTreeSet::new(),
            cui_list: BTreeSet::new(),
            associator: SpanAssociator::default(),
            start_keyword: START_KEYWORD.to_string(),
            stop_keyword: STOP_KEYWORD.to_string(),
            phrase_parser: Arc::new(DisabledPhraseParser),
        }
    }
}

impl MedDatesFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a finder from configuration, loading the list files once.
    pub fn from_config(config: &FinderConfig) -> Result<Self> {
        let mut finder = Self::new()
            .with_window(config.window_kind()?)
            .with_reset_policy(config.reset_policy()?)
            .with_keywords(config.start_keyword()?, config.stop_keyword()?);
        if let Some(path) = &config.section_list {
            finder = finder.with_section_list(load_filter_list(path)?);
        }
        if let Some(path) = &config.cui_list {
            finder = finder.with_cui_list(load_filter_list(path)?);
        }
        Ok(finder)
    }

    #[must_use]
    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.window = window;
        self
    }

    /// Restricts the search to sections named in `sections`; empty means all.
    #[must_use]
    pub fn with_section_list(mut self, sections: BTreeSet<String>) -> Self {
        self.section_list = sections;
        self
    }

    /// Restricts events to medications carrying one of `cuis`; empty means all.
    #[must_use]
    pub fn with_cui_list(mut self, cuis: BTreeSet<String>) -> Self {
        self.cui_list = cuis;
        self
    }

    #[must_use]
    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.associator = SpanAssociator::new(policy);
        self
    }

    #[must_use]
    pub fn with_keywords(mut self, start: &str, stop: &str) -> Self {
        self.start_keyword = start.to_string();
        self.stop_keyword = stop.to_string();
        self
    }

    #[must_use]
    pub fn with_phrase_parser(mut self, parser: Arc<dyn DatePhraseParser>) -> Self {
        self.phrase_parser = parser;
        self
    }

    pub fn window(&self) -> WindowKind {
        self.window
    }

    /// Medication annotations that received a start or stop date, in window order.
    pub fn process(&self, document: &Document) -> Vec<MedicationDates> {
        info!(document = %document.id, window = %self.window, "finding medication dates");
        let windows = select_windows(document, self.window, &self.section_list);
        let per_window: Vec<Vec<MedicationDates>> = windows
            .par_iter()
            .map(|window| self.process_window(document, window))
            .collect();
        let dates: Vec<MedicationDates> = per_window.into_iter().flatten().collect();
        info!(
            document = %document.id,
            windows = windows.len(),
            dated = dates.len(),
            "finished finding medication dates"
        );
        dates
    }

    fn process_window(&self, document: &Document, window: &Window) -> Vec<MedicationDates> {
        let base = window.span.begin();
        let text = document.covered_text(&window.span);
        let keywords = KeywordOccurrences::find_with(text, &self.start_keyword, &self.stop_keyword);
        if keywords.is_empty() {
            return Vec::new();
        }
        let candidates = self.collect_candidates(document, window);
        debug!(
            window = %window.span,
            starts = keywords.starts.len(),
            stops = keywords.stops.len(),
            candidates = candidates.len(),
            "processing window"
        );
        self.associator
            .associate(&candidates, &keywords)
            .into_iter()
            .filter_map(|result| medication_dates(document, base, result))
            .collect()
    }

    /// Window-relative event and date candidates, first span wins.
    pub fn collect_candidates(&self, document: &Document, window: &Window) -> Vec<Candidate> {
        let base = window.span.begin();
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for &index in &window.annotations {
            let Some(annotation) = document.annotations.get(index) else {
                continue;
            };
            let Some(span) = annotation.span().and_then(|span| span.relative_to(base)) else {
                continue;
            };
            if seen.contains(&span) {
                continue;
            }
            if let Some(candidate) = self.classify(document, index, annotation, span) {
                seen.insert(span);
                candidates.push(candidate);
            }
        }
        candidates
    }

    fn classify(
        &self,
        document: &Document,
        index: usize,
        annotation: &Annotation,
        span: TextSpan,
    ) -> Option<Candidate> {
        let covered = annotation
            .span()
            .map_or("", |absolute| document.covered_text(&absolute));
        let parser = self.phrase_parser.as_ref();
        let value = match &annotation.kind {
            AnnotationKind::MedicationEvent { cuis } | AnnotationKind::MedicationMention { cuis } => {
                return self
                    .is_listed_concept(cuis)
                    .then(|| Candidate::event(span, EventId::new(index)));
            }
            AnnotationKind::TimeMention { date } => {
                resolve_time_mention(date.as_ref(), covered, parser)
            }
            AnnotationKind::DateAnnotation => resolve_text(covered, parser),
            AnnotationKind::Chunk => {
                let length = covered.chars().count();
                if !(MIN_CHUNK_DATE_LEN..=MAX_CHUNK_DATE_LEN).contains(&length)
                    || !is_chunk_date(covered)
                {
                    return None;
                }
                from_slash_text(covered)
            }
            AnnotationKind::Other => return None,
        };
        match value {
            CalendarValue::Known(date) => Some(Candidate::date(span, date)),
            CalendarValue::Unknown => None,
        }
    }

    fn is_listed_concept(&self, cuis: &[String]) -> bool {
        self.cui_list.is_empty() || cuis.iter().any(|cui| self.cui_list.contains(cui))
    }
}

fn medication_dates(
    document: &Document,
    base: usize,
    result: AssociationResult,
) -> Option<MedicationDates> {
    let annotation = document.annotations.get(result.event.index())?;
    let (kind, _) = annotation.kind.medication()?;
    let span = result.event_span.shifted(base);
    Some(MedicationDates::new(
        annotation.id.clone(),
        kind,
        span,
        document.covered_text(&span),
        result.start_date.map(|date| date.shifted(base)),
        result.stop_date.map(|date| date.shifted(base)),
    ))
}
