//! Command implementations shared by the binary and its tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use meddate_core::calendar::{resolve_text, to_digit_string};
use meddate_core::{DisabledPhraseParser, FinderConfig, MedDatesFinder};
use meddate_model::{Document, MedicationDates};

/// Printed by `calendar` when the text does not resolve to a date.
pub const UNKNOWN_DATE: &str = "unknown";

/// Inputs for `meddates find`; flags override the config file.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub documents: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub window: Option<String>,
    pub section_list: Option<PathBuf>,
    pub cui_list: Option<PathBuf>,
    pub reset_on_interrupt: bool,
}

/// Dates found in one input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDates {
    pub document: String,
    pub dates: Vec<MedicationDates>,
}

pub fn build_config(options: &FindOptions) -> Result<FinderConfig> {
    let mut config = match &options.config {
        Some(path) => FinderConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FinderConfig::default(),
    };
    if let Some(window) = &options.window {
        config.window = Some(window.clone());
    }
    if let Some(path) = &options.section_list {
        config.section_list = Some(path.clone());
    }
    if let Some(path) = &options.cui_list {
        config.cui_list = Some(path.clone());
    }
    if options.reset_on_interrupt {
        config.reset_policy = Some("reset-on-interrupt".to_string());
    }
    Ok(config)
}

pub fn run_find(options: &FindOptions) -> Result<Vec<DocumentDates>> {
    let config = build_config(options)?;
    let finder = MedDatesFinder::from_config(&config).context("invalid finder configuration")?;
    info!(
        documents = options.documents.len(),
        window = %finder.window(),
        "finding medication dates"
    );
    options
        .documents
        .iter()
        .map(|path| {
            let document = read_document(path)?;
            let dates = finder.process(&document);
            Ok(DocumentDates {
                document: document.id,
                dates,
            })
        })
        .collect()
}

/// Reads a JSON document; an empty id falls back to the file stem.
pub fn read_document(path: &Path) -> Result<Document> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;
    let mut document: Document = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse document {}", path.display()))?;
    if document.id.is_empty() {
        document.id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    Ok(document)
}

pub fn run_calendar(text: &str) -> String {
    to_digit_string(&resolve_text(text, &DisabledPhraseParser))
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

pub fn render_json(results: &[DocumentDates]) -> Result<String> {
    serde_json::to_string_pretty(results).context("failed to serialize results")
}
