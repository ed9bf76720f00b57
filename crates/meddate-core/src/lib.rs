//! Medication start/stop date association.
//!
//! This crate finds the dates a medication was started and stopped in
//! clinical narrative that upstream taggers have already annotated:
//!
//! - **calendar**: normalization of structured and slash/dash dates
//! - **keywords**: "started" / "stopped" occurrence search
//! - **associator**: the per-window reverse scan that attaches dates to events
//! - **window**: lookup window selection and section filtering
//! - **finder**: document-level candidate collection and processing
//! - **config** / **filter_list**: TOML configuration and list files

pub mod associator;
pub mod calendar;
pub mod config;
pub mod error;
pub mod filter_list;
pub mod finder;
pub mod keywords;
pub mod phrase;
pub mod window;

pub use associator::{Candidate, CandidateKind, PROXIMITY_BRACKET, ResetPolicy, SpanAssociator};
pub use config::FinderConfig;
pub use error::{FinderError, Result};
pub use finder::MedDatesFinder;
pub use keywords::{KeywordOccurrences, find_keyword_offsets};
pub use phrase::{DatePhraseParser, DisabledPhraseParser};
pub use window::{Window, WindowKind, select_windows};
