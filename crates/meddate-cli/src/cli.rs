//! CLI argument definitions for the medication date finder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use meddate_cli::commands::FindOptions;

#[derive(Parser)]
#[command(
    name = "meddates",
    version,
    about = "Attach start and stop dates to medication mentions in clinical notes",
    long_about = "Attach start and stop dates to medication mentions in clinical notes.\n\n\
                  Reads annotated documents as JSON and reports, per medication, the\n\
                  dates that follow the \"started\" and \"stopped\" keywords."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Find medication start/stop dates in annotated documents.
    Find(FindArgs),

    /// Resolve a date string and print its digit form.
    Calendar {
        /// Date text such as `3/15/2001` or `2001-03-15`.
        #[arg(value_name = "TEXT")]
        text: String,
    },
}

#[derive(Parser)]
pub struct FindArgs {
    /// Annotated documents in JSON form.
    #[arg(value_name = "DOCUMENT", required = true)]
    pub documents: Vec<PathBuf>,

    /// Finder configuration file (TOML).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Lookup window: paragraph, sentence, section or document.
    #[arg(long = "window", value_name = "KIND")]
    pub window: Option<String>,

    /// Section ids or names to search, one per line.
    #[arg(long = "section-list", value_name = "FILE")]
    pub section_list: Option<PathBuf>,

    /// Concept codes a medication must carry, one per line.
    #[arg(long = "cui-list", value_name = "FILE")]
    pub cui_list: Option<PathBuf>,

    /// Drop pending dates when an unmatched date or stray span intervenes.
    #[arg(long = "reset-on-interrupt")]
    pub reset_on_interrupt: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

impl FindArgs {
    pub fn to_options(&self) -> FindOptions {
        FindOptions {
            documents: self.documents.clone(),
            config: self.config.clone(),
            window: self.window.clone(),
            section_list: self.section_list.clone(),
            cui_list: self.cui_list.clone(),
            reset_on_interrupt: self.reset_on_interrupt,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Json,
    Table,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
