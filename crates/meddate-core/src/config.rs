//! Finder configuration loaded from TOML.
//!
//! ```toml
//! window = "paragraph"
//! section_list = "lists/med_sections.bsv"
//! cui_list = "lists/med_cuis.bsv"
//! reset_policy = "inert"
//! start_keyword = "started"
//! stop_keyword = "stopped"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::associator::ResetPolicy;
use crate::error::{FinderError, Result};
use crate::keywords::{START_KEYWORD, STOP_KEYWORD};
use crate::window::WindowKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinderConfig {
    /// Lookup window kind name; paragraph when unset.
    pub window: Option<String>,
    /// Section list file; every section is searched when unset.
    pub section_list: Option<PathBuf>,
    /// Concept-code list file; every medication is eligible when unset.
    pub cui_list: Option<PathBuf>,
    /// `inert` (default) or `reset-on-interrupt`.
    pub reset_policy: Option<String>,
    pub start_keyword: Option<String>,
    pub stop_keyword: Option<String>,
}

impl FinderConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FinderError::io(path, e))?;
        let mut config: Self = toml::from_str(&contents).map_err(|e| FinderError::Toml {
            path: path.to_path_buf(),
            source: e,
        })?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Makes relative list paths relative to `base`.
    fn resolve_paths(&mut self, base: &Path) {
        for list in [&mut self.section_list, &mut self.cui_list] {
            if let Some(path) = list.as_mut()
                && path.is_relative()
            {
                *path = base.join(&*path);
            }
        }
    }

    pub fn window_kind(&self) -> Result<WindowKind> {
        self.window
            .as_deref()
            .map_or(Ok(WindowKind::default()), str::parse::<WindowKind>)
    }

    pub fn reset_policy(&self) -> Result<ResetPolicy> {
        match self.reset_policy.as_deref().map(str::trim) {
            None => Ok(ResetPolicy::default()),
            Some(name) => parse_reset_policy(name),
        }
    }

    pub fn start_keyword(&self) -> Result<&str> {
        keyword(self.start_keyword.as_deref(), START_KEYWORD, "start_keyword")
    }

    pub fn stop_keyword(&self) -> Result<&str> {
        keyword(self.stop_keyword.as_deref(), STOP_KEYWORD, "stop_keyword")
    }
}

fn parse_reset_policy(name: &str) -> Result<ResetPolicy> {
    match name.to_ascii_lowercase().replace('_', "-").as_str() {
        "inert" => Ok(ResetPolicy::Inert),
        "reset-on-interrupt" | "reset" => Ok(ResetPolicy::ResetOnInterrupt),
        _ => Err(FinderError::UnknownResetPolicy {
            name: name.to_string(),
        }),
    }
}

fn keyword<'a>(
    configured: Option<&'a str>,
    default: &'static str,
    role: &'static str,
) -> Result<&'a str> {
    match configured.map(str::trim) {
        None => Ok(default),
        Some("") => Err(FinderError::EmptyKeyword { role }),
        Some(value) => Ok(value),
    }
}
