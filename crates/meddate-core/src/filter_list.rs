//! Section and concept-code lists used to narrow the search.
//!
//! List files are bar-separated: only the first `|` field of each line is
//! kept. Empty lines and lines starting with `#` or `//` are comments.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::info;

use crate::error::{FinderError, Result};

/// Reads a list file into an immutable set.
pub fn load_filter_list(path: &Path) -> Result<BTreeSet<String>> {
    info!(path = %path.display(), "loading filter list");
    let contents = std::fs::read_to_string(path).map_err(|e| FinderError::io(path, e))?;
    let entries = parse_filter_list(&contents);
    info!(path = %path.display(), entries = entries.len(), "loaded filter list");
    Ok(entries)
}

/// Parses list file contents; see the module docs for the line format.
pub fn parse_filter_list(contents: &str) -> BTreeSet<String> {
    contents.lines().filter_map(read_list_line).collect()
}

fn read_list_line(line: &str) -> Option<String> {
    if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
        return None;
    }
    let value = line.split('|').next().unwrap_or("").trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_field_and_skips_comments() {
        let contents = "# medications of interest\n\
                        C0004057|aspirin\n\
                        // disabled\n\
                        \n\
                        \x20C0025598 | metformin | extra\n\
                        |no code\n";
        let list = parse_filter_list(contents);
        let values: Vec<_> = list.iter().map(String::as_str).collect();
        assert_eq!(values, vec!["C0004057", "C0025598"]);
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load_filter_list(Path::new("/nonexistent/meddate/cuis.bsv")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/meddate/cuis.bsv"));
    }
}
