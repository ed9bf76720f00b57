//! Keyword occurrence search over window text.

/// Keyword that opens a medication date range.
pub const START_KEYWORD: &str = "started";
/// Keyword that closes a medication date range.
pub const STOP_KEYWORD: &str = "stopped";

/// Ascending byte offsets of every case-insensitive occurrence of `keyword`.
///
/// After a hit at `i` the search resumes at `i + 1`, so overlapping
/// occurrences are all reported. Matching is ASCII case-insensitive,
/// which keeps offsets aligned with the input text.
pub fn find_keyword_offsets(text: &str, keyword: &str) -> Vec<usize> {
    let needle = keyword.to_ascii_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let haystack = text.to_ascii_lowercase();
    let mut offsets = Vec::new();
    let mut from = 0;
    while let Some(found) = haystack.get(from..).and_then(|rest| rest.find(&needle)) {
        let index = from + found;
        offsets.push(index);
        from = index + next_char_len(&haystack, index);
    }
    offsets
}

fn next_char_len(text: &str, index: usize) -> usize {
    text[index..].chars().next().map_or(1, char::len_utf8)
}

/// Start and stop keyword offsets found in one window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordOccurrences {
    pub starts: Vec<usize>,
    pub stops: Vec<usize>,
}

impl KeywordOccurrences {
    pub fn new(mut starts: Vec<usize>, mut stops: Vec<usize>) -> Self {
        starts.sort_unstable();
        stops.sort_unstable();
        Self { starts, stops }
    }

    /// Searches `text` for the default "started" / "stopped" keywords.
    pub fn find(text: &str) -> Self {
        Self::find_with(text, START_KEYWORD, STOP_KEYWORD)
    }

    pub fn find_with(text: &str, start_keyword: &str, stop_keyword: &str) -> Self {
        Self {
            starts: find_keyword_offsets(text, start_keyword),
            stops: find_keyword_offsets(text, stop_keyword),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty() && self.stops.is_empty()
    }
}
