//! Pluggable free-text date phrase parsing.

use meddate_model::CalendarValue;

/// Resolves a free-text date phrase ("last Tuesday", "three days ago").
///
/// Implementations must be total: text they cannot read maps to
/// [`CalendarValue::Unknown`].
pub trait DatePhraseParser: Send + Sync {
    fn parse(&self, text: &str) -> CalendarValue;
}

/// Parser used when no phrase parser is configured; resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPhraseParser;

impl DatePhraseParser for DisabledPhraseParser {
    fn parse(&self, _text: &str) -> CalendarValue {
        CalendarValue::Unknown
    }
}

impl<F> DatePhraseParser for F
where
    F: Fn(&str) -> CalendarValue + Send + Sync,
{
    fn parse(&self, text: &str) -> CalendarValue {
        self(text)
    }
}
