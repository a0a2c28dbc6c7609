use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WordCountResult {
    pub count: u32,
    pub limit: u32,
    pub exceeded: bool,
}

impl WordCountResult {
    /// Validation message to show on the work item, if the limit is exceeded.
    pub fn message(&self) -> Option<String> {
        self.exceeded.then(|| {
            format!(
                "Description contains {} words but should have less than {} words",
                self.count, self.limit
            )
        })
    }
}

pub trait WordCounter: Send + Sync {
    fn count(&self, raw: &str) -> u32;

    fn evaluate(&self, raw: Option<&str>, limit: u32) -> WordCountResult {
        let count = raw.map_or(0, |raw| self.count(raw));
        WordCountResult {
            count,
            limit,
            exceeded: count > limit,
        }
    }
}

/// Counts words separated by [`is_separator`] after stripping `<...>` tags.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupWordCounter;

impl WordCounter for MarkupWordCounter {
    fn count(&self, raw: &str) -> u32 {
        let words = strip_markup(raw)
            .split(is_separator)
            .filter(|word| !word.is_empty())
            .count();
        u32::try_from(words).unwrap_or(u32::MAX)
    }
}

/// Remove every tag-like `<...>` run. Nothing is inserted in its place, so
/// `a<br>b` reads as a single word.
pub fn strip_markup(raw: &str) -> std::borrow::Cow<'_, str> {
    TAG_PATTERN.replace_all(raw, "")
}

/// Word separators as rich-text editors and browsers treat them: Unicode
/// White_Space plus the byte order mark U+FEFF, minus NEL (U+0085).
pub fn is_separator(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}')
}

pub fn evaluate(raw: Option<&str>, limit: u32) -> WordCountResult {
    MarkupWordCounter.evaluate(raw, limit)
}
