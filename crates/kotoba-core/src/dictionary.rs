use std::ops::Range;

use serde::Serialize;

/// Keyed dictionary lookup operations
pub trait Dictionary: Send + Sync {
    /// Entries whose key is exactly `key`, in index order
    fn lookup(&self, key: &str) -> Vec<EntryRef<'_>>;

    /// Get dictionary metadata
    fn metadata(&self) -> DictionaryMetadata;
}

/// A dictionary line together with a stable identifier for de-duplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRef<'a> {
    pub id: usize,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryMetadata {
    pub name: String,
    pub entry_count: usize,
}

/// Split file contents into records.
///
/// Only the final element loses its trailing whitespace; earlier lines are
/// kept verbatim because fixed-width records may end in meaningful spaces.
pub fn text_to_lines(text: &str) -> Vec<String> {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('\n').map(str::to_string).collect()
}

/// Newline-delimited records searchable by the leading part of each line.
///
/// Lookup is a binary search, so the lines must be in byte order. Data that
/// isn't gets its line table sorted once at construction.
#[derive(Debug, Clone, Default)]
pub struct SortedLines {
    text: String,
    lines: Vec<Range<usize>>,
}

impl SortedLines {
    pub fn new(text: String) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        for line in text.split_inclusive('\n') {
            let end = start + line.trim_end_matches(['\n', '\r']).len();
            if end > start {
                lines.push(start..end);
            }
            start += line.len();
        }

        let mut this = Self { text, lines };
        let sorted = this
            .lines
            .windows(2)
            .all(|w| this.text[w[0].clone()] <= this.text[w[1].clone()]);
        if !sorted {
            tracing::warn!("Line data is not sorted, sorting {} lines", this.lines.len());
            let text = &this.text;
            this.lines.sort_by(|a, b| text[a.clone()].cmp(&text[b.clone()]));
        }
        this
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(|r| &self.text[r.clone()])
    }

    /// First line (in sort order) that starts with `prefix`.
    pub fn find(&self, prefix: &str) -> Option<&str> {
        if prefix.is_empty() {
            return None;
        }
        let pos = self
            .lines
            .partition_point(|r| &self.text[r.clone()] < prefix);
        self.line(pos).filter(|line| line.starts_with(prefix))
    }
}
