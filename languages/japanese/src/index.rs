use std::collections::BTreeMap;
use std::ops::Range;

use kotoba_core::{Dictionary, DictionaryMetadata, EntryRef, SortedLines};

use crate::kana;

/// EDICT-style dictionary text plus its key index.
///
/// Index lines are `key,offset[,offset…]`, sorted by key, where each offset
/// is the UTF-16 code unit position of an entry line in the dictionary text
/// (the layout of the existing `.idx` data files).
pub struct IndexedDictionary {
    name: String,
    text: String,
    lines: Vec<Range<usize>>,
    utf16_starts: Vec<usize>,
    index: SortedLines,
}

impl IndexedDictionary {
    pub fn new(name: impl Into<String>, text: String, index: String) -> Self {
        let mut lines = Vec::new();
        let mut utf16_starts = Vec::new();
        let mut start = 0;
        let mut utf16 = 0;
        for line in text.split_inclusive('\n') {
            let end = start + line.trim_end_matches(['\n', '\r']).len();
            if end > start {
                lines.push(start..end);
                utf16_starts.push(utf16);
            }
            start += line.len();
            utf16 += line.encode_utf16().count();
        }

        Self {
            name: name.into(),
            text,
            lines,
            utf16_starts,
            index: SortedLines::new(index),
        }
    }

    /// Build the index from the entries themselves.
    pub fn from_entries(name: impl Into<String>, text: String) -> Self {
        let index = build_index(&text);
        Self::new(name, text, index)
    }

    pub fn entry(&self, id: usize) -> Option<&str> {
        self.lines.get(id).map(|r| &self.text[r.clone()])
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    fn entry_at_offset(&self, offset: usize) -> Option<EntryRef<'_>> {
        let id = self.utf16_starts.binary_search(&offset).ok()?;
        self.entry(id).map(|text| EntryRef { id, text })
    }
}

impl Dictionary for IndexedDictionary {
    fn lookup(&self, key: &str) -> Vec<EntryRef<'_>> {
        if key.is_empty() {
            return Vec::new();
        }
        let Some(line) = self.index.find(&format!("{key},")) else {
            return Vec::new();
        };

        line.split(',')
            .skip(1)
            .filter_map(|offset| {
                let entry = offset
                    .trim()
                    .parse()
                    .ok()
                    .and_then(|offset| self.entry_at_offset(offset));
                if entry.is_none() {
                    tracing::warn!("{}: index offset '{offset}' for {key} is not an entry", self.name);
                }
                entry
            })
            .collect()
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: self.name.clone(),
            entry_count: self.lines.len(),
        }
    }
}

/// Headword and bracketed reading of an entry line.
pub fn entry_keys(line: &str) -> Vec<&str> {
    let mut parts = line.split(' ');
    let (Some(headword), Some(second)) = (parts.next(), parts.next()) else {
        return Vec::new();
    };
    let mut keys = vec![headword];
    if let Some(reading) = second.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        keys.push(reading);
    }
    keys.retain(|k| !k.is_empty());
    keys
}

/// Produce index text for `text`, keyed by headword, reading, and their
/// hiragana forms.
pub fn build_index(text: &str) -> String {
    let mut keys: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut utf16 = 0;
    for line in text.split_inclusive('\n') {
        let entry = line.trim_end_matches(['\n', '\r']);
        for key in entry_keys(entry) {
            for key in [key.to_string(), kana::to_hiragana(key)] {
                let offsets = keys.entry(key).or_default();
                if !offsets.contains(&utf16) {
                    offsets.push(utf16);
                }
            }
        }
        utf16 += line.encode_utf16().count();
    }

    let mut out = String::new();
    for (key, offsets) in keys {
        out.push_str(&key);
        for offset in offsets {
            out.push(',');
            out.push_str(&offset.to_string());
        }
        out.push('\n');
    }
    out
}
