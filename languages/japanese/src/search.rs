use std::collections::HashSet;

use kotoba_config::search::SearchConfig;
use kotoba_core::Dictionary;
use serde::Serialize;

use crate::deinflector::{Deinflection, JapaneseDeinflector};
use crate::kana::{self, FULLWIDTH_TILDE, ZERO_WIDTH_NON_JOINER};
use crate::rules::WordType;

/// Scanning stops at the first code point at or below this.
const QUERY_LIMIT: u32 = 0x3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    Word,
    Name,
}

/// A dictionary line matched by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    /// The line exactly as stored in the dictionary
    pub entry: String,
    /// Deinflection chain, set only for inflected matches
    pub reason: Option<String>,
    pub source: EntrySource,
}

impl WordEntry {
    /// `< reason`, the way inflected matches are annotated.
    pub fn reason_label(&self) -> Option<String> {
        self.reason.as_ref().map(|reason| format!("< {reason}"))
    }

    pub fn is_name(&self) -> bool {
        self.source == EntrySource::Name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub entries: Vec<WordEntry>,
    /// Characters of the searched text covered by the longest match
    pub match_len: usize,
    /// Whether entries were left out because of the result cap
    pub more: bool,
}

/// Search text normalized to hiragana, remembering how many characters of
/// the searched text each normalized prefix covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    chars: Vec<char>,
    true_len: Vec<usize>,
}

impl Query {
    pub fn new(text: &str) -> Self {
        let source: Vec<char> = text.chars().collect();
        let mut chars = Vec::new();
        let mut true_len = vec![0];

        let mut i = 0;
        while let Some(&c) = source.get(i) {
            if c == ZERO_WIDTH_NON_JOINER || c == FULLWIDTH_TILDE {
                i += 1;
                continue;
            }
            if c as u32 <= QUERY_LIMIT {
                break;
            }
            let Some((normalized, used)) = kana::normalize_at(&source, i) else {
                break;
            };
            chars.push(normalized);
            i += used;
            true_len.push(i);
        }

        Self { chars, true_len }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// First `len` normalized characters.
    pub fn prefix(&self, len: usize) -> String {
        self.chars[..len.min(self.chars.len())].iter().collect()
    }

    /// Characters of the searched text covered by a prefix of `len`.
    pub fn source_len(&self, len: usize) -> usize {
        self.true_len[len.min(self.chars.len())]
    }
}

/// Tags in the parenthesised groups that open the gloss, e.g. `n`, `vs` and
/// `uk` for `…/(n,vs) (uk) test/`.
pub fn pos_tags(entry: &str) -> Vec<&str> {
    let Some((_, mut rest)) = entry.split_once('/') else {
        return Vec::new();
    };
    let mut tags = Vec::new();
    while let Some(group) = rest.trim_start().strip_prefix('(') {
        let Some((inner, after)) = group.split_once(')') else {
            break;
        };
        tags.extend(inner.split(',').map(str::trim));
        rest = after;
    }
    tags
}

/// Whether any part-of-speech tag of `entry` belongs to `word_type`.
fn pos_matches(entry: &str, word_type: WordType) -> bool {
    pos_tags(entry)
        .into_iter()
        .any(|tag| word_type.matches_pos(tag))
}

struct Matches {
    entries: Vec<WordEntry>,
    match_len: usize,
    more: bool,
}

/// Longest prefix of `query` with at least one accepted entry.
fn longest_match(
    dict: &dyn Dictionary,
    query: &Query,
    max_entries: usize,
    source: EntrySource,
    candidates: impl Fn(&str) -> Vec<Deinflection>,
) -> Option<Matches> {
    for len in (1..=query.len()).rev() {
        let prefix = query.prefix(len);
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let mut more = false;

        'candidates: for candidate in candidates(&prefix) {
            for found in dict.lookup(&candidate.word) {
                if seen.contains(&found.id) {
                    continue;
                }
                if candidate.is_inflected() && !pos_matches(found.text, candidate.word_type) {
                    continue;
                }
                if entries.len() >= max_entries {
                    more = true;
                    break 'candidates;
                }
                seen.insert(found.id);
                entries.push(WordEntry {
                    entry: found.text.to_string(),
                    reason: candidate.is_inflected().then(|| candidate.reason.clone()),
                    source,
                });
            }
        }

        if !entries.is_empty() {
            return Some(Matches {
                entries,
                match_len: query.source_len(len),
                more,
            });
        }
    }
    None
}

/// Look up the longest dictionary words at the start of `text`.
///
/// Word matches are deinflected; name matches are not and follow the word
/// entries in the result.
pub fn word_search(
    words: &dyn Dictionary,
    names: Option<&dyn Dictionary>,
    deinflector: &JapaneseDeinflector,
    config: &SearchConfig,
    text: &str,
) -> Option<SearchResult> {
    let query = Query::new(text);
    if query.is_empty() {
        return None;
    }

    let word_matches = longest_match(words, &query, config.max_entries, EntrySource::Word, |p| {
        deinflector.deinflect(p)
    });
    let name_matches = names.and_then(|names| {
        longest_match(
            names,
            &query,
            config.max_name_entries,
            EntrySource::Name,
            |p| vec![Deinflection::identity(p)],
        )
    });

    let result = match (word_matches, name_matches) {
        (None, None) => None,
        (Some(m), None) | (None, Some(m)) => Some(SearchResult {
            entries: m.entries,
            match_len: m.match_len,
            more: m.more,
        }),
        (Some(words), Some(names)) => Some(SearchResult {
            match_len: words.match_len.max(names.match_len),
            more: words.more || names.more,
            entries: words.entries.into_iter().chain(names.entries).collect(),
        }),
    };

    match &result {
        Some(r) => tracing::debug!(
            "{} entries for {text} covering {} characters",
            r.entries.len(),
            r.match_len
        ),
        None => tracing::debug!("No entries for {text}"),
    }
    result
}
