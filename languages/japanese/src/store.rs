use std::sync::OnceLock;

use kotoba_config::dictionary::DictionaryConfig;
use kotoba_core::dictionary::text_to_lines;
use kotoba_core::{FileSource, Result};

use crate::index::IndexedDictionary;
use crate::kanji::{KanjiDictionary, RadicalTable};

/// Loaded dictionary data.
///
/// Every resource is read at most once. A failed load leaves its slot empty
/// so the caller can try again.
pub struct DictionaryStore<S> {
    source: S,
    config: DictionaryConfig,
    words: OnceLock<IndexedDictionary>,
    names: OnceLock<IndexedDictionary>,
    kanji: OnceLock<KanjiDictionary>,
    radicals: OnceLock<RadicalTable>,
}

fn load_once<T>(cell: &OnceLock<T>, init: impl FnOnce() -> Result<T>) -> Result<&T> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value))
}

impl<S: FileSource> DictionaryStore<S> {
    pub fn new(source: S, config: DictionaryConfig) -> Self {
        Self {
            source,
            config,
            words: OnceLock::new(),
            names: OnceLock::new(),
            kanji: OnceLock::new(),
            radicals: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn load_file(&self, path: &str) -> Result<String> {
        self.source.read_to_string(path)
    }

    pub fn load_file_as_lines(&self, path: &str) -> Result<Vec<String>> {
        Ok(text_to_lines(&self.load_file(path)?))
    }

    /// Load the word dictionary, kanji dictionary and radical table.
    pub fn load(&self) -> Result<()> {
        load_once(&self.words, || {
            let text = self.load_file(&self.config.words)?;
            let words = match &self.config.words_index {
                Some(index) => IndexedDictionary::new("words", text, self.load_file(index)?),
                None => IndexedDictionary::from_entries("words", text),
            };
            tracing::info!(
                "Loaded {} word entries ({} index keys)",
                words.len(),
                words.index_len()
            );
            Ok(words)
        })?;

        load_once(&self.kanji, || {
            let kanji = KanjiDictionary::new(self.load_file(&self.config.kanji)?);
            tracing::info!("Loaded {} kanji records", kanji.len());
            Ok(kanji)
        })?;

        load_once(&self.radicals, || {
            let lines = self.load_file_as_lines(&self.config.radicals)?;
            let radicals = RadicalTable::from_lines(lines)?;
            tracing::info!("Loaded {} radicals", radicals.len());
            Ok(radicals)
        })?;

        Ok(())
    }

    /// Load the name dictionary together with its index.
    pub fn load_names(&self) -> Result<&IndexedDictionary> {
        load_once(&self.names, || {
            let text = self.load_file(&self.config.names)?;
            let index = self.load_file(&self.config.names_index)?;
            let names = IndexedDictionary::new("names", text, index);
            tracing::info!(
                "Loaded {} name entries ({} index keys)",
                names.len(),
                names.index_len()
            );
            Ok(names)
        })
    }

    pub fn words(&self) -> Option<&IndexedDictionary> {
        self.words.get()
    }

    pub fn names(&self) -> Option<&IndexedDictionary> {
        self.names.get()
    }

    pub fn kanji(&self) -> Option<&KanjiDictionary> {
        self.kanji.get()
    }

    pub fn radicals(&self) -> Option<&RadicalTable> {
        self.radicals.get()
    }
}

#[cfg(test)]
mod tests {
    use kotoba_core::{LoadError, MemorySource};

    use super::*;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_file("dict.dat", "だ /(cop,cop-da) be; is/\n")
            .with_file("names.dat", "愛子 [あいこ] /(f) Aiko/\n")
            .with_file("names.idx", "あいこ,0\n愛子,0\n")
            .with_file("kanji.dat", "日|B72 S4|ニチ ひ|か||day\n")
            .with_file("radicals.dat", "⼀\t一\tone\tいち\n")
    }

    #[test]
    fn lines_keep_inner_trailing_spaces() {
        let store = DictionaryStore::new(
            MemorySource::new().with_file("f", "a  \nb \nc \n\n"),
            DictionaryConfig::default(),
        );
        assert_eq!(store.load_file_as_lines("f").unwrap(), ["a  ", "b ", "c"]);
    }

    #[test]
    fn missing_files_are_not_found() {
        let store = DictionaryStore::new(MemorySource::new(), DictionaryConfig::default());
        let err = store.load().unwrap_err();
        assert!(matches!(err, LoadError::NotFound { ref path } if path == "dict.dat"));
        assert!(store.words().is_none());
    }

    #[test]
    fn load_is_idempotent() {
        let store = DictionaryStore::new(source(), DictionaryConfig::default());
        store.load().unwrap();
        let reads = store.source().read_count();
        assert_eq!(reads, 3);

        store.load().unwrap();
        assert_eq!(store.source().read_count(), reads);
        assert_eq!(store.words().unwrap().len(), 1);
        assert_eq!(store.kanji().unwrap().len(), 1);
        assert_eq!(store.radicals().unwrap().len(), 1);
        assert!(store.names().is_none());
    }

    #[test]
    fn names_load_once() {
        let store = DictionaryStore::new(source(), DictionaryConfig::default());
        let first = store.load_names().unwrap().len();
        assert_eq!(store.source().read_count(), 2);

        let second = store.load_names().unwrap().len();
        assert_eq!(first, 1);
        assert_eq!(first, second);
        assert_eq!(store.source().read_count(), 2);
    }

    #[test]
    fn failed_name_load_leaves_names_empty() {
        let source = MemorySource::new().with_file("names.dat", "愛子 [あいこ] /(f) Aiko/\n");
        let store = DictionaryStore::new(source, DictionaryConfig::default());
        assert!(matches!(store.load_names(), Err(LoadError::NotFound { .. })));
        assert!(store.names().is_none());
        assert!(store.load_names().is_err());
    }

    #[test]
    fn shipped_word_index_is_used_when_configured() {
        let config = DictionaryConfig {
            words_index: Some("dict.idx".to_string()),
            ..DictionaryConfig::default()
        };
        let store = DictionaryStore::new(source().with_file("dict.idx", "だ,0\n"), config);
        store.load().unwrap();
        assert_eq!(store.words().unwrap().index_len(), 1);
        assert_eq!(store.source().read_count(), 4);
    }
}
