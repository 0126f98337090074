use std::sync::Arc;

use kotoba_config::Config;
use kotoba_config::search::SearchConfig;
use kotoba_core::{Dictionary, DirSource, FileSource, LoadError, Result};

use crate::deinflector::{Deinflection, JapaneseDeinflector};
use crate::kanji::KanjiEntry;
use crate::rules::RuleSet;
use crate::search::{self, SearchResult};
use crate::store::DictionaryStore;

/// Japanese lookup engine: dictionary data plus the deinflector.
pub struct JapaneseProcessor<S> {
    store: DictionaryStore<S>,
    deinflector: JapaneseDeinflector,
    search: SearchConfig,
}

impl JapaneseProcessor<DirSource> {
    /// Load from the configured data directory.
    pub fn open(config: &Config) -> Result<Self> {
        Self::load(DirSource::new(&config.dictionary.data_dir), config)
    }
}

impl<S: FileSource> JapaneseProcessor<S> {
    /// Read rules and dictionaries through `source`.
    ///
    /// The name dictionary is left for the first search that asks for names.
    pub fn load(source: S, config: &Config) -> Result<Self> {
        let store = DictionaryStore::new(source, config.dictionary.clone());

        let rules = match &config.dictionary.deinflect {
            Some(path) => RuleSet::parse(&store.load_file(path)?)?,
            None => RuleSet::bundled()?,
        };
        let deinflector = JapaneseDeinflector::new(rules, config.search.max_deinflect_depth);

        store.load()?;
        tracing::info!("Japanese processor ready");

        Ok(Self {
            store,
            deinflector,
            search: config.search,
        })
    }

    pub fn store(&self) -> &DictionaryStore<S> {
        &self.store
    }

    pub fn deinflect(&self, word: &str) -> Vec<Deinflection> {
        self.deinflector.deinflect(word)
    }

    /// Longest dictionary match at the start of `text`, optionally including
    /// the name dictionary.
    pub fn word_search(&self, text: &str, include_names: bool) -> Option<SearchResult> {
        let words = self.store.words()?;
        let names = if include_names {
            match self.store.load_names() {
                Ok(names) => Some(names),
                Err(e) => {
                    tracing::warn!("Searching without names: {e}");
                    None
                }
            }
        } else {
            None
        };

        search::word_search(
            words,
            names.map(|n| n as &dyn Dictionary),
            &self.deinflector,
            &self.search,
            text,
        )
    }

    pub fn kanji_search(&self, text: &str) -> Option<KanjiEntry> {
        self.store.kanji()?.search(text, self.store.radicals())
    }
}

impl<S: FileSource + 'static> JapaneseProcessor<S> {
    /// [`JapaneseProcessor::load`] on the blocking thread pool.
    pub async fn load_async(source: S, config: Config) -> Result<Arc<Self>> {
        tokio::task::spawn_blocking(move || Self::load(source, &config).map(Arc::new))
            .await
            .map_err(|e| LoadError::Interrupted(e.to_string()))?
    }
}
