pub mod deinflector;
pub mod index;
pub mod kana;
pub mod kanji;
pub mod processor;
pub mod rules;
pub mod search;
pub mod store;

#[cfg(test)]
mod tests;

pub use deinflector::{Deinflection, JapaneseDeinflector};
pub use index::IndexedDictionary;
pub use kanji::{KanjiDictionary, KanjiEntry, Radical, RadicalTable};
pub use processor::JapaneseProcessor;
pub use rules::{RuleSet, WordType};
pub use search::{EntrySource, SearchResult, WordEntry};
pub use store::DictionaryStore;
