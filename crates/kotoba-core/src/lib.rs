pub mod dictionary;
pub mod error;
pub mod source;

pub use dictionary::{Dictionary, DictionaryMetadata, EntryRef, SortedLines};
pub use error::{LoadError, Result};
pub use source::{DirSource, FileSource, MemorySource};
