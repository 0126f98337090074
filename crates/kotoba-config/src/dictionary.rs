use serde::{Deserialize, Serialize};

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_words() -> String {
    "dict.dat".to_string()
}

fn default_names() -> String {
    "names.dat".to_string()
}

fn default_names_index() -> String {
    "names.idx".to_string()
}

fn default_kanji() -> String {
    "kanji.dat".to_string()
}

fn default_radicals() -> String {
    "radicals.dat".to_string()
}

/// Locations of the dictionary data files.
///
/// File names are resolved by the host's file source, relative to
/// `data_dir` when the host reads from disk.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_words")]
    pub words: String,
    /// Index for the word dictionary; built from the entries when unset
    #[serde(default)]
    pub words_index: Option<String>,
    #[serde(default = "default_names")]
    pub names: String,
    #[serde(default = "default_names_index")]
    pub names_index: String,
    #[serde(default = "default_kanji")]
    pub kanji: String,
    #[serde(default = "default_radicals")]
    pub radicals: String,
    /// Replacement deinflection rules; the bundled rules are used when unset
    #[serde(default)]
    pub deinflect: Option<String>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            words: default_words(),
            words_index: None,
            names: default_names(),
            names_index: default_names_index(),
            kanji: default_kanji(),
            radicals: default_radicals(),
            deinflect: None,
        }
    }
}
