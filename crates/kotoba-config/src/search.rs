use serde::{Deserialize, Serialize};

fn default_max_entries() -> usize {
    7
}

fn default_max_name_entries() -> usize {
    20
}

fn default_max_deinflect_depth() -> usize {
    10
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Word entries returned per search
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Name entries returned per search
    #[serde(default = "default_max_name_entries")]
    pub max_name_entries: usize,
    /// Longest chain of rules the deinflector will follow
    #[serde(default = "default_max_deinflect_depth")]
    pub max_deinflect_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            max_name_entries: default_max_name_entries(),
            max_deinflect_depth: default_max_deinflect_depth(),
        }
    }
}
