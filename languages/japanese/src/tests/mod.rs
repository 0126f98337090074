
use std::path::PathBuf;
use std::sync::OnceLock;

use kotoba_config::Config;
use kotoba_core::DirSource;
use tracing_subscriber::EnvFilter;

use crate::JapaneseProcessor;

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub(crate) fn sample_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample")
}

pub(crate) fn sample_config() -> Config {
    let mut config = Config::default();
    config.dictionary.data_dir = sample_dir().display().to_string();
    config.dictionary.words_index = Some("dict.idx".to_string());
    config
}

/// Processor over the sample data, shared by every test.
pub(crate) fn processor() -> &'static JapaneseProcessor<DirSource> {
    static PROCESSOR: OnceLock<JapaneseProcessor<DirSource>> = OnceLock::new();
    PROCESSOR.get_or_init(|| {
        init_tracing();
        JapaneseProcessor::open(&sample_config()).expect("sample data loads")
    })
}
