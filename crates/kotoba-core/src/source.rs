use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{LoadError, Result};

/// Synchronous "read whole file as text" capability.
///
/// The lookup engine never touches the filesystem directly; hosts decide
/// where dictionary data lives by handing the store one of these.
pub trait FileSource: Send + Sync {
    /// Return the full contents of `path` as a single string.
    fn read_to_string(&self, path: &str) -> Result<String>;
}

impl<T: FileSource + ?Sized> FileSource for &T {
    fn read_to_string(&self, path: &str) -> Result<String> {
        (**self).read_to_string(path)
    }
}

impl<T: FileSource + ?Sized> FileSource for Arc<T> {
    fn read_to_string(&self, path: &str) -> Result<String> {
        (**self).read_to_string(path)
    }
}

impl<T: FileSource + ?Sized> FileSource for Box<T> {
    fn read_to_string(&self, path: &str) -> Result<String> {
        (**self).read_to_string(path)
    }
}

/// Reads files relative to a root directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSource for DirSource {
    fn read_to_string(&self, path: &str) -> Result<String> {
        let full = self.root.join(path);
        tracing::debug!("Reading {}", full.display());
        std::fs::read_to_string(&full).map_err(|e| LoadError::io(full.display().to_string(), e))
    }
}

/// In-memory files, for hosts that already hold the data as text.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
    reads: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Number of successful reads served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl FileSource for MemorySource {
    fn read_to_string(&self, path: &str) -> Result<String> {
        let contents = self
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                path: path.to_string(),
            })?;
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_serves_inserted_files() {
        let source = MemorySource::new().with_file("dict.dat", "だ /(cop) be/\n");
        assert_eq!(source.read_to_string("dict.dat").unwrap(), "だ /(cop) be/\n");
        assert_eq!(source.read_count(), 1);
    }

    #[test]
    fn memory_source_reports_missing_files() {
        let source = MemorySource::new();
        let err = source.read_to_string("names.dat").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(source.read_count(), 0);
    }

    #[test]
    fn dir_source_reports_missing_files() {
        let source = DirSource::new(env!("CARGO_MANIFEST_DIR"));
        let err = source.read_to_string("no-such-file.dat").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn dir_source_reads_relative_to_root() {
        let source = DirSource::new(env!("CARGO_MANIFEST_DIR"));
        let manifest = source.read_to_string("Cargo.toml").unwrap();
        assert!(manifest.contains("kotoba-core"));
    }

    #[test]
    fn shared_sources_delegate() {
        let source = Arc::new(MemorySource::new().with_file("a", "b"));
        let shared: &dyn FileSource = &source;
        assert_eq!(shared.read_to_string("a").unwrap(), "b");
        assert_eq!(source.read_count(), 1);
    }
}
