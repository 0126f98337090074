use std::io;

/// Result alias used by every loading operation.
pub type Result<T, E = LoadError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Loader interrupted: {0}")]
    Interrupted(String),
}

impl LoadError {
    /// Wrap an I/O failure for `path`, keeping missing files distinguishable.
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat(message.into())
    }
}
