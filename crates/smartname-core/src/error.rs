use std::path::PathBuf;

/// Unified error type for smartname-core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config I/O error at {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config serialize error: {0}")]
    ConfigSerialize(#[source] toml::ser::Error),

    #[error("extraction error for {path}: {message}")]
    Extraction { path: PathBuf, message: String },

    #[error("empty document: {path}")]
    EmptyDocument { path: PathBuf },

    #[error("gateway error: {0}")]
    Gateway(String),

    #[error("directory '{0}' does not exist")]
    DirectoryNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
