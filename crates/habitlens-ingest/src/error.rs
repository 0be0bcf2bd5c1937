#![deny(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The collection's source file is absent. Recoverable: the pipeline
    /// skips the collection with a warning.
    #[error("collection source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("failed to open {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read document stream for '{collection}'")]
    Read {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    /// A malformed or truncated document. Fatal: the whole collection load
    /// aborts so analyses never run on corrupt data.
    #[error("malformed document in '{collection}'")]
    Decode {
        collection: String,
        #[source]
        source: bson::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
