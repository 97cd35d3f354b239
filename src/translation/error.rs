use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing translation documents.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error when a file or directory cannot be read or written
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error when a document is not well-formed XML
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: xml::reader::Error,
    },

    /// Error when a well-formed document does not have the expected structure
    #[error("Invalid translation document '{path}': {message}")]
    InvalidDocument { path: PathBuf, message: String },

    /// Error when serializing a document
    #[error("Failed to write XML: {0}")]
    Write(#[from] xml::writer::Error),

    /// Error when building the translation file pattern
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// Refusal to overwrite an existing master file
    #[error("Master translation file '{0}' already exists, use --force to overwrite it")]
    MasterExists(PathBuf),
}

impl TranslationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidDocument { path: path.into(), message: message.into() }
    }
}
