use std::path::PathBuf;

use thiserror::Error;

use crate::translation::TranslationError;

/// Errors raised while exporting the help menu for the website.
#[derive(Error, Debug)]
pub enum HelpMenuError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: xml::reader::Error,
    },

    #[error("Invalid help menu document '{path}': {message}")]
    InvalidDocument { path: PathBuf, message: String },

    #[error("Image error on '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to decode DDS image '{path}': {message}")]
    Dds { path: PathBuf, message: String },

    #[error("Invalid image region {uvs:?} for '{filename}'")]
    InvalidRegion { filename: String, uvs: Vec<u32> },

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Translation(#[from] TranslationError),
}

impl HelpMenuError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidDocument { path: path.into(), message: message.into() }
    }
}
