use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while updating the issue templates.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error when the version file is not valid JSON
    #[error("Failed to parse version file '{path}': {source}")]
    Versions {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Error when a template is not valid YAML or cannot be serialized
    #[error("Invalid template '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Error when a version has a non-numeric component
    #[error("Invalid version '{0}': every dot separated part must be a number")]
    InvalidVersion(String),

    #[error("The version file does not list any mod version")]
    NoModVersions,

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] globset::Error),
}

impl TemplateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
