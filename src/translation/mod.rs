//! Translation synchronization.
//!
//! The master file (`config/MasterTranslations.xml`) decides which keys exist and
//! how they are grouped. The per-language files in the translation directory add
//! texts for languages the master does not define, and are then regenerated from
//! the merged catalog.
mod bootstrap;
mod catalog;
mod error;
mod master;
mod merger;
mod overrides;

use std::path::Path;

pub use bootstrap::{
    INITIAL_CATEGORY,
    build_initial_catalog,
    create_initial_master,
};
pub use catalog::{
    Catalog,
    Category,
    TranslationEntry,
};
pub use error::TranslationError;
pub use master::{
    load_master,
    render_master,
};
pub use merger::{
    LanguageMerger,
    MergeStats,
    SyncReport,
    synchronize,
};
pub use overrides::{
    OverrideFile,
    OverrideSet,
    SkippedFile,
    discover_override_files,
    load_override_dir,
    load_override_file,
};

use crate::xml::{
    Element,
    escape_attribute_newlines,
    parse_document,
};

/// Reads an XML file, escaping newlines in attribute values before parsing.
pub(crate) fn read_document(path: &Path) -> Result<Element, TranslationError> {
    let source = std::fs::read_to_string(path).map_err(|e| TranslationError::io(path, e))?;
    let escaped = escape_attribute_newlines(&source);
    parse_document(&escaped)
        .map_err(|source| TranslationError::Parse { path: path.to_path_buf(), source })
}
