//! Per-language translation files (`translation_<lang>.xml`).
//!
//! ```xml
//! <l10n>
//!     <texts>
//!         <text name="greeting" text="Hallo"/>
//!     </texts>
//! </l10n>
//! ```

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use globset::{
    GlobBuilder,
    GlobMatcher,
};
use indexmap::IndexMap;

use super::error::TranslationError;
use super::read_document;
use crate::types::{
    LanguageCode,
    TRANSLATION_FILE_PREFIX,
    TRANSLATION_FILE_SUFFIX,
};
use crate::xml::Element;

/// Texts supplied by one language file, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideFile {
    pub language: LanguageCode,
    pub path: PathBuf,
    pub texts: IndexMap<String, String>,
}

/// An input file that was left out of a run, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Language files found in a directory.
#[derive(Debug, Default)]
pub struct OverrideSet {
    pub files: Vec<OverrideFile>,
    pub skipped: Vec<SkippedFile>,
}

fn translation_file_matcher() -> Result<GlobMatcher, TranslationError> {
    let pattern = format!("{TRANSLATION_FILE_PREFIX}*{TRANSLATION_FILE_SUFFIX}");
    Ok(GlobBuilder::new(&pattern).literal_separator(true).build()?.compile_matcher())
}

/// Lists `translation_*.xml` files of a directory, sorted by file name.
///
/// # Errors
/// Returns an I/O error if the directory cannot be read.
pub fn discover_override_files(dir: &Path) -> Result<Vec<PathBuf>, TranslationError> {
    let matcher = translation_file_matcher()?;
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| TranslationError::io(dir, e))? {
        let entry = entry.map_err(|e| TranslationError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.file_name().is_some_and(|name| matcher.is_match(name)) {
            files.push(path);
        } else {
            tracing::debug!(path = %path.display(), "Ignoring non-translation file");
        }
    }

    files.sort();
    Ok(files)
}

/// Loads a single language file. The language is taken from the file name.
///
/// Duplicate names inside one file keep their first text.
///
/// # Errors
/// - File name does not follow `translation_<lang>.xml`
/// - File cannot be read or parsed
/// - `<texts>` is missing or a `<text>` lacks `name` or `text`
pub fn load_override_file(path: &Path) -> Result<OverrideFile, TranslationError> {
    let language = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(LanguageCode::from_file_name)
        .ok_or_else(|| {
            TranslationError::invalid(path, "file name does not match translation_<lang>.xml")
        })?;

    let root = read_document(path)?;
    let texts = texts_from_element(path, &root)?;
    tracing::debug!(path = %path.display(), %language, texts = texts.len(), "Loaded language file");

    Ok(OverrideFile { language, path: path.to_path_buf(), texts })
}

pub(crate) fn texts_from_element(
    path: &Path,
    root: &Element,
) -> Result<IndexMap<String, String>, TranslationError> {
    let texts_element = root
        .child("texts")
        .ok_or_else(|| TranslationError::invalid(path, "missing <texts> element"))?;

    let mut texts = IndexMap::new();
    for text in texts_element.descendants("text") {
        let (Some(name), Some(value)) = (text.attr("name"), text.attr("text")) else {
            return Err(TranslationError::invalid(
                path,
                "<text> element needs both 'name' and 'text' attributes",
            ));
        };
        texts.entry(name.to_string()).or_insert_with(|| value.to_string());
    }
    Ok(texts)
}

/// Loads every language file of a directory.
///
/// Files that cannot be read or parsed are reported in [`OverrideSet::skipped`]
/// instead of failing the whole run.
///
/// # Errors
/// Returns an I/O error if the directory itself cannot be read.
pub fn load_override_dir(dir: &Path) -> Result<OverrideSet, TranslationError> {
    let mut set = OverrideSet::default();
    for path in discover_override_files(dir)? {
        match load_override_file(&path) {
            Ok(file) => set.files.push(file),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Skipping language file");
                set.skipped.push(SkippedFile { path, reason: error.to_string() });
            }
        }
    }
    Ok(set)
}
