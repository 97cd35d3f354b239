//! Merges language files into the master catalog and renders one document per language.

use std::path::PathBuf;

use super::catalog::Catalog;
use super::error::TranslationError;
use super::master::load_master;
use super::overrides::{
    OverrideFile,
    SkippedFile,
    load_override_dir,
};
use crate::config::ConfigManager;
use crate::types::LanguageCode;
use crate::xml::{
    DocumentWriter,
    replace_file,
};

/// Counters of a single [`LanguageMerger::merge`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Texts taken over from the language file
    pub applied: usize,
    /// Texts ignored because the master already defines the language
    pub kept_master: usize,
    /// Texts ignored because the key is not in the master
    pub unknown_keys: usize,
}

/// Master catalog enriched with the texts of the language files.
#[derive(Debug, Clone)]
pub struct LanguageMerger {
    catalog: Catalog,
    fallback: LanguageCode,
}

impl LanguageMerger {
    #[must_use]
    pub const fn new(catalog: Catalog, fallback: LanguageCode) -> Self {
        Self { catalog, fallback }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Adds the texts of one language file.
    ///
    /// The master decides which keys exist and wins on conflicts: a text is only
    /// taken if the key is known and the master has no text for that language.
    pub fn merge(&mut self, file: &OverrideFile) -> MergeStats {
        let mut stats = MergeStats::default();
        for (key, text) in &file.texts {
            let Some(entry) = self.catalog.entry_mut(key) else {
                tracing::debug!(key, language = %file.language, "Key not in master, ignoring");
                stats.unknown_keys += 1;
                continue;
            };
            if entry.set_if_absent(&file.language, text) {
                stats.applied += 1;
            } else {
                stats.kept_master += 1;
            }
        }
        stats
    }

    /// Renders the language file for `language`.
    ///
    /// Every master key is written exactly once, grouped under a comment with its
    /// category name. Missing texts fall back to the fallback language, then to `""`.
    ///
    /// # Errors
    /// Returns the emitter error.
    pub fn render(&self, language: &LanguageCode) -> Result<Vec<u8>, TranslationError> {
        let mut writer = DocumentWriter::new()?;
        writer.start("l10n", &[])?;
        writer.comment(&language.header())?;
        writer.start("texts", &[])?;
        for (category_name, category) in self.catalog.categories() {
            writer.comment(category_name)?;
            for (key, entry) in category.entries() {
                let text = entry.resolve(language.as_str(), self.fallback.as_str());
                writer.empty("text", &[("name", key), ("text", text)])?;
            }
        }
        writer.end()?;
        writer.end()?;
        Ok(writer.finish())
    }
}

/// Result of a [`synchronize`] run.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Generated language files, in supported-language order
    pub written: Vec<PathBuf>,
    /// Language files that could not be read and were left out of the merge
    pub skipped: Vec<SkippedFile>,
    /// Texts of language files whose key does not exist in the master
    pub unknown_keys: usize,
}

/// Regenerates all language files from the master file and the existing language files.
///
/// One file is written per supported language, whether or not a language file
/// existed before. Existing files are replaced atomically.
///
/// # Errors
/// - Master file missing or malformed
/// - Translation directory cannot be read
/// - Output file cannot be written
pub fn synchronize(config: &ConfigManager) -> Result<SyncReport, TranslationError> {
    let settings = config.get_settings();
    let catalog = load_master(&config.master_translation_file())?;
    let overrides = load_override_dir(&config.translation_dir())?;

    let mut report = SyncReport { skipped: overrides.skipped, ..SyncReport::default() };
    let mut merger = LanguageMerger::new(catalog, settings.fallback_language.clone());
    for file in &overrides.files {
        let stats = merger.merge(file);
        tracing::debug!(
            language = %file.language,
            applied = stats.applied,
            kept_master = stats.kept_master,
            unknown_keys = stats.unknown_keys,
            "Merged language file"
        );
        report.unknown_keys += stats.unknown_keys;
    }

    let output_dir = config.output_dir();
    for language in &settings.supported_languages {
        let path = output_dir.join(language.file_name());
        let contents = merger.render(language)?;
        replace_file(&path, &contents).map_err(|e| TranslationError::io(&path, e))?;
        tracing::info!(path = %path.display(), "Wrote language file");
        report.written.push(path);
    }

    if report.unknown_keys > 0 {
        tracing::warn!(
            count = report.unknown_keys,
            "Language files contain keys that are not in the master file; they were dropped"
        );
    }
    Ok(report)
}
