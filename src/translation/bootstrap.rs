//! Creates a first master translation file out of existing language files.

use std::path::PathBuf;

use super::catalog::Catalog;
use super::error::TranslationError;
use super::master::render_master;
use super::overrides::{
    OverrideFile,
    load_override_dir,
};
use crate::config::ConfigManager;
use crate::types::LanguageCode;
use crate::xml::replace_file;

/// Category that holds every key of a bootstrapped master file.
pub const INITIAL_CATEGORY: &str = "basic";

/// Collects all keys of the language files into one category.
///
/// Keys keep the order in which they are first seen. Texts are only kept for
/// `languages`; keys that no such language defines are still listed.
#[must_use]
pub fn build_initial_catalog(files: &[OverrideFile], languages: &[LanguageCode]) -> Catalog {
    let mut catalog = Catalog::new();
    catalog.add_category(INITIAL_CATEGORY);
    for file in files {
        let keep = languages.contains(&file.language);
        for (key, text) in &file.texts {
            let Some(entry) = catalog.entry_or_insert(INITIAL_CATEGORY, key) else {
                continue;
            };
            if keep {
                entry.set_if_absent(&file.language, text);
            }
        }
    }
    catalog
}

/// Writes a new master file built from the translation directory.
///
/// # Errors
/// - Master file exists and `force` is not set
/// - Translation directory cannot be read
/// - Master file cannot be written
pub fn create_initial_master(
    config: &ConfigManager,
    force: bool,
) -> Result<PathBuf, TranslationError> {
    let path = config.master_translation_file();
    if path.exists() && !force {
        return Err(TranslationError::MasterExists(path));
    }

    let overrides = load_override_dir(&config.translation_dir())?;
    for skipped in &overrides.skipped {
        tracing::warn!(path = %skipped.path.display(), reason = %skipped.reason, "Not included");
    }

    let languages = &config.get_settings().master_languages;
    let catalog = build_initial_catalog(&overrides.files, languages);
    let contents = render_master(&catalog, Some(languages.as_slice()))?;
    replace_file(&path, &contents).map_err(|e| TranslationError::io(&path, e))?;

    tracing::info!(path = %path.display(), keys = catalog.len(), "Wrote master translation file");
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn file(language: &str, texts: &[(&str, &str)]) -> OverrideFile {
        OverrideFile {
            language: LanguageCode::from(language),
            path: PathBuf::from(LanguageCode::from(language).file_name()),
            texts: texts.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
        }
    }

    #[googletest::test]
    fn test_build_initial_catalog() {
        let files = [
            file("de", &[("b", "B de"), ("a", "A de")]),
            file("en", &[("a", "A en"), ("c", "C en")]),
            file("fr", &[("d", "D fr"), ("a", "A fr")]),
        ];
        let languages = [LanguageCode::from("de"), LanguageCode::from("en")];

        let catalog = build_initial_catalog(&files, &languages);

        expect_that!(
            catalog.keys().collect::<Vec<_>>(),
            elements_are![eq(&"b"), eq(&"a"), eq(&"c"), eq(&"d")]
        );
        let categories: Vec<_> = catalog.categories().map(|(name, _)| name).collect();
        expect_that!(categories, elements_are![eq(&"basic")]);

        let a = catalog.entry("a").unwrap();
        expect_that!(a.text("de"), some(eq("A de")));
        expect_that!(a.text("en"), some(eq("A en")));
        expect_that!(a.text("fr"), none());
        expect_that!(catalog.entry("d").unwrap().texts().count(), eq(0));
    }
}
