//! Master translation document: loading into a [`Catalog`] and serializing it back.
//!
//! ```xml
//! <Translations>
//!     <Category name="basic">
//!         <Translation name="greeting">
//!             <Text language="en"><![CDATA[Hello]]></Text>
//!         </Translation>
//!     </Category>
//! </Translations>
//! ```

use std::path::Path;

use super::catalog::{
    Catalog,
    TranslationEntry,
};
use super::error::TranslationError;
use super::read_document;
use crate::types::LanguageCode;
use crate::xml::{
    DocumentWriter,
    Element,
};

/// Root element name of the master document.
const ROOT: &str = "Translations";

/// Loads the master translation file.
///
/// # Errors
/// - File cannot be read
/// - Document is not well-formed
/// - Root, category, translation or text element lacks a required attribute
pub fn load_master(path: &Path) -> Result<Catalog, TranslationError> {
    tracing::debug!(path = %path.display(), "Loading master translations");
    let root = read_document(path)?;
    let catalog = catalog_from_element(path, &root)?;
    tracing::debug!(
        categories = catalog.categories().count(),
        keys = catalog.len(),
        "Loaded master translations"
    );
    Ok(catalog)
}

/// Builds the catalog from a parsed master document.
///
/// Keys declared twice keep their first declaration. Empty `<Text>` elements
/// count as missing so the language falls back like any other gap.
pub(crate) fn catalog_from_element(
    path: &Path,
    root: &Element,
) -> Result<Catalog, TranslationError> {
    if root.name != ROOT {
        return Err(TranslationError::invalid(
            path,
            format!("expected root element <{ROOT}>, found <{}>", root.name),
        ));
    }

    let mut catalog = Catalog::new();
    for category in root.descendants("Category") {
        let category_name = required_attr(path, category, "name")?;
        catalog.add_category(category_name);

        for translation in category.descendants("Translation") {
            let key = required_attr(path, translation, "name")?;
            let mut entry = TranslationEntry::new();
            for text in translation.descendants("Text") {
                let language = required_attr(path, text, "language")?;
                let value = text.text();
                if value.is_empty() {
                    continue;
                }
                entry.set(LanguageCode::from(language), value);
            }

            if !catalog.insert(category_name, key, entry) {
                tracing::warn!(
                    key,
                    category = category_name,
                    "Duplicate translation key in master file, keeping the first one"
                );
            }
        }
    }

    Ok(catalog)
}

fn required_attr<'a>(
    path: &Path,
    element: &'a Element,
    name: &str,
) -> Result<&'a str, TranslationError> {
    element.attr(name).ok_or_else(|| {
        TranslationError::invalid(path, format!("<{}> without '{name}' attribute", element.name))
    })
}

/// Serializes a catalog as a master document with CDATA texts.
///
/// Only languages in `languages` are written; `None` writes every language.
///
/// # Errors
/// Returns the emitter error.
pub fn render_master(
    catalog: &Catalog,
    languages: Option<&[LanguageCode]>,
) -> Result<Vec<u8>, TranslationError> {
    let mut writer = DocumentWriter::new()?;
    writer.start(ROOT, &[])?;
    for (category_name, category) in catalog.categories() {
        writer.start("Category", &[("name", category_name)])?;
        for (key, entry) in category.entries() {
            writer.start("Translation", &[("name", key)])?;
            for (language, text) in entry.texts() {
                if languages.is_some_and(|allowed| !allowed.contains(language)) {
                    continue;
                }
                writer.start("Text", &[("language", language.as_str())])?;
                writer.cdata(text)?;
                writer.end()?;
            }
            writer.end()?;
        }
        writer.end()?;
    }
    writer.end()?;
    Ok(writer.finish())
}
