//! In-memory translation catalog.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::types::LanguageCode;

/// Texts of one translation key, per language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationEntry {
    texts: BTreeMap<LanguageCode, String>,
}

impl TranslationEntry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self, language: &str) -> Option<&str> {
        self.texts.get(language).map(String::as_str)
    }

    pub fn set(&mut self, language: LanguageCode, text: impl Into<String>) {
        self.texts.insert(language, text.into());
    }

    /// Sets the text only if the language has none yet. Returns whether it was set.
    pub fn set_if_absent(&mut self, language: &LanguageCode, text: &str) -> bool {
        if self.texts.contains_key(language) {
            return false;
        }
        self.texts.insert(language.clone(), text.to_string());
        true
    }

    /// Languages with a text, sorted by code.
    pub fn texts(&self) -> impl Iterator<Item = (&LanguageCode, &str)> {
        self.texts.iter().map(|(language, text)| (language, text.as_str()))
    }

    /// Text for `language`, falling back to `fallback`, then to the empty string.
    #[must_use]
    pub fn resolve<'a>(&'a self, language: &str, fallback: &str) -> &'a str {
        self.text(language).or_else(|| self.text(fallback)).unwrap_or_default()
    }
}

/// Named group of translation keys, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Category {
    entries: IndexMap<String, TranslationEntry>,
}

impl Category {
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TranslationEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered mapping category → key → language → text.
///
/// A key belongs to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    categories: IndexMap<String, Category>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty category if it does not exist yet.
    pub fn add_category(&mut self, name: &str) {
        if !self.categories.contains_key(name) {
            self.categories.insert(name.to_string(), Category::default());
        }
    }

    /// Adds `key` to `category`, creating the category if needed.
    ///
    /// Returns `false` and leaves the catalog untouched if the key already exists
    /// in any category.
    pub fn insert(&mut self, category: &str, key: &str, entry: TranslationEntry) -> bool {
        if self.contains_key(key) {
            return false;
        }
        self.add_category(category);
        if let Some(target) = self.categories.get_mut(category) {
            target.entries.insert(key.to_string(), entry);
        }
        true
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&TranslationEntry> {
        self.categories.values().find_map(|category| category.entries.get(key))
    }

    pub fn entry_mut(&mut self, key: &str) -> Option<&mut TranslationEntry> {
        self.categories.values_mut().find_map(|category| category.entries.get_mut(key))
    }

    /// Returns the entry for `key`, adding it to `category` if the key is unknown.
    pub fn entry_or_insert(&mut self, category: &str, key: &str) -> Option<&mut TranslationEntry> {
        if !self.contains_key(key) {
            self.insert(category, key, TranslationEntry::new());
        }
        self.entry_mut(key)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories.iter().map(|(name, category)| (name.as_str(), category))
    }

    /// All keys in category order, then insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories
            .values()
            .flat_map(|category| category.entries.keys().map(String::as_str))
    }

    /// Number of keys over all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.values().map(Category::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
