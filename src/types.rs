//! Core types used throughout the project.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{
    Deserialize,
    Serialize,
};

/// Language code of the fallback language used when a translation is missing.
pub const ENGLISH: &str = "en";

/// Prefix of per-language translation file names (`translation_de.xml`).
pub const TRANSLATION_FILE_PREFIX: &str = "translation_";

/// Extension of per-language translation file names.
pub const TRANSLATION_FILE_SUFFIX: &str = ".xml";

/// Locale codes understood by the game, with the name written into generated comments.
const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("br", "Portuguese (Brazil)"),
    ("cs", "Chinese (Simplified)"),
    ("ct", "Chinese (Traditional)"),
    ("cz", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("ea", "Spanish (Latin America)"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fc", "French (Canada)"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("jp", "Japanese"),
    ("kr", "Korean"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sv", "Swedish"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
];

static DISPLAY_NAMES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| KNOWN_LANGUAGES.iter().copied().collect());

/// A game locale code such as `en` or `de`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_english(&self) -> bool {
        self.0 == ENGLISH
    }

    /// Whether the code belongs to the fixed set of locales the game ships.
    #[must_use]
    pub fn is_known(&self) -> bool {
        DISPLAY_NAMES.contains_key(self.0.as_str())
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&'static str> {
        DISPLAY_NAMES.get(self.0.as_str()).copied()
    }

    /// All known locale codes in alphabetical order.
    pub fn known() -> impl Iterator<Item = Self> {
        KNOWN_LANGUAGES.iter().map(|(code, _)| Self::new(*code))
    }

    /// Cuts the language out of a translation file name.
    ///
    /// # Examples
    /// - `translation_en.xml` → `Some("en")`
    /// - `translation_.xml` → `None`
    /// - `HelpMenu.xml` → `None`
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let code = file_name
            .strip_prefix(TRANSLATION_FILE_PREFIX)?
            .strip_suffix(TRANSLATION_FILE_SUFFIX)?;
        if code.is_empty() || code.contains(['/', '\\', '.']) {
            return None;
        }
        Some(Self::new(code))
    }

    /// The translation file name for this language (`translation_<code>.xml`).
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{TRANSLATION_FILE_PREFIX}{}{TRANSLATION_FILE_SUFFIX}", self.0)
    }

    /// Header text used at the top of generated language files.
    #[must_use]
    pub fn header(&self) -> String {
        self.display_name()
            .map_or_else(|| self.0.clone(), |name| format!("{name} ({})", self.0))
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl Borrow<str> for LanguageCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}
