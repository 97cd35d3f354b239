//! Category tree serialized to `config.json`.

use serde::Serialize;

/// Prefix of localization keys inside the help menu definition.
pub const L10N_PREFIX: &str = "$l10n_";

/// A localized text. `raw` is the translation key, `text` is filled by the website.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Text {
    pub raw: String,
    pub text: String,
}

impl Text {
    /// Creates a text from a `$l10n_` reference.
    #[must_use]
    pub fn from_reference(reference: &str) -> Self {
        let raw = reference.strip_prefix(L10N_PREFIX).unwrap_or(reference);
        Self { raw: raw.to_string(), text: String::new() }
    }
}

/// An image region of a texture atlas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Image {
    pub filename: String,
    pub size: Vec<u32>,
    pub size_str: String,
    pub uvs: Vec<u32>,
    pub uvs_str: String,
}

impl Image {
    /// Crop box `(left, top, right, bottom)` taken from `uvs`.
    #[must_use]
    pub fn crop_box(&self) -> Option<(u32, u32, u32, u32)> {
        match self.uvs.as_slice() {
            &[left, top, right, bottom] => Some((left, top, right, bottom)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub title: Text,
    pub text: Text,
    pub image: Image,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    pub title: Text,
    pub paragraphs: Vec<Paragraph>,
}

/// Top level entry of the help menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MenuCategory {
    pub title: Text,
    #[serde(rename = "subTitle")]
    pub sub_title: Text,
    pub pages: Vec<Page>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::prefixed("$l10n_helpmenu_title", "helpmenu_title")]
    #[case::plain("plain", "plain")]
    fn test_text_from_reference(#[case] reference: &str, #[case] expected: &str) {
        assert_that!(Text::from_reference(reference).raw, eq(expected));
    }

    #[rstest]
    fn test_category_json_field_names() {
        let category = MenuCategory {
            title: Text::from_reference("$l10n_a"),
            sub_title: Text::from_reference("$l10n_a"),
            pages: vec![Page { title: Text::default(), paragraphs: vec![Paragraph::default()] }],
        };

        let json = serde_json::to_value(&category).unwrap();

        assert_eq!(json["subTitle"]["raw"], "a");
        assert_eq!(json["title"]["text"], "");
        let paragraph = &json["pages"][0]["paragraphs"][0];
        assert_eq!(paragraph["image"]["size_str"], "");
        assert_eq!(paragraph["image"]["uvs"], serde_json::json!([]));
    }
}
