use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::types::LanguageCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "supportedLanguages[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings of all tools. Every path is relative to the workspace root.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolSettings {
    /// Directory holding the `translation_<lang>.xml` files.
    pub translation_dir: PathBuf,

    /// Where synchronized language files are written.
    /// If unset, files are rewritten in place inside `translation_dir`.
    pub output_dir: Option<PathBuf>,

    pub master_translation_file: PathBuf,

    /// Languages that get a generated file, independent of which files exist on disk.
    pub supported_languages: Vec<LanguageCode>,

    /// Languages copied into a freshly bootstrapped master file.
    pub master_languages: Vec<LanguageCode>,

    /// Language whose text fills gaps in every other language.
    pub fallback_language: LanguageCode,

    pub help_menu: HelpMenuConfig,
    pub templates: TemplatesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HelpMenuConfig {
    pub config_file: PathBuf,
    pub output_dir: PathBuf,
    /// Every image in this directory is converted to PNG.
    pub image_dir: PathBuf,
    /// Single images converted in addition to `image_dir`.
    pub extra_images: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplatesConfig {
    pub template_dir: PathBuf,
    pub versions_file: PathBuf,
    /// `id` of the issue form field listing mod versions.
    pub mod_version_field: String,
    /// `id` of the optional issue form field listing game versions.
    pub game_version_field: String,
}

impl ToolSettings {
    /// Directory the synchronized language files go to.
    #[must_use]
    pub fn effective_output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.translation_dir)
    }

    /// # Errors
    /// - Required path is empty
    /// - Unknown or duplicated language code
    /// - Fallback language not part of the supported languages
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let paths = [
            ("translationDir", &self.translation_dir),
            ("masterTranslationFile", &self.master_translation_file),
            ("helpMenu.configFile", &self.help_menu.config_file),
            ("helpMenu.outputDir", &self.help_menu.output_dir),
            ("helpMenu.imageDir", &self.help_menu.image_dir),
            ("templates.templateDir", &self.templates.template_dir),
            ("templates.versionsFile", &self.templates.versions_file),
        ];
        for (field, path) in paths {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::new(field, "The path cannot be empty"));
            }
        }

        if let Some(dir) = &self.output_dir
            && dir.as_os_str().is_empty()
        {
            errors.push(ValidationError::new(
                "outputDir",
                "The path cannot be empty. Remove the field to write into translationDir",
            ));
        }

        if self.supported_languages.is_empty() {
            errors.push(ValidationError::new(
                "supportedLanguages",
                "At least one language is required. Example: [\"en\", \"de\"]",
            ));
        }
        validate_languages("supportedLanguages", &self.supported_languages, &mut errors);
        validate_languages("masterLanguages", &self.master_languages, &mut errors);

        if !self.supported_languages.contains(&self.fallback_language) {
            errors.push(ValidationError::new(
                "fallbackLanguage",
                format!(
                    "The fallback language '{}' must be one of the supported languages",
                    self.fallback_language
                ),
            ));
        }

        for (field, id) in [
            ("templates.modVersionField", &self.templates.mod_version_field),
            ("templates.gameVersionField", &self.templates.game_version_field),
        ] {
            if id.trim().is_empty() {
                errors.push(ValidationError::new(field, "The field id cannot be empty"));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn validate_languages(field: &str, languages: &[LanguageCode], errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for (index, language) in languages.iter().enumerate() {
        if !language.is_known() {
            errors.push(ValidationError::new(
                format!("{field}[{index}]"),
                format!("Unknown language code '{language}'"),
            ));
        }
        if !seen.insert(language) {
            errors.push(ValidationError::new(
                format!("{field}[{index}]"),
                format!("Language '{language}' is listed more than once"),
            ));
        }
    }
}

impl Default for HelpMenuConfig {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from("config/HelpMenu.xml"),
            output_dir: PathBuf::from("help_menu_cache_data"),
            image_dir: PathBuf::from("img/helpmenu"),
            extra_images: vec![
                PathBuf::from("icon_courseplay.dds"),
                PathBuf::from("img/ui_courseplay.dds"),
                PathBuf::from("img/iconSprite.dds"),
                PathBuf::from("img/courseplayIconHud.dds"),
            ],
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from(".github/ISSUE_TEMPLATE"),
            versions_file: PathBuf::from(".github/scripts/update-templates/config.json"),
            mod_version_field: "mod-version".to_string(),
            game_version_field: "game-version".to_string(),
        }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            translation_dir: PathBuf::from("translations"),
            output_dir: None,
            master_translation_file: PathBuf::from("config/MasterTranslations.xml"),
            supported_languages: LanguageCode::known().collect(),
            master_languages: vec![LanguageCode::from("de"), LanguageCode::from("en")],
            fallback_language: LanguageCode::from("en"),
            help_menu: HelpMenuConfig::default(),
            templates: TemplatesConfig::default(),
        }
    }
}
