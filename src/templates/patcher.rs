//! Writes the version lists into the GitHub issue forms.
//!
//! ```yaml
//! body:
//!   - type: dropdown
//!     id: mod-version
//!     attributes:
//!       options: ["6.3.0.0", "6.4.0.0"]
//!       default: 1
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
use serde_yaml::{
    Mapping,
    Number,
    Value,
};

use super::error::TemplateError;
use super::versions::{
    VersionConfig,
    VersionLists,
};
use crate::config::ConfigManager;

/// Result of patching one template document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Mod versions written, `game_versions` tells whether the game version field exists
    Patched { game_versions: bool },
    /// Document has no `body` sequence, e.g. the template chooser `config.yml`
    NotAForm,
    /// Form without the mod version field
    MissingModVersionField,
}

/// `body` item whose `id` equals `id`.
fn find_field<'a>(body: &'a mut [Value], id: &str) -> Option<&'a mut Mapping> {
    body.iter_mut()
        .filter_map(Value::as_mapping_mut)
        .find(|item| item.get("id").and_then(Value::as_str) == Some(id))
}

/// Sets `attributes.options` to `versions` and `attributes.default` to the last index.
fn set_options(field: &mut Mapping, versions: &[String]) {
    if !field.get("attributes").is_some_and(Value::is_mapping) {
        field.insert(Value::from("attributes"), Value::Mapping(Mapping::new()));
    }
    let Some(attributes) = field.get_mut("attributes").and_then(Value::as_mapping_mut) else {
        return;
    };

    let options = versions.iter().map(|version| Value::from(version.as_str())).collect();
    attributes.insert(Value::from("options"), Value::Sequence(options));
    let default = u64::try_from(versions.len().saturating_sub(1)).unwrap_or_default();
    attributes.insert(Value::from("default"), Value::Number(Number::from(default)));
}

/// Updates the version dropdowns of one parsed template.
///
/// The game version field is optional and left alone when there are no game versions.
pub fn patch_template(
    document: &mut Value,
    mod_field: &str,
    game_field: &str,
    versions: &VersionLists,
) -> PatchOutcome {
    let Some(body) = document.get_mut("body").and_then(Value::as_sequence_mut) else {
        return PatchOutcome::NotAForm;
    };

    let Some(field) = find_field(body, mod_field) else {
        return PatchOutcome::MissingModVersionField;
    };
    set_options(field, &versions.mod_versions);

    let game_versions = match find_field(body, game_field) {
        Some(field) if !versions.game_versions.is_empty() => {
            set_options(field, &versions.game_versions);
            true
        }
        _ => false,
    };
    PatchOutcome::Patched { game_versions }
}

/// Templates touched by [`update_templates`].
#[derive(Debug, Default)]
pub struct TemplateReport {
    pub patched: Vec<PathBuf>,
    /// Files left unchanged with the reason
    pub skipped: Vec<(PathBuf, PatchOutcome)>,
}

fn template_matcher() -> Result<GlobMatcher, TemplateError> {
    Ok(GlobBuilder::new("*.{yml,yaml}").literal_separator(true).build()?.compile_matcher())
}

/// Lists the YAML files of the template directory, sorted by name.
///
/// # Errors
/// Returns an I/O error if the directory cannot be read.
pub fn discover_templates(dir: &Path) -> Result<Vec<PathBuf>, TemplateError> {
    let matcher = template_matcher()?;
    let mut templates = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| TemplateError::io(dir, e))? {
        let path = entry.map_err(|e| TemplateError::io(dir, e))?.path();
        if path.is_file() && path.file_name().is_some_and(|name| matcher.is_match(name)) {
            templates.push(path);
        }
    }
    templates.sort();
    Ok(templates)
}

/// Patches a template file in place. Unchanged files are not rewritten.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed or written.
pub fn patch_template_file(
    path: &Path,
    mod_field: &str,
    game_field: &str,
    versions: &VersionLists,
) -> Result<PatchOutcome, TemplateError> {
    let yaml_error = |source| TemplateError::Yaml { path: path.to_path_buf(), source };

    let content = fs::read_to_string(path).map_err(|e| TemplateError::io(path, e))?;
    let mut document: Value = serde_yaml::from_str(&content).map_err(yaml_error)?;

    let outcome = patch_template(&mut document, mod_field, game_field, versions);
    if matches!(outcome, PatchOutcome::Patched { .. }) {
        let patched = serde_yaml::to_string(&document).map_err(yaml_error)?;
        fs::write(path, patched).map_err(|e| TemplateError::io(path, e))?;
    }
    Ok(outcome)
}

/// Writes the configured version lists into every issue form.
///
/// # Errors
/// - Version file or template directory is missing
/// - A version is not numeric
/// - A template cannot be parsed or written
pub fn update_templates(config: &ConfigManager) -> Result<TemplateReport, TemplateError> {
    let settings = &config.get_settings().templates;
    let versions = VersionConfig::load(&config.versions_file())?.resolve()?;
    tracing::debug!(
        mod_versions = versions.mod_versions.len(),
        game_versions = versions.game_versions.len(),
        "Resolved versions"
    );

    let mut report = TemplateReport::default();
    for path in discover_templates(&config.template_dir())? {
        let outcome = patch_template_file(
            &path,
            &settings.mod_version_field,
            &settings.game_version_field,
            &versions,
        )?;
        match outcome {
            PatchOutcome::Patched { game_versions } => {
                tracing::info!(path = %path.display(), game_versions, "Updated issue template");
                report.patched.push(path);
            }
            PatchOutcome::NotAForm => {
                tracing::debug!(path = %path.display(), "Not an issue form, skipping");
                report.skipped.push((path, outcome));
            }
            PatchOutcome::MissingModVersionField => {
                tracing::warn!(
                    path = %path.display(),
                    field = %settings.mod_version_field,
                    "Issue form has no mod version field, skipping"
                );
                report.skipped.push((path, outcome));
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;
    use crate::config::ToolSettings;
    use crate::test_utils::write_file;

    const BUG_REPORT: &str = r#"name: Bug Report
description: File a bug report
body:
  - type: markdown
    attributes:
      value: Thanks for reporting!
  - type: dropdown
    id: mod-version
    attributes:
      label: Version
      options:
        - 6.0.0.0
      default: 0
  - type: dropdown
    id: game-version
    attributes:
      label: Game version
"#;

    fn lists(mod_versions: &[&str], game_versions: &[&str]) -> VersionLists {
        VersionLists {
            mod_versions: mod_versions.iter().map(ToString::to_string).collect(),
            game_versions: game_versions.iter().map(ToString::to_string).collect(),
        }
    }

    #[googletest::test]
    fn test_patch_template() {
        let mut document: Value = serde_yaml::from_str(BUG_REPORT).unwrap();

        let outcome = patch_template(
            &mut document,
            "mod-version",
            "game-version",
            &lists(&["6.3.0.0", "6.4.0.0"], &["1.7.1.0"]),
        );

        expect_that!(outcome, eq(PatchOutcome::Patched { game_versions: true }));
        let mod_field = &document["body"][1]["attributes"];
        let options: Value = serde_yaml::from_str("[6.3.0.0, 6.4.0.0]").unwrap();
        assert_eq!(mod_field["options"], options);
        assert_eq!(mod_field["default"].as_u64(), Some(1));
        assert_eq!(mod_field["label"].as_str(), Some("Version"));
        let game_field = &document["body"][2]["attributes"];
        assert_eq!(game_field["default"].as_u64(), Some(0));
        assert_eq!(
            document["body"][0]["attributes"]["value"].as_str(),
            Some("Thanks for reporting!")
        );
    }

    #[googletest::test]
    fn test_patch_template_without_game_versions() {
        let mut document: Value = serde_yaml::from_str(BUG_REPORT).unwrap();

        let versions = lists(&["6.3.0.0"], &[]);

        let outcome = patch_template(&mut document, "mod-version", "game-version", &versions);

        expect_that!(outcome, eq(PatchOutcome::Patched { game_versions: false }));
        expect_that!(document["body"][2]["attributes"].get("options"), none());
    }

    #[googletest::test]
    fn test_patch_template_skips() {
        let versions = lists(&["6.3.0.0"], &[]);
        let mut chooser: Value = serde_yaml::from_str("blank_issues_enabled: false\n").unwrap();
        let mut form: Value =
            serde_yaml::from_str("body:\n  - type: textarea\n    id: description\n").unwrap();

        expect_that!(
            patch_template(&mut chooser, "mod-version", "game-version", &versions),
            eq(PatchOutcome::NotAForm)
        );
        expect_that!(
            patch_template(&mut form, "mod-version", "game-version", &versions),
            eq(PatchOutcome::MissingModVersionField)
        );
    }

    #[googletest::test]
    fn test_update_templates() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file(
            root,
            ".github/scripts/update-templates/config.json",
            r#"{
                "cp_versions": ["6.3.0.0"],
                "game_versions": ["1.7.1.0"],
                "modhub_versions": ["6.10.0.0", "6.3.0.0"]
            }"#,
        );
        let bug_report = write_file(root, ".github/ISSUE_TEMPLATE/bug_report.yml", BUG_REPORT);
        write_file(root, ".github/ISSUE_TEMPLATE/config.yml", "blank_issues_enabled: false\n");
        write_file(root, ".github/ISSUE_TEMPLATE/README.md", "not a template");
        let config = ConfigManager::with_settings(root, ToolSettings::default()).unwrap();

        let report = update_templates(&config).unwrap();

        expect_that!(report.patched, elements_are![eq(&bug_report)]);
        expect_that!(report.skipped.len(), eq(1));
        let written = fs::read_to_string(&bug_report).unwrap();
        let document: Value = serde_yaml::from_str(&written).unwrap();
        assert_eq!(
            document["body"][1]["attributes"]["options"],
            serde_yaml::from_str::<Value>("['6.3.0.0', '6.10.0.0']").unwrap()
        );
        expect_that!(written.find("name:"), some(eq(0)));
    }

    #[googletest::test]
    fn test_update_templates_invalid_version() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file(
            root,
            ".github/scripts/update-templates/config.json",
            r#"{"cp_versions": ["latest"]}"#,
        );
        fs::create_dir_all(root.join(".github/ISSUE_TEMPLATE")).unwrap();
        let config = ConfigManager::with_settings(root, ToolSettings::default()).unwrap();

        let result = update_templates(&config);

        assert!(matches!(result, Err(TemplateError::InvalidVersion(_))));
    }
}
