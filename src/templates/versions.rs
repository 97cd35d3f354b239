//! Version lists offered by the issue forms.

use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};

use super::error::TemplateError;

/// Contents of the version file.
///
/// ```json
/// {
///   "cp_versions": ["6.3.0.0"],
///   "game_versions": ["1.7.1.0"],
///   "modhub_versions": ["6.3.0.1"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VersionConfig {
    pub cp_versions: Vec<String>,
    pub game_versions: Vec<String>,
    pub modhub_versions: Vec<String>,
}

/// Sorted, duplicate free lists ready to be written into the forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionLists {
    pub mod_versions: Vec<String>,
    pub game_versions: Vec<String>,
}

impl VersionConfig {
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path).map_err(|e| TemplateError::io(path, e))?;
        serde_json::from_str(&content)
            .map_err(|source| TemplateError::Versions { path: path.to_path_buf(), source })
    }

    /// Merges the ModHub versions into the mod versions and sorts both lists.
    ///
    /// # Errors
    /// - No mod version at all
    /// - A version has a non-numeric part
    pub fn resolve(&self) -> Result<VersionLists, TemplateError> {
        let mod_versions =
            sort_versions(self.cp_versions.iter().chain(&self.modhub_versions).cloned())?;
        if mod_versions.is_empty() {
            return Err(TemplateError::NoModVersions);
        }
        let game_versions = sort_versions(self.game_versions.iter().cloned())?;
        Ok(VersionLists { mod_versions, game_versions })
    }
}

/// Removes duplicates and sorts by the numeric value of each dot separated part.
///
/// # Errors
/// Returns [`TemplateError::InvalidVersion`] for a non-numeric part.
pub fn sort_versions(
    versions: impl IntoIterator<Item = String>,
) -> Result<Vec<String>, TemplateError> {
    let mut keyed: Vec<(Vec<u64>, String)> = Vec::new();
    for version in versions {
        if keyed.iter().any(|(_, known)| *known == version) {
            continue;
        }
        keyed.push((version_key(&version)?, version));
    }
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(keyed.into_iter().map(|(_, version)| version).collect())
}

fn version_key(version: &str) -> Result<Vec<u64>, TemplateError> {
    version
        .split('.')
        .map(|part| part.parse().map_err(|_| TemplateError::InvalidVersion(version.to_string())))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[rstest]
    #[case::numeric_not_lexical(
        &["6.10.0.0", "6.2.0.0", "6.9.1.0"],
        &["6.2.0.0", "6.9.1.0", "6.10.0.0"]
    )]
    #[case::duplicates(&["1.0", "1.0", "0.9"], &["0.9", "1.0"])]
    #[case::shorter_first(&["1.1.1", "1.1"], &["1.1", "1.1.1"])]
    #[case::empty(&[], &[])]
    fn test_sort_versions(#[case] input: &[&str], #[case] expected: &[&str]) {
        assert_eq!(sort_versions(strings(input)).unwrap(), strings(expected));
    }

    #[googletest::test]
    fn test_sort_versions_rejects_non_numeric() {
        let result = sort_versions(strings(&["1.0.0.0", "1.0.beta.0"]));

        expect_that!(result, err(displays_as(contains_substring("'1.0.beta.0'"))));
    }

    #[googletest::test]
    fn test_resolve_merges_modhub_versions() {
        let config = VersionConfig {
            cp_versions: strings(&["6.3.0.0", "6.2.0.0"]),
            game_versions: strings(&["1.7.1.0", "1.2.0.0"]),
            modhub_versions: strings(&["6.3.0.0", "6.4.0.0"]),
        };

        let lists = config.resolve().unwrap();

        assert_eq!(lists.mod_versions, strings(&["6.2.0.0", "6.3.0.0", "6.4.0.0"]));
        assert_eq!(lists.game_versions, strings(&["1.2.0.0", "1.7.1.0"]));
    }

    #[googletest::test]
    fn test_resolve_without_mod_versions() {
        let result = VersionConfig::default().resolve();

        assert!(matches!(result, Err(TemplateError::NoModVersions)));
    }
}
