//! Writes the help menu data consumed by the Courseplay website.

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use serde::Serialize;

use super::error::HelpMenuError;
use super::images::{
    convert_images,
    crop_regions,
};
use super::loader::load_help_menu;
use crate::config::ConfigManager;
use crate::translation::{
    SkippedFile,
    load_override_dir,
};

/// Name of the file holding the category tree.
pub const CONFIG_JSON: &str = "config.json";

/// Files written by [`export_help_menu`].
#[derive(Debug, Default)]
pub struct HelpMenuReport {
    /// Converted textures and cropped regions
    pub images: Vec<PathBuf>,
    pub config_file: PathBuf,
    /// One `<lang>.json` per readable language file
    pub translation_files: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), HelpMenuError> {
    let mut contents = serde_json::to_vec_pretty(value)?;
    contents.push(b'\n');
    fs::write(path, contents).map_err(|e| HelpMenuError::io(path, e))
}

/// Exports images, the category tree and per-language texts to the help menu output directory.
///
/// # Errors
/// - Help menu definition, image directory or translation directory is missing
/// - An image cannot be converted or cropped
/// - An output file cannot be written
pub fn export_help_menu(config: &ConfigManager) -> Result<HelpMenuReport, HelpMenuError> {
    let output_dir = config.help_menu_output_dir();
    let mut images = convert_images(
        &config.help_menu_image_dir(),
        &config.help_menu_extra_images(),
        &output_dir,
    )?;

    let mut categories = load_help_menu(&config.help_menu_file())?;
    images.extend(crop_regions(&mut categories, &output_dir)?);

    let config_file = output_dir.join(CONFIG_JSON);
    write_json(&config_file, &categories)?;
    tracing::info!(path = %config_file.display(), categories = categories.len(), "Wrote help menu");

    let mut report = HelpMenuReport { images, config_file, ..HelpMenuReport::default() };

    let overrides = load_override_dir(&config.translation_dir())?;
    report.skipped = overrides.skipped;
    for file in &overrides.files {
        let path = output_dir.join(format!("{}.json", file.language));
        write_json(&path, &file.texts)?;
        tracing::debug!(path = %path.display(), texts = file.texts.len(), "Wrote help menu texts");
        report.translation_files.push(path);
    }

    tracing::info!(
        images = report.images.len(),
        languages = report.translation_files.len(),
        "Exported help menu"
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use image::{
        Rgba,
        RgbaImage,
    };
    use tempfile::TempDir;

    use super::*;
    use crate::config::ToolSettings;
    use crate::test_utils::write_file;

    const HELP_MENU: &str = r#"<helpMenu>
    <category title="$l10n_helpmenu_basics">
        <page title="$l10n_helpmenu_hud">
            <paragraph>
                <title text="$l10n_helpmenu_hud_title"/>
                <image filename="img/helpmenu/hud.png" size="64px 32px" uvs="0px 0px 4px 2px"/>
            </paragraph>
        </page>
    </category>
</helpMenu>"#;

    fn workspace() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file(root, "config/HelpMenu.xml", HELP_MENU);
        fs::create_dir_all(root.join("img/helpmenu")).unwrap();
        RgbaImage::from_pixel(8, 4, Rgba([1, 2, 3, 255]))
            .save(root.join("img/helpmenu/hud.png"))
            .unwrap();
        write_file(
            root,
            "translations/translation_de.xml",
            r#"<l10n><texts><text name="helpmenu_hud_title" text="HUD"/></texts></l10n>"#,
        );
        write_file(root, "translations/translation_fr.xml", "<l10n>");
        temp_dir
    }

    fn config(root: &Path) -> ConfigManager {
        let mut settings = ToolSettings::default();
        settings.help_menu.extra_images.clear();
        ConfigManager::with_settings(root, settings).unwrap()
    }

    #[googletest::test]
    fn test_export_help_menu() {
        let temp_dir = workspace();
        let output_dir = temp_dir.path().join("help_menu_cache_data");

        let report = export_help_menu(&config(temp_dir.path())).unwrap();

        expect_that!(
            report.images,
            elements_are![eq(&output_dir.join("hud.png")), eq(&output_dir.join("hud_0_0_4_2.png"))]
        );
        expect_that!(report.translation_files, elements_are![eq(&output_dir.join("de.json"))]);
        expect_that!(report.skipped.len(), eq(1));

        let tree: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report.config_file).unwrap()).unwrap();
        let paragraph = &tree[0]["pages"][0]["paragraphs"][0];
        assert_eq!(tree[0]["subTitle"]["raw"], "helpmenu_basics");
        assert_eq!(paragraph["title"]["raw"], "helpmenu_hud_title");
        assert_eq!(paragraph["image"]["filename"], "hud_0_0_4_2.png");
        assert_eq!(paragraph["image"]["size"], serde_json::json!([64, 32]));

        let texts: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output_dir.join("de.json")).unwrap()).unwrap();
        assert_eq!(texts, serde_json::json!({"helpmenu_hud_title": "HUD"}));
    }

    #[googletest::test]
    fn test_export_help_menu_missing_definition() {
        let temp_dir = workspace();
        fs::remove_file(temp_dir.path().join("config/HelpMenu.xml")).unwrap();

        let result = export_help_menu(&config(temp_dir.path()));

        assert!(matches!(result, Err(HelpMenuError::Io { .. })));
    }
}
