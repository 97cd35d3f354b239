//! PNG conversion of the help menu textures and cropping of atlas regions.

use std::fs::{
    self,
    File,
};
use std::io::BufReader;
use std::path::{
    Path,
    PathBuf,
};

use image::{
    DynamicImage,
    ImageFormat,
};

use super::error::HelpMenuError;
use super::loader::png_file_name;
use super::model::{
    Image,
    MenuCategory,
};

fn is_dds(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dds"))
}

/// Decodes an image file. DDS textures are decoded from their first mip level.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
pub fn decode_image(path: &Path) -> Result<DynamicImage, HelpMenuError> {
    if !is_dds(path) {
        return image::open(path)
            .map_err(|source| HelpMenuError::Image { path: path.to_path_buf(), source });
    }

    let dds_error = |message: String| HelpMenuError::Dds { path: path.to_path_buf(), message };
    let file = File::open(path).map_err(|e| HelpMenuError::io(path, e))?;
    let dds = image_dds::ddsfile::Dds::read(BufReader::new(file))
        .map_err(|e| dds_error(e.to_string()))?;
    let rgba = image_dds::image_from_dds(&dds, 0).map_err(|e| dds_error(e.to_string()))?;
    Ok(DynamicImage::ImageRgba8(rgba))
}

/// Converts one image to `<output_dir>/<name>.png`.
///
/// # Errors
/// Returns an error if the image cannot be decoded or written.
pub fn convert_to_png(source: &Path, output_dir: &Path) -> Result<PathBuf, HelpMenuError> {
    let name = source.to_string_lossy();
    let target = output_dir.join(png_file_name(&name));
    decode_image(source)?
        .save_with_format(&target, ImageFormat::Png)
        .map_err(|source| HelpMenuError::Image { path: target.clone(), source })?;
    tracing::debug!(source = %source.display(), target = %target.display(), "Converted image");
    Ok(target)
}

/// Converts every file of `image_dir` and each of `extra_images` to PNG.
///
/// Returns the written files, image directory entries first in file name order.
///
/// # Errors
/// - Directory or an extra image does not exist
/// - An image cannot be decoded or written
pub fn convert_images(
    image_dir: &Path,
    extra_images: &[PathBuf],
    output_dir: &Path,
) -> Result<Vec<PathBuf>, HelpMenuError> {
    fs::create_dir_all(output_dir).map_err(|e| HelpMenuError::io(output_dir, e))?;

    let mut sources = Vec::new();
    for entry in fs::read_dir(image_dir).map_err(|e| HelpMenuError::io(image_dir, e))? {
        let path = entry.map_err(|e| HelpMenuError::io(image_dir, e))?.path();
        if path.is_file() {
            sources.push(path);
        }
    }
    sources.sort();
    sources.extend(extra_images.iter().cloned());

    sources.iter().map(|source| convert_to_png(source, output_dir)).collect()
}

/// Name of the file holding the region `(left, top, right, bottom)` of `filename`.
#[must_use]
pub fn region_file_name(
    filename: &str,
    (left, top, right, bottom): (u32, u32, u32, u32),
) -> String {
    let stem = filename.strip_suffix(".png").unwrap_or(filename);
    format!("{stem}_{left}_{top}_{right}_{bottom}.png")
}

/// Saves the `uvs` region of an already converted atlas and points `entry` at it.
///
/// # Errors
/// - `uvs` is not a `left top right bottom` box
/// - Atlas cannot be opened or the region cannot be written
pub fn crop_region(entry: &mut Image, output_dir: &Path) -> Result<PathBuf, HelpMenuError> {
    let invalid = || HelpMenuError::InvalidRegion {
        filename: entry.filename.clone(),
        uvs: entry.uvs.clone(),
    };
    let region = entry.crop_box().ok_or_else(invalid)?;
    let (left, top, right, bottom) = region;
    if right <= left || bottom <= top {
        return Err(invalid());
    }

    let atlas_path = output_dir.join(&entry.filename);
    let atlas = image::open(&atlas_path)
        .map_err(|source| HelpMenuError::Image { path: atlas_path.clone(), source })?;

    let file_name = region_file_name(&entry.filename, region);
    let target = output_dir.join(&file_name);
    atlas
        .crop_imm(left, top, right - left, bottom - top)
        .save_with_format(&target, ImageFormat::Png)
        .map_err(|source| HelpMenuError::Image { path: target.clone(), source })?;

    entry.filename = file_name;
    Ok(target)
}

/// Crops the region of every paragraph image in the category tree.
///
/// # Errors
/// Returns the first cropping error.
pub fn crop_regions(
    categories: &mut [MenuCategory],
    output_dir: &Path,
) -> Result<Vec<PathBuf>, HelpMenuError> {
    let mut written = Vec::new();
    let paragraphs = categories
        .iter_mut()
        .flat_map(|category| category.pages.iter_mut())
        .flat_map(|page| page.paragraphs.iter_mut());
    for paragraph in paragraphs {
        if paragraph.image.filename.is_empty() {
            continue;
        }
        written.push(crop_region(&mut paragraph.image, output_dir)?);
    }
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use image::{
        GenericImageView,
        Rgba,
        RgbaImage,
    };
    use tempfile::TempDir;

    use super::*;

    fn atlas(dir: &Path, name: &str) -> PathBuf {
        let mut atlas = RgbaImage::from_pixel(8, 4, Rgba([255, 0, 0, 255]));
        atlas.put_pixel(2, 1, Rgba([0, 0, 255, 255]));
        let path = dir.join(name);
        atlas.save(&path).unwrap();
        path
    }

    fn atlas_region(filename: &str, uvs: Vec<u32>) -> Image {
        Image { filename: filename.to_string(), uvs, ..Image::default() }
    }

    #[googletest::test]
    fn test_crop_region() {
        let temp_dir = TempDir::new().unwrap();
        atlas(temp_dir.path(), "hud.png");
        let mut hud = atlas_region("hud.png", vec![2, 1, 6, 3]);

        let path = crop_region(&mut hud, temp_dir.path()).unwrap();

        expect_that!(hud.filename, eq("hud_2_1_6_3.png"));
        expect_that!(path, eq(&temp_dir.path().join("hud_2_1_6_3.png")));
        let region = image::open(&path).unwrap();
        assert_eq!(region.dimensions(), (4, 2));
        assert_eq!(region.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
    }

    #[googletest::test]
    fn test_crop_region_rejects_invalid_box() {
        let temp_dir = TempDir::new().unwrap();
        atlas(temp_dir.path(), "hud.png");

        let result = crop_region(&mut atlas_region("hud.png", vec![4, 0, 2, 2]), temp_dir.path());
        expect_that!(result, err(displays_as(contains_substring("Invalid image region"))));

        let result = crop_region(&mut atlas_region("hud.png", vec![0, 0]), temp_dir.path());
        expect_that!(result, err(displays_as(contains_substring("Invalid image region"))));
    }

    #[googletest::test]
    fn test_convert_images() {
        let temp_dir = TempDir::new().unwrap();
        let image_dir = temp_dir.path().join("img/helpmenu");
        fs::create_dir_all(&image_dir).unwrap();
        atlas(&image_dir, "b.png");
        atlas(&image_dir, "a.png");
        let extra = atlas(temp_dir.path(), "icon.png");
        let output_dir = temp_dir.path().join("out");

        let written = convert_images(&image_dir, &[extra], &output_dir).unwrap();

        expect_that!(
            written,
            elements_are![
                eq(&output_dir.join("a.png")),
                eq(&output_dir.join("b.png")),
                eq(&output_dir.join("icon.png"))
            ]
        );
    }

    #[googletest::test]
    fn test_convert_images_missing_extra_image() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("img")).unwrap();

        let result = convert_images(
            &temp_dir.path().join("img"),
            &[temp_dir.path().join("missing.dds")],
            &temp_dir.path().join("out"),
        );

        assert!(matches!(result, Err(HelpMenuError::Io { .. })));
    }

    #[googletest::test]
    fn test_region_file_name() {
        expect_that!(
            region_file_name("iconSprite.png", (0, 16, 32, 48)),
            eq("iconSprite_0_16_32_48.png")
        );
    }
}
