//! Reads the in-game help menu definition (`config/HelpMenu.xml`).

use std::path::Path;

use super::error::HelpMenuError;
use super::model::{
    Image,
    MenuCategory,
    Page,
    Paragraph,
    Text,
};
use crate::xml::{
    Element,
    escape_attribute_newlines,
    parse_document,
};

/// Loads the help menu categories.
///
/// # Errors
/// - File cannot be read or is not well-formed
/// - A title, text or image element lacks a required attribute
/// - An image size or region is not a list of pixel values
pub fn load_help_menu(path: &Path) -> Result<Vec<MenuCategory>, HelpMenuError> {
    let source = std::fs::read_to_string(path).map_err(|e| HelpMenuError::io(path, e))?;
    let root = parse_document(&escape_attribute_newlines(&source))
        .map_err(|source| HelpMenuError::Parse { path: path.to_path_buf(), source })?;

    let categories = root
        .descendants("category")
        .into_iter()
        .map(|category| parse_category(path, category))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(path = %path.display(), categories = categories.len(), "Loaded help menu");
    Ok(categories)
}

fn parse_category(path: &Path, element: &Element) -> Result<MenuCategory, HelpMenuError> {
    let title = Text::from_reference(required_attr(path, element, "title")?);
    let sub_title = element.attr("subTitle").map_or_else(|| title.clone(), Text::from_reference);
    let pages = element
        .descendants("page")
        .into_iter()
        .map(|page| parse_page(path, page))
        .collect::<Result<_, _>>()?;
    Ok(MenuCategory { title, sub_title, pages })
}

fn parse_page(path: &Path, element: &Element) -> Result<Page, HelpMenuError> {
    let title = Text::from_reference(required_attr(path, element, "title")?);
    let paragraphs = element
        .descendants("paragraph")
        .into_iter()
        .map(|paragraph| parse_paragraph(path, paragraph))
        .collect::<Result<_, _>>()?;
    Ok(Page { title, paragraphs })
}

fn parse_paragraph(path: &Path, element: &Element) -> Result<Paragraph, HelpMenuError> {
    let text_child = |name: &str| -> Result<Text, HelpMenuError> {
        element.child(name).map_or_else(
            || Ok(Text::default()),
            |child| Ok(Text::from_reference(required_attr(path, child, "text")?)),
        )
    };

    let image = match element.child("image") {
        Some(image) => parse_image(path, image)?,
        None => Image::default(),
    };
    Ok(Paragraph { title: text_child("title")?, text: text_child("text")?, image })
}

fn parse_image(path: &Path, element: &Element) -> Result<Image, HelpMenuError> {
    let source = required_attr(path, element, "filename")?;
    let size_str = required_attr(path, element, "size")?;
    let uvs_str = required_attr(path, element, "uvs")?;

    Ok(Image {
        filename: png_file_name(source),
        size: parse_pixels(path, size_str)?,
        size_str: size_str.to_string(),
        uvs: parse_pixels(path, uvs_str)?,
        uvs_str: uvs_str.to_string(),
    })
}

/// File name of the converted image: the base name with a `.png` extension for DDS sources.
pub(crate) fn png_file_name(source: &str) -> String {
    let name = source.rsplit(['/', '\\']).next().unwrap_or(source);
    match name.rsplit_once('.') {
        Some((stem, extension)) if extension.eq_ignore_ascii_case("dds") => format!("{stem}.png"),
        _ => name.to_string(),
    }
}

/// Parses `"10px 20px"` into `[10, 20]`.
fn parse_pixels(path: &Path, value: &str) -> Result<Vec<u32>, HelpMenuError> {
    value
        .split_whitespace()
        .map(|part| {
            part.strip_suffix("px").unwrap_or(part).parse().map_err(|_| {
                HelpMenuError::invalid(path, format!("'{value}' is not a list of pixel values"))
            })
        })
        .collect()
}

fn required_attr<'a>(
    path: &Path,
    element: &'a Element,
    name: &str,
) -> Result<&'a str, HelpMenuError> {
    element.attr(name).ok_or_else(|| {
        HelpMenuError::invalid(path, format!("<{}> without '{name}' attribute", element.name))
    })
}
