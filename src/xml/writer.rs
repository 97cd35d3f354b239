//! Indented XML output and atomic file replacement.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use xml::common::XmlVersion;
use xml::writer::{
    EmitterConfig,
    EventWriter,
    XmlEvent,
};

/// Tab-indented XML document builder writing into memory.
///
/// Attribute values are escaped by the emitter, including line breaks.
pub struct DocumentWriter {
    writer: EventWriter<Vec<u8>>,
}

impl DocumentWriter {
    /// Creates a writer and emits the `utf-8` XML declaration.
    ///
    /// # Errors
    /// Returns the emitter error if the declaration cannot be written.
    pub fn new() -> Result<Self, xml::writer::Error> {
        let mut writer = EmitterConfig::new()
            .perform_indent(true)
            .indent_string("\t")
            .pad_self_closing(false)
            .create_writer(Vec::new());
        writer.write(XmlEvent::StartDocument {
            version: XmlVersion::Version10,
            encoding: Some("utf-8"),
            standalone: Some(false),
        })?;
        Ok(Self { writer })
    }

    /// Opens an element.
    ///
    /// # Errors
    /// Returns the emitter error.
    pub fn start(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
    ) -> Result<(), xml::writer::Error> {
        let mut element = XmlEvent::start_element(name);
        for (key, value) in attributes {
            element = element.attr(*key, *value);
        }
        self.writer.write(element)
    }

    /// Closes the innermost open element.
    ///
    /// # Errors
    /// Returns the emitter error.
    pub fn end(&mut self) -> Result<(), xml::writer::Error> {
        self.writer.write(XmlEvent::end_element())
    }

    /// Writes an element without content (`<name a="b"/>`).
    ///
    /// # Errors
    /// Returns the emitter error.
    pub fn empty(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
    ) -> Result<(), xml::writer::Error> {
        self.start(name, attributes)?;
        self.end()
    }

    /// Writes a comment. `--` is not allowed inside comments and is split up.
    ///
    /// # Errors
    /// Returns the emitter error.
    pub fn comment(&mut self, text: &str) -> Result<(), xml::writer::Error> {
        let mut sanitized = text.replace("--", "- -");
        if sanitized.ends_with('-') {
            sanitized.push(' ');
        }
        self.writer.write(XmlEvent::comment(&sanitized))
    }

    /// Writes text as a CDATA section, or as escaped characters if it contains `]]>`.
    ///
    /// # Errors
    /// Returns the emitter error.
    pub fn cdata(&mut self, text: &str) -> Result<(), xml::writer::Error> {
        if text.contains("]]>") {
            self.writer.write(XmlEvent::characters(text))
        } else {
            self.writer.write(XmlEvent::cdata(text))
        }
    }

    /// Returns the serialized document, terminated by a newline.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        let mut bytes = self.writer.into_inner();
        bytes.push(b'\n');
        bytes
    }
}

/// Replaces `path` with `contents` via a sibling temporary file and a rename.
///
/// Missing parent directories are created.
///
/// # Errors
/// Returns the I/O error of the failing step.
pub fn replace_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.file_name().map_or_else(OsString::new, ToOwned::to_owned);
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, contents)?;
    if let Err(error) = fs::rename(&temp_path, path) {
        // best effort, the rename error is the one worth reporting
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;
    use crate::xml::parse_document;

    fn render(
        build: impl FnOnce(&mut DocumentWriter) -> Result<(), xml::writer::Error>,
    ) -> String {
        let mut writer = DocumentWriter::new().unwrap();
        build(&mut writer).unwrap();
        String::from_utf8(writer.finish()).unwrap()
    }

    #[googletest::test]
    fn test_document_is_tab_indented() {
        let output = render(|w| {
            w.start("l10n", &[])?;
            w.start("texts", &[])?;
            w.comment("basic")?;
            w.empty("text", &[("name", "a"), ("text", "b")])?;
            w.end()?;
            w.end()
        });

        expect_that!(output, starts_with("<?xml version=\"1.0\" encoding=\"utf-8\""));
        expect_that!(output, contains_substring("\n\t\t<!-- basic -->"));
        expect_that!(output, contains_substring("\n\t\t<text name=\"a\" text=\"b\"/>"));
        expect_that!(output, ends_with("</l10n>\n"));
    }

    #[googletest::test]
    fn test_attribute_values_survive_reparse() {
        let text = "line 1\nline 2 & \"quoted\" <tag>";
        let output = render(|w| w.empty("text", &[("name", "a"), ("text", text)]));

        let root = parse_document(&output).unwrap();

        expect_that!(root.attr("text"), some(eq(text)));
    }

    #[googletest::test]
    fn test_cdata_with_terminator_falls_back_to_characters() {
        let output = render(|w| {
            w.start("Text", &[])?;
            w.cdata("a ]]> b")?;
            w.end()
        });

        let root = parse_document(&output).unwrap();

        expect_that!(root.text(), eq("a ]]> b"));
        expect_that!(output, not(contains_substring("<![CDATA[")));
    }

    #[googletest::test]
    fn test_comment_double_dash_is_split() {
        let output = render(|w| {
            w.start("root", &[])?;
            w.comment("a--b-")?;
            w.end()
        });

        expect_that!(output, contains_substring("<!-- a- -b- -->"));
        expect_that!(parse_document(&output), ok(anything()));
    }

    #[googletest::test]
    fn test_replace_file_creates_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/out.xml");

        replace_file(&path, b"first").unwrap();
        replace_file(&path, b"second").unwrap();

        expect_that!(fs::read_to_string(&path).unwrap(), eq("second"));
        expect_that!(path.with_file_name("out.xml.tmp").exists(), eq(false));
    }
}
