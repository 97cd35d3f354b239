//! Newline escaping for attribute values of hand-edited XML files.
//!
//! XML parsers normalize literal line breaks inside attribute values to spaces, so
//! multi-line texts in `<text name=".." text=".."/>` would lose their line breaks.
//! Before parsing, every literal `\r\n`, `\n` or `\r` (and the decimal reference `&#10;`)
//! inside an attribute value is rewritten to the canonical `&#xA;` reference.

/// Canonical newline character reference written into attribute values.
pub const NEWLINE_REFERENCE: &str = "&#xA;";

/// Decimal spelling of the newline reference, normalized to [`NEWLINE_REFERENCE`].
const DECIMAL_NEWLINE_REFERENCE: &str = "&#10;";

/// Scanner position relative to XML markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Content,
    Tag,
    AttributeValue(char),
    Comment,
    CData,
    ProcessingInstruction,
}

/// Rewrites line breaks inside attribute values to `&#xA;`.
///
/// Only text between the quotes of an attribute inside a tag is touched; element
/// content, comments, CDATA sections and processing instructions are copied verbatim.
/// The transform is idempotent.
///
/// # Examples
/// ```
/// use courseplay_tools::xml::escape_attribute_newlines;
///
/// let source = "<text name=\"a\" text=\"line 1\nline 2\"/>";
/// let escaped = escape_attribute_newlines(source);
/// assert_eq!(escaped, "<text name=\"a\" text=\"line 1&#xA;line 2\"/>");
/// assert_eq!(escape_attribute_newlines(&escaped), escaped);
/// ```
#[must_use]
pub fn escape_attribute_newlines(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    let mut state = ScanState::Content;
    let mut rest = source;

    while let Some(c) = rest.chars().next() {
        let mut consumed = c.len_utf8();
        match state {
            ScanState::Content => {
                if rest.starts_with("<!--") {
                    state = ScanState::Comment;
                    consumed = 4;
                } else if rest.starts_with("<![CDATA[") {
                    state = ScanState::CData;
                    consumed = 9;
                } else if rest.starts_with("<?") {
                    state = ScanState::ProcessingInstruction;
                    consumed = 2;
                } else if c == '<' {
                    state = ScanState::Tag;
                }
                output.push_str(&rest[..consumed]);
            }
            ScanState::Tag => {
                if c == '"' || c == '\'' {
                    state = ScanState::AttributeValue(c);
                } else if c == '>' {
                    state = ScanState::Content;
                }
                output.push(c);
            }
            ScanState::AttributeValue(quote) => {
                if c == quote {
                    state = ScanState::Tag;
                    output.push(c);
                } else if rest.starts_with("\r\n") {
                    output.push_str(NEWLINE_REFERENCE);
                    consumed = 2;
                } else if c == '\n' || c == '\r' {
                    output.push_str(NEWLINE_REFERENCE);
                } else if rest.starts_with(DECIMAL_NEWLINE_REFERENCE) {
                    output.push_str(NEWLINE_REFERENCE);
                    consumed = DECIMAL_NEWLINE_REFERENCE.len();
                } else {
                    output.push(c);
                }
            }
            ScanState::Comment => {
                consumed = copy_until(rest, "-->", &mut output);
                state = ScanState::Content;
            }
            ScanState::CData => {
                consumed = copy_until(rest, "]]>", &mut output);
                state = ScanState::Content;
            }
            ScanState::ProcessingInstruction => {
                consumed = copy_until(rest, "?>", &mut output);
                state = ScanState::Content;
            }
        }
        rest = &rest[consumed..];
    }

    output
}

/// Copies `rest` up to and including `terminator` (or everything if it is missing).
fn copy_until(rest: &str, terminator: &str, output: &mut String) -> usize {
    let end = rest.find(terminator).map_or(rest.len(), |index| index + terminator.len());
    output.push_str(&rest[..end]);
    end
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::unix_newline("<t a=\"x\ny\"/>", "<t a=\"x&#xA;y\"/>")]
    #[case::windows_newline("<t a=\"x\r\ny\"/>", "<t a=\"x&#xA;y\"/>")]
    #[case::carriage_return("<t a=\"x\ry\"/>", "<t a=\"x&#xA;y\"/>")]
    #[case::decimal_reference("<t a=\"x&#10;y\"/>", "<t a=\"x&#xA;y\"/>")]
    #[case::canonical_reference("<t a=\"x&#xA;y\"/>", "<t a=\"x&#xA;y\"/>")]
    #[case::single_quotes("<t a='x\ny'/>", "<t a='x&#xA;y'/>")]
    #[case::two_newlines("<t a=\"x\n\ny\"/>", "<t a=\"x&#xA;&#xA;y\"/>")]
    #[case::other_entities("<t a=\"&amp;\n&lt;\"/>", "<t a=\"&amp;&#xA;&lt;\"/>")]
    fn test_escape_inside_attribute(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(escape_attribute_newlines(source), expected);
    }

    #[rstest]
    #[case::element_content("<a>\n  <b/>\n</a>\n")]
    #[case::between_attributes("<t\n  name=\"a\"\n  text=\"b\"/>")]
    #[case::comment("<!-- a=\"x\ny\" -->")]
    #[case::cdata("<T><![CDATA[a=\"x\ny\"]]></T>")]
    #[case::declaration("<?xml version=\"1.0\"\n encoding=\"utf-8\"?>\n<a/>")]
    #[case::quote_in_content("<a>say \"hi\nthere\"</a>")]
    fn test_escape_leaves_markup_untouched(#[case] source: &str) {
        assert_eq!(escape_attribute_newlines(source), source);
    }

    #[rstest]
    fn test_escape_multibyte_text() {
        let source = "<text name=\"bye\" text=\"Tschüss\nbis später\"/>";

        assert_that!(
            escape_attribute_newlines(source),
            eq("<text name=\"bye\" text=\"Tschüss&#xA;bis später\"/>")
        );
    }

    #[rstest]
    fn test_escape_is_idempotent() {
        let source = "<?xml version=\"1.0\"?>\n<l10n>\n\t<texts>\n\t\t<text name=\"a\" \
                      text=\"one\r\ntwo\rthree&#10;four\nfive\"/>\n\t</texts>\n</l10n>\n";

        let once = escape_attribute_newlines(source);
        let twice = escape_attribute_newlines(&once);

        assert_that!(twice, eq(&once));
        assert_that!(once, contains_substring("one&#xA;two&#xA;three&#xA;four&#xA;five"));
    }

    #[rstest]
    fn test_escape_unterminated_input() {
        assert_eq!(escape_attribute_newlines("<a b=\"x\ny"), "<a b=\"x&#xA;y");
        assert_eq!(escape_attribute_newlines("<!-- open\n"), "<!-- open\n");
    }
}
