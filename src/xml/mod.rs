//! XML helpers shared by the translation and help menu tools.
mod escape;
mod tree;
mod writer;

pub use escape::{
    NEWLINE_REFERENCE,
    escape_attribute_newlines,
};
pub use tree::{
    Element,
    Node,
    parse_document,
};
pub use writer::{
    DocumentWriter,
    replace_file,
};
