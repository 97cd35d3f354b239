//! Minimal owned element tree built from `xml` reader events.

use xml::reader::{
    EventReader,
    XmlEvent,
};

/// Content node of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
}

/// An XML element with its attributes in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Value of the attribute with the given local name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) | Node::CData(_) => None,
        })
    }

    /// First direct child element with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.elements().find(|element| element.name == name)
    }

    /// All elements with the given name in document order, including `self`.
    #[must_use]
    pub fn descendants(&self, name: &str) -> Vec<&Self> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Self>) {
        if self.name == name {
            found.push(self);
        }
        for element in self.elements() {
            element.collect_descendants(name, found);
        }
    }

    /// Concatenated character and CDATA content of the direct children.
    ///
    /// Whitespace-only runs between markup are not part of the tree, so
    /// indentation around a CDATA section does not leak into the text.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) | Node::CData(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

/// Parses a whole document and returns its root element.
///
/// # Errors
/// Returns the reader error for malformed documents.
pub fn parse_document(source: &str) -> Result<Element, xml::reader::Error> {
    let reader = EventReader::new(source.as_bytes());
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    for event in reader {
        match event? {
            XmlEvent::StartElement { name, attributes, .. } => {
                let mut element = Element::new(name.local_name);
                element.attributes = attributes
                    .into_iter()
                    .map(|attribute| (attribute.name.local_name, attribute.value))
                    .collect();
                stack.push(element);
            }
            XmlEvent::EndElement { .. } => {
                let Some(element) = stack.pop() else {
                    continue;
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(element)),
                    None => root = Some(element),
                }
            }
            XmlEvent::Characters(text) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(text));
                }
            }
            XmlEvent::CData(text) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::CData(text));
                }
            }
            _ => {}
        }
    }

    // The reader reports a missing root element as an error before we get here.
    Ok(root.unwrap_or_default())
}
