//! XML document handling
//!
//! Decoded schema text is read with quick-xml into a small owned element
//! tree. The tree keeps raw attribute names so callers can choose between
//! exact and prefix-agnostic attribute lookup.

use crate::error::{ParseError, Result};
use crate::limits::Limits;
use crate::names::split_qname;
use crate::namespaces::NamespaceContext;
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// XML Element in the document tree
#[derive(Debug, Clone)]
pub struct Element {
    /// Element name as written, prefix included
    pub name: String,
    /// Element attributes keyed by their name as written
    pub attributes: IndexMap<String, String>,
    /// Child elements
    pub children: Vec<Element>,
    /// Namespaces declared on this element
    pub namespaces: NamespaceContext,
}

impl Element {
    /// Create a new element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            namespaces: NamespaceContext::new(),
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        split_qname(&self.name).1
    }

    /// Get an attribute value by its exact name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Get the first attribute whose local name matches, ignoring any prefix
    pub fn get_attribute_by_local_name(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| split_qname(name).1 == local_name)
            .map(|(_, value)| value.as_str())
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }
}

/// XML Document representation
#[derive(Debug, Default)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Parse an XML document from a string with default limits
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml, &Limits::default())
    }

    /// Parse an XML document from a string
    pub fn parse(xml: &str, limits: &Limits) -> Result<Self> {
        let xml = xml.trim_start_matches('\u{feff}');
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut doc = Document::default();
        let mut element_stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let element = Self::parse_element(&e)?;
                    element_stack.push(element);
                    limits.check_xml_depth(element_stack.len())?;
                }
                Ok(Event::End(_)) => {
                    let current = element_stack.pop().ok_or_else(|| {
                        Self::error_at(&reader, "unexpected closing tag")
                    })?;
                    Self::attach(&mut doc, &mut element_stack, current, &reader)?;
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::parse_element(&e)?;
                    Self::attach(&mut doc, &mut element_stack, element, &reader)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Self::error_at(&reader, e.to_string()).into()),
                _ => {} // Text, comments, processing instructions carry nothing we need
            }
        }

        if let Some(open) = element_stack.last() {
            return Err(Self::error_at(
                &reader,
                format!("unexpected end of document inside <{}>", open.name),
            )
            .into());
        }

        Ok(doc)
    }

    fn attach(
        doc: &mut Document,
        stack: &mut [Element],
        element: Element,
        reader: &Reader<&[u8]>,
    ) -> Result<()> {
        if let Some(parent) = stack.last_mut() {
            parent.add_child(element);
        } else if doc.root.is_none() {
            doc.root = Some(element);
        } else {
            return Err(Self::error_at(reader, "multiple root elements").into());
        }
        Ok(())
    }

    fn error_at(reader: &Reader<&[u8]>, message: impl Into<String>) -> ParseError {
        ParseError::new(message).with_location(format!("byte {}", reader.buffer_position()))
    }

    /// Parse element from BytesStart event
    fn parse_element(start: &BytesStart) -> Result<Element> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| ParseError::new(format!("invalid element name: {}", e)))?
            .to_string();

        let mut element = Element::new(name);

        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| ParseError::new(format!("failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| ParseError::new(format!("invalid attribute name: {}", e)))?
                .to_string();

            let attr_value = attr
                .unescape_value()
                .map_err(|e| ParseError::new(format!("failed to unescape attribute value: {}", e)))?
                .to_string();

            if attr_name == "xmlns" {
                element.namespaces.set_default_namespace(&attr_value);
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                element.namespaces.add_prefix(prefix, &attr_value);
            }
            element.attributes.insert(attr_name, attr_value);
        }

        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }
}
