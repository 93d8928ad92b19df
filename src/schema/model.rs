//! Typed schema tree
//!
//! The generic element tree produced by [`Document`] is converted once into
//! an immutable tree of the few XSD constructs the path walk understands.
//! Every other construct becomes [`SchemaNode::Other`] so that deep searches
//! can still see through it.
//!
//! Identity is the local name everywhere: `xs:element`, `xsd:element` and a
//! default-namespaced `element` are the same thing here.

use crate::documents::{Document, Element};
use crate::error::{ParseError, Result, SchemaError};
use crate::limits::Limits;
use crate::names::local_name;
use crate::namespaces::NamespaceContext;
use indexmap::IndexMap;

/// XSD element local names
mod xsd_elements {
    pub const SCHEMA: &str = "schema";
    pub const ELEMENT: &str = "element";
    pub const COMPLEX_TYPE: &str = "complexType";
    pub const SEQUENCE: &str = "sequence";
    pub const CHOICE: &str = "choice";
}

/// XSD attribute names
mod xsd_attrs {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const MIN_OCCURS: &str = "minOccurs";
    pub const TARGET_NAMESPACE: &str = "targetNamespace";
}

/// A node of the typed schema tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// `element` declaration
    Element(ElementDecl),
    /// `complexType` definition (named or anonymous)
    ComplexType(ComplexTypeDef),
    /// `sequence` group
    Sequence(Vec<SchemaNode>),
    /// `choice` group
    Choice(Vec<SchemaNode>),
    /// Anything else (annotation, complexContent, all, group, ...)
    Other {
        /// Local name of the construct
        name: String,
        /// Converted children
        children: Vec<SchemaNode>,
    },
}

impl SchemaNode {
    fn from_element(elem: &Element) -> Self {
        let children = elem.children.iter().map(Self::from_element).collect();

        match elem.local_name() {
            xsd_elements::ELEMENT => Self::Element(ElementDecl {
                name: elem.get_attribute(xsd_attrs::NAME).unwrap_or_default().to_string(),
                type_name: elem.get_attribute(xsd_attrs::TYPE).map(str::to_string),
                min_occurs: elem.get_attribute(xsd_attrs::MIN_OCCURS).map(str::to_string),
                children,
            }),
            xsd_elements::COMPLEX_TYPE => Self::ComplexType(ComplexTypeDef {
                name: elem.get_attribute(xsd_attrs::NAME).map(str::to_string),
                content: children,
            }),
            xsd_elements::SEQUENCE => Self::Sequence(children),
            xsd_elements::CHOICE => Self::Choice(children),
            other => Self::Other {
                name: other.to_string(),
                children,
            },
        }
    }

    /// Child nodes, in document order
    pub fn children(&self) -> &[SchemaNode] {
        match self {
            Self::Element(decl) => &decl.children,
            Self::ComplexType(ct) => &ct.content,
            Self::Sequence(items) | Self::Choice(items) => items,
            Self::Other { children, .. } => children,
        }
    }

    /// The element declaration, if this node is one
    pub fn as_element(&self) -> Option<&ElementDecl> {
        match self {
            Self::Element(decl) => Some(decl),
            _ => None,
        }
    }
}

/// `element` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDecl {
    /// Value of `name`, empty when the attribute is absent
    pub name: String,
    /// Value of `type` as written (prefix included)
    pub type_name: Option<String>,
    /// Value of `minOccurs` as written
    pub min_occurs: Option<String>,
    /// Nested constructs (anonymous types, annotations)
    pub children: Vec<SchemaNode>,
}

impl ElementDecl {
    /// Local name of the declared type, ignoring an empty `type`
    pub fn type_local_name(&self) -> Option<&str> {
        self.type_name
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(local_name)
    }

    /// `minOccurs="0"` is the only optional marker; any other value means required.
    pub fn is_optional(&self) -> bool {
        self.min_occurs.as_deref().map(str::trim) == Some("0")
    }

    /// First anonymous `complexType` nested in this element
    pub fn anonymous_type(&self) -> Option<&ComplexTypeDef> {
        self.children.iter().find_map(|child| match child {
            SchemaNode::ComplexType(ct) => Some(ct),
            _ => None,
        })
    }
}

/// `complexType` definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexTypeDef {
    /// Value of `name`; `None` for anonymous types
    pub name: Option<String>,
    /// Child constructs, in document order
    pub content: Vec<SchemaNode>,
}

impl ComplexTypeDef {
    /// Direct `sequence` children
    pub fn sequences(&self) -> impl Iterator<Item = &[SchemaNode]> {
        self.content.iter().filter_map(|node| match node {
            SchemaNode::Sequence(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    /// Direct `choice` children
    pub fn choices(&self) -> impl Iterator<Item = &[SchemaNode]> {
        self.content.iter().filter_map(|node| match node {
            SchemaNode::Choice(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    /// First element of the first direct `sequence` that has one
    pub fn first_sequence_element(&self) -> Option<&ElementDecl> {
        self.sequences()
            .find_map(|items| items.iter().find_map(SchemaNode::as_element))
    }

    /// First element, in document order, that opens any `sequence` below this type
    pub fn first_sequence_element_deep(&self) -> Option<&ElementDecl> {
        first_in_sequence(&self.content, false)
    }
}

/// Pre-order search for an element that is the first element child of a sequence.
fn first_in_sequence(nodes: &[SchemaNode], in_sequence: bool) -> Option<&ElementDecl> {
    let mut seen_element = false;
    for node in nodes {
        if let SchemaNode::Element(decl) = node {
            if in_sequence && !seen_element {
                return Some(decl);
            }
            seen_element = true;
        }
        let is_sequence = matches!(node, SchemaNode::Sequence(_));
        if let Some(found) = first_in_sequence(node.children(), is_sequence) {
            return Some(found);
        }
    }
    None
}

/// A parsed schema document, indexed for local-name lookups
#[derive(Debug, Clone)]
pub struct XsdDocument {
    /// Name of the root element as written, e.g. `xs:schema`
    pub root_name: String,
    /// `targetNamespace`, if present and not empty
    pub target_namespace: Option<String>,
    /// Namespaces declared on the root element
    pub namespaces: NamespaceContext,
    /// Top-level element declarations, in document order
    pub elements: Vec<ElementDecl>,
    /// Top-level named complex types; the first definition of a name wins
    pub complex_types: IndexMap<String, ComplexTypeDef>,
}

impl XsdDocument {
    /// Parse schema text with default limits
    pub fn from_string(xsd: &str) -> Result<Self> {
        Self::parse(xsd, &Limits::default())
    }

    /// Parse schema text
    pub fn parse(xsd: &str, limits: &Limits) -> Result<Self> {
        let doc = Document::parse(xsd, limits)?;
        Self::from_document(&doc)
    }

    /// Build the typed tree from a parsed document
    pub fn from_document(doc: &Document) -> Result<Self> {
        let root = doc
            .root()
            .ok_or_else(|| ParseError::new("empty document"))?;

        if root.local_name() != xsd_elements::SCHEMA {
            return Err(SchemaError::MissingSchemaRoot(root.name.clone()).into());
        }

        // Some producers qualify the attribute, so fall back to a prefix-agnostic scan.
        let target_namespace = root
            .get_attribute(xsd_attrs::TARGET_NAMESPACE)
            .filter(|ns| !ns.is_empty())
            .or_else(|| root.get_attribute_by_local_name(xsd_attrs::TARGET_NAMESPACE))
            .filter(|ns| !ns.is_empty())
            .map(str::to_string);

        let mut elements = Vec::new();
        let mut complex_types = IndexMap::new();
        for child in &root.children {
            match SchemaNode::from_element(child) {
                SchemaNode::Element(decl) => elements.push(decl),
                SchemaNode::ComplexType(ct) => {
                    if let Some(name) = ct.name.clone() {
                        complex_types.entry(name).or_insert(ct);
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            root_name: root.name.clone(),
            target_namespace,
            namespaces: root.namespaces.clone(),
            elements,
            complex_types,
        })
    }

    /// Namespace URI bound to the root element's prefix
    pub fn schema_namespace(&self) -> Option<&str> {
        let (prefix, _) = crate::names::split_qname(&self.root_name);
        self.namespaces.lookup(prefix)
    }

    /// First top-level element with exactly this name
    pub fn element(&self, name: &str) -> Option<&ElementDecl> {
        self.elements.iter().find(|decl| decl.name == name)
    }

    /// Top-level complex type for a (possibly prefixed) type name
    pub fn complex_type(&self, type_name: &str) -> Option<&ComplexTypeDef> {
        self.complex_types.get(local_name(type_name))
    }
}
