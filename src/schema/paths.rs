//! Schema path extraction
//!
//! Locates the message root under `Document` and flattens the complex type
//! tree below it into absolute leaf paths with a cardinality flag.
//!
//! Elements typed by a named top-level complex type are never leaves. They
//! only contribute a path segment, and their own `minOccurs` is folded into
//! the required flag inherited by everything beneath them. Anything reached
//! through a `choice` is optional, whatever its `minOccurs` says.

use super::model::{ComplexTypeDef, ElementDecl, SchemaNode, XsdDocument};
use crate::comparison::{Cardinality, PathMap};
use crate::error::{Result, SchemaError};
use crate::limits::Limits;
use crate::names::local_name;
use crate::XSD_1_0_NAMESPACE;
use tracing::{debug, info, warn};

/// Name of the top-level element that wraps every message
pub const DOCUMENT_ELEMENT: &str = "Document";

/// The message root found under `Document`
#[derive(Debug, Clone)]
pub struct MessageRoot<'a> {
    /// Local name of the `Document` type
    pub document_type: &'a str,
    /// First element of the `Document` type's sequence
    pub element: &'a ElementDecl,
    /// Complex type of that element
    pub complex_type: &'a ComplexTypeDef,
    /// `/Document/<root>`
    pub path: String,
    /// Whether the root element itself is required
    pub required: bool,
}

/// Flattens a schema into its leaf paths
#[derive(Debug)]
pub struct SchemaPathExtractor<'a> {
    schema: &'a XsdDocument,
    limits: &'a Limits,
}

impl<'a> SchemaPathExtractor<'a> {
    /// Create an extractor over a parsed schema
    pub fn new(schema: &'a XsdDocument, limits: &'a Limits) -> Self {
        Self { schema, limits }
    }

    /// Locate the message root and expand every leaf path below it
    pub fn extract(&self) -> Result<PathMap<Cardinality>> {
        let root = self.locate_root()?;

        let mut paths = PathMap::new();
        self.expand(root.complex_type, &root.path, root.required, 0, &mut paths)?;

        if paths.duplicates() > 0 {
            warn!(duplicates = paths.duplicates(), "schema declares repeated paths");
        }
        Ok(paths)
    }

    /// Find `Document`, its type, and the message root element inside it
    pub fn locate_root(&self) -> Result<MessageRoot<'a>> {
        let schema = self.schema;

        let target_namespace = schema
            .target_namespace
            .as_deref()
            .ok_or(SchemaError::MissingTargetNamespace)?;
        info!(target_namespace, "resolved targetNamespace");
        match schema.schema_namespace() {
            Some(XSD_1_0_NAMESPACE) => debug!(root = %schema.root_name, "XSD 1.0 schema"),
            // Matching is by local name, so an unexpected namespace is only worth a note.
            Some(other) => warn!(namespace = other, root = %schema.root_name, "schema element outside the XSD 1.0 namespace"),
            None => debug!(root = %schema.root_name, "schema element without a namespace"),
        }

        let document = schema
            .element(DOCUMENT_ELEMENT)
            .ok_or(SchemaError::MissingDocumentElement)?;

        let document_type = document
            .type_name
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(local_name)
            .ok_or(SchemaError::MissingDocumentType)?;
        info!(document_type, "resolved Document type");

        let document_ct = schema
            .complex_type(document_type)
            .ok_or_else(|| SchemaError::DocumentTypeNotFound(document_type.to_string()))?;

        let element = document_ct
            .first_sequence_element()
            .or_else(|| document_ct.first_sequence_element_deep())
            .ok_or_else(|| SchemaError::MissingRootElement(document_type.to_string()))?;

        if element.name.trim().is_empty() {
            return Err(SchemaError::RootElementUnnamed(document_type.to_string()).into());
        }
        info!(root_element = %element.name, "resolved message root element");

        let root_type = element
            .type_name
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(local_name)
            .ok_or_else(|| SchemaError::RootElementUntyped(element.name.clone()))?;

        let complex_type = schema
            .complex_type(root_type)
            .ok_or_else(|| SchemaError::RootTypeNotFound(root_type.to_string()))?;

        Ok(MessageRoot {
            document_type,
            element,
            complex_type,
            path: format!("/{}/{}", DOCUMENT_ELEMENT, element.name),
            required: !element.is_optional(),
        })
    }

    fn expand(
        &self,
        ct: &ComplexTypeDef,
        base: &str,
        parent_required: bool,
        depth: usize,
        paths: &mut PathMap<Cardinality>,
    ) -> Result<()> {
        self.limits.check_path_depth(depth, base)?;

        for items in ct.sequences() {
            for decl in items.iter().filter_map(SchemaNode::as_element) {
                let required = parent_required && !decl.is_optional();
                self.expand_element(decl, base, required, depth, paths)?;
            }
        }

        for items in ct.choices() {
            for decl in items.iter().filter_map(SchemaNode::as_element) {
                self.expand_element(decl, base, false, depth, paths)?;
            }
        }

        Ok(())
    }

    fn expand_element(
        &self,
        decl: &ElementDecl,
        base: &str,
        required: bool,
        depth: usize,
        paths: &mut PathMap<Cardinality>,
    ) -> Result<()> {
        if decl.name.is_empty() {
            return Ok(());
        }
        let path = format!("{}/{}", base, decl.name);

        // A named complex type wins over any inline content the element might also carry.
        if let Some(named) = decl
            .type_local_name()
            .and_then(|t| self.schema.complex_type(t))
        {
            return self.expand(named, &path, required, depth + 1, paths);
        }

        let cardinality = Cardinality::from_required(required);
        debug!(path = %path, %cardinality, "schema leaf");
        paths.insert(path.clone(), cardinality);

        if let Some(anonymous) = decl.anonymous_type() {
            self.expand(anonymous, &path, required, depth + 1, paths)?;
        }
        Ok(())
    }
}

/// Parse schema text and extract its leaf paths with default limits
pub fn extract_schema_paths(xsd: &str) -> Result<PathMap<Cardinality>> {
    let limits = Limits::default();
    let schema = XsdDocument::parse(xsd, &limits)?;
    SchemaPathExtractor::new(&schema, &limits).extract()
}
