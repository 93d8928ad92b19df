//! XSD schema inspection
//!
//! [`model`] turns schema text into a typed tree, [`paths`] flattens that
//! tree into leaf paths.

pub mod model;
pub mod paths;

pub use model::{ComplexTypeDef, ElementDecl, SchemaNode, XsdDocument};
pub use paths::{extract_schema_paths, MessageRoot, SchemaPathExtractor, DOCUMENT_ELEMENT};
