//! Error types for xsdtags
//!
//! This module defines all error types used throughout the library.
//! Every error is fatal to the comparison in progress; nothing is retried.

use std::fmt;
use thiserror::Error;

/// Result type alias using xsdtags Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xsdtags operations
#[derive(Error, Debug)]
pub enum Error {
    /// The schema is well-formed XML but lacks a construct the path walk needs
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The schema text is not well-formed XML
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// None of the candidate encodings could decode an input
    #[error("decoding error: could not decode '{name}' with any supported encoding")]
    Decode {
        /// Name of the input (file name or upload field)
        name: String,
    },

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural problems found while locating the message root of a schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The document root is not a `schema` element
    #[error("root element 'schema' not found (got '{0}')")]
    MissingSchemaRoot(String),

    /// `schema` carries no `targetNamespace`
    #[error("schema has no targetNamespace")]
    MissingTargetNamespace,

    /// No top-level `<element name="Document">`
    #[error("top-level element 'Document' not found")]
    MissingDocumentElement,

    /// The `Document` element has no `type` attribute
    #[error("element 'Document' has no type attribute")]
    MissingDocumentType,

    /// The `Document` type is not defined as a top-level complexType
    #[error("complexType '{0}' of element 'Document' not found")]
    DocumentTypeNotFound(String),

    /// The `Document` type has no element inside a sequence
    #[error("complexType '{0}' has no element inside a sequence")]
    MissingRootElement(String),

    /// The message root element has no `name` attribute
    #[error("first element of complexType '{0}' has no name attribute")]
    RootElementUnnamed(String),

    /// The message root element has no `type` attribute
    #[error("root element '{0}' has no type attribute")]
    RootElementUntyped(String),

    /// The message root type is not defined as a top-level complexType
    #[error("complexType '{0}' of the root element not found")]
    RootTypeNotFound(String),
}

/// XML parsing error
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Location in the schema text
    pub location: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref loc) = self.location {
            write!(f, " (at {})", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
