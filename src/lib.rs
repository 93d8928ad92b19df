//! # xsdtags
//!
//! Compares the cardinality of the fields declared in an XSD message schema
//! with the cardinality recorded by a companion SQL mapping script.
//!
//! The schema is flattened into absolute leaf paths (`/Document/<Root>/...`),
//! each flagged required (`1`) or optional (`2`). The SQL script is scanned for
//! the same paths followed by a cardinality integer. Every schema path that is
//! missing from the script, or mapped with a different cardinality, is
//! reported.
//!
//! ## Example
//!
//! ```rust,ignore
//! use xsdtags::validate;
//!
//! let xsd = std::fs::read_to_string("camt.054.001.08.xsd")?;
//! let sql = std::fs::read_to_string("camt054_mapping.sql")?;
//!
//! let result = validate(&xsd, &sql)?;
//! for difference in result.differences() {
//!     println!("{}", difference);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;

pub mod names;
pub mod namespaces;

pub mod documents;
pub mod loaders;

pub mod comparison;
pub mod schema;
pub mod sql;
pub mod validator;

pub use comparison::{compare, Cardinality, Difference, PathMap, ValidationResult};
pub use error::{Error, Result, SchemaError};
pub use validator::{validate, validate_bytes, Validator};

/// Version of the xsdtags library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD 1.0 namespace
pub const XSD_1_0_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
