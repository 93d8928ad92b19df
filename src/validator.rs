//! Validation entry points
//!
//! One call parses both inputs, builds both path mappings and compares them.
//! Nothing is cached between calls.

use crate::comparison::{compare, Cardinality, PathMap, ValidationResult};
use crate::error::Result;
use crate::limits::Limits;
use crate::loaders::Loader;
use crate::schema::{SchemaPathExtractor, XsdDocument};
use crate::sql::extract_sql_paths;
use std::path::Path;
use tracing::info;

/// Compares a schema against a SQL mapping script
#[derive(Debug, Clone, Default)]
pub struct Validator {
    limits: Limits,
}

impl Validator {
    /// Create a validator with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Get the limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Leaf paths of a decoded schema
    pub fn schema_paths(&self, xsd: &str) -> Result<PathMap<Cardinality>> {
        let schema = XsdDocument::parse(xsd, &self.limits)?;
        SchemaPathExtractor::new(&schema, &self.limits).extract()
    }

    /// Paths of a decoded SQL script
    pub fn sql_paths(&self, sql: &str) -> PathMap<i64> {
        extract_sql_paths(sql)
    }

    /// Compare decoded schema text with decoded SQL text
    pub fn validate(&self, xsd: &str, sql: &str) -> Result<ValidationResult> {
        let schema_paths = self.schema_paths(xsd)?;
        let sql_paths = self.sql_paths(sql);
        info!(
            schema_paths = schema_paths.len(),
            sql_paths = sql_paths.len(),
            "comparing path mappings"
        );

        let result = compare(&schema_paths, &sql_paths);
        info!(
            valid = result.is_valid(),
            differences = result.differences().len(),
            "comparison finished"
        );
        Ok(result)
    }

    /// Decode raw schema and SQL bytes, then compare them
    pub fn validate_bytes(&self, xsd: &[u8], sql: &[u8]) -> Result<ValidationResult> {
        let loader = self.loader();
        let xsd = loader.decode("xsd", xsd)?;
        let sql = loader.decode("sql", sql)?;
        self.validate(&xsd, &sql)
    }

    /// Read, decode and compare two files
    pub fn validate_files(
        &self,
        xsd_path: impl AsRef<Path>,
        sql_path: impl AsRef<Path>,
    ) -> Result<ValidationResult> {
        let loader = self.loader();
        let xsd = loader.load(xsd_path)?;
        let sql = loader.load(sql_path)?;
        self.validate(&xsd, &sql)
    }

    fn loader(&self) -> Loader {
        Loader::new().with_limits(self.limits.clone())
    }
}

/// Compare decoded schema text with decoded SQL text using default limits
pub fn validate(xsd: &str, sql: &str) -> Result<ValidationResult> {
    Validator::new().validate(xsd, sql)
}

/// Decode and compare raw inputs using default limits
pub fn validate_bytes(xsd: &[u8], sql: &[u8]) -> Result<ValidationResult> {
    Validator::new().validate_bytes(xsd, sql)
}
