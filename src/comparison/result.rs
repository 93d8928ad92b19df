//! Comparison results
//!
//! The message texts are consumed verbatim by existing tooling, including
//! the absence message that never closes its quote.

use super::path_map::Cardinality;
use serde::{Serialize, Serializer};
use std::fmt;

/// One discrepancy between the schema and the SQL mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    /// Path present on both sides with different cardinality
    Mismatch {
        /// Leaf path
        path: String,
        /// Schema-side flag
        xsd: Cardinality,
        /// Integer found in the SQL text
        sql: i64,
    },
    /// Schema path with no SQL counterpart
    Missing {
        /// Leaf path
        path: String,
    },
}

impl Difference {
    /// The path this difference is about
    pub fn path(&self) -> &str {
        match self {
            Self::Mismatch { path, .. } | Self::Missing { path } => path,
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch { path, xsd, sql } => {
                write!(f, "Расхождение для '{}': XSD={}, SQL={}", path, xsd, sql)
            }
            Self::Missing { path } => write!(f, "Отсутствует в sql-файле xsdPath '{}", path),
        }
    }
}

impl Serialize for Difference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of one comparison: `valid` holds exactly when there are no differences
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    differences: Vec<Difference>,
}

impl ValidationResult {
    /// Build a result; validity follows from the list being empty
    pub fn new(differences: Vec<Difference>) -> Self {
        Self {
            valid: differences.is_empty(),
            differences,
        }
    }

    /// Check if the mapping agrees with the schema
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Differences, mismatches first, then absences
    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    /// Differences rendered as messages
    pub fn messages(&self) -> Vec<String> {
        self.differences.iter().map(ToString::to_string).collect()
    }
}
