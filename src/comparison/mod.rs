//! Path comparison
//!
//! Reconciles the schema path mapping with the SQL path mapping. The walk is
//! driven by the schema only: SQL paths the schema does not know about are
//! never reported.

pub mod path_map;
pub mod result;

pub use path_map::{Cardinality, PathMap};
pub use result::{Difference, ValidationResult};

/// Compare schema flags with SQL flags
///
/// Mismatches come first in schema order, followed by absences in schema order.
pub fn compare(schema: &PathMap<Cardinality>, sql: &PathMap<i64>) -> ValidationResult {
    let mut differences = Vec::new();
    let mut absences = Vec::new();

    for (path, &xsd) in schema.iter() {
        match sql.get(path) {
            None => absences.push(Difference::Missing {
                path: path.to_string(),
            }),
            Some(&value) if value != xsd.value() => differences.push(Difference::Mismatch {
                path: path.to_string(),
                xsd,
                sql: value,
            }),
            Some(_) => {}
        }
    }

    differences.append(&mut absences);
    ValidationResult::new(differences)
}
