//! Limits and constraints for schema and SQL processing
//!
//! Inputs are single uploaded documents, but nothing stops a schema from
//! nesting absurdly deep or referencing its own complex type. These limits
//! turn such inputs into errors instead of unbounded recursion.

use crate::error::{Error, Result};

/// Global limits configuration
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum size of a single input file in bytes
    pub max_input_size: usize,

    /// Maximum element nesting while parsing XML
    pub max_xml_depth: usize,

    /// Maximum recursion depth while expanding schema paths
    pub max_path_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_size: 64 * 1024 * 1024, // 64 MB
            max_xml_depth: 1000,
            max_path_depth: 100,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_input_size: 8 * 1024 * 1024, // 8 MB
            max_xml_depth: 100,
            max_path_depth: 32,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_input_size: 1024 * 1024 * 1024, // 1 GB
            max_xml_depth: 10000,
            max_path_depth: 1000,
        }
    }

    /// Check if an input size is within limits
    pub fn check_input_size(&self, size: usize) -> Result<()> {
        if size > self.max_input_size {
            Err(Error::LimitExceeded(format!(
                "input size {} bytes exceeds maximum {} bytes",
                size, self.max_input_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if XML depth is within limits
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_xml_depth {
            Err(Error::LimitExceeded(format!(
                "XML depth {} exceeds maximum {}",
                depth, self.max_xml_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if path expansion depth is within limits
    pub fn check_path_depth(&self, depth: usize, path: &str) -> Result<()> {
        if depth > self.max_path_depth {
            Err(Error::LimitExceeded(format!(
                "path depth {} exceeds maximum {} at '{}' (recursive complexType?)",
                depth, self.max_path_depth, path
            )))
        } else {
            Ok(())
        }
    }
}
