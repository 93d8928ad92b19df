//! Input loading and decoding
//!
//! Uploaded schemas and SQL scripts come from systems that still write
//! windows-1251, so raw bytes are decoded by trying a fixed list of
//! candidate encodings in order. The first candidate that decodes the bytes
//! without a single replacement character wins.

use crate::error::{Error, Result};
use crate::limits::Limits;
use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

/// UTF-8 byte order mark
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Plain UTF-8 candidate
pub const UTF8: &str = "UTF-8";

/// UTF-8 candidate that requires and strips a byte order mark
pub const UTF8_BOM: &str = "UTF-8-BOM";

/// Candidate encodings, in the order they are tried
pub const CANDIDATE_ENCODINGS: [&str; 5] = [UTF8, UTF8_BOM, "windows-1251", "cp1251", "ISO-8859-1"];

/// Text produced by [`decode_text`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// Decoded content
    pub text: String,
    /// Candidate label that succeeded
    pub encoding: &'static str,
}

/// Decode raw bytes with the first candidate encoding that accepts them
pub fn decode_text(bytes: &[u8]) -> Option<DecodedText> {
    CANDIDATE_ENCODINGS.iter().find_map(|&label| {
        try_decode(label, bytes).map(|text| DecodedText {
            text: text.into_owned(),
            encoding: label,
        })
    })
}

fn try_decode<'a>(label: &str, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
    match label {
        UTF8_BOM => bytes
            .strip_prefix(BOM)
            .and_then(|rest| UTF_8.decode_without_bom_handling_and_without_replacement(rest)),
        // BOM-prefixed input belongs to the stripping candidate
        UTF8 if bytes.starts_with(BOM) => None,
        _ => Encoding::for_label(label.as_bytes())?
            .decode_without_bom_handling_and_without_replacement(bytes),
    }
}

/// Resource loader for schema and SQL inputs
#[derive(Debug, Default)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Decode bytes that arrived under `name` (a file name or upload field)
    pub fn decode(&self, name: &str, bytes: &[u8]) -> Result<String> {
        self.limits.check_input_size(bytes.len())?;

        let decoded = decode_text(bytes).ok_or_else(|| Error::Decode {
            name: name.to_string(),
        })?;
        debug!(input = name, encoding = decoded.encoding, "decoded input");
        Ok(decoded.text)
    }

    /// Read and decode a file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        self.decode(&path.display().to_string(), &bytes)
    }
}
