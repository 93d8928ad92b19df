//! SQL path extraction
//!
//! Mapping scripts list every message field as a quoted absolute path
//! followed, one comma later, by its cardinality:
//!
//! ```sql
//! insert into msg_map values ('/Document/BkToCstmrDbtCdtNtfctn/GrpHdr/MsgId', 'MSG_ID', 1);
//! ```
//!
//! Only that shape is recognized. Text without a single match yields an
//! empty mapping rather than an error.

use crate::comparison::PathMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Path up to the closing quote, then the first digit run after the next comma.
static SQL_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(/Document/[^']+)'[^,]*,[^0-9]*([0-9]+)").unwrap());

/// Extract every `(path, cardinality)` pair from SQL text
///
/// Later occurrences of a path overwrite earlier ones. The cardinality is
/// kept verbatim; values that do not fit an `i64` are skipped.
pub fn extract_sql_paths(sql: &str) -> PathMap<i64> {
    let mut paths = PathMap::new();

    for caps in SQL_PATH.captures_iter(sql) {
        let path = &caps[1];
        match caps[2].parse::<i64>() {
            Ok(value) => {
                debug!(path, value, "sql path");
                paths.insert(path, value);
            }
            Err(e) => warn!(path, digits = &caps[2], error = %e, "skipping unparsable cardinality"),
        }
    }

    paths
}
