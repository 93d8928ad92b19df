//! XML name utilities
//!
//! Schema inspection matches elements and types by local name only, so the
//! main job here is to strip whatever prefix a name happens to carry.

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}

/// Local part of a possibly prefixed name (everything after the first colon)
pub fn local_name(qname: &str) -> &str {
    split_qname(qname).1
}
