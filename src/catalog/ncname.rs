//! Workspace-qualified resource names that stay valid XML NCNames.
//!
//! A feature type `Lines` in workspace `cgf` is exposed globally as
//! `cgf__Lines`, since `:` is not allowed in an NCName (and thus in HTML ids
//! and XML element names derived from it).

pub const DELIMITER: &str = "__";

pub fn encode(prefix: &str, local_name: &str) -> String {
    format!("{}{}{}", prefix, DELIMITER, local_name)
}

/// Split an encoded name into its optional prefix and local part.
///
/// Splits on the first delimiter; a name without one (or with an empty
/// prefix) is returned as an unqualified local name.
pub fn decode(name: &str) -> (Option<&str>, &str) {
    match name.split_once(DELIMITER) {
        Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => (Some(prefix), local),
        _ => (None, name),
    }
}
