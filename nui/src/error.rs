//! Error types.

use std::any::Any;

use thiserror::Error;

/// Errors raised while loading or validating list options.
///
/// These only surface from host-facing configuration calls. A list built
/// from invalid options logs the problem and falls back to safe values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid list options: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("sort_default {index} is out of range ({len} sort columns)")]
    SortDefaultOutOfRange { index: usize, len: usize },

    /// A search or sort entry has no field name.
    #[error("{kind} entry {index} has an empty prop")]
    EmptyProp { kind: &'static str, index: usize },

    #[error("footer button {index} on the {side} side has an empty id")]
    EmptyButtonId { side: &'static str, index: usize },
}

/// Extract a human-readable message from a panic payload.
///
/// Panics can contain either `&str` or `String` payloads. This function
/// attempts to extract either, falling back to a generic message.
pub fn extract_panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
