//! ListRecord trait for records that can be displayed in a List.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Debug;

/// Trait for records held by a List.
///
/// Records are opaque to the list except for named fields, which search
/// and sort read as text.
pub trait ListRecord: Send + Sync + Clone + Debug + 'static {
    /// Text of the named field, or `None` when the record has no such field.
    fn field(&self, prop: &str) -> Option<Cow<'_, str>>;
}

impl ListRecord for serde_json::Value {
    fn field(&self, prop: &str) -> Option<Cow<'_, str>> {
        match self.get(prop)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

impl ListRecord for HashMap<String, String> {
    fn field(&self, prop: &str) -> Option<Cow<'_, str>> {
        self.get(prop).map(|s| Cow::Borrowed(s.as_str()))
    }
}
