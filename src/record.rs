//! Searchable records.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// An immutable bag of named text fields.
///
/// The engine never mutates records and identifies them positionally: a
/// [`MatchResult`](crate::types::MatchResult) refers back to the index of the
/// record in the dataset it was ranked against. A field a config names but a
/// record lacks reads as empty text and simply cannot match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: AHashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Text of a field, or `None` when the record does not carry it.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Builds a record from a JSON object, stringifying scalar values.
    ///
    /// Null, array, and nested-object values are skipped rather than
    /// flattened. Returns `None` when `value` is not an object.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let fields = object
            .iter()
            .filter_map(|(name, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((name.clone(), text))
            })
            .collect();
        Some(Self { fields })
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
