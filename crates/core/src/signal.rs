//! Signals: the unit of data flowing between blocks.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::result::Result;
use crate::value::Value;

/// An immutable, field-ordered mapping of names to values.
///
/// Backed by a persistent map, so cloning shares structure and deriving a
/// new signal with [`Signal::with`] leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signal {
    fields: OrdMap<String, Value>,
}

impl Signal {
    /// Create an empty signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a signal from `(name, value)` pairs.
    pub fn from_fields<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a signal from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `JsonParseFailed` if the text is not a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::json_parse_failed(e.to_string()))
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Return a new signal with `name` set to `value`.
    #[must_use]
    pub fn with(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            fields: self.fields.update(name.into(), value.into()),
        }
    }

    /// Return a new signal with every field of `other` set on top of this one.
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> Self {
        Self {
            fields: other
                .fields
                .iter()
                .fold(self.fields.clone(), |fields, (name, value)| {
                    fields.update(name.clone(), value.clone())
                }),
        }
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Render as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl From<Signal> for Value {
    fn from(signal: Signal) -> Self {
        Self::Map(signal.fields)
    }
}
