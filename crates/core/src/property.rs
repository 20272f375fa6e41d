//! Per-signal configuration properties.
//!
//! A [`Property`] is either a literal value fixed at configuration time or a
//! reference to a field of the signal being processed, written
//! `{{ $field }}` in configuration files. Richer expressions are the host's
//! business; anything that is not exactly one field reference is a literal.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::result::Result;
use crate::signal::Signal;
use crate::value::Value;

/// Conversion from a resolved [`Value`] into a typed configuration value.
pub trait FromValue: Sized {
    /// Convert `value`, naming `property` in any error.
    ///
    /// # Errors
    ///
    /// Returns an error when the value has the wrong type or is out of range.
    fn from_value(property: &str, value: &Value) -> Result<Self>;
}

/// Where a property's value comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertySource {
    Literal(Value),
    Field(String),
}

/// A typed configuration value resolved against each signal.
pub struct Property<T> {
    source: PropertySource,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Property<T> {
    /// A property with a fixed value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::from_source(PropertySource::Literal(value.into()))
    }

    /// A property read from the named field of each signal.
    pub fn field(name: impl Into<String>) -> Self {
        Self::from_source(PropertySource::Field(name.into()))
    }

    const fn from_source(source: PropertySource) -> Self {
        Self {
            source,
            _marker: PhantomData,
        }
    }

    /// Interpret a raw configuration value, recognising `{{ $field }}`.
    pub fn from_config_value(value: Value) -> Self {
        if let Some(field) = value.as_text().and_then(parse_field_reference) {
            return Self::field(field);
        }
        Self::literal(value)
    }

    pub const fn source(&self) -> &PropertySource {
        &self.source
    }
}

impl<T: FromValue> Property<T> {
    /// Resolve against `signal`. A missing field resolves as `Null`.
    ///
    /// # Errors
    ///
    /// Returns whatever [`FromValue::from_value`] returns for the resolved value.
    pub fn resolve(&self, property: &str, signal: &Signal) -> Result<T> {
        match &self.source {
            PropertySource::Literal(value) => T::from_value(property, value),
            PropertySource::Field(field) => signal.get(field).map_or_else(
                || T::from_value(property, &Value::Null),
                |value| T::from_value(property, value),
            ),
        }
    }

    /// Validate a literal ahead of time. Field references always pass.
    ///
    /// # Errors
    ///
    /// Returns the conversion error for an invalid literal.
    pub fn check(&self, property: &str) -> Result<()> {
        match &self.source {
            PropertySource::Literal(value) => T::from_value(property, value).map(|_| ()),
            PropertySource::Field(_) => Ok(()),
        }
    }
}

/// Extract `name` from `{{ $name }}`.
fn parse_field_reference(text: &str) -> Option<&str> {
    let inner = text
        .trim()
        .strip_prefix("{{")?
        .strip_suffix("}}")?
        .trim()
        .strip_prefix('$')?;
    let is_ident = !inner.is_empty()
        && inner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_ident.then_some(inner)
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::from_source(self.source.clone())
    }
}

impl<T> PartialEq for Property<T> {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            PropertySource::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            PropertySource::Field(field) => f.debug_tuple("Field").field(field).finish(),
        }
    }
}

impl<T: Into<Value>> From<T> for Property<T> {
    fn from(value: T) -> Self {
        Self::literal(value)
    }
}

impl<T: Default + Into<Value>> Default for Property<T> {
    fn default() -> Self {
        Self::literal(T::default())
    }
}

impl<T> Serialize for Property<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.source {
            PropertySource::Literal(value) => value.serialize(serializer),
            PropertySource::Field(field) => serializer.serialize_str(&format!("{{{{ ${field} }}}}")),
        }
    }
}

impl<'de, T> Deserialize<'de> for Property<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_config_value)
    }
}

impl FromValue for Value {
    fn from_value(_property: &str, value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(property: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Text(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
            Value::Text(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
            other => Err(Error::invalid_property(
                property,
                format!("expected a boolean, got {}", other.type_name()),
            )),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(property: &str, value: &Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(property, value).map(Some)
        }
    }
}

impl FromValue for String {
    fn from_value(property: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(f) => Ok(f.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Null => Err(Error::invalid_property(property, "a value is required")),
            other => Err(Error::invalid_property(
                property,
                format!("expected a string, got {}", other.type_name()),
            )),
        }
    }
}
