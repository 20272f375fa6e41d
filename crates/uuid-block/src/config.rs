//! Configuration for the UUID block.
//!
//! Every field except `name` and `enrich` is a [`Property`], so it can be a
//! literal or a `{{ $field }}` reference resolved against each signal.
//!
//! # Example Config
//!
//! ```toml
//! uuid_version = 5
//! output = "id"
//! binary = false
//!
//! [uuid_name]
//! name_string = "{{ $host }}"
//! name_space = "Custom"
//! custom_name_space = "00112233445566778899aabbccddeeff"
//!
//! [enrich]
//! exclude_existing = false
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use block_core::{EnrichOptions, Error, FromValue, Property, Result, Value};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ═══════════════════════════════════════════════════════════════════════════
// UUID VERSION
// ═══════════════════════════════════════════════════════════════════════════

/// Supported UUID versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UuidVersion {
    /// Timestamp and node id.
    V1,
    /// MD5 of namespace and name.
    V3,
    /// Random.
    #[default]
    V4,
    /// SHA-1 of namespace and name.
    V5,
}

impl UuidVersion {
    pub const ALL: [Self; 4] = [Self::V1, Self::V3, Self::V4, Self::V5];

    pub const fn number(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V3 => 3,
            Self::V4 => 4,
            Self::V5 => 5,
        }
    }

    pub fn from_number(n: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|v| i64::from(v.number()) == n)
    }

    /// Versions 3 and 5 derive the UUID from a namespace and a name.
    pub const fn is_name_based(self) -> bool {
        matches!(self, Self::V3 | Self::V5)
    }

    /// The version tag as the `uuid` crate names it.
    pub const fn as_uuid_version(self) -> uuid::Version {
        match self {
            Self::V1 => uuid::Version::Mac,
            Self::V3 => uuid::Version::Md5,
            Self::V4 => uuid::Version::Random,
            Self::V5 => uuid::Version::Sha1,
        }
    }
}

impl fmt::Display for UuidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for UuidVersion {
    type Err = Error;

    /// Accepts `"4"`, `"v4"` and `"V4"`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        digits
            .parse::<i64>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| {
                Error::invalid_property("uuid_version", format!("'{s}' is not one of 1, 3, 4, 5"))
            })
    }
}

impl FromValue for UuidVersion {
    fn from_value(property: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Int(n) => Self::from_number(*n).ok_or_else(|| {
                Error::invalid_property(property, format!("{n} is not one of 1, 3, 4, 5"))
            }),
            Value::Text(s) => s.parse(),
            other => Err(Error::invalid_property(
                property,
                format!("expected a version number, got {}", other.type_name()),
            )),
        }
    }
}

impl From<UuidVersion> for Value {
    fn from(version: UuidVersion) -> Self {
        Self::Int(i64::from(version.number()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// NAMESPACES
// ═══════════════════════════════════════════════════════════════════════════

/// Which namespace a name-based UUID is derived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamespaceSelector {
    #[default]
    Dns,
    Url,
    Oid,
    X500,
    /// Use the configured custom namespace value.
    Custom,
}

impl NamespaceSelector {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dns => "DNS",
            Self::Url => "URL",
            Self::Oid => "OID",
            Self::X500 => "X500",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for NamespaceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamespaceSelector {
    type Err = Error;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dns" => Ok(Self::Dns),
            "url" => Ok(Self::Url),
            "oid" => Ok(Self::Oid),
            "x500" => Ok(Self::X500),
            "custom" => Ok(Self::Custom),
            _ => Err(Error::invalid_property(
                "name_space",
                format!("'{s}' is not one of DNS, URL, OID, X500, Custom"),
            )),
        }
    }
}

impl FromValue for NamespaceSelector {
    fn from_value(property: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Text(s) => s.parse(),
            other => Err(Error::invalid_property(
                property,
                format!("expected a namespace name, got {}", other.type_name()),
            )),
        }
    }
}

impl From<NamespaceSelector> for Value {
    fn from(selector: NamespaceSelector) -> Self {
        Self::Text(selector.as_str().to_string())
    }
}

/// A user-supplied namespace for name-based versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CustomNamespace {
    /// 32 hex digits; hyphens, braces and a `urn:uuid:` prefix are tolerated.
    Text(String),
    /// Exactly 16 raw bytes.
    Bytes(Vec<u8>),
    /// A ready-made UUID, used as is.
    Uuid(Uuid),
}

impl CustomNamespace {
    /// Empty bytes, or text that is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Bytes(b) => b.is_empty(),
            Self::Uuid(_) => false,
        }
    }
}

impl FromValue for CustomNamespace {
    fn from_value(_property: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(Self::Text(s.clone())),
            Value::Bytes(b) => Ok(Self::Bytes(b.clone())),
            Value::Uuid(u) => Ok(Self::Uuid(*u)),
            Value::Null => Err(Error::missing_custom_namespace("null")),
            other => Err(Error::invalid_custom_namespace_type(other.type_name())),
        }
    }
}

impl From<CustomNamespace> for Value {
    fn from(ns: CustomNamespace) -> Self {
        match ns {
            CustomNamespace::Text(s) => Self::Text(s),
            CustomNamespace::Bytes(b) => Self::Bytes(b),
            CustomNamespace::Uuid(u) => Self::Uuid(u),
        }
    }
}

/// Options for versions 3 and 5. Ignored by versions 1 and 4.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NameOptions {
    pub name_string: Property<Option<String>>,
    pub name_space: Property<NamespaceSelector>,
    pub custom_name_space: Property<Option<CustomNamespace>>,
}

// ═══════════════════════════════════════════════════════════════════════════
// BLOCK CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════

/// Full configuration of a UUID block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UuidBlockConfig {
    /// Block name used in logs.
    pub name: String,
    pub uuid_version: Property<UuidVersion>,
    /// Destination field for the UUID.
    pub output: Property<String>,
    /// Emit the 16 raw bytes instead of hyphenated text.
    pub binary: Property<bool>,
    pub uuid_name: NameOptions,
    pub enrich: EnrichOptions,
}

impl Default for UuidBlockConfig {
    fn default() -> Self {
        Self {
            name: "uuid".to_string(),
            uuid_version: Property::default(),
            output: Property::literal("uuid"),
            binary: Property::literal(false),
            uuid_name: NameOptions::default(),
            enrich: EnrichOptions::default(),
        }
    }
}

impl UuidBlockConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParseFailed` if the document is not valid TOML for this
    /// configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config_parse_failed(e.to_string()))
    }

    /// Load a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns `FileReadFailed` if the file cannot be read, or
    /// `ConfigParseFailed` if it cannot be parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::file_read_failed(path, e.to_string()))?;
        Self::from_toml_str(&text)
    }

    /// Reject literal values that can never resolve.
    ///
    /// # Errors
    ///
    /// Returns `InvalidProperty` naming the first bad literal.
    pub fn validate(&self) -> Result<()> {
        self.uuid_version.check("uuid_version")?;
        self.output.check("output")?;
        self.binary.check("binary")?;
        self.uuid_name.name_space.check("name_space")
    }

    #[must_use]
    pub fn with_uuid_version(mut self, version: impl Into<Property<UuidVersion>>) -> Self {
        self.uuid_version = version.into();
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: Property<String>) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<Property<bool>>) -> Self {
        self.binary = binary.into();
        self
    }

    #[must_use]
    pub fn with_name_string(mut self, name_string: Property<Option<String>>) -> Self {
        self.uuid_name.name_string = name_string;
        self
    }

    #[must_use]
    pub fn with_name_space(mut self, name_space: impl Into<Property<NamespaceSelector>>) -> Self {
        self.uuid_name.name_space = name_space.into();
        self
    }

    #[must_use]
    pub fn with_custom_name_space(
        mut self,
        custom_name_space: Property<Option<CustomNamespace>>,
    ) -> Self {
        self.uuid_name.custom_name_space = custom_name_space;
        self
    }

    #[must_use]
    pub fn with_enrich(mut self, enrich: EnrichOptions) -> Self {
        self.enrich = enrich;
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use block_core::{PropertySource, Signal};

    use super::*;

    #[test]
    fn test_version_parsing() {
        assert_eq!("4".parse::<UuidVersion>().unwrap(), UuidVersion::V4);
        assert_eq!("v5".parse::<UuidVersion>().unwrap(), UuidVersion::V5);
        assert_eq!(" V1 ".parse::<UuidVersion>().unwrap(), UuidVersion::V1);
        assert!("2".parse::<UuidVersion>().is_err());
        assert!("seven".parse::<UuidVersion>().is_err());
    }

    #[test]
    fn test_version_from_value() {
        assert_eq!(
            UuidVersion::from_value("uuid_version", &Value::Int(3)).unwrap(),
            UuidVersion::V3
        );
        let err = UuidVersion::from_value("uuid_version", &Value::Int(6)).unwrap_err();
        assert!(matches!(err, Error::InvalidProperty { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_version_tags() {
        assert!(UuidVersion::V3.is_name_based());
        assert!(UuidVersion::V5.is_name_based());
        assert!(!UuidVersion::V1.is_name_based());
        assert!(!UuidVersion::V4.is_name_based());
        assert_eq!(UuidVersion::V5.as_uuid_version(), uuid::Version::Sha1);
    }

    #[test]
    fn test_selector_is_case_insensitive() {
        assert_eq!(
            "custom".parse::<NamespaceSelector>().unwrap(),
            NamespaceSelector::Custom
        );
        assert_eq!("x500".parse::<NamespaceSelector>().unwrap(), NamespaceSelector::X500);
        assert_eq!("DNS".parse::<NamespaceSelector>().unwrap(), NamespaceSelector::Dns);
        assert!("ISO".parse::<NamespaceSelector>().is_err());
    }

    #[test]
    fn test_custom_namespace_type_dispatch() {
        let ns = Option::<CustomNamespace>::from_value("custom_name_space", &Value::Null).unwrap();
        assert_eq!(ns, None);

        let ns = Option::<CustomNamespace>::from_value("custom_name_space", &Value::from("abc"))
            .unwrap();
        assert_eq!(ns, Some(CustomNamespace::Text("abc".to_string())));

        let err = Option::<CustomNamespace>::from_value("custom_name_space", &Value::Int(7))
            .unwrap_err();
        assert_eq!(err, Error::invalid_custom_namespace_type("int"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_blank_custom_namespace() {
        assert!(CustomNamespace::Text("   ".to_string()).is_blank());
        assert!(CustomNamespace::Bytes(Vec::new()).is_blank());
        assert!(!CustomNamespace::Uuid(Uuid::nil()).is_blank());
        assert!(!CustomNamespace::Text("00".to_string()).is_blank());
    }

    #[test]
    fn test_defaults() {
        let config = UuidBlockConfig::default();
        let signal = Signal::new();

        assert_eq!(
            config.uuid_version.resolve("uuid_version", &signal).unwrap(),
            UuidVersion::V4
        );
        assert_eq!(config.output.resolve("output", &signal).unwrap(), "uuid");
        assert!(!config.binary.resolve("binary", &signal).unwrap());
        assert_eq!(
            config.uuid_name.name_space.resolve("name_space", &signal).unwrap(),
            NamespaceSelector::Dns
        );
        assert_eq!(
            config
                .uuid_name
                .name_string
                .resolve("name_string", &signal)
                .unwrap(),
            None
        );
        assert!(config.enrich.exclude_existing);
    }

    #[test]
    fn test_from_toml_with_field_references() {
        let config = UuidBlockConfig::from_toml_str(
            r#"
            uuid_version = "{{ $uuid_version }}"
            output = "id"

            [uuid_name]
            name_string = "niolabs.com"
            name_space = "{{ $namespace }}"

            [enrich]
            exclude_existing = false
            "#,
        )
        .unwrap();

        assert_eq!(
            config.uuid_version.source(),
            &PropertySource::Field("uuid_version".to_string())
        );
        assert_eq!(config.output, Property::literal("id"));
        assert_eq!(
            config.uuid_name.name_space.source(),
            &PropertySource::Field("namespace".to_string())
        );
        assert!(!config.enrich.exclude_existing);
        assert_eq!(config.binary, Property::literal(false));
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = UuidBlockConfig::from_toml_str("uuid_version = [").unwrap_err();
        assert!(matches!(err, Error::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_validate_catches_bad_literals() {
        assert!(UuidBlockConfig::default().validate().is_ok());

        let bad_version =
            UuidBlockConfig::default().with_uuid_version(Property::<UuidVersion>::literal(2));
        assert!(bad_version.validate().is_err());

        let bad_space = UuidBlockConfig::default()
            .with_name_space(Property::<NamespaceSelector>::literal("ISO"));
        assert!(bad_space.validate().is_err());

        let deferred = UuidBlockConfig::default()
            .with_uuid_version(Property::<UuidVersion>::field("uuid_version"))
            .with_binary(Property::<bool>::field("binary"));
        assert!(deferred.validate().is_ok());
    }
}
