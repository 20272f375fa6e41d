//! UUID generation and formatting.
//!
//! Thin dispatch over the `uuid` crate: pick the routine for the version,
//! resolve the namespace for name-based versions, and render the result.

use block_core::{Error, Result, Value};
use uuid::{Builder, Uuid, Variant};

use crate::config::{CustomNamespace, NamespaceSelector, UuidVersion};

/// The RFC 4122 namespace for a standard selector. `Custom` has none.
pub const fn standard_namespace(selector: NamespaceSelector) -> Option<Uuid> {
    match selector {
        NamespaceSelector::Dns => Some(Uuid::NAMESPACE_DNS),
        NamespaceSelector::Url => Some(Uuid::NAMESPACE_URL),
        NamespaceSelector::Oid => Some(Uuid::NAMESPACE_OID),
        NamespaceSelector::X500 => Some(Uuid::NAMESPACE_X500),
        NamespaceSelector::Custom => None,
    }
}

/// Build the namespace UUID from a custom value.
///
/// Text and bytes are re-tagged with the RFC 4122 variant and `version`;
/// a `Uuid` is returned untouched.
///
/// # Errors
///
/// - `MissingCustomNamespace` for blank text or empty bytes
/// - `MalformedNamespace` for text that is not 32 hex digits, or bytes that
///   are not exactly 16 long
pub fn custom_namespace_uuid(custom: &CustomNamespace, version: UuidVersion) -> Result<Uuid> {
    match custom {
        CustomNamespace::Text(text) if custom.is_blank() => {
            Err(Error::missing_custom_namespace(format!("blank text {text:?}")))
        }
        CustomNamespace::Bytes(_) if custom.is_blank() => {
            Err(Error::missing_custom_namespace("empty bytes"))
        }
        CustomNamespace::Uuid(uuid) => Ok(*uuid),
        CustomNamespace::Text(text) => parse_hex(text).map(|bytes| tag(bytes, version)),
        CustomNamespace::Bytes(bytes) => <[u8; 16]>::try_from(bytes.as_slice())
            .map(|bytes| tag(bytes, version))
            .map_err(|_| {
                Error::malformed_namespace(format!("expected 16 bytes, got {}", bytes.len()))
            }),
    }
}

/// Parse 32 hex digits, ignoring hyphens, surrounding braces and a
/// `urn:uuid:` prefix. Surrounding whitespace is malformed.
fn parse_hex(text: &str) -> Result<[u8; 16]> {
    let unprefixed = text.strip_prefix("urn:").unwrap_or(text);
    let unprefixed = unprefixed.strip_prefix("uuid:").unwrap_or(unprefixed);
    let hex: String = unprefixed
        .trim_matches(|c: char| c == '{' || c == '}')
        .chars()
        .filter(|c| *c != '-')
        .collect();

    if hex.len() != 32 {
        return Err(Error::malformed_namespace(format!(
            "'{text}' is not a 32 digit hexadecimal UUID string"
        )));
    }
    Uuid::parse_str(&hex)
        .map(Uuid::into_bytes)
        .map_err(|e| Error::malformed_namespace(format!("'{text}': {e}")))
}

fn tag(bytes: [u8; 16], version: UuidVersion) -> Uuid {
    Builder::from_bytes(bytes)
        .with_variant(Variant::RFC4122)
        .with_version(version.as_uuid_version())
        .into_uuid()
}

/// Generate a version 1 or 4 UUID.
///
/// # Errors
///
/// Returns `InvalidProperty` when `version` is name-based.
pub fn unnamed_uuid(version: UuidVersion) -> Result<Uuid> {
    match version {
        UuidVersion::V1 => Ok(Uuid::now_v1(&random_node_id())),
        UuidVersion::V4 => Ok(Uuid::new_v4()),
        UuidVersion::V3 | UuidVersion::V5 => Err(Error::invalid_property(
            "uuid_version",
            format!("version {version} needs a name and a namespace"),
        )),
    }
}

/// Generate a version 3 or 5 UUID from `namespace` and `name`.
///
/// # Errors
///
/// - `MissingName` when `name` is `None`
/// - `InvalidProperty` when `version` is not name-based
pub fn named_uuid(version: UuidVersion, namespace: &Uuid, name: Option<&str>) -> Result<Uuid> {
    let name = name.ok_or_else(|| Error::missing_name(version.number()))?;
    match version {
        UuidVersion::V3 => Ok(Uuid::new_v3(namespace, name.as_bytes())),
        UuidVersion::V5 => Ok(Uuid::new_v5(namespace, name.as_bytes())),
        UuidVersion::V1 | UuidVersion::V4 => Err(Error::invalid_property(
            "uuid_version",
            format!("version {version} is not name-based"),
        )),
    }
}

/// Random 48-bit node id with the multicast bit set, so it can never collide
/// with a real MAC address.
fn random_node_id() -> [u8; 6] {
    let [b0, b1, b2, b3, b4, b5, ..] = Uuid::new_v4().into_bytes();
    [b0 | 0x01, b1, b2, b3, b4, b5]
}

/// How a UUID is written into the output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UuidFormat {
    /// Hyphenated lowercase hex, 36 characters.
    #[default]
    Text,
    /// The 16 raw bytes.
    Binary,
}

impl UuidFormat {
    pub const fn from_binary(binary: bool) -> Self {
        if binary {
            Self::Binary
        } else {
            Self::Text
        }
    }

    pub fn render(self, uuid: Uuid) -> Value {
        match self {
            Self::Text => Value::Text(uuid.hyphenated().to_string()),
            Self::Binary => Value::Bytes(uuid.as_bytes().to_vec()),
        }
    }
}
