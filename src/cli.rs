//! CLI definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use block_core::{EnrichOptions, Property, Result, Value};
use clap::Parser;
use uuid_block::{NamespaceSelector, UuidBlockConfig, UuidVersion};

/// Stamp UUIDs onto a stream of JSON signals
///
/// Reads one JSON object per line and writes one JSON object per emitted
/// signal. Option values may be literals or `{{ $field }}` references.
#[derive(Parser, Debug, Default)]
#[command(name = "uuid-stamp")]
#[command(about = "Stamp UUIDs onto a stream of JSON signals")]
pub struct Cli {
    /// TOML block configuration; flags below override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// UUID version: 1, 3, 4 or 5
    #[arg(long = "version", value_name = "N")]
    pub uuid_version: Option<String>,

    /// Field the UUID is written to
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Emit the 16 raw bytes instead of hyphenated text
    #[arg(short, long, default_value_t = false)]
    pub binary: bool,

    /// Name for versions 3 and 5
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Namespace for versions 3 and 5: DNS, URL, OID, X500 or Custom
    #[arg(long, value_name = "SEL")]
    pub namespace: Option<String>,

    /// Custom namespace as 32 hex digits, used with `--namespace Custom`
    #[arg(long, value_name = "TEXT")]
    pub custom_namespace: Option<String>,

    /// Keep the incoming fields alongside the UUID
    #[arg(short, long, default_value_t = false)]
    pub enrich: bool,

    /// With --enrich, nest the UUID under this field
    #[arg(long, value_name = "NAME", requires = "enrich")]
    pub enrich_field: Option<String>,

    /// Read signals from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

impl Cli {
    /// Build the block configuration: the file (or defaults) with flags on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed.
    pub fn block_config(&self) -> Result<UuidBlockConfig> {
        let mut config = match &self.config {
            Some(path) => UuidBlockConfig::from_file(path)?,
            None => UuidBlockConfig::default(),
        };

        if let Some(version) = &self.uuid_version {
            config = config.with_uuid_version(property::<UuidVersion>(version));
        }
        if let Some(output) = &self.output {
            config = config.with_output(property(output));
        }
        if self.binary {
            config = config.with_binary(true);
        }
        if let Some(name) = &self.name {
            config = config.with_name_string(property(name));
        }
        if let Some(namespace) = &self.namespace {
            config = config.with_name_space(property::<NamespaceSelector>(namespace));
        }
        if let Some(custom) = &self.custom_namespace {
            config = config.with_custom_name_space(property(custom));
        }
        if self.enrich {
            let enrich = self
                .enrich_field
                .as_ref()
                .map_or_else(EnrichOptions::merge, EnrichOptions::nested);
            config = config.with_enrich(enrich);
        }

        Ok(config)
    }
}

fn property<T>(raw: &str) -> Property<T> {
    Property::from_config_value(Value::from(raw))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use block_core::PropertySource;

    use super::*;

    #[test]
    fn test_no_flags_gives_defaults() {
        let cli = Cli::try_parse_from(["uuid-stamp"]).unwrap();
        assert_eq!(cli.block_config().unwrap(), UuidBlockConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "uuid-stamp",
            "--version",
            "5",
            "--name",
            "niolabs.com",
            "--namespace",
            "url",
            "--output",
            "id",
            "--binary",
            "--enrich",
        ])
        .unwrap();
        let config = cli.block_config().unwrap();
        let signal = block_core::Signal::new();

        assert_eq!(
            config.uuid_version.resolve("uuid_version", &signal).unwrap(),
            UuidVersion::V5
        );
        assert_eq!(
            config.uuid_name.name_space.resolve("name_space", &signal).unwrap(),
            NamespaceSelector::Url
        );
        assert_eq!(config.output.resolve("output", &signal).unwrap(), "id");
        assert!(config.binary.resolve("binary", &signal).unwrap());
        assert_eq!(config.enrich, EnrichOptions::merge());
    }

    #[test]
    fn test_flag_accepts_field_reference() {
        let cli = Cli::try_parse_from(["uuid-stamp", "--output", "{{ $target }}"]).unwrap();
        let config = cli.block_config().unwrap();
        assert_eq!(
            config.output.source(),
            &PropertySource::Field("target".to_string())
        );
    }

    #[test]
    fn test_enrich_field_requires_enrich() {
        assert!(Cli::try_parse_from(["uuid-stamp", "--enrich-field", "meta"]).is_err());

        let cli =
            Cli::try_parse_from(["uuid-stamp", "--enrich", "--enrich-field", "meta"]).unwrap();
        assert_eq!(cli.block_config().unwrap().enrich, EnrichOptions::nested("meta"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["uuid-stamp", "--config", "/nonexistent/uuid.toml"])
            .unwrap();
        assert!(cli.block_config().is_err());
    }
}
