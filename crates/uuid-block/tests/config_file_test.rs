//! Tests for loading the UUID block configuration from TOML files.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::io::Write;

use block_core::{Block, Error, PropertySource, Signal, Value};
use uuid_block::{UuidBlock, UuidBlockConfig};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn write_config(contents: &str) -> Result<tempfile::NamedTempFile, std::io::Error> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_file_config_drives_block() -> TestResult {
    // Given: A version 5 configuration with a custom namespace
    let file = write_config(
        r#"
        name = "stamp"
        uuid_version = 5
        output = "id"

        [uuid_name]
        name_string = "{{ $host }}"
        name_space = "custom"
        custom_name_space = "00112233445566778899aabbccddeeff"

        [enrich]
        exclude_existing = false
        "#,
    )?;

    // When: The file is loaded and a signal is processed
    let config = UuidBlockConfig::from_file(file.path())?;
    let mut block = UuidBlock::new(config);
    block.start()?;
    let out = block.process_signals(&[Signal::from_fields([("host", "niolabs.com")])])?;
    block.stop()?;

    // Then: The UUID is derived from the signal's host in the custom namespace
    assert_eq!(block.name(), "stamp");
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].get("host"), Some(&Value::from("niolabs.com")));
    assert_eq!(
        out[0].get("id"),
        Some(&Value::from("4ad3039b-8bd0-5dc1-8637-f69af1b0e155"))
    );
    Ok(())
}

#[test]
fn test_empty_file_uses_defaults() -> TestResult {
    let file = write_config("")?;

    let config = UuidBlockConfig::from_file(file.path())?;

    assert_eq!(config, UuidBlockConfig::default());
    Ok(())
}

#[test]
fn test_version_reference_survives_file_load() -> TestResult {
    let file = write_config(r#"uuid_version = "{{ $uuid_version }}""#)?;

    let config = UuidBlockConfig::from_file(file.path())?;

    assert_eq!(
        config.uuid_version.source(),
        &PropertySource::Field("uuid_version".to_string())
    );
    Ok(())
}

#[test]
fn test_missing_file_is_reported() {
    let result = UuidBlockConfig::from_file("/nonexistent/uuid-block.toml");

    assert!(matches!(result, Err(Error::FileReadFailed { .. })));
}

#[test]
fn test_bad_literal_in_file_fails_start() -> TestResult {
    // Given: A file that parses but names an unsupported version
    let file = write_config("uuid_version = 2")?;
    let config = UuidBlockConfig::from_file(file.path())?;

    // When
    let mut block = UuidBlock::new(config);
    let result = block.start();

    // Then
    assert!(matches!(result, Err(Error::InvalidProperty { .. })));
    Ok(())
}
