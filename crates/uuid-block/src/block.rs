//! The UUID block: stamps a fresh or name-derived UUID onto each signal.

use block_core::{Block, BlockStatus, Error, Result, Signal, enrich};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::UuidBlockConfig;
use crate::generate::{
    UuidFormat, custom_namespace_uuid, named_uuid, standard_namespace, unnamed_uuid,
};

/// Adds a UUID to every signal it processes.
///
/// Versions 1 and 4 ignore the name options. Versions 3 and 5 need a name
/// and a namespace, either one of the RFC 4122 constants or a custom value.
#[derive(Debug, Clone)]
pub struct UuidBlock {
    config: UuidBlockConfig,
    status: BlockStatus,
}

impl UuidBlock {
    pub const fn new(config: UuidBlockConfig) -> Self {
        Self {
            config,
            status: BlockStatus::Configured,
        }
    }

    /// Compute the UUID for one signal.
    ///
    /// # Errors
    ///
    /// Recoverable errors for a missing name, a missing custom namespace or
    /// a custom namespace of the wrong type; fatal errors for unresolvable
    /// properties and malformed namespace values.
    pub fn uuid_for(&self, signal: &Signal) -> Result<Uuid> {
        let version = self.config.uuid_version.resolve("uuid_version", signal)?;
        if !version.is_name_based() {
            let uuid = unnamed_uuid(version)?;
            debug!(block = %self.config.name, %version, "generated unnamed UUID");
            return Ok(uuid);
        }

        let options = &self.config.uuid_name;
        let name = options.name_string.resolve("name_string", signal)?;
        let selector = options.name_space.resolve("name_space", signal)?;
        let namespace = match standard_namespace(selector) {
            Some(namespace) => namespace,
            None => {
                let custom = options
                    .custom_name_space
                    .resolve("custom_name_space", signal)?
                    .ok_or_else(|| Error::missing_custom_namespace("null"))?;
                custom_namespace_uuid(&custom, version)?
            }
        };

        debug!(
            block = %self.config.name,
            %version,
            %selector,
            %namespace,
            "generating name-based UUID"
        );
        named_uuid(version, &namespace, name.as_deref())
    }
}

impl Block for UuidBlock {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn status(&self) -> BlockStatus {
        self.status
    }

    fn start(&mut self) -> Result<()> {
        self.config.validate()?;
        self.status = BlockStatus::Started;
        info!(block = %self.config.name, "block started");
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.status = BlockStatus::Stopped;
        info!(block = %self.config.name, "block stopped");
        Ok(())
    }

    fn process_signal(&self, signal: &Signal) -> Result<Option<Signal>> {
        if self.status != BlockStatus::Started {
            return Err(Error::block_not_started(&self.config.name));
        }

        let uuid = match self.uuid_for(signal) {
            Ok(uuid) => uuid,
            Err(e) if e.is_recoverable() => {
                error!(block = %self.config.name, "{}", e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let format = UuidFormat::from_binary(self.config.binary.resolve("binary", signal)?);
        let output = self.config.output.resolve("output", signal)?;
        let new_fields = Signal::new().with(output, format.render(uuid));
        Ok(Some(enrich::merge(signal, new_fields, &self.config.enrich)))
    }
}
