//! Block trait and lifecycle.

use std::fmt;

use crate::result::Result;
use crate::signal::Signal;

/// Lifecycle status of a block, driven by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockStatus {
    /// Configured but not yet started.
    #[default]
    Configured,
    /// Accepting signals.
    Started,
    /// Stopped by the host.
    Stopped,
}

impl fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Configured => "configured",
            Self::Started => "started",
            Self::Stopped => "stopped",
        };
        write!(f, "{s}")
    }
}

/// A signal-processing unit hosted in a pipeline.
///
/// Implementors provide [`Block::process_signal`]; the host calls
/// [`Block::process_signals`] with each batch.
pub trait Block {
    /// The block name (for logging).
    fn name(&self) -> &str;

    /// Current lifecycle status.
    fn status(&self) -> BlockStatus;

    /// Start accepting signals.
    ///
    /// # Errors
    ///
    /// Returns an error if the block's configuration is not usable.
    fn start(&mut self) -> Result<()>;

    /// Stop accepting signals.
    ///
    /// # Errors
    ///
    /// Returns an error if the block could not shut down cleanly.
    fn stop(&mut self) -> Result<()>;

    /// Process one signal, producing at most one derived signal.
    ///
    /// `Ok(None)` means nothing is emitted for this signal.
    ///
    /// # Errors
    ///
    /// Recoverable errors are dropped by [`Block::process_signals`]; any
    /// other error is fatal for the batch.
    fn process_signal(&self, signal: &Signal) -> Result<Option<Signal>>;

    /// Process a batch in order.
    ///
    /// A recoverable error is logged and only that signal is dropped; the
    /// rest of the batch still runs. The first fatal error aborts the batch.
    ///
    /// # Errors
    ///
    /// Returns the first non-recoverable error raised by a signal.
    fn process_signals(&self, signals: &[Signal]) -> Result<Vec<Signal>> {
        let mut emitted = Vec::with_capacity(signals.len());
        for signal in signals {
            match self.process_signal(signal) {
                Ok(Some(out)) => emitted.push(out),
                Ok(None) => {}
                Err(e) if e.is_recoverable() => {
                    tracing::error!(block = self.name(), "{}", e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(emitted)
    }
}
