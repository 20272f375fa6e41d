//! Core types for signal-processing blocks.
//!
//! This crate provides the pieces every block shares:
//!
//! - **Signals**: immutable, field-ordered maps of [`Value`]s
//! - **Properties**: configuration values resolved per signal
//! - **Enrichment**: merging a block's new fields into the incoming signal
//! - **Block trait**: lifecycle plus per-signal and per-batch processing
//! - **Errors**: recoverable (log and drop) versus fatal
//!
//! # Example
//!
//! ```ignore
//! use block_core::{Block, Signal};
//!
//! let mut block = make_block();
//! block.start()?;
//! let out = block.process_signals(&[Signal::from_fields([("pi", 3.5)])])?;
//! block.stop()?;
//! ```

pub mod block;
pub mod enrich;
pub mod error;
pub mod property;
pub mod result;
pub mod signal;
pub mod value;

pub use block::{Block, BlockStatus};
pub use enrich::{EnrichOptions, merge};
pub use error::Error;
pub use property::{FromValue, Property, PropertySource};
pub use result::Result;
pub use signal::Signal;
pub use value::Value;
