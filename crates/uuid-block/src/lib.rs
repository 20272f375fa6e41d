//! UUID block.
//!
//! Stamps a UUID onto every signal it processes:
//!
//! - **Versions 1 and 4**: time-based and random, no further options
//! - **Versions 3 and 5**: derived from a name in a standard or custom namespace
//! - **Output**: hyphenated text or 16 raw bytes, written to a configurable field
//!
//! Every option can be a literal or a `{{ $field }}` reference to the
//! incoming signal.
//!
//! # Example
//!
//! ```ignore
//! use block_core::{Block, Signal};
//! use uuid_block::{UuidBlock, UuidBlockConfig, UuidVersion};
//!
//! let config = UuidBlockConfig::default().with_uuid_version(UuidVersion::V4);
//! let mut block = UuidBlock::new(config);
//! block.start()?;
//! let out = block.process_signals(&[Signal::new()])?;
//! ```

pub mod block;
pub mod config;
pub mod generate;

pub use block::UuidBlock;
pub use config::{CustomNamespace, NameOptions, NamespaceSelector, UuidBlockConfig, UuidVersion};
pub use generate::UuidFormat;
