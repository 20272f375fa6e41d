//! # uuid-stamp
//!
//! Command-line host for the UUID block: JSON signals in, JSON signals out.

pub mod cli;
pub mod stream;

pub use cli::Cli;
pub use stream::{read_signals, run, write_signals};
