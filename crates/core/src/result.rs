//! Result type definition.

use crate::error::Error;

/// The standard Result type for block operations.
///
/// # Examples
///
/// ```ignore
/// fn operation(signal: &Signal) -> Result<String> {
///     let output = config.output.resolve("output", signal)?;
///     Ok(output)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;
