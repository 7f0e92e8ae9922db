//! Error types for the style engine.
//!
//! Failures are split by who is at fault:
//! - `ParseError` covers bad user input (a value that does not parse, a
//!   malformed declaration). These are always recoverable; the property
//!   simply keeps its previous value.
//! - `StyleError` covers schema or caller bugs, such as asking about a
//!   property that does not exist. These fail loudly.
//!
//! Style resolution runs every frame, so nothing in this crate treats user
//! input as fatal.

use thiserror::Error;

/// Result type alias for style engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug, Clone)]
pub enum Error {
  /// Declaration or value parsing error
  #[error("Parse error: {0}")]
  Parse(#[from] ParseError),

  /// Schema or caller bug
  #[error("Style error: {0}")]
  Style(#[from] StyleError),
}

/// Errors produced while parsing declarations or property values.
#[derive(Error, Debug, Clone)]
pub enum ParseError {
  /// A property value that could not be converted to its typed form
  #[error("Invalid value for property '{property}': {value}")]
  InvalidPropertyValue { property: String, value: String },

  /// A `property: value;` pair that could not be read at all
  #[error("Invalid declaration at line {line}: {message}")]
  InvalidDeclaration { message: String, line: u32 },
}

/// Errors indicating misuse of the schema rather than bad input.
#[derive(Error, Debug, Clone)]
pub enum StyleError {
  /// Lookup of a property name the schema does not define
  #[error("Unknown property: '{name}'")]
  UnknownProperty { name: String },
}
