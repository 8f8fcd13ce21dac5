//! Errors raised while loading binding options.

/// Failure to read, parse or validate a `strobe.toml` file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read options: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML text is malformed or has unexpected fields.
    #[error("failed to parse options: {0}")]
    ParseError(String),

    /// The options parsed but are inconsistent.
    #[error("validation error: {0}")]
    ValidationError(String),
}
