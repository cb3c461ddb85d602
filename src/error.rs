//! Error handling for the block codec
//!
//! Decode failures are local and recoverable: they are returned to the caller
//! as [`DecodeError`] and never abort the process. The application level
//! [`Error`] wraps them together with I/O, serialization and configuration
//! failures of the command line tool.

use std::fmt;
use thiserror::Error;

/// Result type alias for application level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Region of a block buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Header,
    Body,
    Trailer,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Header => write!(f, "header"),
            Region::Body => write!(f, "body"),
            Region::Trailer => write!(f, "trailer"),
        }
    }
}

/// Errors produced while decoding a block or one of its regions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Header length tag does not match the format constant
    #[error("Invalid header tag: expected {expected}, got {found}")]
    InvalidHeaderTag { found: u32, expected: u32 },

    /// Buffer shorter than a region requires
    #[error("Truncated {region}: need {needed} bytes, got {available}")]
    Truncated {
        region: Region,
        needed: usize,
        available: usize,
    },

    /// Body length is not a whole number of transaction entries
    #[error("Misaligned body: {length} bytes leaves {remainder} trailing bytes")]
    MisalignedBody { length: usize, remainder: usize },

    /// Fixed-width field built from a slice of the wrong size
    #[error("Invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidFieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Fixed-width field built from malformed hex text
    #[error("Invalid hex in {field}: {message}")]
    InvalidHex { field: &'static str, message: String },
}

impl DecodeError {
    /// Create a truncation error
    pub fn truncated(region: Region, needed: usize, available: usize) -> Self {
        Self::Truncated {
            region,
            needed,
            available,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            DecodeError::InvalidHeaderTag { .. } => "invalid_header_tag",
            DecodeError::Truncated { .. } => "truncated",
            DecodeError::MisalignedBody { .. } => "misaligned_body",
            DecodeError::InvalidFieldLength { .. } => "invalid_field_length",
            DecodeError::InvalidHex { .. } => "invalid_hex",
        }
    }
}

/// Main error type for the block tool
#[derive(Error, Debug)]
pub enum Error {
    /// Wire format errors
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Re-encoded bytes differ from the input
    #[error("Round trip mismatch at offset {offset}: expected {expected} bytes, got {actual}")]
    RoundTrip {
        offset: usize,
        expected: usize,
        actual: usize,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a round trip mismatch error
    pub fn round_trip(offset: usize, expected: usize, actual: usize) -> Self {
        Self::RoundTrip {
            offset,
            expected,
            actual,
        }
    }

    /// Check if the error comes from malformed block bytes
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Decode(e) => e.category(),
            Error::Json(_) => "json",
            Error::Yaml(_) => "yaml",
            Error::Io(_) => "io",
            Error::Config { .. } => "config",
            Error::RoundTrip { .. } => "round_trip",
        }
    }
}
