//! Utility functions and helpers
//!
//! Hex text handling and formatting helpers used by the command line tool.

use crate::error::DecodeError;

/// Format bytes as a human-readable string
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Validate hex string format
pub fn validate_hex_string(s: &str, expected_len: Option<usize>) -> Result<(), DecodeError> {
    if let Some(len) = expected_len {
        if s.len() != len {
            return Err(DecodeError::InvalidHex {
                field: "input",
                message: format!("Expected length {}, got {}", len, s.len()),
            });
        }
    }

    if s.len() % 2 != 0 {
        return Err(DecodeError::InvalidHex {
            field: "input",
            message: "Odd number of hex digits".to_string(),
        });
    }

    if !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidHex {
            field: "input",
            message: "String contains non-hexadecimal characters".to_string(),
        });
    }

    Ok(())
}

/// Convert hex text to bytes, ignoring whitespace and line breaks
pub fn hex_to_bytes(text: &str) -> Result<Vec<u8>, DecodeError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    validate_hex_string(&compact, None)?;
    hex::decode(&compact).map_err(|e| DecodeError::InvalidHex {
        field: "input",
        message: e.to_string(),
    })
}

/// Convert bytes to hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Offset of the first byte where `a` and `b` differ, including a length difference
pub fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b.iter())
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}
