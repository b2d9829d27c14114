//! Error types for asset decoding and archive lookups

use thiserror::Error;
use wap_core::{AssetFormat, PALETTE_SIZE};

/// Fatal decoding failure. No partially built asset is returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{format}: invalid signature, expected \"{expected}\", found \"{found}\"")]
    InvalidMagic {
        format: AssetFormat,
        expected: String,
        found: String,
    },
    #[error("{format}: truncated at offset {offset}, need {needed} bytes but {available} remain")]
    Truncated {
        format: AssetFormat,
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("{format}: {what} at offset {offset} ({len} bytes) runs past the end of the {buffer_len}-byte buffer")]
    OutOfBounds {
        format: AssetFormat,
        what: &'static str,
        offset: u64,
        len: u64,
        buffer_len: usize,
    },
    #[error("PID sprite: palette must be {} bytes, got {len}", PALETTE_SIZE)]
    InvalidPalette { len: usize },
}

impl ParseError {
    /// The format whose data failed to decode
    pub fn format(&self) -> AssetFormat {
        match self {
            ParseError::InvalidMagic { format, .. }
            | ParseError::Truncated { format, .. }
            | ParseError::OutOfBounds { format, .. } => *format,
            ParseError::InvalidPalette { .. } => AssetFormat::Sprite,
        }
    }

    pub(crate) fn invalid_magic(format: AssetFormat, expected: &[u8], found: &[u8]) -> Self {
        ParseError::InvalidMagic {
            format,
            expected: expected.escape_ascii().to_string(),
            found: found.escape_ascii().to_string(),
        }
    }
}

/// Failure to resolve a path inside an archive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("'{path}' not found in archive")]
    NotFound { path: String },
    #[error("'{path}' is not a directory")]
    NotADirectory { path: String },
    #[error("'{path}' is not a file")]
    NotAFile { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_magic_display() {
        let err = ParseError::invalid_magic(AssetFormat::Sprite, b"PID", b"BM\x00");
        assert_eq!(
            err.to_string(),
            "PID sprite: invalid signature, expected \"PID\", found \"BM\\x00\""
        );
        assert_eq!(err.format(), AssetFormat::Sprite);
    }

    #[test]
    fn test_out_of_bounds_display_names_offset() {
        let err = ParseError::OutOfBounds {
            format: AssetFormat::Level,
            what: "tile array",
            offset: 4096,
            len: 64,
            buffer_len: 2000,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("WWD level: tile array at offset 4096"));
        assert!(msg.contains("2000-byte buffer"));
    }
}
