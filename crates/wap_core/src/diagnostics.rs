//! Recoverable decoder anomalies

use serde::{Deserialize, Serialize};
use std::fmt;

/// The binary formats understood by the decoders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetFormat {
    /// REZ archive container
    Archive,
    /// WWD level map
    Level,
    /// PID sprite frame
    Sprite,
}

impl AssetFormat {
    pub fn name(&self) -> &'static str {
        match self {
            AssetFormat::Archive => "REZ archive",
            AssetFormat::Level => "WWD level",
            AssetFormat::Sprite => "PID sprite",
        }
    }
}

impl fmt::Display for AssetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A non-fatal anomaly found while decoding. Decoding continued with
/// best-effort output; everything parsed before the anomaly stays valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseWarning {
    /// The version field differs from the one known value
    VersionMismatch {
        format: AssetFormat,
        expected: u32,
        found: u32,
    },
    /// The archive header's file count disagrees with the parsed tree
    FileCountMismatch { declared: u32, found: usize },
    /// A directory node lies (partly) outside the archive; its sibling chain
    /// was cut at that point
    NodeOutOfBounds { offset: u32 },
    /// A directory node offset was reached twice; the chain was cut
    CycleDetected { offset: u32 },
    /// Directories nest deeper than the reader follows; the subtree was cut
    NestingTooDeep { offset: u32, depth: usize },
    /// An entry name exceeded the maximum length and was shortened
    NameTruncated { offset: u32, len: usize },
    /// A second entry with the same case-insensitive name; the first is kept
    DuplicateEntry { path: String },
    /// Pixel data ended before the frame was complete; the rest is zero
    PixelDataExhausted { decoded: usize, expected: usize },
    /// More layers were declared than the format supports
    LayerCountClamped { declared: u32, max: u32 },
    /// The object table ended before the declared object count
    ObjectTableTruncated { declared: u32, parsed: usize },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::VersionMismatch {
                format,
                expected,
                found,
            } => write!(f, "{format}: version {found} differs from known version {expected}"),
            ParseWarning::FileCountMismatch { declared, found } => {
                write!(f, "REZ archive: header declares {declared} files, found {found}")
            }
            ParseWarning::NodeOutOfBounds { offset } => {
                write!(f, "REZ archive: node at offset {offset} lies outside the buffer")
            }
            ParseWarning::CycleDetected { offset } => {
                write!(f, "REZ archive: node at offset {offset} visited twice")
            }
            ParseWarning::NestingTooDeep { offset, depth } => {
                write!(f, "REZ archive: directory at offset {offset} nests deeper than {depth}")
            }
            ParseWarning::NameTruncated { offset, len } => {
                write!(f, "REZ archive: name of {len} bytes at offset {offset} truncated")
            }
            ParseWarning::DuplicateEntry { path } => {
                write!(f, "REZ archive: duplicate entry '{path}' ignored")
            }
            ParseWarning::PixelDataExhausted { decoded, expected } => {
                write!(f, "PID sprite: pixel data ended after {decoded} of {expected} pixels")
            }
            ParseWarning::LayerCountClamped { declared, max } => {
                write!(f, "WWD level: {declared} layers declared, only {max} read")
            }
            ParseWarning::ObjectTableTruncated { declared, parsed } => {
                write!(f, "WWD level: {declared} objects declared, {parsed} fit in the buffer")
            }
        }
    }
}
