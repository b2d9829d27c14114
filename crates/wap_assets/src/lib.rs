//! Decoders for legacy WAP game assets
//!
//! Every decoder is a pure function over an immutable byte buffer:
//! - `rez` - REZ archive reader with case-insensitive path lookup
//! - `wwd` - WWD level maps: tile layers, object records, derived collision
//! - `pid` - PID palette-indexed sprite frames
//! - `rle` - The run-length codec used by compressed sprite frames
//!
//! Fatal problems are reported as [`ParseError`]; recoverable anomalies are
//! collected as [`wap_core::ParseWarning`]s on the decoded value and logged.

mod error;
pub mod pid;
mod reader;
pub mod rez;
pub mod rle;
pub mod wwd;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{LookupError, ParseError};
pub use pid::{decode_frame, DecodedSprite, PidHeader, SpriteDecoder};
pub use rez::{Archive, ArchiveEntry, DirectoryEntry, FileEntry};
pub use wwd::{parse_level, parse_level_with};
