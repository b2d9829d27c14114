//! REZ archive reader
//!
//! A REZ archive is a single buffer holding a directory tree of named byte
//! ranges. The 20-byte header points at the root directory's first node;
//! every node is a fixed 20-byte record followed by its name strings, and
//! siblings are linked through a next-node offset.
//!
//! Header:
//!
//! | Offset | Size | Field                              |
//! |--------|------|------------------------------------|
//! | 0      | 3    | signature `"REZ"` (any letter case)|
//! | 3      | 1    | pad                                |
//! | 4      | 4    | version                            |
//! | 8      | 4    | root directory offset              |
//! | 12     | 4    | file count                         |
//! | 16     | 4    | reserved                           |
//!
//! Node:
//!
//! | Offset | Size | Field                                       |
//! |--------|------|---------------------------------------------|
//! | 0      | 4    | next sibling offset (0 ends the chain)      |
//! | 4      | 4    | data offset (directories: first child node) |
//! | 8      | 4    | data size                                   |
//! | 12     | 4    | timestamp                                   |
//! | 16     | 1    | 0 = file, 1 = directory                     |
//! | 17     | 1    | name length                                 |
//! | 18     | 1    | extension length                            |
//! | 19     | 1    | pad                                         |
//! | 20     | n+1  | name, NUL terminated                        |
//! | ...    | e+1  | extension, NUL terminated (files only)      |

use crate::reader::{latin1_until_nul, ByteReader};
use crate::{LookupError, ParseError};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};
use wap_core::{AssetFormat, ParseWarning};

/// Archive signature, compared case-insensitively
pub const REZ_SIGNATURE: &[u8; 3] = b"REZ";

/// The only archive version known to this reader
pub const REZ_VERSION: u32 = 1;

/// Size of the archive header in bytes
pub const HEADER_SIZE: usize = 20;

/// Size of a node record, excluding its strings
pub const NODE_SIZE: usize = 20;

/// Longest entry name kept, in bytes
pub const MAX_NAME_LEN: usize = 32;

/// Deepest directory nesting followed
pub const MAX_DEPTH: usize = 64;

const DIRECTORY_FLAG: u8 = 1;

/// A file inside the archive: a byte range of the archive buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Name including extension (e.g. `RAIN.WAV`)
    pub name: String,
    /// Full virtual path (e.g. `/SOUNDS/RAIN.WAV`)
    pub path: String,
    pub offset: u32,
    pub size: u32,
    pub timestamp: u32,
}

impl FileEntry {
    /// Extension without the dot, if any
    pub fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

/// A directory inside the archive
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    pub timestamp: u32,
    children: Vec<ArchiveEntry>,
    /// Lower-cased child name to index into `children`
    index: HashMap<String, usize>,
}

impl DirectoryEntry {
    fn new(name: String, path: String, timestamp: u32) -> Self {
        Self {
            name,
            path,
            timestamp,
            children: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a child unless one with the same case-insensitive name exists
    fn insert(&mut self, entry: ArchiveEntry) -> bool {
        let key = entry.name().to_ascii_lowercase();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.children.len());
        self.children.push(entry);
        true
    }

    /// Children in traversal order
    pub fn children(&self) -> &[ArchiveEntry] {
        &self.children
    }

    /// Find a direct child by case-insensitive name
    pub fn child(&self, name: &str) -> Option<&ArchiveEntry> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&idx| &self.children[idx])
    }

    /// All files below this directory, depth-first in traversal order
    pub fn files(&self) -> Vec<&FileEntry> {
        let mut out = Vec::new();
        self.collect_files(&mut out);
        out
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a FileEntry>) {
        for child in &self.children {
            match child {
                ArchiveEntry::File(file) => out.push(file),
                ArchiveEntry::Directory(dir) => dir.collect_files(out),
            }
        }
    }

    fn file_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                ArchiveEntry::File(_) => 1,
                ArchiveEntry::Directory(dir) => dir.file_count(),
            })
            .sum()
    }
}

/// A node of the archive tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEntry {
    File(FileEntry),
    Directory(DirectoryEntry),
}

impl ArchiveEntry {
    pub fn name(&self) -> &str {
        match self {
            ArchiveEntry::File(file) => &file.name,
            ArchiveEntry::Directory(dir) => &dir.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ArchiveEntry::File(file) => &file.path,
            ArchiveEntry::Directory(dir) => &dir.path,
        }
    }

    pub fn timestamp(&self) -> u32 {
        match self {
            ArchiveEntry::File(file) => file.timestamp,
            ArchiveEntry::Directory(dir) => dir.timestamp,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, ArchiveEntry::Directory(_))
    }

    pub fn as_file(&self) -> Option<&FileEntry> {
        match self {
            ArchiveEntry::File(file) => Some(file),
            ArchiveEntry::Directory(_) => None,
        }
    }

    pub fn as_dir(&self) -> Option<&DirectoryEntry> {
        match self {
            ArchiveEntry::File(_) => None,
            ArchiveEntry::Directory(dir) => Some(dir),
        }
    }
}

/// A parsed archive. Owns its buffer; file reads are views into it.
#[derive(Debug, Clone)]
pub struct Archive {
    data: Vec<u8>,
    version: u32,
    root: DirectoryEntry,
    file_count: usize,
    warnings: Vec<ParseWarning>,
}

impl Archive {
    /// Parse an archive from its complete byte buffer
    pub fn load(bytes: impl Into<Vec<u8>>) -> Result<Self, ParseError> {
        let data = bytes.into();
        let (version, root, warnings) = parse_tree(&data)?;
        let file_count = root.file_count();
        debug!(
            "Loaded REZ archive: version {}, {} files, {} warnings",
            version,
            file_count,
            warnings.len()
        );
        Ok(Self {
            data,
            version,
            root,
            file_count,
            warnings,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn root(&self) -> &DirectoryEntry {
        &self.root
    }

    /// Number of files in the whole tree
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Resolve a path to an entry. `/` (or an empty path) is the root.
    pub fn entry(&self, path: &str) -> Option<&ArchiveEntry> {
        let mut segments = path_segments(path).peekable();
        let mut dir = &self.root;
        while let Some(segment) = segments.next() {
            let child = dir.child(segment)?;
            if segments.peek().is_none() {
                return Some(child);
            }
            dir = child.as_dir()?;
        }
        None
    }

    fn directory(&self, path: &str) -> Result<&DirectoryEntry, LookupError> {
        if path_segments(path).next().is_none() {
            return Ok(&self.root);
        }
        match self.entry(path) {
            Some(ArchiveEntry::Directory(dir)) => Ok(dir),
            Some(ArchiveEntry::File(_)) => Err(LookupError::NotADirectory {
                path: path.to_string(),
            }),
            None => Err(LookupError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    /// Contents of a file, borrowed from the archive buffer
    pub fn read_file(&self, path: &str) -> Result<&[u8], LookupError> {
        match self.entry(path) {
            Some(ArchiveEntry::File(file)) => Ok(self.file_data(file)),
            Some(ArchiveEntry::Directory(_)) => Err(LookupError::NotAFile {
                path: path.to_string(),
            }),
            None => Err(LookupError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    /// Contents of a file entry obtained from this archive
    pub fn file_data(&self, file: &FileEntry) -> &[u8] {
        let start = file.offset as usize;
        let end = start + file.size as usize;
        // Ranges are validated against the buffer while parsing
        self.data.get(start..end).unwrap_or_default()
    }

    /// Every file below a directory, depth-first in traversal order
    pub fn list_dir(&self, path: &str) -> Result<Vec<&FileEntry>, LookupError> {
        Ok(self.directory(path)?.files())
    }

    /// Check whether a file or directory exists
    pub fn exists(&self, path: &str) -> bool {
        path_segments(path).next().is_none() || self.entry(path).is_some()
    }
}

/// Split a virtual path on `/` and `\`, dropping empty segments
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\']).filter(|segment| !segment.is_empty())
}

fn join_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

// ─── Tree parsing ─────────────────────────────────────────────────────────────

struct RawNode {
    next: u32,
    data_offset: u32,
    size: u32,
    timestamp: u32,
    is_dir: bool,
    name: String,
}

struct TreeBuilder<'a> {
    reader: ByteReader<'a>,
    visited: HashSet<u32>,
    warnings: Vec<ParseWarning>,
}

impl TreeBuilder<'_> {
    fn warn(&mut self, warning: ParseWarning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Read one node record. `None` if any part of it lies past the buffer.
    fn read_node(&mut self, offset: u32) -> Option<RawNode> {
        let base = offset as usize;
        self.reader.get(base, NODE_SIZE)?;
        let is_dir = self.reader.u8(base + 16).ok()? == DIRECTORY_FLAG;
        let name_len = self.reader.u8(base + 17).ok()? as usize;
        let ext_len = self.reader.u8(base + 18).ok()? as usize;

        let name_start = base + NODE_SIZE;
        let raw_name = self.reader.get(name_start, name_len)?;
        let raw_name = &raw_name[..raw_name.iter().position(|&b| b == 0).unwrap_or(name_len)];
        let mut name = if raw_name.len() > MAX_NAME_LEN {
            self.warn(ParseWarning::NameTruncated {
                offset,
                len: raw_name.len(),
            });
            latin1_until_nul(&raw_name[..MAX_NAME_LEN])
        } else {
            latin1_until_nul(raw_name)
        };
        if !is_dir && ext_len > 0 {
            // The name's NUL terminator sits between name and extension
            let ext = latin1_until_nul(self.reader.get(name_start + name_len + 1, ext_len)?);
            if !ext.is_empty() {
                name = format!("{name}.{ext}");
            }
        }

        Some(RawNode {
            next: self.reader.u32(base).ok()?,
            data_offset: self.reader.u32(base + 4).ok()?,
            size: self.reader.u32(base + 8).ok()?,
            timestamp: self.reader.u32(base + 12).ok()?,
            is_dir,
            name,
        })
    }

    fn read_chain(
        &mut self,
        first: u32,
        parent: &mut DirectoryEntry,
        depth: usize,
    ) -> Result<(), ParseError> {
        let mut offset = first;
        while offset != 0 {
            if !self.visited.insert(offset) {
                self.warn(ParseWarning::CycleDetected { offset });
                break;
            }
            let Some(node) = self.read_node(offset) else {
                self.warn(ParseWarning::NodeOutOfBounds { offset });
                break;
            };

            let path = join_path(&parent.path, &node.name);
            let entry = if node.is_dir {
                let mut dir = DirectoryEntry::new(node.name, path.clone(), node.timestamp);
                if node.data_offset != 0 {
                    if depth >= MAX_DEPTH {
                        self.warn(ParseWarning::NestingTooDeep { offset, depth });
                    } else {
                        self.read_chain(node.data_offset, &mut dir, depth + 1)?;
                    }
                }
                ArchiveEntry::Directory(dir)
            } else {
                let end = node.data_offset as u64 + node.size as u64;
                if end > self.reader.len() as u64 {
                    return Err(ParseError::OutOfBounds {
                        format: AssetFormat::Archive,
                        what: "file data",
                        offset: node.data_offset as u64,
                        len: node.size as u64,
                        buffer_len: self.reader.len(),
                    });
                }
                ArchiveEntry::File(FileEntry {
                    name: node.name,
                    path: path.clone(),
                    offset: node.data_offset,
                    size: node.size,
                    timestamp: node.timestamp,
                })
            };

            if !parent.insert(entry) {
                self.warn(ParseWarning::DuplicateEntry { path });
            }
            offset = node.next;
        }
        Ok(())
    }
}

fn parse_tree(data: &[u8]) -> Result<(u32, DirectoryEntry, Vec<ParseWarning>), ParseError> {
    let reader = ByteReader::new(data, AssetFormat::Archive);
    let signature = reader.slice(0, REZ_SIGNATURE.len())?;
    if !signature.eq_ignore_ascii_case(REZ_SIGNATURE) {
        return Err(ParseError::invalid_magic(
            AssetFormat::Archive,
            REZ_SIGNATURE,
            signature,
        ));
    }
    reader.slice(0, HEADER_SIZE)?;

    let version = reader.u32(4)?;
    let root_offset = reader.u32(8)?;
    let declared_files = reader.u32(12)?;

    let mut builder = TreeBuilder {
        reader,
        visited: HashSet::new(),
        warnings: Vec::new(),
    };
    if version != REZ_VERSION {
        builder.warn(ParseWarning::VersionMismatch {
            format: AssetFormat::Archive,
            expected: REZ_VERSION,
            found: version,
        });
    }

    let mut root = DirectoryEntry::new(String::new(), "/".to_string(), 0);
    builder.read_chain(root_offset, &mut root, 0)?;

    let found = root.file_count();
    if found != declared_files as usize {
        builder.warn(ParseWarning::FileCountMismatch {
            declared: declared_files,
            found,
        });
    }

    Ok((version, root, builder.warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{RezBuilder, RezNode};

    fn sample_archive() -> Archive {
        let bytes = RezBuilder::new()
            .node(RezNode::file("README.TXT", b"hello"))
            .node(RezNode::dir(
                "SOUNDS",
                vec![
                    RezNode::file("Rain.WAV", b"RIFFrain"),
                    RezNode::dir("AMBIENT", vec![RezNode::file("WIND.WAV", b"RIFFwind")]),
                ],
            ))
            .node(RezNode::dir("EMPTY", vec![]))
            .node(RezNode::file("LEVEL1.WWD", &[1, 2, 3]))
            .build();
        Archive::load(bytes).unwrap()
    }

    #[test]
    fn test_single_file_archive() {
        let bytes = RezBuilder::new().node(RezNode::file("A.TXT", b"DATA")).build();
        assert_eq!(&bytes[..3], b"REZ");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 1);
        assert_eq!(u32::from_le_bytes(bytes[8..12].try_into().unwrap()), 20);

        let archive = Archive::load(bytes).unwrap();
        assert_eq!(archive.read_file("/A.TXT").unwrap(), &[0x44, 0x41, 0x54, 0x41]);
        assert!(archive.warnings().is_empty());
    }

    #[test]
    fn test_list_root_enumerates_every_file() {
        let archive = sample_archive();
        let files = archive.list_dir("/").unwrap();

        assert_eq!(files.len(), archive.file_count());
        assert_eq!(files.len(), 4);
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/README.TXT",
                "/SOUNDS/Rain.WAV",
                "/SOUNDS/AMBIENT/WIND.WAV",
                "/LEVEL1.WWD"
            ]
        );
        for file in files {
            assert_eq!(archive.read_file(&file.path).unwrap(), archive.file_data(file));
        }
    }

    #[test]
    fn test_paths_are_case_insensitive() {
        let archive = sample_archive();
        let a = archive.read_file("/Sounds/Rain.WAV").unwrap();
        let b = archive.read_file("/SOUNDS/RAIN.WAV").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, b"RIFFrain");
    }

    #[test]
    fn test_backslashes_and_empty_segments() {
        let archive = sample_archive();
        assert_eq!(
            archive.read_file("\\sounds\\ambient\\wind.wav").unwrap(),
            b"RIFFwind"
        );
        assert_eq!(archive.read_file("//SOUNDS//AMBIENT/WIND.WAV").unwrap(), b"RIFFwind");
        assert_eq!(archive.read_file("README.TXT").unwrap(), b"hello");
    }

    #[test]
    fn test_list_subdirectory() {
        let archive = sample_archive();
        let files = archive.list_dir("/sounds").unwrap();
        assert_eq!(files.len(), 2);
        assert!(archive.list_dir("/EMPTY").unwrap().is_empty());
    }

    #[test]
    fn test_lookup_errors() {
        let archive = sample_archive();
        assert_eq!(
            archive.read_file("/MISSING.TXT"),
            Err(LookupError::NotFound {
                path: "/MISSING.TXT".to_string()
            })
        );
        assert_eq!(
            archive.read_file("/SOUNDS"),
            Err(LookupError::NotAFile {
                path: "/SOUNDS".to_string()
            })
        );
        assert_eq!(
            archive.list_dir("/README.TXT"),
            Err(LookupError::NotADirectory {
                path: "/README.TXT".to_string()
            })
        );
        assert!(archive.read_file("/README.TXT/X").is_err());
    }

    #[test]
    fn test_exists() {
        let archive = sample_archive();
        assert!(archive.exists("/"));
        assert!(archive.exists("/sounds"));
        assert!(archive.exists("/sounds/ambient/WIND.wav"));
        assert!(!archive.exists("/sounds/thunder.wav"));
    }

    #[test]
    fn test_entry_metadata() {
        let bytes = RezBuilder::new()
            .node(RezNode::file("CLAW.PID", b"PID").with_timestamp(873_000_000))
            .build();
        let archive = Archive::load(bytes).unwrap();
        let entry = archive.entry("/claw.pid").unwrap();
        assert!(!entry.is_dir());
        assert_eq!(entry.timestamp(), 873_000_000);
        assert_eq!(entry.as_file().and_then(|f| f.extension()), Some("PID"));
    }

    #[test]
    fn test_lowercase_signature_is_accepted() {
        let mut bytes = RezBuilder::new().node(RezNode::file("A.TXT", b"x")).build();
        bytes[..3].copy_from_slice(b"rez");
        assert!(Archive::load(bytes).is_ok());
    }

    #[test]
    fn test_invalid_signature() {
        let mut bytes = RezBuilder::new().build();
        bytes[..3].copy_from_slice(b"ZER");
        let err = Archive::load(bytes).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidMagic {
                format: AssetFormat::Archive,
                expected: "REZ".to_string(),
                found: "ZER".to_string(),
            }
        );
    }

    #[test]
    fn test_short_header_is_fatal() {
        assert!(matches!(
            Archive::load(b"REZ\0\x01\0".to_vec()),
            Err(ParseError::Truncated { .. })
        ));
    }

    #[test]
    fn test_version_mismatch_is_a_warning() {
        let bytes = RezBuilder::new()
            .version(2)
            .node(RezNode::file("A.TXT", b"DATA"))
            .build();
        let archive = Archive::load(bytes).unwrap();
        assert_eq!(archive.version(), 2);
        assert_eq!(archive.read_file("/A.TXT").unwrap(), b"DATA");
        assert_eq!(
            archive.warnings(),
            &[ParseWarning::VersionMismatch {
                format: AssetFormat::Archive,
                expected: 1,
                found: 2,
            }]
        );
    }

    #[test]
    fn test_node_past_end_truncates_chain() {
        let mut bytes = RezBuilder::new()
            .node(RezNode::file("A.TXT", b"DATA"))
            .declared_files(1)
            .build();
        // Point the first node's next-sibling past the end of the buffer
        let past_end = (bytes.len() as u32 + 100).to_le_bytes();
        bytes[20..24].copy_from_slice(&past_end);

        let archive = Archive::load(bytes).unwrap();
        assert_eq!(archive.file_count(), 1);
        assert!(matches!(
            archive.warnings(),
            [ParseWarning::NodeOutOfBounds { .. }]
        ));
    }

    #[test]
    fn test_sibling_cycle_is_cut() {
        let mut bytes = RezBuilder::new()
            .node(RezNode::file("A.TXT", b"DATA"))
            .declared_files(1)
            .build();
        // First node's next-sibling points back at itself
        bytes[20..24].copy_from_slice(&20u32.to_le_bytes());

        let archive = Archive::load(bytes).unwrap();
        assert_eq!(archive.file_count(), 1);
        assert_eq!(archive.warnings(), &[ParseWarning::CycleDetected { offset: 20 }]);
    }

    #[test]
    fn test_file_data_past_end_is_fatal() {
        let mut bytes = RezBuilder::new().node(RezNode::file("A.TXT", b"DATA")).build();
        // Inflate the first node's data size
        bytes[28..32].copy_from_slice(&10_000u32.to_le_bytes());
        assert!(matches!(
            Archive::load(bytes),
            Err(ParseError::OutOfBounds {
                format: AssetFormat::Archive,
                what: "file data",
                len: 10_000,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let bytes = RezBuilder::new()
            .node(RezNode::file("A.TXT", b"first"))
            .node(RezNode::file("a.txt", b"second"))
            .declared_files(1)
            .build();
        let archive = Archive::load(bytes).unwrap();
        assert_eq!(archive.read_file("/A.TXT").unwrap(), b"first");
        assert_eq!(archive.file_count(), 1);
        assert_eq!(
            archive.warnings(),
            &[ParseWarning::DuplicateEntry {
                path: "/a.txt".to_string()
            }]
        );
    }

    #[test]
    fn test_file_count_mismatch_is_a_warning() {
        let bytes = RezBuilder::new()
            .node(RezNode::file("A.TXT", b"DATA"))
            .declared_files(3)
            .build();
        let archive = Archive::load(bytes).unwrap();
        assert_eq!(
            archive.warnings(),
            &[ParseWarning::FileCountMismatch {
                declared: 3,
                found: 1
            }]
        );
    }

    #[test]
    fn test_empty_archive() {
        let archive = Archive::load(RezBuilder::new().build()).unwrap();
        assert_eq!(archive.file_count(), 0);
        assert!(archive.list_dir("/").unwrap().is_empty());
    }

    #[test]
    fn test_name_limit_excludes_extension() {
        let name = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123.WAV";
        let bytes = RezBuilder::new().node(RezNode::file(name, b"RIFF")).build();
        let archive = Archive::load(bytes).unwrap();

        assert!(archive.warnings().is_empty());
        assert_eq!(archive.read_file(&format!("/{name}")).unwrap(), b"RIFF");
    }

    #[test]
    fn test_long_name_is_truncated() {
        let stem = "N".repeat(40);
        let bytes = RezBuilder::new()
            .node(RezNode::file(&format!("{stem}.TXT"), b"x"))
            .build();
        let archive = Archive::load(bytes).unwrap();

        assert!(matches!(
            archive.warnings(),
            [ParseWarning::NameTruncated { len: 40, .. }]
        ));
        let files = archive.list_dir("/").unwrap();
        assert_eq!(files[0].name, format!("{}.TXT", "N".repeat(MAX_NAME_LEN)));
        assert_eq!(archive.read_file(&files[0].path).unwrap(), b"x");
    }

    #[test]
    fn test_latin1_names_are_measured_in_bytes() {
        // 32 bytes on disk, more than 32 once encoded as UTF-8
        let mut bytes = RezBuilder::new()
            .node(RezNode::file(&format!("{}.TXT", "E".repeat(32)), b"x"))
            .build();
        let name_start = HEADER_SIZE + NODE_SIZE;
        for b in &mut bytes[name_start..name_start + 32] {
            *b = 0xC9;
        }
        let archive = Archive::load(bytes).unwrap();

        assert!(archive.warnings().is_empty());
        let files = archive.list_dir("/").unwrap();
        assert_eq!(files[0].name, format!("{}.TXT", "\u{c9}".repeat(32)));
    }

    #[test]
    fn test_deep_nesting_stops_with_warning() {
        let mut node = RezNode::file("DEEP.TXT", b"x");
        for i in 0..(MAX_DEPTH + 2) {
            node = RezNode::dir(&format!("D{i}"), vec![node]);
        }
        let archive = Archive::load(RezBuilder::new().node(node).build()).unwrap();

        assert!(archive.warnings().iter().any(|w| matches!(
            w,
            ParseWarning::NestingTooDeep { depth, .. } if *depth == MAX_DEPTH
        )));
        assert_eq!(archive.file_count(), 0);
    }
}
