//! Bounds-checked little-endian reads over an immutable buffer

use crate::ParseError;
use wap_core::AssetFormat;

/// Offset-addressed reader. Every read is bounds checked and reports the
/// format and offset on failure.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    format: AssetFormat,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8], format: AssetFormat) -> Self {
        Self { bytes, format }
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Non-failing slice access
    pub(crate) fn get(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        self.bytes.get(offset..end)
    }

    pub(crate) fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], ParseError> {
        self.get(offset, len).ok_or(ParseError::Truncated {
            format: self.format,
            offset,
            needed: len,
            available: self.bytes.len().saturating_sub(offset),
        })
    }

    fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N], ParseError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.slice(offset, N)?);
        Ok(out)
    }

    pub(crate) fn u8(&self, offset: usize) -> Result<u8, ParseError> {
        Ok(self.array::<1>(offset)?[0])
    }

    pub(crate) fn u16(&self, offset: usize) -> Result<u16, ParseError> {
        Ok(u16::from_le_bytes(self.array(offset)?))
    }

    pub(crate) fn i16(&self, offset: usize) -> Result<i16, ParseError> {
        Ok(i16::from_le_bytes(self.array(offset)?))
    }

    pub(crate) fn u32(&self, offset: usize) -> Result<u32, ParseError> {
        Ok(u32::from_le_bytes(self.array(offset)?))
    }

    pub(crate) fn i32(&self, offset: usize) -> Result<i32, ParseError> {
        Ok(i32::from_le_bytes(self.array(offset)?))
    }

    /// Fixed-width string field, cut at the first NUL
    pub(crate) fn fixed_str(&self, offset: usize, len: usize) -> Result<String, ParseError> {
        Ok(latin1_until_nul(self.slice(offset, len)?))
    }
}

/// Decode bytes up to the first NUL as Latin-1. Every byte maps to exactly
/// one char, so legacy names survive unchanged.
pub(crate) fn latin1_until_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    bytes[..end].iter().map(|&b| b as char).collect()
}
