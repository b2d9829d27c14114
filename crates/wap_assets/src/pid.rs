//! PID sprite frame decoder
//!
//! A frame is a 16-byte header, an optional 768-byte private palette and a
//! stream of palette indices (one per pixel, row-major), optionally
//! run-length encoded. Indices are expanded to RGBA through the active
//! palette.
//!
//! | Offset | Size | Field                         |
//! |--------|------|-------------------------------|
//! | 0      | 3    | signature `"PID"`             |
//! | 3      | 1    | pad                           |
//! | 4      | 2    | width (`u16`)                 |
//! | 6      | 2    | height (`u16`)                |
//! | 8      | 2    | pivot x (`i16`)               |
//! | 10     | 2    | pivot y (`i16`)               |
//! | 12     | 4    | flags (`u32`, see [`SpriteFlags`]) |

use crate::reader::ByteReader;
use crate::{rle, ParseError};
use tracing::warn;
use wap_core::{
    AssetFormat, IVec2, Palette, ParseWarning, SpriteFlags, SpriteFrame, PALETTE_SIZE,
};

/// Frame signature, matched exactly
pub const PID_SIGNATURE: &[u8; 3] = b"PID";

/// Size of the fixed frame header in bytes
pub const HEADER_SIZE: usize = 16;

/// The fixed header of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PidHeader {
    pub width: u16,
    pub height: u16,
    pub pivot_x: i16,
    pub pivot_y: i16,
    pub flags: SpriteFlags,
}

impl PidHeader {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Offset of the pixel payload
    pub fn payload_offset(&self) -> usize {
        if self.flags.contains(SpriteFlags::EMBEDDED_PALETTE) {
            HEADER_SIZE + PALETTE_SIZE
        } else {
            HEADER_SIZE
        }
    }
}

/// A decoded frame plus whatever the decoder had to report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSprite {
    pub frame: SpriteFrame,
    /// The private palette, if the frame carried one
    pub embedded_palette: Option<Palette>,
    pub warnings: Vec<ParseWarning>,
}

/// Read and validate the frame header
pub fn read_header(bytes: &[u8]) -> Result<PidHeader, ParseError> {
    let reader = ByteReader::new(bytes, AssetFormat::Sprite);
    let signature = reader.slice(0, PID_SIGNATURE.len())?;
    if signature != PID_SIGNATURE {
        return Err(ParseError::invalid_magic(
            AssetFormat::Sprite,
            PID_SIGNATURE,
            signature,
        ));
    }
    reader.slice(0, HEADER_SIZE)?;

    Ok(PidHeader {
        width: reader.u16(4)?,
        height: reader.u16(6)?,
        pivot_x: reader.i16(8)?,
        pivot_y: reader.i16(10)?,
        flags: SpriteFlags(reader.u32(12)?),
    })
}

/// Decode a frame, mapping indices through `palette` unless the frame embeds
/// its own.
pub fn decode_frame(bytes: &[u8], palette: &Palette) -> Result<DecodedSprite, ParseError> {
    let header = read_header(bytes)?;
    let reader = ByteReader::new(bytes, AssetFormat::Sprite);

    let embedded_palette = if header.flags.contains(SpriteFlags::EMBEDDED_PALETTE) {
        let raw = reader.slice(HEADER_SIZE, PALETTE_SIZE)?;
        Some(Palette::from_slice(raw).map_err(|e| ParseError::InvalidPalette { len: e.len })?)
    } else {
        None
    };
    let active = embedded_palette.as_ref().unwrap_or(palette);

    let payload = bytes.get(header.payload_offset()..).unwrap_or_default();
    let expected = header.pixel_count();
    let (indices, decoded) = if header.flags.contains(SpriteFlags::COMPRESSED) {
        let out = rle::decode(payload, expected);
        (out.bytes, out.decoded)
    } else {
        let available = payload.len().min(expected);
        let mut indices = vec![0u8; expected];
        indices[..available].copy_from_slice(&payload[..available]);
        (indices, available)
    };

    let mut warnings = Vec::new();
    if decoded < expected {
        let warning = ParseWarning::PixelDataExhausted { decoded, expected };
        warn!("{warning}");
        warnings.push(warning);
    }

    let color_key = header.flags.contains(SpriteFlags::COLOR_KEY);
    let mut pixels = Vec::with_capacity(expected * 4);
    for &index in &indices {
        if color_key && index == 0 {
            pixels.extend_from_slice(&[0, 0, 0, 0]);
        } else {
            let [r, g, b] = active.rgb(index);
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }

    Ok(DecodedSprite {
        frame: SpriteFrame {
            width: header.width as u32,
            height: header.height as u32,
            pivot: IVec2::new(header.pivot_x as i32, header.pivot_y as i32),
            flags: header.flags,
            pixels,
        },
        embedded_palette,
        warnings,
    })
}

/// Frame decoder holding the default palette used when a frame carries none
#[derive(Debug, Clone, Default)]
pub struct SpriteDecoder {
    palette: Palette,
}

impl SpriteDecoder {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Replace the default palette; `bytes` must be exactly 768 bytes
    pub fn set_palette(&mut self, bytes: &[u8]) -> Result<(), ParseError> {
        self.palette =
            Palette::from_slice(bytes).map_err(|e| ParseError::InvalidPalette { len: e.len })?;
        Ok(())
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Decode a frame against the default palette
    pub fn parse(&self, bytes: &[u8]) -> Result<DecodedSprite, ParseError> {
        decode_frame(bytes, &self.palette)
    }
}
