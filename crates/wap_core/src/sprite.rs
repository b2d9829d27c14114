//! Decoded sprite frames and palettes

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of colours in a palette
pub const PALETTE_COLORS: usize = 256;

/// Size of a packed RGB palette in bytes
pub const PALETTE_SIZE: usize = PALETTE_COLORS * 3;

/// Error for palette buffers that are not exactly `PALETTE_SIZE` bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteSizeError {
    pub len: usize,
}

impl fmt::Display for PaletteSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "palette must be {PALETTE_SIZE} bytes, got {}", self.len)
    }
}

impl std::error::Error for PaletteSizeError {}

/// A 256-entry RGB palette
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Palette {
    rgb: Vec<u8>,
}

impl Palette {
    /// Build a palette from 768 packed RGB bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PaletteSizeError> {
        if bytes.len() != PALETTE_SIZE {
            return Err(PaletteSizeError { len: bytes.len() });
        }
        Ok(Self { rgb: bytes.to_vec() })
    }

    /// A palette mapping index `i` to grey `(i, i, i)`
    pub fn grayscale() -> Self {
        let rgb = (0..PALETTE_COLORS)
            .flat_map(|i| {
                let v = i as u8;
                [v, v, v]
            })
            .collect();
        Self { rgb }
    }

    /// RGB of a palette entry
    pub fn rgb(&self, index: u8) -> [u8; 3] {
        let base = index as usize * 3;
        [self.rgb[base], self.rgb[base + 1], self.rgb[base + 2]]
    }

    /// Set one palette entry
    pub fn set_rgb(&mut self, index: u8, rgb: [u8; 3]) {
        let base = index as usize * 3;
        self.rgb[base..base + 3].copy_from_slice(&rgb);
    }

    /// Packed RGB bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgb
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::grayscale()
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette").finish_non_exhaustive()
    }
}

impl TryFrom<Vec<u8>> for Palette {
    type Error = PaletteSizeError;

    fn try_from(rgb: Vec<u8>) -> Result<Self, Self::Error> {
        if rgb.len() != PALETTE_SIZE {
            return Err(PaletteSizeError { len: rgb.len() });
        }
        Ok(Self { rgb })
    }
}

impl From<Palette> for Vec<u8> {
    fn from(palette: Palette) -> Self {
        palette.rgb
    }
}

/// Sprite flag word as stored in the frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteFlags(pub u32);

impl SpriteFlags {
    /// Palette index 0 is transparent
    pub const COLOR_KEY: SpriteFlags = SpriteFlags(0x01);
    /// Frame is drawn mirrored
    pub const MIRROR: SpriteFlags = SpriteFlags(0x08);
    /// Frame is drawn upside down
    pub const INVERT: SpriteFlags = SpriteFlags(0x10);
    /// Pixel payload is run-length encoded
    pub const COMPRESSED: SpriteFlags = SpriteFlags(0x20);
    /// A private palette follows the header
    pub const EMBEDDED_PALETTE: SpriteFlags = SpriteFlags(0x80);

    pub fn contains(self, other: SpriteFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for SpriteFlags {
    type Output = SpriteFlags;

    fn bitor(self, rhs: SpriteFlags) -> SpriteFlags {
        SpriteFlags(self.0 | rhs.0)
    }
}

/// A decoded RGBA bitmap with its placement pivot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub width: u32,
    pub height: u32,
    /// Hot-spot offset used to place the frame
    pub pivot: IVec2,
    /// Flags from the source header
    pub flags: SpriteFlags,
    /// RGBA pixels, row-major, exactly `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl SpriteFrame {
    /// Create a fully transparent frame
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pivot: IVec2::ZERO,
            flags: SpriteFlags::default(),
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Check the buffer length invariant
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == self.width as usize * self.height as usize * 4
    }

    /// RGBA of a pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let base = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(base..base + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
