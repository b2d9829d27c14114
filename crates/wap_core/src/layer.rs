//! Parallax tile layers

use serde::{Deserialize, Serialize};

/// Tile index marking an empty cell
pub const EMPTY_TILE: i32 = -1;

/// Layer flag word as stored in the level file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerFlags(pub u32);

impl LayerFlags {
    /// The layer objects live on
    pub const MAIN_PLANE: LayerFlags = LayerFlags(0x1);
    /// The layer is not drawn
    pub const NO_DRAW: LayerFlags = LayerFlags(0x2);
    /// The tile grid repeats horizontally
    pub const WRAP_X: LayerFlags = LayerFlags(0x4);
    /// The tile grid repeats vertically
    pub const WRAP_Y: LayerFlags = LayerFlags(0x8);

    pub fn contains(self, other: LayerFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: LayerFlags) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for LayerFlags {
    type Output = LayerFlags;

    fn bitor(self, rhs: LayerFlags) -> LayerFlags {
        LayerFlags(self.0 | rhs.0)
    }
}

/// A single tile layer of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayer {
    pub name: String,
    pub flags: LayerFlags,
    /// Tile drawn where the grid holds no tile
    pub fill_tile: i32,
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    /// Tile width in pixels
    pub tile_width: u32,
    /// Tile height in pixels
    pub tile_height: u32,
    /// Horizontal scroll speed relative to the camera, in percent
    pub parallax_x: u32,
    /// Vertical scroll speed relative to the camera, in percent
    pub parallax_y: u32,
    /// Tile indices, row-major; `EMPTY_TILE` is an empty cell
    pub tiles: Vec<i32>,
}

impl LevelLayer {
    /// Create an empty layer with square tiles that scrolls with the camera
    pub fn new(name: String, width: u32, height: u32, tile_size: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            name,
            flags: LayerFlags::default(),
            fill_tile: EMPTY_TILE,
            width,
            height,
            tile_width: tile_size,
            tile_height: tile_size,
            parallax_x: 100,
            parallax_y: 100,
            tiles: vec![EMPTY_TILE; size],
        }
    }

    /// Check the grid length invariant (`tiles.len() == width * height`)
    pub fn is_consistent(&self) -> bool {
        self.tiles.len() == self.width as usize * self.height as usize
    }

    pub fn is_main_plane(&self) -> bool {
        self.flags.contains(LayerFlags::MAIN_PLANE)
    }

    pub fn is_visible(&self) -> bool {
        !self.flags.contains(LayerFlags::NO_DRAW)
    }

    /// Get the tile at a cell, wrapping coordinates on wrapping axes.
    /// Returns `None` outside a non-wrapping axis.
    pub fn tile(&self, col: i32, row: i32) -> Option<i32> {
        let col = wrap_axis(col, self.width, self.flags.contains(LayerFlags::WRAP_X))?;
        let row = wrap_axis(row, self.height, self.flags.contains(LayerFlags::WRAP_Y))?;
        self.tiles
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    /// Set the tile at a cell. Returns `false` if the cell is out of range.
    pub fn set_tile(&mut self, col: u32, row: u32, tile: i32) -> bool {
        if col >= self.width || row >= self.height {
            return false;
        }
        let idx = row as usize * self.width as usize + col as usize;
        match self.tiles.get_mut(idx) {
            Some(slot) => {
                *slot = tile;
                true
            }
            None => false,
        }
    }

    /// Size of the layer in pixels
    pub fn pixel_size(&self) -> (u64, u64) {
        (
            self.width as u64 * self.tile_width as u64,
            self.height as u64 * self.tile_height as u64,
        )
    }
}

fn wrap_axis(value: i32, extent: u32, wraps: bool) -> Option<u32> {
    if extent == 0 {
        return None;
    }
    if wraps {
        return Some(value.rem_euclid(extent as i32) as u32);
    }
    if value < 0 || value as u32 >= extent {
        return None;
    }
    Some(value as u32)
}
