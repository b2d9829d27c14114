//! Collision grid and tile attribute classification
//!
//! This module provides the collision types shared by the level decoder and the
//! physics integrator:
//! - `TileAttribute` - Per-cell classification (Empty, Solid, OneWayPlatform, Ladder)
//! - `CollisionGrid` - Flat grid of attributes; lookups outside the grid are Solid
//! - `CollisionPolicy` - How tile ids from a layer map onto attributes

use crate::{LevelLayer, TileAttributeTable, EMPTY_TILE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collision attribute of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TileAttribute {
    /// No collision
    #[default]
    Empty,
    /// Blocks movement from every side
    Solid,
    /// Blocks only bodies falling onto it from above
    OneWayPlatform,
    /// Climbable, never blocks
    Ladder,
}

impl TileAttribute {
    /// Check if this attribute blocks movement from every side
    pub fn is_solid(&self) -> bool {
        matches!(self, TileAttribute::Solid)
    }

    /// Check if this is a one-way platform
    pub fn is_one_way(&self) -> bool {
        matches!(self, TileAttribute::OneWayPlatform)
    }

    /// Check if this is a ladder
    pub fn is_ladder(&self) -> bool {
        matches!(self, TileAttribute::Ladder)
    }

    /// Get the display name of this attribute
    pub fn name(&self) -> &'static str {
        match self {
            TileAttribute::Empty => "Empty",
            TileAttribute::Solid => "Solid",
            TileAttribute::OneWayPlatform => "One-way platform",
            TileAttribute::Ladder => "Ladder",
        }
    }
}

/// High bit of a tile id; the legacy derivation treats it as a solid marker.
const LEGACY_SOLID_BIT: u32 = 0x8000_0000;

/// How tile ids of the collision layer are classified into attributes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// The rule shipped with the level format: negative ids are empty,
    /// a non-negative id is solid if its sign bit is set or it is exactly zero,
    /// every other id is passable.
    #[default]
    Legacy,
    /// Per-tile-id attributes supplied by game data
    Attributes(TileAttributeTable),
}

impl CollisionPolicy {
    /// Classify a single tile id
    pub fn classify(&self, tile: i32) -> TileAttribute {
        if tile < 0 {
            return TileAttribute::Empty;
        }
        match self {
            CollisionPolicy::Legacy => {
                // Unreachable sign-bit test for non-negative ids
                if (tile as u32) & LEGACY_SOLID_BIT != 0 || tile == 0 {
                    TileAttribute::Solid
                } else {
                    TileAttribute::Empty
                }
            }
            CollisionPolicy::Attributes(table) => table.get(tile),
        }
    }
}

/// A flat 2D grid of collision attributes
///
/// Any lookup outside `[0, width) x [0, height)` resolves to
/// [`TileAttribute::Solid`], so bodies can never leave an unmapped world edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct CollisionGrid {
    width: u32,
    height: u32,
    /// Cell size in pixels (square cells)
    tile_size: u32,
    cells: Vec<TileAttribute>,
}

/// Cell count that does not match the grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSizeError {
    pub expected: usize,
    pub found: usize,
}

impl fmt::Display for GridSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "collision grid needs {} cells, got {}",
            self.expected, self.found
        )
    }
}

impl std::error::Error for GridSizeError {}

/// Unchecked serialized form of a [`CollisionGrid`]
#[derive(Deserialize)]
struct GridData {
    width: u32,
    height: u32,
    tile_size: u32,
    cells: Vec<TileAttribute>,
}

impl TryFrom<GridData> for CollisionGrid {
    type Error = GridSizeError;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        let expected = data.width as usize * data.height as usize;
        let found = data.cells.len();
        Self::from_cells(data.width, data.height, data.tile_size, data.cells)
            .ok_or(GridSizeError { expected, found })
    }
}

impl CollisionGrid {
    /// Create a grid with every cell empty
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            tile_size,
            cells: vec![TileAttribute::Empty; size],
        }
    }

    /// Create a grid from existing cells. Returns `None` if the cell count is
    /// not `width * height`.
    pub fn from_cells(
        width: u32,
        height: u32,
        tile_size: u32,
        cells: Vec<TileAttribute>,
    ) -> Option<Self> {
        if cells.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            tile_size,
            cells,
        })
    }

    /// Derive a grid from a tile layer. The result is an independent copy, the
    /// layer can be dropped afterwards. Tiles missing from a short layer are
    /// empty; surplus tiles are ignored.
    pub fn from_layer(layer: &LevelLayer, policy: &CollisionPolicy) -> Self {
        let size = layer.width as usize * layer.height as usize;
        let cells = layer
            .tiles
            .iter()
            .copied()
            .chain(std::iter::repeat(EMPTY_TILE))
            .take(size)
            .map(|tile| policy.classify(tile))
            .collect();
        Self {
            width: layer.width,
            height: layer.height,
            tile_size: layer.tile_width,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[TileAttribute] {
        &self.cells
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as u32 >= self.width || row as u32 >= self.height {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    /// Get the attribute of a cell; out of range cells are Solid
    pub fn get(&self, col: i32, row: i32) -> TileAttribute {
        self.index(col, row)
            .and_then(|idx| self.cells.get(idx).copied())
            .unwrap_or(TileAttribute::Solid)
    }

    /// Set the attribute of a cell. Returns `false` (and changes nothing) if the
    /// cell is out of range.
    pub fn set(&mut self, col: i32, row: i32, attribute: TileAttribute) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = attribute;
                true
            }
            None => false,
        }
    }

    /// Cell containing a pixel position (floor division)
    pub fn cell_at(&self, x: f32, y: f32) -> (i32, i32) {
        if self.tile_size == 0 {
            return (-1, -1);
        }
        let size = self.tile_size as f32;
        ((x / size).floor() as i32, (y / size).floor() as i32)
    }

    /// Attribute of the cell containing a pixel position
    pub fn attribute_at_point(&self, x: f32, y: f32) -> TileAttribute {
        let (col, row) = self.cell_at(x, y);
        self.get(col, row)
    }

    /// Check if the cell containing a pixel position is solid
    pub fn is_solid_at(&self, x: f32, y: f32) -> bool {
        self.attribute_at_point(x, y).is_solid()
    }

    /// Count cells with the given attribute
    pub fn count(&self, attribute: TileAttribute) -> usize {
        self.cells.iter().filter(|&&cell| cell == attribute).count()
    }
}

impl Default for CollisionGrid {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}
