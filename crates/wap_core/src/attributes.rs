//! Per-tile collision attributes supplied by game data

use crate::TileAttribute;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from tile id to collision attribute
///
/// Tiles without an entry are [`TileAttribute::Empty`]. Only non-empty
/// attributes are stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileAttributeTable {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    attributes: HashMap<i32, TileAttribute>,
}

impl TileAttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, builder style
    pub fn with(mut self, tile: i32, attribute: TileAttribute) -> Self {
        self.set(tile, attribute);
        self
    }

    /// Set the attribute for a tile id; setting Empty removes the entry
    pub fn set(&mut self, tile: i32, attribute: TileAttribute) {
        if attribute == TileAttribute::Empty {
            self.attributes.remove(&tile);
        } else {
            self.attributes.insert(tile, attribute);
        }
    }

    /// Attribute for a tile id (Empty if unset)
    pub fn get(&self, tile: i32) -> TileAttribute {
        self.attributes.get(&tile).copied().unwrap_or_default()
    }

    /// Assign one attribute to a contiguous range of tile ids
    pub fn set_range(&mut self, tiles: std::ops::RangeInclusive<i32>, attribute: TileAttribute) {
        for tile in tiles {
            self.set(tile, attribute);
        }
    }

    /// Number of tiles with a non-empty attribute
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
