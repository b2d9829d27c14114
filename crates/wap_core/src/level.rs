//! Decoded level maps

use crate::{CollisionGrid, LevelLayer, LevelObject, ParseWarning};
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Maximum number of tile layers a level carries
pub const MAX_LAYERS: usize = 8;

/// Index of the layer collision is derived from by convention
const COLLISION_LAYER_INDEX: usize = 1;

/// The descriptive part of a level header
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelHeader {
    pub version: u32,
    pub flags: u32,
    pub name: String,
    pub author: String,
    /// Creation timestamp as written by the level editor
    pub created: String,
    /// Archive holding the level's graphics and sounds
    pub rez_path: String,
    pub image_dir: String,
    pub palette_path: String,
    pub launch_path: String,
    pub image_sets: [String; 4],
    pub prefixes: [String; 4],
    /// Player start position in world pixels
    pub start: IVec2,
}

/// A complete decoded level
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Level {
    pub header: LevelHeader,
    pub layers: Vec<LevelLayer>,
    pub objects: Vec<LevelObject>,
    /// Collision derived from the collision layer; owned independently of it
    pub collision: CollisionGrid,
    /// Recoverable anomalies found while decoding
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
}

impl Level {
    /// The layer collision is derived from: the second layer, or the first if
    /// there is only one
    pub fn collision_layer(&self) -> Option<&LevelLayer> {
        self.layers
            .get(COLLISION_LAYER_INDEX)
            .or_else(|| self.layers.first())
    }

    /// First layer flagged as the main plane
    pub fn main_plane(&self) -> Option<&LevelLayer> {
        self.layers.iter().find(|layer| layer.is_main_plane())
    }

    /// Find a layer by case-insensitive name
    pub fn layer_by_name(&self, name: &str) -> Option<&LevelLayer> {
        self.layers
            .iter()
            .find(|layer| layer.name.eq_ignore_ascii_case(name))
    }

    /// Objects with the given logic tag
    pub fn objects_with_logic<'a>(
        &'a self,
        logic: &'a str,
    ) -> impl Iterator<Item = &'a LevelObject> + 'a {
        self.objects.iter().filter(move |object| object.logic == logic)
    }
}
