//! Object placement records

use serde::{Deserialize, Serialize};

/// Integer rectangle in world pixels (edges inclusive, as stored on disk)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// An all-zero rectangle means "unset" in level data
    pub fn is_unset(&self) -> bool {
        *self == Rect::default()
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// The four flag words carried by every object record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ObjectFlags {
    pub draw: u32,
    pub dynamic: u32,
    pub add: u32,
    pub user: u32,
}

/// An object placed in a level
///
/// The fields are opaque to the engine core; their meaning belongs to the
/// gameplay logic named by `logic`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelObject {
    pub id: u32,
    pub name: String,
    /// Logic type tag (e.g. "Officer", "TreasurePowerup")
    pub logic: String,
    pub image_set: String,
    pub animation: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Frame index within the image set
    pub image: i32,
    pub width: i32,
    pub height: i32,
    pub speed: i32,
    pub speed_x: i32,
    pub speed_y: i32,
    pub health: i32,
    pub damage: i32,
    pub points: i32,
    pub smarts: i32,
    pub powerup: i32,
    pub score: i32,
    pub direction: i32,
    pub face_dir: i32,
    /// Area the object may move within
    pub move_rect: Rect,
    pub hit_rect: Rect,
    pub attack_rect: Rect,
    pub clip_rect: Rect,
    /// Free-form numeric slots
    pub user_values: [i32; 8],
    pub flags: ObjectFlags,
    pub object_type: u32,
    pub type_flags: u32,
}

impl LevelObject {
    /// Create an object with a logic tag at a position
    pub fn new(id: u32, logic: String, x: i32, y: i32) -> Self {
        Self {
            id,
            logic,
            x,
            y,
            ..Default::default()
        }
    }

    /// Get a display name for this object
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("{} #{}", self.logic, self.id)
        } else {
            self.name.clone()
        }
    }

    /// Check if the object's movement is bounded
    pub fn has_move_bounds(&self) -> bool {
        !self.move_rect.is_unset()
    }
}
