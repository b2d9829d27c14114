//! Core data structures for the WAP engine core
//!
//! This crate provides the plain data decoded from legacy assets and consumed by
//! the simulation:
//! - `Level` - A decoded level map with layers, objects and its collision grid
//! - `LevelLayer` - A single parallax tile layer
//! - `LevelObject` - A placed object record
//! - `CollisionGrid` - Per-cell collision attributes with fail-safe lookup
//! - `TileAttributeTable` - Tile id to collision attribute mapping
//! - `SpriteFrame` / `Palette` - Decoded RGBA bitmaps and 256-colour palettes
//! - `ParseWarning` - Recoverable anomalies surfaced by the decoders

mod attributes;
mod collision;
mod diagnostics;
mod layer;
mod level;
mod object;
mod sprite;

pub use attributes::TileAttributeTable;
pub use collision::{CollisionGrid, CollisionPolicy, GridSizeError, TileAttribute};
pub use diagnostics::{AssetFormat, ParseWarning};
pub use layer::{LayerFlags, LevelLayer, EMPTY_TILE};
pub use level::{Level, LevelHeader, MAX_LAYERS};
pub use object::{LevelObject, ObjectFlags, Rect};
pub use sprite::{
    Palette, PaletteSizeError, SpriteFlags, SpriteFrame, PALETTE_COLORS, PALETTE_SIZE,
};

pub use glam::{IVec2, Vec2};
