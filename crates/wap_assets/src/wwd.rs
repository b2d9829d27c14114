//! WWD level map parser
//!
//! A level file is a fixed 1536-byte header followed by a table of layer
//! headers, each layer's tile array and a table of object records. All
//! offsets in the header are absolute. Collision is derived from the
//! collision layer after decoding.

use crate::reader::ByteReader;
use crate::ParseError;
use tracing::{debug, warn};
use wap_core::{
    AssetFormat, CollisionGrid, CollisionPolicy, IVec2, LayerFlags, Level, LevelHeader,
    LevelLayer, LevelObject, ObjectFlags, ParseWarning, Rect, MAX_LAYERS,
};

/// Current level signature
pub const WWD_MAGIC: &[u8; 4] = b"WWD1";

/// Signature written by older editors, accepted on read
pub const LEGACY_MAGIC: &[u8; 4] = b"WAP1";

/// The only level version known to this parser
pub const WWD_VERSION: u32 = 1;

/// Size of the level header in bytes
pub const HEADER_SIZE: usize = 1536;

/// Size of a layer header record
pub const LAYER_HEADER_SIZE: usize = 52;

/// Size of an object record
pub const OBJECT_RECORD_SIZE: usize = 360;

/// Size of one tile index
const TILE_SIZE_BYTES: u64 = 4;

/// Parse a level, deriving collision with the legacy tile rule
pub fn parse_level(bytes: &[u8]) -> Result<Level, ParseError> {
    parse_level_with(bytes, &CollisionPolicy::Legacy)
}

/// Parse a level, deriving collision with the given policy
pub fn parse_level_with(bytes: &[u8], policy: &CollisionPolicy) -> Result<Level, ParseError> {
    let reader = ByteReader::new(bytes, AssetFormat::Level);
    let mut warnings = Vec::new();

    let header = read_header(&reader, &mut warnings)?;

    let declared_layers = reader.u32(732)?;
    let layer_table = reader.u32(736)?;
    let declared_objects = reader.u32(740)?;
    let object_table = reader.u32(744)?;

    let layer_count = if declared_layers as usize > MAX_LAYERS {
        push_warning(
            &mut warnings,
            ParseWarning::LayerCountClamped {
                declared: declared_layers,
                max: MAX_LAYERS as u32,
            },
        );
        MAX_LAYERS
    } else {
        declared_layers as usize
    };

    let layers = read_layers(&reader, layer_table, layer_count)?;
    let objects = read_objects(&reader, object_table, declared_objects, &mut warnings)?;

    let mut level = Level {
        header,
        layers,
        objects,
        collision: CollisionGrid::default(),
        warnings,
    };
    if let Some(layer) = level.collision_layer() {
        level.collision = CollisionGrid::from_layer(layer, policy);
    }

    debug!(
        "Parsed WWD level '{}': {} layers, {} objects, collision {}x{}",
        level.header.name,
        level.layers.len(),
        level.objects.len(),
        level.collision.width(),
        level.collision.height()
    );
    Ok(level)
}

fn push_warning(warnings: &mut Vec<ParseWarning>, warning: ParseWarning) {
    warn!("{warning}");
    warnings.push(warning);
}

fn read_header(
    reader: &ByteReader<'_>,
    warnings: &mut Vec<ParseWarning>,
) -> Result<LevelHeader, ParseError> {
    let magic = reader.slice(0, WWD_MAGIC.len())?;
    if magic != WWD_MAGIC && magic != LEGACY_MAGIC {
        return Err(ParseError::invalid_magic(AssetFormat::Level, WWD_MAGIC, magic));
    }
    reader.slice(0, HEADER_SIZE)?;

    let version = reader.u32(4)?;
    if version != WWD_VERSION {
        push_warning(
            warnings,
            ParseWarning::VersionMismatch {
                format: AssetFormat::Level,
                expected: WWD_VERSION,
                found: version,
            },
        );
    }

    let mut image_sets: [String; 4] = Default::default();
    for (i, slot) in image_sets.iter_mut().enumerate() {
        *slot = reader.fixed_str(876 + i * 128, 128)?;
    }
    let mut prefixes: [String; 4] = Default::default();
    for (i, slot) in prefixes.iter_mut().enumerate() {
        *slot = reader.fixed_str(1388 + i * 32, 32)?;
    }

    Ok(LevelHeader {
        version,
        flags: reader.u32(8)?,
        name: reader.fixed_str(16, 64)?,
        author: reader.fixed_str(80, 64)?,
        created: reader.fixed_str(144, 64)?,
        rez_path: reader.fixed_str(208, 256)?,
        image_dir: reader.fixed_str(464, 128)?,
        palette_path: reader.fixed_str(592, 128)?,
        launch_path: reader.fixed_str(748, 128)?,
        image_sets,
        prefixes,
        start: IVec2::new(reader.i32(720)?, reader.i32(724)?),
    })
}

fn check_range(
    reader: &ByteReader<'_>,
    what: &'static str,
    offset: u64,
    len: u64,
) -> Result<(), ParseError> {
    if offset + len > reader.len() as u64 {
        return Err(ParseError::OutOfBounds {
            format: AssetFormat::Level,
            what,
            offset,
            len,
            buffer_len: reader.len(),
        });
    }
    Ok(())
}

fn read_layers(
    reader: &ByteReader<'_>,
    table: u32,
    count: usize,
) -> Result<Vec<LevelLayer>, ParseError> {
    let table = table as u64;
    check_range(reader, "layer table", table, (count * LAYER_HEADER_SIZE) as u64)?;

    let mut layers = Vec::with_capacity(count);
    for i in 0..count {
        let base = table as usize + i * LAYER_HEADER_SIZE;
        let width = reader.u16(base + 40)? as u32;
        let height = reader.u16(base + 42)? as u32;
        let tiles_offset = reader.u32(base + 48)? as u64;
        let cells = width as u64 * height as u64;
        check_range(reader, "tile array", tiles_offset, cells * TILE_SIZE_BYTES)?;

        let raw = reader.slice(tiles_offset as usize, (cells * TILE_SIZE_BYTES) as usize)?;
        let tiles = raw
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        layers.push(LevelLayer {
            name: reader.fixed_str(base + 4, 32)?,
            flags: LayerFlags(reader.u32(base)?),
            fill_tile: reader.i32(base + 36)?,
            width,
            height,
            tile_width: reader.u8(base + 44)? as u32,
            tile_height: reader.u8(base + 45)? as u32,
            parallax_x: reader.u8(base + 46)? as u32,
            parallax_y: reader.u8(base + 47)? as u32,
            tiles,
        });
    }
    Ok(layers)
}

fn read_objects(
    reader: &ByteReader<'_>,
    table: u32,
    declared: u32,
    warnings: &mut Vec<ParseWarning>,
) -> Result<Vec<LevelObject>, ParseError> {
    let mut objects = Vec::new();
    for i in 0..declared as usize {
        let base = table as usize + i * OBJECT_RECORD_SIZE;
        if reader.get(base, OBJECT_RECORD_SIZE).is_none() {
            push_warning(
                warnings,
                ParseWarning::ObjectTableTruncated {
                    declared,
                    parsed: objects.len(),
                },
            );
            break;
        }
        objects.push(read_object(reader, base)?);
    }
    Ok(objects)
}

fn read_rect(reader: &ByteReader<'_>, at: usize) -> Result<Rect, ParseError> {
    Ok(Rect::new(
        reader.i32(at)?,
        reader.i32(at + 4)?,
        reader.i32(at + 8)?,
        reader.i32(at + 12)?,
    ))
}

fn read_object(reader: &ByteReader<'_>, base: usize) -> Result<LevelObject, ParseError> {
    let i32_at = |offset: usize| reader.i32(base + offset);

    let mut user_values = [0i32; 8];
    for (i, value) in user_values.iter_mut().enumerate() {
        *value = i32_at(264 + i * 4)?;
    }

    Ok(LevelObject {
        id: reader.u32(base)?,
        name: reader.fixed_str(base + 4, 32)?,
        logic: reader.fixed_str(base + 36, 32)?,
        image_set: reader.fixed_str(base + 68, 32)?,
        animation: reader.fixed_str(base + 100, 32)?,
        x: i32_at(132)?,
        y: i32_at(136)?,
        z: i32_at(140)?,
        image: i32_at(144)?,
        width: i32_at(148)?,
        height: i32_at(152)?,
        speed: i32_at(156)?,
        speed_x: i32_at(160)?,
        speed_y: i32_at(164)?,
        health: i32_at(168)?,
        damage: i32_at(172)?,
        points: i32_at(176)?,
        smarts: i32_at(180)?,
        powerup: i32_at(184)?,
        score: i32_at(188)?,
        direction: i32_at(192)?,
        face_dir: i32_at(196)?,
        move_rect: read_rect(reader, base + 200)?,
        hit_rect: read_rect(reader, base + 216)?,
        attack_rect: read_rect(reader, base + 232)?,
        clip_rect: read_rect(reader, base + 248)?,
        user_values,
        flags: ObjectFlags {
            draw: reader.u32(base + 296)?,
            dynamic: reader.u32(base + 300)?,
            add: reader.u32(base + 304)?,
            user: reader.u32(base + 308)?,
        },
        object_type: reader.u32(base + 312)?,
        type_flags: reader.u32(base + 316)?,
    })
}
