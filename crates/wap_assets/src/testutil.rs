//! Binary builders for tests: assemble REZ, WWD and PID buffers from
//! structured descriptions.

use crate::{pid, rez, wwd};
use wap_core::{LevelHeader, LevelLayer, LevelObject, Rect, SpriteFlags};

fn put_u32(out: &mut [u8], at: usize, value: u32) {
    out[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_i32(out: &mut [u8], at: usize, value: i32) {
    out[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

/// Write a NUL-padded fixed-width string field
fn put_str(out: &mut [u8], at: usize, width: usize, value: &str) {
    let bytes: Vec<u8> = value.chars().map(|c| c as u8).collect();
    let len = bytes.len().min(width - 1);
    out[at..at + len].copy_from_slice(&bytes[..len]);
}

// ─── PID ─────────────────────────────────────────────────────────────────────

/// Build a sprite frame: header, optional private palette, payload
pub fn pid_bytes(
    width: u16,
    height: u16,
    pivot: (i16, i16),
    flags: SpriteFlags,
    embedded_palette: Option<&[u8]>,
    payload: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(pid::HEADER_SIZE + payload.len());
    out.extend_from_slice(pid::PID_SIGNATURE);
    out.push(0);
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&pivot.0.to_le_bytes());
    out.extend_from_slice(&pivot.1.to_le_bytes());
    out.extend_from_slice(&flags.0.to_le_bytes());
    if let Some(palette) = embedded_palette {
        out.extend_from_slice(palette);
    }
    out.extend_from_slice(payload);
    out
}

// ─── REZ ─────────────────────────────────────────────────────────────────────

pub enum RezContent {
    File(Vec<u8>),
    Dir(Vec<RezNode>),
}

pub struct RezNode {
    name: String,
    timestamp: u32,
    content: RezContent,
}

impl RezNode {
    pub fn file(name: &str, data: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            timestamp: 0,
            content: RezContent::File(data.to_vec()),
        }
    }

    pub fn dir(name: &str, children: Vec<RezNode>) -> Self {
        Self {
            name: name.to_string(),
            timestamp: 0,
            content: RezContent::Dir(children),
        }
    }

    pub fn with_timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = timestamp;
        self
    }

    fn file_count(&self) -> u32 {
        match &self.content {
            RezContent::File(_) => 1,
            RezContent::Dir(children) => children.iter().map(RezNode::file_count).sum(),
        }
    }
}

/// Builds an archive with the root chain starting right after the header.
/// Sibling records are laid out contiguously, followed by their file data and
/// child chains.
pub struct RezBuilder {
    version: u32,
    declared_files: Option<u32>,
    nodes: Vec<RezNode>,
}

impl Default for RezBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RezBuilder {
    pub fn new() -> Self {
        Self {
            version: rez::REZ_VERSION,
            declared_files: None,
            nodes: Vec::new(),
        }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn declared_files(mut self, count: u32) -> Self {
        self.declared_files = Some(count);
        self
    }

    pub fn node(mut self, node: RezNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = vec![0u8; rez::HEADER_SIZE];
        out[..3].copy_from_slice(rez::REZ_SIGNATURE);
        put_u32(&mut out, 4, self.version);
        let declared = self
            .declared_files
            .unwrap_or_else(|| self.nodes.iter().map(RezNode::file_count).sum());
        put_u32(&mut out, 12, declared);

        let root = write_chain(&mut out, &self.nodes);
        put_u32(&mut out, 8, root);
        out
    }
}

fn write_chain(out: &mut Vec<u8>, nodes: &[RezNode]) -> u32 {
    if nodes.is_empty() {
        return 0;
    }

    let mut offsets = Vec::with_capacity(nodes.len());
    for node in nodes {
        offsets.push(out.len());
        let (name, ext) = match &node.content {
            RezContent::File(_) => match node.name.rsplit_once('.') {
                Some((name, ext)) => (name, ext),
                None => (node.name.as_str(), ""),
            },
            RezContent::Dir(_) => (node.name.as_str(), ""),
        };

        let mut record = [0u8; rez::NODE_SIZE];
        put_u32(&mut record, 12, node.timestamp);
        record[16] = matches!(node.content, RezContent::Dir(_)) as u8;
        record[17] = name.len() as u8;
        record[18] = ext.len() as u8;
        out.extend_from_slice(&record);
        out.extend_from_slice(name.as_bytes());
        out.push(0);
        if let RezContent::File(_) = node.content {
            out.extend_from_slice(ext.as_bytes());
            out.push(0);
        }
    }

    for (i, node) in nodes.iter().enumerate() {
        let at = offsets[i];
        let next = offsets.get(i + 1).copied().unwrap_or(0) as u32;
        put_u32(out, at, next);
        match &node.content {
            RezContent::File(data) => {
                let data_offset = out.len() as u32;
                out.extend_from_slice(data);
                put_u32(out, at + 4, data_offset);
                put_u32(out, at + 8, data.len() as u32);
            }
            RezContent::Dir(children) => {
                let first = write_chain(out, children);
                put_u32(out, at + 4, first);
            }
        }
    }

    offsets[0] as u32
}

// ─── WWD ─────────────────────────────────────────────────────────────────────

/// Builds a level: header, layer table, tile arrays, then the object table
pub struct WwdBuilder {
    version: u32,
    header: LevelHeader,
    layers: Vec<LevelLayer>,
    objects: Vec<LevelObject>,
}

impl Default for WwdBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WwdBuilder {
    pub fn new() -> Self {
        Self {
            version: wwd::WWD_VERSION,
            header: LevelHeader::default(),
            layers: Vec::new(),
            objects: Vec::new(),
        }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn header(mut self, header: LevelHeader) -> Self {
        self.header = header;
        self
    }

    pub fn layer(mut self, layer: LevelLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn object(mut self, object: LevelObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = vec![0u8; wwd::HEADER_SIZE];
        let h = &self.header;
        out[..4].copy_from_slice(wwd::WWD_MAGIC);
        put_u32(&mut out, 4, self.version);
        put_u32(&mut out, 8, h.flags);
        put_str(&mut out, 16, 64, &h.name);
        put_str(&mut out, 80, 64, &h.author);
        put_str(&mut out, 144, 64, &h.created);
        put_str(&mut out, 208, 256, &h.rez_path);
        put_str(&mut out, 464, 128, &h.image_dir);
        put_str(&mut out, 592, 128, &h.palette_path);
        put_i32(&mut out, 720, h.start.x);
        put_i32(&mut out, 724, h.start.y);
        put_str(&mut out, 748, 128, &h.launch_path);
        for (i, set) in h.image_sets.iter().enumerate() {
            put_str(&mut out, 876 + i * 128, 128, set);
        }
        for (i, prefix) in h.prefixes.iter().enumerate() {
            put_str(&mut out, 1388 + i * 32, 32, prefix);
        }

        let table = out.len();
        put_u32(&mut out, 732, self.layers.len() as u32);
        put_u32(&mut out, 736, table as u32);
        out.resize(table + self.layers.len() * wwd::LAYER_HEADER_SIZE, 0);

        for (i, layer) in self.layers.iter().enumerate() {
            let base = table + i * wwd::LAYER_HEADER_SIZE;
            let tiles_offset = out.len() as u32;
            for tile in &layer.tiles {
                out.extend_from_slice(&tile.to_le_bytes());
            }
            put_u32(&mut out, base, layer.flags.0);
            put_str(&mut out, base + 4, 32, &layer.name);
            put_i32(&mut out, base + 36, layer.fill_tile);
            out[base + 40..base + 42].copy_from_slice(&(layer.width as u16).to_le_bytes());
            out[base + 42..base + 44].copy_from_slice(&(layer.height as u16).to_le_bytes());
            out[base + 44] = layer.tile_width as u8;
            out[base + 45] = layer.tile_height as u8;
            out[base + 46] = layer.parallax_x as u8;
            out[base + 47] = layer.parallax_y as u8;
            put_u32(&mut out, base + 48, tiles_offset);
        }

        let objects_offset = out.len() as u32;
        put_u32(&mut out, 740, self.objects.len() as u32);
        put_u32(&mut out, 744, objects_offset);
        for object in &self.objects {
            out.extend_from_slice(&object_record(object));
        }
        out
    }
}

fn put_rect(out: &mut [u8], at: usize, rect: &Rect) {
    put_i32(out, at, rect.left);
    put_i32(out, at + 4, rect.top);
    put_i32(out, at + 8, rect.right);
    put_i32(out, at + 12, rect.bottom);
}

fn object_record(object: &LevelObject) -> [u8; wwd::OBJECT_RECORD_SIZE] {
    let mut out = [0u8; wwd::OBJECT_RECORD_SIZE];
    put_u32(&mut out, 0, object.id);
    put_str(&mut out, 4, 32, &object.name);
    put_str(&mut out, 36, 32, &object.logic);
    put_str(&mut out, 68, 32, &object.image_set);
    put_str(&mut out, 100, 32, &object.animation);

    let ints = [
        object.x,
        object.y,
        object.z,
        object.image,
        object.width,
        object.height,
        object.speed,
        object.speed_x,
        object.speed_y,
        object.health,
        object.damage,
        object.points,
        object.smarts,
        object.powerup,
        object.score,
        object.direction,
        object.face_dir,
    ];
    for (i, value) in ints.iter().enumerate() {
        put_i32(&mut out, 132 + i * 4, *value);
    }

    put_rect(&mut out, 200, &object.move_rect);
    put_rect(&mut out, 216, &object.hit_rect);
    put_rect(&mut out, 232, &object.attack_rect);
    put_rect(&mut out, 248, &object.clip_rect);
    for (i, value) in object.user_values.iter().enumerate() {
        put_i32(&mut out, 264 + i * 4, *value);
    }
    put_u32(&mut out, 296, object.flags.draw);
    put_u32(&mut out, 300, object.flags.dynamic);
    put_u32(&mut out, 304, object.flags.add);
    put_u32(&mut out, 308, object.flags.user);
    put_u32(&mut out, 312, object.object_type);
    put_u32(&mut out, 316, object.type_flags);
    out
}
