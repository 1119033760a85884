//! Tilesets and global tile id resolution.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::collection::{Named, NamedCollection};
use super::colour::Colour;
use super::object::ObjectGroup;
use super::tile::GID_MASK;
use super::Properties;

/// A tileset: a sheet (or collection) of tiles owning a contiguous range of
/// global tile ids starting at `first_gid`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tileset {
    /// Smallest global id owned by this tileset. Zero for a tileset loaded
    /// on its own rather than through a map.
    pub first_gid: u32,
    pub name: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub spacing: u32,
    pub margin: u32,
    pub columns: Option<u32>,
    pub tile_count: Option<u32>,
    pub tile_offset: TileOffset,
    pub image: Option<Image>,
    pub terrains: NamedCollection<Terrain>,
    /// Per-tile metadata keyed by local tile id.
    pub tiles: BTreeMap<u32, TilesetTile>,
    pub properties: Properties,
    /// Resolved path of the external document this tileset was read from.
    pub source: Option<PathBuf>,
}

impl Tileset {
    /// Whether `gid` falls inside this tileset's declared range.
    ///
    /// Without a tile count the range is open-ended.
    pub fn contains_gid(&self, gid: u32) -> bool {
        let gid = gid & GID_MASK;
        if gid == 0 || gid < self.first_gid {
            return false;
        }
        match self.tile_count {
            Some(count) => u64::from(gid) < u64::from(self.first_gid) + u64::from(count),
            None => true,
        }
    }

    /// Metadata for a local tile id, if the tileset declares any.
    pub fn tile(&self, local_id: u32) -> Option<&TilesetTile> {
        self.tiles.get(&local_id)
    }

    /// The terrain marked on one corner of a tile.
    pub fn tile_terrain(&self, tile: &TilesetTile, corner: Corner) -> Option<&Terrain> {
        tile.terrain_index(corner)
            .and_then(|i| self.terrains.get_index(i))
    }

    /// Number of tile rows, when the sheet layout is known.
    pub fn rows(&self) -> Option<u32> {
        match (self.columns, self.tile_count) {
            (Some(columns), Some(count)) if columns > 0 => Some(count.div_ceil(columns)),
            _ => None,
        }
    }
}

impl Named for Tileset {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Find the tileset owning a global tile id.
///
/// Picks the tileset with the greatest `first_gid` not above `gid` (the
/// first one scanned on ties) and returns it with the local tile index.
/// A gid of zero is an empty cell and never resolves.
pub fn resolve_gid<'a, I>(tilesets: I, gid: u32) -> Option<(&'a Tileset, u32)>
where
    I: IntoIterator<Item = &'a Tileset>,
{
    let gid = gid & GID_MASK;
    if gid == 0 {
        return None;
    }

    let mut best: Option<&Tileset> = None;
    for tileset in tilesets {
        if tileset.first_gid > gid {
            continue;
        }
        if best.map_or(true, |b| tileset.first_gid > b.first_gid) {
            best = Some(tileset);
        }
    }

    best.map(|tileset| (tileset, gid - tileset.first_gid))
}

/// Drawing offset applied to every tile of a tileset, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileOffset {
    pub x: i32,
    pub y: i32,
}

/// An image reference: an external file or an inline encoded payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    /// Path resolved against the directory of the referencing document.
    pub source: Option<PathBuf>,
    /// Declared format of inline data (e.g. `png`).
    pub format: Option<String>,
    /// Decoded inline image bytes.
    pub data: Option<Vec<u8>>,
    /// Colour treated as transparent.
    pub trans: Option<Colour>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Image {
    /// Declared pixel size, if both dimensions are present.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }
}

/// A named terrain type of a tileset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Terrain {
    pub name: String,
    /// Local id of the tile representing this terrain (-1 for none).
    pub tile: i32,
    pub properties: Properties,
}

impl Named for Terrain {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Tile corners carrying terrain markers, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

/// Metadata attached to a single tile of a tileset.
#[derive(Debug, Clone, PartialEq)]
pub struct TilesetTile {
    pub id: u32,
    /// Terrain indices per corner; `None` means no marker.
    pub terrain: [Option<usize>; 4],
    pub probability: f64,
    /// Free-form type (`class` in newer documents).
    pub tile_type: String,
    pub image: Option<Image>,
    pub object_groups: NamedCollection<ObjectGroup>,
    pub animation: Vec<Frame>,
    pub properties: Properties,
}

impl Default for TilesetTile {
    fn default() -> Self {
        Self {
            id: 0,
            terrain: [None; 4],
            probability: 1.0,
            tile_type: String::new(),
            image: None,
            object_groups: NamedCollection::default(),
            animation: Vec::new(),
            properties: Properties::new(),
        }
    }
}

impl TilesetTile {
    pub fn terrain_index(&self, corner: Corner) -> Option<usize> {
        self.terrain[corner as usize]
    }

    pub fn is_animated(&self) -> bool {
        !self.animation.is_empty()
    }
}

/// One step of a tile animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Frame {
    /// Local id of the tile shown during this frame.
    pub tile_id: u32,
    pub duration_ms: u32,
}
