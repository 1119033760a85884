//! The map document: grid settings, tilesets and layers.

use std::str::FromStr;

use crate::error::{TmxError, Result};

use super::collection::NamedCollection;
use super::colour::Colour;
use super::layer::LayerSet;
use super::tileset::{resolve_gid, Tileset, TilesetTile};
use super::Properties;

/// A fully loaded map document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    /// Format version of the document.
    pub version: Option<String>,
    /// Version of the editor that wrote the document.
    pub tiled_version: Option<String>,
    pub orientation: Orientation,
    pub render_order: RenderOrder,
    /// Grid size in cells.
    pub width: u32,
    pub height: u32,
    /// Cell size in pixels.
    pub tile_width: u32,
    pub tile_height: u32,
    /// Only set for hexagonal maps.
    pub hex_side_length: Option<u32>,
    /// Only set for staggered and hexagonal maps.
    pub stagger_axis: Option<StaggerAxis>,
    /// Only set for staggered and hexagonal maps.
    pub stagger_index: Option<StaggerIndex>,
    pub background_color: Option<Colour>,
    pub next_layer_id: Option<u32>,
    pub next_object_id: Option<u32>,
    /// Tile layers are stored as chunks.
    pub infinite: bool,
    pub properties: Properties,
    pub tilesets: NamedCollection<Tileset>,
    pub layers: LayerSet,
}

impl Map {
    /// The tileset owning `gid` and the local tile index within it.
    pub fn tileset_for_gid(&self, gid: u32) -> Option<(&Tileset, u32)> {
        resolve_gid(&self.tilesets, gid)
    }

    /// Per-tile metadata for a global id, when its tileset declares any.
    pub fn tile_for_gid(&self, gid: u32) -> Option<&TilesetTile> {
        self.tileset_for_gid(gid)
            .and_then(|(tileset, local)| tileset.tile(local))
    }

    /// Map size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.saturating_mul(self.tile_width),
            self.height.saturating_mul(self.tile_height),
        )
    }
}

fn unknown_value(what: &str, value: &str, expected: &[&str]) -> TmxError {
    TmxError::Format {
        message: format!("Unknown {} '{}'", what, value),
        help: Some(format!("Expected one of: {}", expected.join(", "))),
    }
}

/// Grid projection of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Unknown,
    Orthogonal,
    Isometric,
    Staggered,
    Hexagonal,
}

impl Orientation {
    const NAMES: &'static [&'static str] =
        &["unknown", "orthogonal", "isometric", "staggered", "hexagonal"];

    /// Whether stagger axis/index apply.
    pub fn is_staggered(self) -> bool {
        matches!(self, Self::Staggered | Self::Hexagonal)
    }

    pub fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

impl FromStr for Orientation {
    type Err = TmxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "orthogonal" => Ok(Self::Orthogonal),
            "isometric" => Ok(Self::Isometric),
            "staggered" => Ok(Self::Staggered),
            "hexagonal" => Ok(Self::Hexagonal),
            _ => Err(unknown_value("orientation", s, Self::NAMES)),
        }
    }
}

/// Order in which tiles are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderOrder {
    #[default]
    RightDown,
    RightUp,
    LeftDown,
    LeftUp,
}

impl RenderOrder {
    const NAMES: &'static [&'static str] = &["right-down", "right-up", "left-down", "left-up"];

    pub fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

impl FromStr for RenderOrder {
    type Err = TmxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "right-down" => Ok(Self::RightDown),
            "right-up" => Ok(Self::RightUp),
            "left-down" => Ok(Self::LeftDown),
            "left-up" => Ok(Self::LeftUp),
            _ => Err(unknown_value("render order", s, Self::NAMES)),
        }
    }
}

/// Which axis is staggered on staggered and hexagonal maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaggerAxis {
    X,
    Y,
}

impl FromStr for StaggerAxis {
    type Err = TmxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            _ => Err(unknown_value("stagger axis", s, &["x", "y"])),
        }
    }
}

/// Whether odd or even rows/columns are shifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaggerIndex {
    Odd,
    Even,
}

impl FromStr for StaggerIndex {
    type Err = TmxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "odd" => Ok(Self::Odd),
            "even" => Ok(Self::Even),
            _ => Err(unknown_value("stagger index", s, &["odd", "even"])),
        }
    }
}
