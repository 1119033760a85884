//! Object groups and the objects placed in them.

use std::str::FromStr;

use crate::error::{TmxError, Result};

use super::collection::{Named, NamedCollection};
use super::colour::Colour;
use super::layer::LayerAttributes;
use super::tile::TileRef;
use super::Properties;

/// A layer (or per-tile collision group) of free-floating objects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectGroup {
    pub attributes: LayerAttributes,
    /// Display colour of the group's objects.
    pub color: Option<Colour>,
    pub draw_order: DrawOrder,
    /// Objects keyed by name; unnamed objects share the empty name.
    pub objects: NamedCollection<MapObject>,
}

impl Named for ObjectGroup {
    fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// How objects of a group are ordered when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawOrder {
    /// Sorted by y coordinate.
    #[default]
    TopDown,
    /// Document order.
    Index,
}

impl FromStr for DrawOrder {
    type Err = TmxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "topdown" => Ok(Self::TopDown),
            "index" => Ok(Self::Index),
            _ => Err(TmxError::Format {
                message: format!("Unknown draw order '{}'", s),
                help: Some("Expected 'topdown' or 'index'".to_string()),
            }),
        }
    }
}

/// The shape an object describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectKind {
    #[default]
    Basic,
    Tile,
    Ellipse,
    Point,
    Polygon,
    Polyline,
    Text,
}

/// A single object of an object group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapObject {
    pub id: Option<u32>,
    pub name: String,
    /// Free-form type (`class` in newer documents).
    pub object_type: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    pub visible: bool,
    pub kind: ObjectKind,
    /// Tile drawn by a tile object; its coordinate is the rounded position.
    pub tile: Option<TileRef>,
    /// Vertices of polygons and polylines, relative to (`x`, `y`).
    pub points: Option<Vec<(f64, f64)>>,
    /// Content of text objects.
    pub text: Option<String>,
    pub properties: Properties,
}

impl Named for MapObject {
    fn name(&self) -> &str {
        &self.name
    }
}
