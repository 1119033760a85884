//! Core domain types: the object graph produced by a load.
//!
//! - `Map` - grid settings, tilesets and layers
//! - `Tileset` - tile sheets and the global id resolution over them
//! - `Layer` - tile layers, object groups, image layers and groups
//! - `TileRef` - a decoded cell with its flip flags
//! - `NamedCollection` - ordered, uniquely keyed storage of named items

mod collection;
mod colour;
mod layer;
mod map;
mod object;
mod tile;
mod tileset;

use std::collections::HashMap;

pub use collection::{Named, NamedCollection};
pub use colour::Colour;
pub use layer::{
    Group, ImageLayer, Layer, LayerAttributes, LayerKind, LayerSet, LayerView, TileLayer,
};
pub use map::{Map, Orientation, RenderOrder, StaggerAxis, StaggerIndex};
pub use object::{DrawOrder, MapObject, ObjectGroup, ObjectKind};
pub use tile::{
    Region, TileRef, FLIPPED_DIAGONALLY, FLIPPED_HORIZONTALLY, FLIPPED_VERTICALLY, GID_MASK,
};
pub use tileset::{resolve_gid, Corner, Frame, Image, Terrain, TileOffset, Tileset, TilesetTile};

/// Custom string properties attached to most elements.
pub type Properties = HashMap<String, String>;
