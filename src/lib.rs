//! tmx - Loader for TMX/TSX tile-map documents
//!
//! Reads a map document (and the external tilesets it references) into an
//! immutable object graph: grid settings, tilesets with global tile id
//! resolution, and an ordered tree of tile, object, image and group layers.
//!
//! ```ignore
//! let map = tmx::load_map("maps/level1.tmx")?;
//! for layer in map.layers.tile_layers().iter() {
//!     for tile in layer.occupied() {
//!         if let Some((tileset, local_id)) = map.tileset_for_gid(tile.gid) {
//!             println!("{} uses tile {} of {}", layer.attributes.name, local_id, tileset.name);
//!         }
//!     }
//! }
//! ```

pub mod cli;
pub mod error;
pub mod loader;
pub mod output;
pub mod parser;
pub mod types;

pub use error::{Result, TmxError};
pub use loader::{load_map, FileSystemReader, LoadOptions, Loader, ResourceBundle, ResourceReader};
pub use parser::Element;
pub use types::{
    resolve_gid, Colour, Group, Image, ImageLayer, Layer, LayerKind, LayerSet, Map, MapObject,
    NamedCollection, ObjectGroup, ObjectKind, Orientation, Tileset, TilesetTile, TileLayer,
    TileRef,
};
