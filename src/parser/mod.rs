//! Parsers from markup to the map object graph.
//!
//! Parsing happens in two steps. The XML text is first read into a generic
//! [`Element`] tree; the per-element parsers then walk that tree and build
//! the types in [`crate::types`].
//!
//! # Usage
//!
//! ```ignore
//! use tmx::parser::{parse_element_tree, parse_map, Context};
//! use tmx::loader::{FileSystemReader, LoadOptions};
//!
//! let root = parse_element_tree(&std::fs::read_to_string("maps/level1.tmx")?)?;
//! let options = LoadOptions::default();
//! let mut ctx = Context::new(&FileSystemReader, &options);
//! let map = parse_map(&root, Path::new("maps"), &mut ctx)?;
//! ```

mod data;
mod element;
mod image;
mod layer;
mod map;
mod object;
mod properties;
mod tileset;
mod xml;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str;

use tracing::debug;

use crate::error::{TmxError, Result};
use crate::loader::{LoadOptions, ResourceReader};
use crate::types::Tileset;

pub use data::{decode_base64, decode_region, Compression, Encoding};
pub use element::Element;
pub use image::{parse_image, probe_dimensions};
pub use layer::{parse_layer, parse_layer_attributes, parse_tile_layer, Scope};
pub use map::parse_map;
pub use object::{parse_object, parse_object_group};
pub use properties::parse_properties;
pub use tileset::{parse_inline_tileset, parse_tileset, parse_tileset_document};
pub use xml::{parse_element_tree, read_element_tree};

/// State owned by a single load call.
///
/// Holds the resource reader used for external documents and the cache of
/// external tilesets already parsed during this load.
pub struct Context<'a> {
    reader: &'a dyn ResourceReader,
    pub(crate) options: &'a LoadOptions,
    tilesets: HashMap<PathBuf, Tileset>,
}

impl<'a> Context<'a> {
    pub fn new(reader: &'a dyn ResourceReader, options: &'a LoadOptions) -> Self {
        Self {
            reader,
            options,
            tilesets: HashMap::new(),
        }
    }

    /// Read an external resource through the configured reader.
    pub fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.reader.read(path)
    }

    /// Read and parse an external document into an element tree.
    pub fn read_document(&self, path: &Path) -> Result<Element> {
        let bytes = self.read(path)?;
        let text = str::from_utf8(&bytes).map_err(|e| TmxError::Xml {
            message: format!("{} is not valid UTF-8: {}", path.display(), e),
        })?;
        parse_element_tree(text)
    }

    /// The external tileset at `path`, with `source` set and `first_gid` 0.
    ///
    /// Each call returns an independent copy; with caching enabled the
    /// document is only read and parsed the first time.
    pub fn external_tileset(&mut self, path: &Path) -> Result<Tileset> {
        if let Some(cached) = self.tilesets.get(path) {
            return Ok(cached.clone());
        }

        debug!(path = %path.display(), "loading external tileset");
        let root = self.read_document(path)?;
        let base_dir = path.parent().unwrap_or(Path::new(""));

        let mut tileset = parse_tileset_document(&root, base_dir, self)?;
        tileset.first_gid = 0;
        tileset.source = Some(path.to_path_buf());

        if self.options.cache_external_tilesets {
            self.tilesets.insert(path.to_path_buf(), tileset.clone());
        }
        Ok(tileset)
    }
}
