//! Public load entry points.
//!
//! A [`Loader`] carries the resource reader and [`LoadOptions`] and turns a
//! path, a byte stream or an already-parsed element tree into a [`Map`].
//! Each call is self-contained: nothing is shared between loads.

mod source;

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::parser::{parse_map, read_element_tree, Context, Element};
use crate::types::{Map, Tileset};

pub use source::{resolve_path, FileSystemReader, ResourceBundle, ResourceReader};

/// Options for loading documents.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Fill missing image width/height by reading the image header.
    pub probe_image_sizes: bool,
    /// Parse each external tileset document at most once per load.
    pub cache_external_tilesets: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            probe_image_sizes: false,
            cache_external_tilesets: true,
        }
    }
}

/// Loads map and tileset documents through a [`ResourceReader`].
pub struct Loader {
    reader: Box<dyn ResourceReader>,
    options: LoadOptions,
}

impl Loader {
    /// A loader reading from the filesystem.
    pub fn new() -> Self {
        Self::with_reader(FileSystemReader)
    }

    /// A loader reading every resource through `reader`.
    pub fn with_reader(reader: impl ResourceReader + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            options: LoadOptions::default(),
        }
    }

    /// A loader serving bundled resources first, then the filesystem.
    pub fn with_bundle(bundle: ResourceBundle) -> Self {
        Self::with_reader(bundle)
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load a map document; relative sources resolve against its directory.
    pub fn load_map(&self, path: impl AsRef<Path>) -> Result<Map> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading map");

        let mut ctx = self.context();
        let root = ctx.read_document(path)?;
        let map = parse_map(&root, parent_dir(path), &mut ctx)?;

        log_loaded(&map);
        Ok(map)
    }

    /// Load a map from a byte stream.
    ///
    /// `base_dir` stands in for the document's directory.
    pub fn load_map_from_reader<R: BufRead>(&self, reader: R, base_dir: impl AsRef<Path>) -> Result<Map> {
        let root = read_element_tree(reader)?;
        self.load_map_from_tree(&root, base_dir)
    }

    /// Load a map from XML text.
    pub fn load_map_from_str(&self, source: &str, base_dir: impl AsRef<Path>) -> Result<Map> {
        self.load_map_from_reader(source.as_bytes(), base_dir)
    }

    /// Load a map from an already-parsed element tree.
    pub fn load_map_from_tree(&self, root: &Element, base_dir: impl AsRef<Path>) -> Result<Map> {
        debug!(base_dir = %base_dir.as_ref().display(), "loading map from tree");

        let mut ctx = self.context();
        let map = parse_map(root, base_dir.as_ref(), &mut ctx)?;

        log_loaded(&map);
        Ok(map)
    }

    /// Load a standalone tileset document; its `first_gid` is 0.
    pub fn load_tileset(&self, path: impl AsRef<Path>) -> Result<Tileset> {
        let mut ctx = self.context();
        let tileset = ctx.external_tileset(path.as_ref())?;

        debug!(name = %tileset.name, tiles = tileset.tiles.len(), "loaded tileset");
        Ok(tileset)
    }

    fn context(&self) -> Context<'_> {
        Context::new(self.reader.as_ref(), &self.options)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a map from the filesystem with default options.
pub fn load_map(path: impl AsRef<Path>) -> Result<Map> {
    Loader::new().load_map(path)
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new(""))
}

fn log_loaded(map: &Map) {
    debug!(
        orientation = map.orientation.as_str(),
        width = map.width,
        height = map.height,
        tilesets = map.tilesets.len(),
        layers = map.layers.len(),
        "loaded map"
    );
}
