//! The `<map>` root element.
//!
//! Map-level attributes are read first, then children are dispatched in
//! document order: tilesets into the tileset list, layers into the layer
//! set. Unknown children are skipped.

use std::path::Path;

use tracing::debug;

use crate::error::{TmxError, Result};
use crate::types::{Map, Orientation};

use super::element::Element;
use super::layer::{parse_layer, Scope};
use super::properties::parse_properties;
use super::tileset::parse_tileset;
use super::Context;

/// Build a [`Map`] from its root element.
///
/// `base_dir` is the directory relative tileset and image sources resolve
/// against.
pub fn parse_map(root: &Element, base_dir: &Path, ctx: &mut Context<'_>) -> Result<Map> {
    if root.name != "map" {
        return Err(TmxError::Format {
            message: format!("Expected a <map> document, found <{}>", root.name),
            help: Some("Tileset documents load with `Loader::load_tileset`".to_string()),
        });
    }

    let orientation: Orientation = root.enum_attr("orientation")?.unwrap_or_default();
    let stagger_axis = root.enum_attr("staggeraxis")?;
    let stagger_index = root.enum_attr("staggerindex")?;
    let hex_side_length = root.parse_attr("hexsidelength")?;

    let mut map = Map {
        version: root.attr("version").map(str::to_string),
        tiled_version: root.attr("tiledversion").map(str::to_string),
        orientation,
        render_order: root.enum_attr("renderorder")?.unwrap_or_default(),
        width: positive(root, "width")?,
        height: positive(root, "height")?,
        tile_width: positive(root, "tilewidth")?,
        tile_height: positive(root, "tileheight")?,
        hex_side_length: hex_side_length.filter(|_| orientation == Orientation::Hexagonal),
        stagger_axis: stagger_axis.filter(|_| orientation.is_staggered()),
        stagger_index: stagger_index.filter(|_| orientation.is_staggered()),
        background_color: root.colour_attr("backgroundcolor")?,
        next_layer_id: root.parse_attr("nextlayerid")?,
        next_object_id: root.parse_attr("nextobjectid")?,
        infinite: root.bool_attr("infinite")?.unwrap_or(false),
        properties: parse_properties(root)?,
        ..Default::default()
    };

    let scope = Scope {
        width: map.width,
        height: map.height,
        base_dir,
    };

    for child in &root.children {
        if child.name == "tileset" {
            map.tilesets.add(parse_tileset(child, base_dir, ctx)?);
            continue;
        }

        match parse_layer(child, &scope, ctx)? {
            Some(layer) => map.layers.push(layer),
            None if child.name == "properties" => {}
            None => debug!(element = %child.name, parent = "map", "ignoring unknown element"),
        }
    }

    Ok(map)
}

/// A required grid attribute that must be at least 1.
fn positive(element: &Element, key: &str) -> Result<u32> {
    let value: u32 = element.required_parse(key)?;
    if value == 0 {
        return Err(TmxError::InvalidAttribute {
            element: element.name.clone(),
            attribute: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value)
}
