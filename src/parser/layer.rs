//! Layer elements: `<layer>`, `<objectgroup>`, `<imagelayer>` and `<group>`.

use std::path::Path;

use tracing::debug;

use crate::error::{TmxError, Result};
use crate::types::{Group, ImageLayer, Layer, LayerAttributes, LayerSet, Region, TileLayer};

use super::data::{decode_region, Compression, Encoding};
use super::element::Element;
use super::image::parse_image;
use super::object::parse_object_group;
use super::properties::parse_properties;
use super::Context;

/// Map-wide settings threaded through nested layer parsing.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// Grid size used when a tile layer omits its own.
    pub width: u32,
    pub height: u32,
    /// Directory relative image sources resolve against.
    pub base_dir: &'a Path,
}

/// Parse one child of a map or group.
///
/// Returns `None` for tags that are not layers; the caller decides whether
/// they mean anything.
pub fn parse_layer(element: &Element, scope: &Scope<'_>, ctx: &Context<'_>) -> Result<Option<Layer>> {
    let layer = match element.name.as_str() {
        "layer" => Layer::Tiles(parse_tile_layer(element, scope)?),
        "objectgroup" => Layer::Objects(parse_object_group(element)?),
        "imagelayer" => Layer::Image(parse_image_layer(element, scope, ctx)?),
        "group" => Layer::Group(parse_group(element, scope, ctx)?),
        _ => return Ok(None),
    };
    Ok(Some(layer))
}

/// Attributes shared by every layer variant.
pub fn parse_layer_attributes(element: &Element) -> Result<LayerAttributes> {
    Ok(LayerAttributes {
        id: element.parse_attr("id")?,
        name: element.attr("name").unwrap_or_default().to_string(),
        opacity: element.parse_or("opacity", 1.0)?,
        visible: element.bool_attr("visible")?.unwrap_or(true),
        offset_x: element.parse_or("offsetx", 0.0)?,
        offset_y: element.parse_or("offsety", 0.0)?,
        tint: element.colour_attr("tintcolor")?,
        properties: parse_properties(element)?,
    })
}

/// Parse a tile layer and decode its cells.
///
/// Finite layers hold one region covering the grid; infinite layers hold
/// one region per `<chunk>`, concatenated in document order.
pub fn parse_tile_layer(element: &Element, scope: &Scope<'_>) -> Result<TileLayer> {
    let attributes = parse_layer_attributes(element)?;
    let width = element.parse_or("width", scope.width)?;
    let height = element.parse_or("height", scope.height)?;

    let data = element.child("data").ok_or_else(|| TmxError::Format {
        message: format!("Tile layer '{}' has no <data> element", attributes.name),
        help: None,
    })?;
    let encoding = Encoding::from_attr(data.attr("encoding"))?;
    let compression = Compression::from_attr(data.attr("compression"))?;

    let mut tiles = Vec::new();
    let mut regions = Vec::new();

    let chunks: Vec<&Element> = data.children_named("chunk").collect();
    if chunks.is_empty() {
        let region = Region::new(0, 0, width, height);
        tiles = decode_region(data, encoding, compression, region)?;
        regions.push(region);
    } else {
        for chunk in chunks {
            let region = Region::new(
                chunk.required_parse("x")?,
                chunk.required_parse("y")?,
                chunk.required_parse("width")?,
                chunk.required_parse("height")?,
            );
            tiles.extend(decode_region(chunk, encoding, compression, region)?);
            regions.push(region);
        }
    }

    Ok(TileLayer {
        attributes,
        width,
        height,
        tiles,
        regions,
    })
}

fn parse_image_layer(element: &Element, scope: &Scope<'_>, ctx: &Context<'_>) -> Result<ImageLayer> {
    Ok(ImageLayer {
        attributes: parse_layer_attributes(element)?,
        width: element.parse_attr("width")?,
        height: element.parse_attr("height")?,
        image: element
            .child("image")
            .map(|image| parse_image(image, scope.base_dir, ctx))
            .transpose()?,
        repeat_x: element.bool_attr("repeatx")?.unwrap_or(false),
        repeat_y: element.bool_attr("repeaty")?.unwrap_or(false),
    })
}

fn parse_group(element: &Element, scope: &Scope<'_>, ctx: &Context<'_>) -> Result<Group> {
    let mut layers = LayerSet::new();
    for child in &element.children {
        match parse_layer(child, scope, ctx)? {
            Some(layer) => layers.push(layer),
            None if child.name == "properties" => {}
            None => debug!(element = %child.name, parent = "group", "ignoring unknown element"),
        }
    }

    Ok(Group {
        attributes: parse_layer_attributes(element)?,
        layers,
    })
}
