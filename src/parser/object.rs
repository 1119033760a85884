//! `<objectgroup>` and `<object>` elements.

use crate::error::{TmxError, Result};
use crate::types::{MapObject, ObjectGroup, ObjectKind, TileRef};

use super::element::Element;
use super::layer::parse_layer_attributes;
use super::properties::parse_properties;

/// Parse an object group, either a map layer or a tile's collision group.
pub fn parse_object_group(element: &Element) -> Result<ObjectGroup> {
    let mut group = ObjectGroup {
        attributes: parse_layer_attributes(element)?,
        color: element.colour_attr("color")?,
        draw_order: element.enum_attr("draworder")?.unwrap_or_default(),
        ..Default::default()
    };

    for child in element.children_named("object") {
        group.objects.add(parse_object(child)?);
    }

    Ok(group)
}

/// Parse a single object.
///
/// The shape is taken from the first marker present: a `gid` attribute,
/// then an `<ellipse>`, `<point>`, `<polygon>`, `<polyline>` or `<text>`
/// child.
pub fn parse_object(element: &Element) -> Result<MapObject> {
    let mut object = MapObject {
        id: element.parse_attr("id")?,
        name: element.attr("name").unwrap_or_default().to_string(),
        object_type: element
            .attr("class")
            .or_else(|| element.attr("type"))
            .unwrap_or_default()
            .to_string(),
        x: element.required_parse("x")?,
        y: element.required_parse("y")?,
        width: element.parse_or("width", 0.0)?,
        height: element.parse_or("height", 0.0)?,
        rotation: element.parse_or("rotation", 0.0)?,
        visible: element.bool_attr("visible")?.unwrap_or(true),
        properties: parse_properties(element)?,
        ..Default::default()
    };

    if let Some(gid) = element.parse_attr::<u32>("gid")? {
        object.kind = ObjectKind::Tile;
        object.tile = Some(TileRef::from_code(
            gid,
            object.x.round() as i32,
            object.y.round() as i32,
        ));
    } else if element.child("ellipse").is_some() {
        object.kind = ObjectKind::Ellipse;
    } else if element.child("point").is_some() {
        object.kind = ObjectKind::Point;
    } else if let Some(polygon) = element.child("polygon") {
        object.kind = ObjectKind::Polygon;
        object.points = Some(parse_points(polygon)?);
    } else if let Some(polyline) = element.child("polyline") {
        object.kind = ObjectKind::Polyline;
        object.points = Some(parse_points(polyline)?);
    } else if let Some(text) = element.child("text") {
        object.kind = ObjectKind::Text;
        object.text = Some(text.text.clone());
    }

    Ok(object)
}

/// Parse a `points="x,y x,y ..."` list.
fn parse_points(element: &Element) -> Result<Vec<(f64, f64)>> {
    let points = element.required_attr("points")?;

    points
        .split_whitespace()
        .map(|pair| {
            let (x, y) = pair.split_once(',').ok_or_else(|| invalid_point(element, points))?;
            let x = x.trim().parse().map_err(|_| invalid_point(element, points))?;
            let y = y.trim().parse().map_err(|_| invalid_point(element, points))?;
            Ok((x, y))
        })
        .collect()
}

fn invalid_point(element: &Element, points: &str) -> TmxError {
    TmxError::InvalidAttribute {
        element: element.name.clone(),
        attribute: "points".to_string(),
        value: points.to_string(),
    }
}
