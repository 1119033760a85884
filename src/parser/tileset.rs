//! `<tileset>` elements, inline or in external documents.

use std::path::Path;

use crate::error::{TmxError, Result};
use crate::loader::resolve_path;
use crate::types::{Frame, Terrain, TileOffset, Tileset, TilesetTile};

use super::element::Element;
use super::image::parse_image;
use super::object::parse_object_group;
use super::properties::parse_properties;
use super::Context;

/// Parse a tileset entry of a map.
///
/// An entry with a `source` attribute refers to an external document: the
/// document is read (once per load) and its tileset copied, with `firstgid`
/// taken from the referencing entry. Otherwise the entry is parsed in place.
pub fn parse_tileset(element: &Element, base_dir: &Path, ctx: &mut Context<'_>) -> Result<Tileset> {
    let Some(source) = element.attr("source") else {
        return parse_inline_tileset(element, base_dir, ctx);
    };

    let first_gid = element.required_parse("firstgid")?;
    let path = resolve_path(base_dir, source);

    let mut tileset = ctx.external_tileset(&path)?;
    tileset.first_gid = first_gid;
    Ok(tileset)
}

/// Parse the root of an external tileset document.
///
/// Relative paths inside it resolve against `base_dir`, the document's own
/// directory.
pub fn parse_tileset_document(root: &Element, base_dir: &Path, ctx: &Context<'_>) -> Result<Tileset> {
    if root.name != "tileset" {
        return Err(TmxError::Format {
            message: format!("Expected a <tileset> document, found <{}>", root.name),
            help: None,
        });
    }
    parse_inline_tileset(root, base_dir, ctx)
}

/// Parse a tileset defined in place.
///
/// A `source` attribute here is not followed.
pub fn parse_inline_tileset(element: &Element, base_dir: &Path, ctx: &Context<'_>) -> Result<Tileset> {
    let mut tileset = Tileset {
        first_gid: element.parse_or("firstgid", 0)?,
        name: element.attr("name").unwrap_or_default().to_string(),
        tile_width: element.required_parse("tilewidth")?,
        tile_height: element.required_parse("tileheight")?,
        spacing: element.parse_or("spacing", 0)?,
        margin: element.parse_or("margin", 0)?,
        columns: element.parse_attr("columns")?,
        tile_count: element.parse_attr("tilecount")?,
        tile_offset: parse_tile_offset(element)?,
        image: element
            .child("image")
            .map(|image| parse_image(image, base_dir, ctx))
            .transpose()?,
        properties: parse_properties(element)?,
        ..Default::default()
    };

    if let Some(terrains) = element.child("terraintypes") {
        for terrain in terrains.children_named("terrain") {
            tileset.terrains.add(Terrain {
                name: terrain.attr("name").unwrap_or_default().to_string(),
                tile: terrain.parse_or("tile", -1)?,
                properties: parse_properties(terrain)?,
            });
        }
    }

    for tile in element.children_named("tile") {
        let tile = parse_tile(tile, tileset.terrains.len(), base_dir, ctx)?;
        tileset.tiles.insert(tile.id, tile);
    }

    Ok(tileset)
}

fn parse_tile_offset(element: &Element) -> Result<TileOffset> {
    match element.child("tileoffset") {
        Some(offset) => Ok(TileOffset {
            x: offset.parse_or("x", 0)?,
            y: offset.parse_or("y", 0)?,
        }),
        None => Ok(TileOffset::default()),
    }
}

fn parse_tile(
    element: &Element,
    terrain_count: usize,
    base_dir: &Path,
    ctx: &Context<'_>,
) -> Result<TilesetTile> {
    let mut tile = TilesetTile {
        id: element.required_parse("id")?,
        terrain: element
            .attr("terrain")
            .map(|corners| parse_terrain_corners(corners, terrain_count))
            .unwrap_or([None; 4]),
        probability: element.parse_or("probability", 1.0)?,
        tile_type: element
            .attr("class")
            .or_else(|| element.attr("type"))
            .unwrap_or_default()
            .to_string(),
        image: element
            .child("image")
            .map(|image| parse_image(image, base_dir, ctx))
            .transpose()?,
        properties: parse_properties(element)?,
        ..Default::default()
    };

    for group in element.children_named("objectgroup") {
        tile.object_groups.add(parse_object_group(group)?);
    }

    if let Some(animation) = element.child("animation") {
        for frame in animation.children_named("frame") {
            tile.animation.push(Frame {
                tile_id: frame.required_parse("tileid")?,
                duration_ms: frame.required_parse("duration")?,
            });
        }
    }

    Ok(tile)
}

/// Corner markers from a `terrain="a,b,c,d"` list.
///
/// Empty, non-numeric or out-of-range entries mean "no marker".
fn parse_terrain_corners(value: &str, terrain_count: usize) -> [Option<usize>; 4] {
    let mut corners = [None; 4];
    for (corner, entry) in corners.iter_mut().zip(value.split(',')) {
        *corner = entry
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&index| index < terrain_count);
    }
    corners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{LoadOptions, ResourceBundle};
    use crate::parser::xml::parse_element_tree;
    use crate::types::Corner;
    use std::cell::Cell;
    use std::path::PathBuf;

    const TERRAIN_TSX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tileset name="terrain" tilewidth="16" tileheight="16" spacing="1" margin="2" tilecount="48" columns="8">
 <tileoffset x="0" y="4"/>
 <image source="sheets/terrain.png" width="136" height="104"/>
 <terraintypes>
  <terrain name="grass" tile="0"/>
  <terrain name="water" tile="5"/>
 </terraintypes>
 <tile id="3" terrain="0,0,,1" probability="0.5" type="edge">
  <properties><property name="walkable" value="false"/></properties>
  <objectgroup draworder="index"><object id="1" x="0" y="0" width="16" height="4"/></objectgroup>
 </tile>
 <tile id="7" terrain="1,9,x,0">
  <animation>
   <frame tileid="7" duration="100"/>
   <frame tileid="8" duration="150"/>
  </animation>
 </tile>
</tileset>
"#;

    fn parse_inline(source: &str) -> Result<Tileset> {
        let options = LoadOptions::default();
        let bundle = ResourceBundle::new();
        let ctx = Context::new(&bundle, &options);
        parse_inline_tileset(&parse_element_tree(source).unwrap(), Path::new("maps"), &ctx)
    }

    #[test]
    fn test_inline_tileset_fields() {
        let tileset = parse_inline(TERRAIN_TSX).unwrap();

        assert_eq!(tileset.name, "terrain");
        assert_eq!(tileset.first_gid, 0);
        assert_eq!((tileset.tile_width, tileset.tile_height), (16, 16));
        assert_eq!((tileset.spacing, tileset.margin), (1, 2));
        assert_eq!(tileset.rows(), Some(6));
        assert_eq!(tileset.tile_offset, TileOffset { x: 0, y: 4 });

        let image = tileset.image.as_ref().unwrap();
        assert_eq!(image.source.as_deref(), Some(Path::new("maps/sheets/terrain.png")));

        assert_eq!(tileset.terrains.len(), 2);
        assert_eq!(tileset.terrains.get("water").unwrap().tile, 5);
    }

    #[test]
    fn test_tile_metadata() {
        let tileset = parse_inline(TERRAIN_TSX).unwrap();

        let edge = tileset.tile(3).unwrap();
        assert_eq!(edge.terrain, [Some(0), Some(0), None, Some(1)]);
        assert_eq!(edge.probability, 0.5);
        assert_eq!(edge.tile_type, "edge");
        assert_eq!(edge.properties["walkable"], "false");
        assert_eq!(edge.object_groups.len(), 1);
        assert!(!edge.is_animated());
        assert_eq!(
            tileset.tile_terrain(edge, Corner::BottomRight).unwrap().name,
            "water"
        );

        let animated = tileset.tile(7).unwrap();
        assert_eq!(animated.probability, 1.0);
        assert_eq!(
            animated.animation,
            vec![
                Frame { tile_id: 7, duration_ms: 100 },
                Frame { tile_id: 8, duration_ms: 150 },
            ]
        );
        assert!(tileset.tile(0).is_none());
    }

    #[test]
    fn test_bad_terrain_corners_mean_no_marker() {
        assert_eq!(
            parse_terrain_corners("1,9,x,0", 2),
            [Some(1), None, None, Some(0)]
        );
        assert_eq!(parse_terrain_corners("", 2), [None; 4]);
        assert_eq!(parse_terrain_corners("0,0,0,0,0", 1), [Some(0); 4]);
    }

    #[test]
    fn test_tile_size_required() {
        let err = parse_inline(r#"<tileset name="broken" tilewidth="16"/>"#).unwrap_err();
        assert!(matches!(
            err,
            TmxError::MissingAttribute { ref attribute, .. } if attribute == "tileheight"
        ));
    }

    #[test]
    fn test_external_tileset_takes_firstgid_from_map() {
        let options = LoadOptions::default();
        let bundle = ResourceBundle::new().with_resource("maps/tiles/terrain.tsx", TERRAIN_TSX);
        let mut ctx = Context::new(&bundle, &options);

        let entry = parse_element_tree(r#"<tileset firstgid="10" source="tiles/terrain.tsx"/>"#)
            .unwrap();
        let tileset = parse_tileset(&entry, Path::new("maps"), &mut ctx).unwrap();

        assert_eq!(tileset.first_gid, 10);
        assert_eq!(tileset.name, "terrain");
        assert_eq!(tileset.source, Some(PathBuf::from("maps/tiles/terrain.tsx")));
        assert_eq!(
            tileset.image.unwrap().source,
            Some(PathBuf::from("maps/tiles/sheets/terrain.png"))
        );
    }

    #[test]
    fn test_external_tileset_requires_firstgid() {
        let options = LoadOptions::default();
        let bundle = ResourceBundle::new().with_resource("terrain.tsx", TERRAIN_TSX);
        let mut ctx = Context::new(&bundle, &options);

        let entry = parse_element_tree(r#"<tileset source="terrain.tsx"/>"#).unwrap();
        assert!(matches!(
            parse_tileset(&entry, Path::new(""), &mut ctx),
            Err(TmxError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_external_tileset_read_once_per_load() {
        let reads = Cell::new(0);
        let reader = |path: &Path| -> Result<Vec<u8>> {
            reads.set(reads.get() + 1);
            assert_eq!(path, Path::new("shared.tsx"));
            Ok(TERRAIN_TSX.as_bytes().to_vec())
        };
        let options = LoadOptions::default();
        let mut ctx = Context::new(&reader, &options);

        let first = parse_element_tree(r#"<tileset firstgid="1" source="shared.tsx"/>"#).unwrap();
        let second = parse_element_tree(r#"<tileset firstgid="49" source="shared.tsx"/>"#).unwrap();
        let a = parse_tileset(&first, Path::new(""), &mut ctx).unwrap();
        let b = parse_tileset(&second, Path::new(""), &mut ctx).unwrap();

        assert_eq!(reads.get(), 1);
        assert_eq!((a.first_gid, b.first_gid), (1, 49));
    }

    #[test]
    fn test_external_tileset_cache_disabled() {
        let reads = Cell::new(0);
        let reader = |_: &Path| -> Result<Vec<u8>> {
            reads.set(reads.get() + 1);
            Ok(TERRAIN_TSX.as_bytes().to_vec())
        };
        let options = LoadOptions {
            cache_external_tilesets: false,
            ..Default::default()
        };
        let mut ctx = Context::new(&reader, &options);

        let entry = parse_element_tree(r#"<tileset firstgid="1" source="shared.tsx"/>"#).unwrap();
        parse_tileset(&entry, Path::new(""), &mut ctx).unwrap();
        parse_tileset(&entry, Path::new(""), &mut ctx).unwrap();

        assert_eq!(reads.get(), 2);
    }

    #[test]
    fn test_external_document_must_be_tileset() {
        let options = LoadOptions::default();
        let bundle = ResourceBundle::new().with_resource("odd.tsx", "<map/>");
        let mut ctx = Context::new(&bundle, &options);

        let entry = parse_element_tree(r#"<tileset firstgid="1" source="odd.tsx"/>"#).unwrap();
        let err = parse_tileset(&entry, Path::new(""), &mut ctx).unwrap_err();
        assert!(err.is_format_error());
    }
}
