//! Layer variants of a map.
//!
//! Every layer is one of four closed variants. They share a common set of
//! attributes (name, opacity, visibility, offset, tint, properties) exposed
//! through [`Layer`]'s accessors.

use super::collection::{Named, NamedCollection};
use super::colour::Colour;
use super::object::ObjectGroup;
use super::tile::{Region, TileRef};
use super::tileset::Image;
use super::Properties;

/// Attributes shared by all layer variants.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerAttributes {
    pub id: Option<u32>,
    pub name: String,
    /// Nominally 0.0 to 1.0; not clamped.
    pub opacity: f64,
    pub visible: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub tint: Option<Colour>,
    pub properties: Properties,
}

impl Default for LayerAttributes {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            opacity: 1.0,
            visible: true,
            offset_x: 0.0,
            offset_y: 0.0,
            tint: None,
            properties: Properties::new(),
        }
    }
}

/// Which variant a [`Layer`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Tiles,
    Objects,
    Image,
    Group,
}

impl LayerKind {
    /// Tag name of the variant in map documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tiles => "layer",
            Self::Objects => "objectgroup",
            Self::Image => "imagelayer",
            Self::Group => "group",
        }
    }
}

/// A layer of any variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Tiles(TileLayer),
    Objects(ObjectGroup),
    Image(ImageLayer),
    Group(Group),
}

impl Layer {
    pub fn attributes(&self) -> &LayerAttributes {
        match self {
            Self::Tiles(layer) => &layer.attributes,
            Self::Objects(layer) => &layer.attributes,
            Self::Image(layer) => &layer.attributes,
            Self::Group(layer) => &layer.attributes,
        }
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Tiles(_) => LayerKind::Tiles,
            Self::Objects(_) => LayerKind::Objects,
            Self::Image(_) => LayerKind::Image,
            Self::Group(_) => LayerKind::Group,
        }
    }

    pub fn opacity(&self) -> f64 {
        self.attributes().opacity
    }

    pub fn visible(&self) -> bool {
        self.attributes().visible
    }

    /// Pixel offset as (x, y).
    pub fn offset(&self) -> (f64, f64) {
        let attributes = self.attributes();
        (attributes.offset_x, attributes.offset_y)
    }

    pub fn properties(&self) -> &Properties {
        &self.attributes().properties
    }

    pub fn as_tile_layer(&self) -> Option<&TileLayer> {
        match self {
            Self::Tiles(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_object_group(&self) -> Option<&ObjectGroup> {
        match self {
            Self::Objects(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_image_layer(&self) -> Option<&ImageLayer> {
        match self {
            Self::Image(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(layer) => Some(layer),
            _ => None,
        }
    }
}

impl Named for Layer {
    fn name(&self) -> &str {
        &self.attributes().name
    }
}

/// A grid of tile references.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileLayer {
    pub attributes: LayerAttributes,
    /// Declared size in cells.
    pub width: u32,
    pub height: u32,
    /// Cells of every region, concatenated in region order, each region in
    /// row-major order.
    pub tiles: Vec<TileRef>,
    /// The whole layer for finite maps, or one entry per chunk.
    pub regions: Vec<Region>,
}

impl TileLayer {
    /// The cell at (x, y), searching regions in order.
    pub fn tile_at(&self, x: i32, y: i32) -> Option<&TileRef> {
        let mut start = 0;
        for region in &self.regions {
            if let Some(index) = region.index_of(x, y) {
                return self.tiles.get(start + index);
            }
            start += region.len();
        }
        None
    }

    /// Cells that hold a tile.
    pub fn occupied(&self) -> impl Iterator<Item = &TileRef> {
        self.tiles.iter().filter(|t| !t.is_empty())
    }

    /// Whether the layer was stored as chunks.
    pub fn is_chunked(&self) -> bool {
        self.regions.len() != 1
            || self.regions[0] != Region::new(0, 0, self.width, self.height)
    }
}

impl Named for TileLayer {
    fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// A layer displaying a single image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageLayer {
    pub attributes: LayerAttributes,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub image: Option<Image>,
    pub repeat_x: bool,
    pub repeat_y: bool,
}

impl Named for ImageLayer {
    fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// A group of nested layers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub attributes: LayerAttributes,
    pub layers: LayerSet,
}

impl Named for Group {
    fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// Layers in document order, with a keyed view per variant.
///
/// Each layer is stored once, in [`all`](Self::all). The variant views
/// ([`tile_layers`](Self::tile_layers) and friends) key layers by name
/// within their own variant and borrow from `all`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerSet {
    pub all: NamedCollection<Layer>,
    tile_slots: NamedCollection<Slot>,
    object_slots: NamedCollection<Slot>,
    image_slots: NamedCollection<Slot>,
    group_slots: NamedCollection<Slot>,
}

/// A layer's name and its position in [`LayerSet::all`].
#[derive(Debug, Clone, PartialEq)]
struct Slot {
    name: String,
    position: usize,
}

impl Named for Slot {
    fn name(&self) -> &str {
        &self.name
    }
}

impl LayerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer to the ordered list and key it in its variant's view.
    pub fn push(&mut self, layer: Layer) {
        let slot = Slot {
            name: layer.name().to_string(),
            position: self.all.len(),
        };
        self.slots_mut(layer.kind()).add(slot);
        self.all.add(layer);
    }

    fn slots_mut(&mut self, kind: LayerKind) -> &mut NamedCollection<Slot> {
        match kind {
            LayerKind::Tiles => &mut self.tile_slots,
            LayerKind::Objects => &mut self.object_slots,
            LayerKind::Image => &mut self.image_slots,
            LayerKind::Group => &mut self.group_slots,
        }
    }

    pub fn tile_layers(&self) -> LayerView<'_, TileLayer> {
        LayerView::new(&self.all, &self.tile_slots, Layer::as_tile_layer)
    }

    pub fn object_groups(&self) -> LayerView<'_, ObjectGroup> {
        LayerView::new(&self.all, &self.object_slots, Layer::as_object_group)
    }

    pub fn image_layers(&self) -> LayerView<'_, ImageLayer> {
        LayerView::new(&self.all, &self.image_slots, Layer::as_image_layer)
    }

    pub fn groups(&self) -> LayerView<'_, Group> {
        LayerView::new(&self.all, &self.group_slots, Layer::as_group)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.all.iter()
    }

    /// Look up a layer of any variant by key.
    pub fn get(&self, key: &str) -> Option<&Layer> {
        self.all.get(key)
    }

    /// Depth-first walk over every layer, including those inside groups.
    pub fn walk(&self) -> Vec<&Layer> {
        let mut out = Vec::new();
        collect_layers(self, &mut out);
        out
    }
}

fn collect_layers<'a>(set: &'a LayerSet, out: &mut Vec<&'a Layer>) {
    for layer in set.iter() {
        out.push(layer);
        if let Layer::Group(group) = layer {
            collect_layers(&group.layers, out);
        }
    }
}

impl<'a> IntoIterator for &'a LayerSet {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.all.iter()
    }
}

/// The layers of one variant in a [`LayerSet`], keyed within that variant.
pub struct LayerView<'a, T> {
    layers: &'a NamedCollection<Layer>,
    slots: &'a NamedCollection<Slot>,
    cast: fn(&Layer) -> Option<&T>,
}

impl<'a, T: 'a> LayerView<'a, T> {
    fn new(
        layers: &'a NamedCollection<Layer>,
        slots: &'a NamedCollection<Slot>,
        cast: fn(&Layer) -> Option<&T>,
    ) -> Self {
        Self { layers, slots, cast }
    }

    /// Look up a layer by its key within this variant.
    pub fn get(&self, key: &str) -> Option<&'a T> {
        let slot = self.slots.get(key)?;
        self.layers.get_index(slot.position).and_then(self.cast)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Layers of this variant in document order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + 'a {
        let layers = self.layers;
        let cast = self.cast;
        self.slots
            .iter()
            .filter_map(move |slot| layers.get_index(slot.position).and_then(cast))
    }

    /// Variant keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.slots.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> LayerAttributes {
        LayerAttributes {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_push_fills_variant_collections() {
        let mut set = LayerSet::new();
        set.push(Layer::Tiles(TileLayer {
            attributes: named("ground"),
            ..Default::default()
        }));
        set.push(Layer::Objects(ObjectGroup {
            attributes: named("ground"),
            ..Default::default()
        }));
        set.push(Layer::Image(ImageLayer {
            attributes: named("sky"),
            ..Default::default()
        }));

        assert_eq!(set.len(), 3);
        assert_eq!(set.tile_layers().len(), 1);
        assert_eq!(set.object_groups().len(), 1);
        assert_eq!(set.image_layers().len(), 1);
        assert!(set.groups().is_empty());

        // Keys are per collection: the object group is "ground" in its own
        // collection but "ground0" among all layers.
        assert!(set.object_groups().get("ground").is_some());
        assert_eq!(set.get("ground0").unwrap().kind(), LayerKind::Objects);
        assert_eq!(set.object_groups().keys().collect::<Vec<_>>(), vec!["ground"]);
    }

    #[test]
    fn test_variant_views_borrow_from_all() {
        let mut set = LayerSet::new();
        for name in ["a", "b", "a"] {
            set.push(Layer::Tiles(TileLayer {
                attributes: named(name),
                ..Default::default()
            }));
            set.push(Layer::Image(ImageLayer {
                attributes: named(name),
                ..Default::default()
            }));
        }

        let views: Vec<&TileLayer> = set.tile_layers().iter().collect();
        let stored: Vec<&TileLayer> = set.iter().filter_map(Layer::as_tile_layer).collect();
        assert_eq!(views.len(), 3);
        assert!(views.iter().zip(&stored).all(|(v, s)| std::ptr::eq(*v, *s)));

        assert_eq!(set.tile_layers().keys().collect::<Vec<_>>(), vec!["a", "b", "a0"]);
        assert!(std::ptr::eq(
            set.tile_layers().get("a0").unwrap(),
            set.all.get_index(4).and_then(Layer::as_tile_layer).unwrap()
        ));
    }

    #[test]
    fn test_walk_descends_into_groups() {
        let mut inner = LayerSet::new();
        inner.push(Layer::Tiles(TileLayer {
            attributes: named("inner"),
            ..Default::default()
        }));

        let mut set = LayerSet::new();
        set.push(Layer::Group(Group {
            attributes: named("group"),
            layers: inner,
        }));
        set.push(Layer::Image(ImageLayer {
            attributes: named("after"),
            ..Default::default()
        }));

        let names: Vec<&str> = set.walk().into_iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["group", "inner", "after"]);
    }

    #[test]
    fn test_tile_at_across_chunks() {
        let layer = TileLayer {
            width: 4,
            height: 4,
            regions: vec![Region::new(0, 0, 2, 1), Region::new(-2, 5, 1, 2)],
            tiles: vec![
                TileRef::from_code(1, 0, 0),
                TileRef::from_code(2, 1, 0),
                TileRef::from_code(3, -2, 5),
                TileRef::from_code(4, -2, 6),
            ],
            ..Default::default()
        };

        assert_eq!(layer.tile_at(1, 0).unwrap().gid, 2);
        assert_eq!(layer.tile_at(-2, 6).unwrap().gid, 4);
        assert!(layer.tile_at(3, 3).is_none());
        assert!(layer.is_chunked());
    }

    #[test]
    fn test_layer_accessors() {
        let layer = Layer::Image(ImageLayer {
            attributes: LayerAttributes {
                name: "bg".to_string(),
                opacity: 0.5,
                visible: false,
                offset_x: 3.0,
                offset_y: -2.0,
                ..Default::default()
            },
            ..Default::default()
        });

        assert_eq!(layer.opacity(), 0.5);
        assert!(!layer.visible());
        assert_eq!(layer.offset(), (3.0, -2.0));
        assert!(layer.as_image_layer().is_some());
        assert!(layer.as_tile_layer().is_none());
    }
}
