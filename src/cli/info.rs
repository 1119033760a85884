//! Info command implementation.
//!
//! Loads maps and prints what they contain: grid settings, tilesets and the
//! layer tree.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use crate::error::{TmxError, Result};
use crate::loader::{LoadOptions, Loader};
use crate::output::{display_path, plural, Printer};
use crate::types::{Layer, LayerSet, Map};

/// Load maps and print a summary
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Map files to summarise
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print summaries as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Read image headers to fill in missing image sizes
    #[arg(long)]
    pub probe_images: bool,
}

/// Serializable overview of a loaded map.
#[derive(Debug, Serialize)]
pub struct MapSummary {
    pub path: String,
    pub version: Option<String>,
    pub orientation: &'static str,
    pub render_order: &'static str,
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub infinite: bool,
    pub tilesets: Vec<TilesetSummary>,
    pub layers: Vec<LayerSummary>,
}

#[derive(Debug, Serialize)]
pub struct TilesetSummary {
    pub key: String,
    pub first_gid: u32,
    pub tile_count: Option<u32>,
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LayerSummary {
    pub key: String,
    pub kind: &'static str,
    pub visible: bool,
    pub opacity: f64,
    /// Occupied cells for tile layers, objects for object groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayerSummary>,
}

pub fn run(args: InfoArgs, printer: &Printer) -> Result<()> {
    let loader = Loader::new().with_options(LoadOptions {
        probe_image_sizes: args.probe_images,
        ..Default::default()
    });

    let mut summaries = Vec::new();
    for file in &args.files {
        let map = loader.load_map(file)?;
        summaries.push(summarize(file, &map));
    }

    if args.json {
        let json = serde_json::to_string_pretty(&summaries).map_err(|e| TmxError::Format {
            message: format!("Failed to serialize summary: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        for summary in &summaries {
            print_summary(summary, printer);
        }
    }

    Ok(())
}

/// Build the summary of a loaded map.
pub fn summarize(path: &Path, map: &Map) -> MapSummary {
    MapSummary {
        path: display_path(path),
        version: map.version.clone(),
        orientation: map.orientation.as_str(),
        render_order: map.render_order.as_str(),
        width: map.width,
        height: map.height,
        tile_width: map.tile_width,
        tile_height: map.tile_height,
        infinite: map.infinite,
        tilesets: map
            .tilesets
            .entries()
            .map(|(key, tileset)| TilesetSummary {
                key: key.to_string(),
                first_gid: tileset.first_gid,
                tile_count: tileset.tile_count,
                source: tileset.source.as_deref().map(display_path),
            })
            .collect(),
        layers: summarize_layers(&map.layers),
    }
}

fn summarize_layers(layers: &LayerSet) -> Vec<LayerSummary> {
    layers
        .all
        .entries()
        .map(|(key, layer)| LayerSummary {
            key: key.to_string(),
            kind: layer.kind().as_str(),
            visible: layer.visible(),
            opacity: layer.opacity(),
            count: match layer {
                Layer::Tiles(tiles) => Some(tiles.occupied().count()),
                Layer::Objects(group) => Some(group.objects.len()),
                Layer::Image(_) | Layer::Group(_) => None,
            },
            children: match layer {
                Layer::Group(group) => summarize_layers(&group.layers),
                _ => Vec::new(),
            },
        })
        .collect()
}

fn print_summary(summary: &MapSummary, printer: &Printer) {
    printer.status("Loaded", &summary.path);
    printer.info(
        "Map",
        &format!(
            "{} {}x{} cells of {}x{}px{}{}",
            summary.orientation,
            summary.width,
            summary.height,
            summary.tile_width,
            summary.tile_height,
            if summary.infinite { ", infinite" } else { "" },
            summary
                .version
                .as_deref()
                .map(|v| printer.dim(&format!(" (v{})", v)))
                .unwrap_or_default(),
        ),
    );

    for tileset in &summary.tilesets {
        let source = tileset
            .source
            .as_deref()
            .map(|s| format!(" {}", printer.dim(s)))
            .unwrap_or_default();
        printer.info(
            "Tileset",
            &format!("{} firstgid={}{}", printer.bold(&tileset.key), tileset.first_gid, source),
        );
    }

    print_layers(&summary.layers, 0, printer);
    printer.status(
        "Done",
        &format!(
            "{}, {}",
            plural(summary.tilesets.len(), "tileset", "tilesets"),
            plural(summary.layers.len(), "layer", "layers")
        ),
    );
}

fn print_layers(layers: &[LayerSummary], depth: usize, printer: &Printer) {
    for layer in layers {
        let mut line = format!("{}{} {}", "  ".repeat(depth), printer.bold(&layer.key), layer.kind);
        if let Some(count) = layer.count {
            line.push_str(&printer.dim(&format!(" [{}]", count)));
        }
        if !layer.visible {
            line.push_str(&printer.dim(" hidden"));
        }
        printer.info("Layer", &line);
        print_layers(&layer.children, depth + 1, printer);
    }
}
