//! Benchmarks for the tmx load pipeline.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flate2::write::{GzEncoder, ZlibEncoder};

use tmx::parser::{decode_region, parse_element_tree, Compression, Element, Encoding};
use tmx::types::Region;
use tmx::Loader;

const SIDE: u32 = 128;

fn cell_codes() -> Vec<u32> {
    (0..SIDE * SIDE).map(|i| (i % 64) + 1).collect()
}

fn cell_bytes() -> Vec<u8> {
    cell_codes().iter().flat_map(|c| c.to_le_bytes()).collect()
}

fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

fn zlib(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

fn csv_text() -> String {
    cell_codes()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

// -- Decoding benchmarks --

fn bench_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoding");
    let region = Region::new(0, 0, SIDE, SIDE);
    let bytes = cell_bytes();

    let payloads = [
        ("csv", Element::new("data").with_text(csv_text()), Encoding::Csv, Compression::None),
        ("base64", Element::new("data").with_text(STANDARD.encode(&bytes)), Encoding::Base64, Compression::None),
        ("base64_gzip", Element::new("data").with_text(STANDARD.encode(gzip(&bytes))), Encoding::Base64, Compression::Gzip),
        ("base64_zlib", Element::new("data").with_text(STANDARD.encode(zlib(&bytes))), Encoding::Base64, Compression::Zlib),
    ];

    for (name, payload, encoding, compression) in &payloads {
        group.bench_function(*name, |b| {
            b.iter(|| decode_region(black_box(payload), *encoding, *compression, region).unwrap())
        });
    }

    group.finish();
}

// -- Loading benchmarks --

fn map_source() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.2" orientation="orthogonal" width="{side}" height="{side}" tilewidth="16" tileheight="16">
 <tileset firstgid="1" name="ground" tilewidth="16" tileheight="16" tilecount="64" columns="8"/>
 <layer name="base"><data encoding="base64" compression="zlib">{zlib}</data></layer>
 <layer name="detail"><data encoding="csv">{csv}</data></layer>
 <objectgroup name="spawns">
  <object id="1" name="player" x="16" y="16"/>
  <object id="2" name="exit" x="2032" y="2032"/>
 </objectgroup>
</map>"#,
        side = SIDE,
        zlib = STANDARD.encode(zlib(&cell_bytes())),
        csv = csv_text(),
    )
}

fn bench_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("loading");
    let source = map_source();
    let loader = Loader::new();

    group.bench_function("parse_element_tree", |b| {
        b.iter(|| parse_element_tree(black_box(&source)).unwrap())
    });

    group.bench_function("load_map_from_str", |b| {
        b.iter(|| loader.load_map_from_str(black_box(&source), "").unwrap())
    });

    let tree = parse_element_tree(&source).unwrap();
    group.bench_function("load_map_from_tree", |b| {
        b.iter(|| loader.load_map_from_tree(black_box(&tree), "").unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_decoding, bench_loading);
criterion_main!(benches);
