//! Tile-layer payload decoding.
//!
//! A `<data>` element (or one `<chunk>` of it) stores cell codes in one of
//! three encodings:
//! - no `encoding` attribute: one `<tile gid="..."/>` child per cell
//! - `csv`: comma separated decimal codes
//! - `base64`: little-endian `u32` codes, optionally `gzip` or `zlib`
//!   compressed
//!
//! Every decode yields exactly `width * height` cells for its region.

use std::io::Read;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::{DeflateDecoder, GzDecoder};
use tracing::trace;

use crate::error::{TmxError, Result};
use crate::types::{Region, TileRef};

use super::element::Element;

/// How cell codes are written inside a data element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// One `<tile>` child element per cell.
    Elements,
    Csv,
    Base64,
}

impl Encoding {
    /// Interpret the `encoding` attribute.
    pub fn from_attr(value: Option<&str>) -> Result<Self> {
        match value {
            None => Ok(Self::Elements),
            Some("csv") => Ok(Self::Csv),
            Some("base64") => Ok(Self::Base64),
            Some(other) => Err(TmxError::Format {
                message: format!("Unknown data encoding '{}'", other),
                help: Some("Expected 'csv', 'base64' or no encoding".to_string()),
            }),
        }
    }
}

/// Compression applied to base64 payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
    None,
    Gzip,
    Zlib,
}

impl Compression {
    /// Interpret the `compression` attribute.
    pub fn from_attr(value: Option<&str>) -> Result<Self> {
        match value {
            None => Ok(Self::None),
            Some("gzip") => Ok(Self::Gzip),
            Some("zlib") => Ok(Self::Zlib),
            Some(other) => Err(TmxError::Format {
                message: format!("Unknown data compression '{}'", other),
                help: Some("Expected 'gzip', 'zlib' or no compression".to_string()),
            }),
        }
    }
}

/// Decode the cells of one region.
///
/// `payload` is the element holding the cells: the `<data>` element itself
/// or one of its `<chunk>` children. Encoding and compression come from the
/// enclosing `<data>` element.
pub fn decode_region(
    payload: &Element,
    encoding: Encoding,
    compression: Compression,
    region: Region,
) -> Result<Vec<TileRef>> {
    if encoding != Encoding::Base64 && compression != Compression::None {
        return Err(TmxError::Format {
            message: "Compression is only supported for base64 data".to_string(),
            help: None,
        });
    }

    let codes = match encoding {
        Encoding::Elements => element_codes(payload)?,
        Encoding::Csv => csv_codes(&payload.text)?,
        Encoding::Base64 => {
            let expected = region.len().checked_mul(4).ok_or_else(|| {
                TmxError::format(format!(
                    "A {}x{} region is too large to decode",
                    region.width, region.height
                ))
            })?;
            // One byte past the expected size is enough to reject oversize data.
            let limit = (expected as u64).saturating_add(1);
            let bytes = decode_base64_within(&payload.text, compression, limit)?;
            byte_codes(&bytes, expected)?
        }
    };

    if codes.len() != region.len() {
        return Err(TmxError::Format {
            message: format!(
                "Expected {} cells for a {}x{} region, found {}",
                region.len(),
                region.width,
                region.height,
                codes.len()
            ),
            help: None,
        });
    }

    trace!(
        x = region.x,
        y = region.y,
        width = region.width,
        height = region.height,
        ?encoding,
        ?compression,
        "decoded region"
    );

    codes
        .into_iter()
        .enumerate()
        .map(|(i, code)| {
            let (x, y) = region.position(i).ok_or_else(|| {
                TmxError::format(format!(
                    "Cell {} of the region at ({}, {}) is outside the coordinate range",
                    i, region.x, region.y
                ))
            })?;
            Ok(TileRef::from_code(code, x, y))
        })
        .collect()
}

/// Decode a base64 payload, inflating it when compressed.
///
/// Whitespace inside the payload is ignored. For `zlib`, the 2-byte header
/// and 4-byte trailing checksum are skipped and the checksum is not
/// verified.
pub fn decode_base64(text: &str, compression: Compression) -> Result<Vec<u8>> {
    decode_base64_within(text, compression, u64::MAX)
}

/// Like [`decode_base64`], but stops inflating after `limit` bytes.
fn decode_base64_within(text: &str, compression: Compression, limit: u64) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact).map_err(|e| TmxError::Format {
        message: format!("Malformed base64 data: {}", e),
        help: None,
    })?;

    match compression {
        Compression::None => Ok(bytes),
        Compression::Gzip => inflate(GzDecoder::new(&bytes[..]), "gzip", limit),
        Compression::Zlib => {
            if bytes.len() < 6 {
                return Err(TmxError::format(format!(
                    "zlib data too short: {} bytes",
                    bytes.len()
                )));
            }
            let deflated = &bytes[2..bytes.len() - 4];
            inflate(DeflateDecoder::new(deflated), "zlib", limit)
        }
    }
}

fn inflate(decoder: impl Read, kind: &str, limit: u64) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decoder.take(limit).read_to_end(&mut out).map_err(|e| TmxError::Format {
        message: format!("Corrupt {} data: {}", kind, e),
        help: None,
    })?;
    Ok(out)
}

fn element_codes(payload: &Element) -> Result<Vec<u32>> {
    payload
        .children_named("tile")
        .map(|tile| tile.parse_or::<u32>("gid", 0))
        .collect()
}

fn csv_codes(text: &str) -> Result<Vec<u32>> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u32>().map_err(|_| TmxError::Format {
                message: format!("Invalid cell code '{}' in csv data", token),
                help: None,
            })
        })
        .collect()
}

fn byte_codes(bytes: &[u8], expected: usize) -> Result<Vec<u32>> {
    if bytes.len() > expected {
        return Err(TmxError::format(format!(
            "Cell data is longer than the expected {} bytes ({} cells)",
            expected,
            expected / 4
        )));
    }
    if bytes.len() != expected {
        return Err(TmxError::format(format!(
            "Decoded {} bytes of cell data, expected {} ({} cells)",
            bytes.len(),
            expected,
            expected / 4
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}
