//! `<image>` elements.

use std::path::Path;

use crate::error::{TmxError, Result};
use crate::loader::resolve_path;
use crate::types::Image;

use super::data::{decode_base64, Compression};
use super::element::Element;
use super::Context;

/// Parse an image reference.
///
/// A `source` attribute is resolved against `base_dir`; otherwise the image
/// must carry an inline base64 `<data>` payload.
pub fn parse_image(element: &Element, base_dir: &Path, ctx: &Context<'_>) -> Result<Image> {
    let mut image = Image {
        trans: element.colour_attr("trans")?,
        width: element.parse_attr("width")?,
        height: element.parse_attr("height")?,
        ..Default::default()
    };

    if let Some(source) = element.attr("source") {
        image.source = Some(resolve_path(base_dir, source));
    } else if let Some(data) = element.child("data") {
        if data.attr("encoding") != Some("base64") {
            return Err(TmxError::Format {
                message: "Inline image data must be base64 encoded".to_string(),
                help: Some("Set encoding=\"base64\" on the image's <data>".to_string()),
            });
        }
        let compression = Compression::from_attr(data.attr("compression"))?;
        image.format = element.attr("format").map(str::to_string);
        image.data = Some(decode_base64(&data.text, compression)?);
    }

    if ctx.options.probe_image_sizes && image.size().is_none() {
        probe_size(&mut image, ctx)?;
    }

    Ok(image)
}

fn probe_size(image: &mut Image, ctx: &Context<'_>) -> Result<()> {
    let (width, height) = match (&image.data, &image.source) {
        (Some(bytes), _) => probe_dimensions(bytes)?,
        (None, Some(path)) => probe_dimensions(&ctx.read(path)?)?,
        (None, None) => return Ok(()),
    };

    image.width.get_or_insert(width);
    image.height.get_or_insert(height);
    Ok(())
}

/// Read the pixel size from an encoded image header.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| TmxError::format(format!("Unreadable image data: {}", e)))?
        .into_dimensions()
        .map_err(|e| TmxError::format(format!("Unreadable image data: {}", e)))
}
