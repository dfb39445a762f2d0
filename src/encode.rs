//! Output format selection and encoding
//!
//! Dispatch on the requested format happens once per request through the
//! closed [`OutputFormat`] enum; unrecognized strings fall back to PNG.

use crate::error::Result;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Fixed JPEG quality for encoded responses
pub const JPEG_QUALITY: u8 = 95;

/// Wire formats the service can return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// PNG with alpha channel (lossless)
    Png,
    /// JPEG without alpha, quality 95
    Jpeg,
    /// SVG envelope embedding the PNG as a base64 data URI
    Svg,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Png
    }
}

impl OutputFormat {
    /// Resolve a request's `format` field, case-insensitively
    ///
    /// Only the literal values `jpg` and `svg` select a non-default
    /// format. Everything else is PNG, including `jpeg`, the empty string
    /// and unrecognized values.
    #[must_use]
    pub fn from_request(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "jpg" => Self::Jpeg,
            "svg" => Self::Svg,
            _ => Self::Png,
        }
    }

    /// MIME type for the `Content-Type` response header
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
        }
    }

    /// Whether the container carries an alpha channel
    #[must_use]
    pub fn supports_transparency(self) -> bool {
        match self {
            Self::Png | Self::Svg => true,
            Self::Jpeg => false,
        }
    }
}

/// Encode a composited RGBA image into the requested wire format
///
/// # Errors
///
/// Returns an `Image` error when the underlying codec fails.
pub fn encode(image: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Png => encode_png(image),
        OutputFormat::Jpeg => encode_jpeg(image, JPEG_QUALITY),
        OutputFormat::Svg => encode_svg(image),
    }
}

/// Serialize the image as PNG, keeping the RGBA channel layout
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)?;
    Ok(buffer)
}

/// Serialize the image as JPEG, dropping the alpha channel first
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    // JPEG has no alpha; convert to 3-channel RGB before encoding.
    let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut buffer = Vec::new();
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buffer), quality);
    encoder.encode_image(&rgb)?;
    Ok(buffer)
}

/// Wrap the image in a minimal SVG document as a base64 PNG data URI
///
/// This is a raster image in an SVG envelope, not vector art; the `<svg>`
/// and `<image>` elements carry the pixel dimensions and the data is
/// referenced via an xlink href.
pub fn encode_svg(image: &RgbaImage) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    let png_base64 = BASE64.encode(encode_png(image)?);

    let svg = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
    <image width="{width}" height="{height}" xlink:href="data:image/png;base64,{png_base64}"/>
</svg>"#
    );

    Ok(svg.into_bytes())
}
