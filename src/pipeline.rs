//! Request processing pipeline
//!
//! One linear path per request: decode the upload, call the segmentation
//! collaborator, composite over the requested background color, encode in
//! the requested format. The processor holds no per-request state and is
//! shared across requests behind an `Arc`.

use crate::{
    color::BackgroundColor,
    compose::composite_over_color,
    encode::{self, OutputFormat},
    error::{BgCompError, Result},
    segmentation::Segmenter,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Per-request options resolved from the form fields
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Background color to composite over
    pub background: BackgroundColor,
    /// Wire format for the response
    pub format: OutputFormat,
}

/// Finished response payload: encoded bytes plus the matching MIME type
#[derive(Debug, Clone)]
pub struct EncodedOutput {
    /// Encoded image bytes in the requested format
    pub bytes: Vec<u8>,
    /// MIME type for the `Content-Type` header
    pub mime_type: &'static str,
    /// Pixel dimensions of the composited image
    pub dimensions: (u32, u32),
}

/// Stateless processor owning the segmentation collaborator
pub struct Processor {
    segmenter: Arc<dyn Segmenter>,
}

impl Processor {
    /// Create a processor around a segmentation collaborator
    #[must_use]
    pub fn new(segmenter: Arc<dyn Segmenter>) -> Self {
        Self { segmenter }
    }

    /// Name of the wired collaborator, for logging and diagnostics
    #[must_use]
    pub fn segmenter_name(&self) -> &str {
        self.segmenter.name()
    }

    /// Run the full pipeline on raw uploaded bytes
    ///
    /// # Errors
    ///
    /// - `BgCompError::Image` when the bytes are not a recognized image
    /// - `BgCompError::Segmentation` when the collaborator fails or returns
    ///   mismatched dimensions
    /// - `BgCompError::Image` when encoding fails
    #[instrument(
        skip(self, image_bytes, options),
        fields(
            segmenter = %self.segmenter.name(),
            format = ?options.format,
            input_bytes = image_bytes.len()
        )
    )]
    pub fn process_bytes(&self, image_bytes: &[u8], options: &RequestOptions) -> Result<EncodedOutput> {
        let total_start = Instant::now();

        let decode_start = Instant::now();
        let image = image::load_from_memory(image_bytes)?;
        let dimensions = (image.width(), image.height());
        let decode_ms = decode_start.elapsed().as_millis();
        debug!(
            width = dimensions.0,
            height = dimensions.1,
            decode_ms,
            "Decoded upload"
        );

        let segment_start = Instant::now();
        let foreground = self.segmenter.segment(&image)?;
        if foreground.dimensions() != dimensions {
            return Err(BgCompError::segmentation(format!(
                "collaborator returned {}x{} for a {}x{} input",
                foreground.width(),
                foreground.height(),
                dimensions.0,
                dimensions.1
            )));
        }
        let segment_ms = segment_start.elapsed().as_millis();
        debug!(segment_ms, "Segmentation complete");

        let composite_start = Instant::now();
        let composited = composite_over_color(&foreground, options.background);
        let composite_ms = composite_start.elapsed().as_millis();
        debug!(
            composite_ms,
            background = %options.background.to_hex(),
            "Composited over background"
        );

        let encode_start = Instant::now();
        let bytes = encode::encode(&composited, options.format)?;
        let encode_ms = encode_start.elapsed().as_millis();
        debug!(encode_ms, output_bytes = bytes.len(), "Encoded response");

        let total_ms = total_start.elapsed().as_millis();
        info!(total_ms, format = ?options.format, "Processed image");

        Ok(EncodedOutput {
            bytes,
            mime_type: options.format.mime_type(),
            dimensions,
        })
    }
}
