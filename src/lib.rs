#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # Background Compositing Server
//!
//! An HTTP service that removes image backgrounds and composites the
//! cut-out over a solid color. Segmentation itself is delegated to an
//! external pre-trained model behind the [`Segmenter`] trait; this crate
//! owns the glue: multipart handling, hex color parsing, alpha
//! compositing, and PNG/JPEG/SVG encoding.
//!
//! ## Request pipeline
//!
//! `POST /remove-background` with a multipart `image` field (plus optional
//! `bg_color` and `format` fields) runs one linear path per request:
//! decode → segment → composite → encode. No state survives a request.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bgcomp_server::{router, CommandSegmenter, Processor};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let segmenter = Arc::new(CommandSegmenter::from_command_line("rembg i")?);
//! let app = router(Arc::new(Processor::new(segmenter)));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Library usage
//!
//! The pipeline works without the HTTP layer:
//!
//! ```rust,no_run
//! use bgcomp_server::{
//!     BackgroundColor, OutputFormat, PassthroughSegmenter, Processor, RequestOptions,
//! };
//! use std::sync::Arc;
//!
//! # fn example(upload: Vec<u8>) -> anyhow::Result<()> {
//! let processor = Processor::new(Arc::new(PassthroughSegmenter));
//! let options = RequestOptions {
//!     background: BackgroundColor::from_hex("#00FF00")?,
//!     format: OutputFormat::Jpeg,
//! };
//! let output = processor.process_bytes(&upload, &options)?;
//! assert_eq!(output.mime_type, "image/jpeg");
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod compose;
pub mod config;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod segmentation;
pub mod server;

// Public API exports
pub use color::BackgroundColor;
pub use compose::composite_over_color;
pub use config::{ServerConfig, ServerConfigBuilder};
pub use encode::{OutputFormat, JPEG_QUALITY};
pub use error::{BgCompError, Result};
pub use pipeline::{EncodedOutput, Processor, RequestOptions};
pub use segmentation::{CommandSegmenter, PassthroughSegmenter, Segmenter};
pub use server::{router, ApiError, MISSING_IMAGE_MESSAGE};
