//! HTTP layer
//!
//! A single route does the work: `POST /remove-background` accepts a
//! multipart body with an `image` field plus optional `bg_color` and
//! `format` fields, and answers with the encoded image bytes. The router
//! is an explicitly constructed value handed to `axum::serve`; it holds no
//! request state beyond the shared [`Processor`].

use crate::{
    color::BackgroundColor,
    encode::OutputFormat,
    error::BgCompError,
    pipeline::{Processor, RequestOptions},
};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, warn};

/// Plain-text body returned when the `image` field is missing
///
/// Kept verbatim from the service this replaces; existing frontends match
/// on it.
pub const MISSING_IMAGE_MESSAGE: &str = "No se envió ningún archivo de imagen";

/// Upload size ceiling. The axum default of 2 MiB is too small for photos.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Errors surfaced to HTTP clients
///
/// Only client mistakes get a descriptive body; everything else collapses
/// into a generic 500 and the detail goes to the log, not the wire.
#[derive(Debug)]
pub enum ApiError {
    /// Multipart body had no `image` field
    MissingImage,
    /// Multipart body could not be read
    MalformedBody(String),
    /// `bg_color` field was not a valid hex color
    InvalidColor(String),
    /// Any internal pipeline failure
    Internal(BgCompError),
}

impl From<BgCompError> for ApiError {
    fn from(err: BgCompError) -> Self {
        match err {
            BgCompError::InvalidColor(msg) => Self::InvalidColor(msg),
            other => Self::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingImage => {
                (StatusCode::BAD_REQUEST, MISSING_IMAGE_MESSAGE).into_response()
            },
            Self::MalformedBody(detail) => {
                warn!(detail = %detail, "Rejected malformed multipart body");
                (StatusCode::BAD_REQUEST, "malformed multipart body").into_response()
            },
            Self::InvalidColor(detail) => {
                warn!(detail = %detail, "Rejected invalid bg_color");
                (
                    StatusCode::BAD_REQUEST,
                    "invalid bg_color: expected #RRGGBB",
                )
                    .into_response()
            },
            Self::Internal(err) => {
                // Internal detail is logged, never echoed to the client.
                error!(error = %err, "Request processing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            },
        }
    }
}

/// Build the application router
///
/// Cross-origin requests are permitted from any origin, matching the
/// service this replaces.
#[must_use]
pub fn router(processor: Arc<Processor>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/remove-background", post(remove_background))
        .route("/health", get(health))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(processor)
}

async fn health() -> &'static str {
    "OK"
}

/// `POST /remove-background`
///
/// Steps are strictly linear: collect form fields, parse options, run the
/// blocking pipeline on a worker thread, return bytes with the matching
/// MIME type.
async fn remove_background(
    State(processor): State<Arc<Processor>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut image_bytes: Option<Vec<u8>> = None;
    let mut bg_color: Option<String> = None;
    let mut format: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::MalformedBody(e.to_string()))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("image") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::MalformedBody(e.to_string()))?;
                image_bytes = Some(bytes.to_vec());
            },
            Some("bg_color") => {
                bg_color = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::MalformedBody(e.to_string()))?,
                );
            },
            Some("format") => {
                format = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::MalformedBody(e.to_string()))?,
                );
            },
            // Unknown fields are ignored, as the original service did.
            _ => {},
        }
    }

    let image_bytes = image_bytes.ok_or(ApiError::MissingImage)?;

    let options = RequestOptions {
        background: match bg_color {
            Some(hex) => BackgroundColor::from_hex(&hex)?,
            None => BackgroundColor::default(),
        },
        format: format
            .as_deref()
            .map(OutputFormat::from_request)
            .unwrap_or_default(),
    };

    // Segmentation is blocking and can take seconds; keep it off the
    // async worker threads.
    let output = tokio::task::spawn_blocking(move || {
        processor.process_bytes(&image_bytes, &options)
    })
    .await
    .map_err(|e| ApiError::Internal(BgCompError::processing(format!("worker task: {e}"))))??;

    Ok(([(header::CONTENT_TYPE, output.mime_type)], output.bytes).into_response())
}
