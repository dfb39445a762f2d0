//! Error types for background compositing operations

use thiserror::Error;

/// Result type alias for background compositing operations
pub type Result<T> = std::result::Result<T, BgCompError>;

/// Error types for the decode → segment → composite → encode pipeline
#[derive(Error, Debug)]
pub enum BgCompError {
    /// Input/output errors (broken pipes, child process wiring, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding errors from the image crate
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Malformed background color string
    #[error("Invalid background color: {0}")]
    InvalidColor(String),

    /// Segmentation collaborator failures
    #[error("Segmentation error: {0}")]
    Segmentation(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pipeline processing errors
    #[error("Processing error: {0}")]
    Processing(String),
}

impl BgCompError {
    /// Create a new invalid color error
    pub fn invalid_color<S: Into<String>>(msg: S) -> Self {
        Self::InvalidColor(msg.into())
    }

    /// Create a new segmentation error
    pub fn segmentation<S: Into<String>>(msg: S) -> Self {
        Self::Segmentation(msg.into())
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new processing error
    pub fn processing<S: Into<String>>(msg: S) -> Self {
        Self::Processing(msg.into())
    }

    /// Create a segmentation error with collaborator context
    ///
    /// Names the collaborator and the operation that failed so the log line
    /// is actionable without exposing the message to HTTP clients.
    pub fn segmentation_failure(collaborator: &str, operation: &str, error: &str) -> Self {
        Self::Segmentation(format!(
            "{} failed during {}: {}",
            collaborator, operation, error
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = BgCompError::invalid_color("not hex");
        assert!(matches!(err, BgCompError::InvalidColor(_)));

        let err = BgCompError::segmentation("model exploded");
        assert!(matches!(err, BgCompError::Segmentation(_)));
    }

    #[test]
    fn test_error_display() {
        let err = BgCompError::invalid_color("expected 6 hex digits");
        assert_eq!(
            err.to_string(),
            "Invalid background color: expected 6 hex digits"
        );
    }

    #[test]
    fn test_segmentation_failure_context() {
        let err = BgCompError::segmentation_failure("rembg", "inference", "out of memory");
        let text = err.to_string();
        assert!(text.contains("rembg"));
        assert!(text.contains("inference"));
        assert!(text.contains("out of memory"));
    }
}
