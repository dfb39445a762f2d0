//! Segmentation collaborator abstraction
//!
//! Background segmentation is not implemented here. The service delegates
//! to an external pre-trained model behind the [`Segmenter`] trait and only
//! consumes its output: an RGBA image of identical dimensions whose alpha
//! channel encodes estimated subject opacity.
//!
//! The call is synchronous and may take seconds; callers on an async
//! runtime are expected to offload it (`tokio::task::spawn_blocking`).

use crate::error::{BgCompError, Result};
use image::{DynamicImage, RgbaImage};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Seam to the external background-removal model
///
/// Implementations must be deterministic per input image within a process
/// run. No retry semantics are defined; failures propagate to the caller.
pub trait Segmenter: Send + Sync {
    /// Remove the background from `image`
    ///
    /// Returns an RGBA foreground with the same width and height as the
    /// input; per-pixel alpha is the model's foreground confidence.
    ///
    /// # Errors
    ///
    /// Returns `BgCompError::Segmentation` when the collaborator fails,
    /// carrying the underlying message.
    fn segment(&self, image: &DynamicImage) -> Result<RgbaImage>;

    /// Human-readable collaborator name for logging
    fn name(&self) -> &str;
}

/// Segmenter that pipes the image through an external command
///
/// The command receives the source image as PNG bytes on stdin and must
/// write the alpha-masked cut-out as PNG bytes to stdout (`rembg i` speaks
/// exactly this protocol). The child process is the opaque collaborator;
/// nothing about the model is assumed beyond this wire contract.
pub struct CommandSegmenter {
    program: String,
    args: Vec<String>,
}

impl CommandSegmenter {
    /// Build from a whitespace-separated command line, e.g. `"rembg i"`
    ///
    /// # Errors
    ///
    /// Returns `BgCompError::InvalidConfig` when the command line is empty.
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(String::from);
        let program = parts
            .next()
            .ok_or_else(|| BgCompError::invalid_config("segmenter command is empty"))?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    fn run_child(&self, png_bytes: Vec<u8>) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                BgCompError::segmentation_failure(&self.program, "spawn", &e.to_string())
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| BgCompError::segmentation("child stdin unavailable"))?;

        // Writer thread keeps stdin and stdout flowing independently so a
        // child that emits output before draining its input cannot deadlock.
        let writer = std::thread::spawn(move || -> std::io::Result<()> {
            stdin.write_all(&png_bytes)?;
            stdin.flush()
        });

        let output = child.wait_with_output().map_err(|e| {
            BgCompError::segmentation_failure(&self.program, "wait", &e.to_string())
        })?;

        writer
            .join()
            .map_err(|_| BgCompError::segmentation("stdin writer thread panicked"))?
            .map_err(|e| {
                BgCompError::segmentation_failure(&self.program, "write stdin", &e.to_string())
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BgCompError::segmentation_failure(
                &self.program,
                "inference",
                &format!("exit status {}: {}", output.status, stderr.trim()),
            ));
        }

        Ok(output.stdout)
    }
}

impl Segmenter for CommandSegmenter {
    fn segment(&self, image: &DynamicImage) -> Result<RgbaImage> {
        let mut png_bytes = Vec::new();
        image.write_to(
            &mut std::io::Cursor::new(&mut png_bytes),
            image::ImageFormat::Png,
        )?;

        debug!(
            program = %self.program,
            input_bytes = png_bytes.len(),
            "Invoking segmentation collaborator"
        );

        let stdout = self.run_child(png_bytes)?;

        let foreground = image::load_from_memory(&stdout).map_err(|e| {
            BgCompError::segmentation_failure(&self.program, "decode output", &e.to_string())
        })?;

        // Force to 4-channel; the compositing stage only accepts RGBA.
        Ok(foreground.to_rgba8())
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Segmenter that returns the input unchanged
///
/// Useful for tests and for wiring checks without a model installed: the
/// input's own alpha channel (opaque for JPEG/PNG-without-alpha uploads)
/// becomes the "mask".
#[derive(Debug, Default)]
pub struct PassthroughSegmenter;

impl Segmenter for PassthroughSegmenter {
    fn segment(&self, image: &DynamicImage) -> Result<RgbaImage> {
        Ok(image.to_rgba8())
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}
