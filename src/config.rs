//! Server configuration

use crate::error::{BgCompError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the HTTP service
///
/// Host, port, and the segmenter command are process-startup concerns; the
/// per-request knobs (background color, output format) arrive as form
/// fields and never live here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// TCP port to listen on
    pub port: u16,

    /// Command line for the external segmentation collaborator
    ///
    /// Must read an image as PNG bytes on stdin and write the alpha-masked
    /// cut-out as PNG bytes to stdout.
    pub segmenter_command: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            segmenter_command: "rembg i".to_string(),
        }
    }
}

impl ServerConfig {
    /// Create a new configuration builder
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Bind address in `host:port` form
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate configuration parameters
    ///
    /// # Errors
    ///
    /// Returns `BgCompError::InvalidConfig` for an empty host or an empty
    /// segmenter command.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(BgCompError::invalid_config("host must not be empty"));
        }
        if self.segmenter_command.trim().is_empty() {
            return Err(BgCompError::invalid_config(
                "segmenter command must not be empty",
            ));
        }
        Ok(())
    }
}

/// Builder for [`ServerConfig`]
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Set the bind host
    #[must_use]
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the listen port
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the segmenter command line
    #[must_use]
    pub fn segmenter_command<S: Into<String>>(mut self, command: S) -> Self {
        self.config.segmenter_command = command.into();
        self
    }

    /// Build and validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `BgCompError::InvalidConfig` when validation fails.
    pub fn build(self) -> Result<ServerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_original_service() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_builder_chain() {
        let config = ServerConfig::builder()
            .host("127.0.0.1")
            .port(8080)
            .segmenter_command("cat")
            .build()
            .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.segmenter_command, "cat");
    }

    #[test]
    fn test_empty_segmenter_command_rejected() {
        let err = ServerConfig::builder()
            .segmenter_command("  ")
            .build()
            .expect_err("blank command");
        assert!(matches!(err, BgCompError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_host_rejected() {
        assert!(ServerConfig::builder().host("").build().is_err());
    }
}
