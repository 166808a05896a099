//! Server settings loaded via OrthoConfig.
//!
//! Values are layered from defaults, an optional configuration file, `ROSTER_*`
//! environment variables, and command-line flags, later layers winning.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;
/// Default in-memory cap for uploaded images, in bytes.
pub const DEFAULT_UPLOAD_MEMORY_LIMIT: usize = 2 * 1024 * 1024;

/// Settings rejected after loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `upload_memory_limit` was zero.
    #[error("upload memory limit must be greater than zero")]
    ZeroUploadLimit,
    /// `host` was empty or whitespace.
    #[error("host must not be empty")]
    EmptyHost,
}

/// Configuration values controlling the HTTP listener.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct ServerSettings {
    /// Interface to bind.
    #[ortho_config(default = DEFAULT_HOST.to_owned())]
    pub host: String,
    /// Port to bind.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Maximum bytes buffered in memory for an uploaded image.
    #[ortho_config(default = DEFAULT_UPLOAD_MEMORY_LIMIT)]
    pub upload_memory_limit: usize,
}

impl ServerSettings {
    /// Reject settings the server cannot start with.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the host is blank or the upload limit
    /// is zero.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.host.trim().is_empty() {
            return Err(SettingsError::EmptyHost);
        }
        if self.upload_memory_limit == 0 {
            return Err(SettingsError::ZeroUploadLimit);
        }
        Ok(())
    }
}
