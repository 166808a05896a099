//! HTTP server configuration object.

use roster::config::ServerSettings;

/// Resolved configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) upload_memory_limit: usize,
}

impl ServerConfig {
    /// Construct a server configuration from explicit values.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, upload_memory_limit: usize) -> Self {
        Self {
            host: host.into(),
            port,
            upload_memory_limit,
        }
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self::new(
            settings.host.as_str(),
            settings.port,
            settings.upload_memory_limit,
        )
    }
}
