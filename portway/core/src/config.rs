//! Endpoint Configuration
//!
//! Selects which local endpoint portway binds or connects to, loaded from a
//! TOML configuration file and environment variables.
//!
//! # Configuration Priority
//!
//! Values are applied with the following priority (highest first):
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # XDG Base Directory Compliance
//!
//! - Config file: `$XDG_CONFIG_HOME/portway/portway.toml`
//!   (typically `~/.config/portway/portway.toml`)
//! - Default socket: `$XDG_RUNTIME_DIR/portway/portway.sock`, falling back
//!   to `/tmp/portway-$UID/portway.sock`
//!
//! # Example Configuration
//!
//! ```toml
//! [transport]
//! endpoint = "unix:/run/user/1000/portway/portway.sock"
//! cleanup_stale = true
//! ```
//!
//! # Environment Variables
//!
//! - `PORTWAY_ENDPOINT`: endpoint specification (`unix:`, `unix-abstract:`,
//!   `vsock:` grammar; see [`crate::addr::resolver`])
//! - `PORTWAY_CLEANUP_STALE`: "1" or "true" to remove a stale socket file
//!   before binding

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::addr::resolver::resolve_endpoint;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration
// =============================================================================

/// Endpoint selection configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Endpoint specification (None = default path-based Unix socket)
    pub endpoint: Option<String>,

    /// Whether the binding layer removes a stale socket file before binding
    ///
    /// Only meaningful for path-based Unix endpoints; ignored for the other
    /// families, which have no filesystem entry.
    pub cleanup_stale: bool,
}

impl EndpointConfig {
    /// Load configuration from environment variables only
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides on top of this configuration
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("PORTWAY_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
        if let Ok(v) = std::env::var("PORTWAY_CLEANUP_STALE") {
            self.cleanup_stale = v == "1" || v.to_lowercase() == "true";
        }
        self
    }

    /// The endpoint to use, falling back to the default socket path
    #[must_use]
    pub fn effective_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("unix:{}", default_socket_path().display()))
    }

    /// Check that the configured endpoint resolves
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] when the endpoint text does
    /// not resolve (unknown scheme, malformed address, over-long path).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.endpoint {
            resolve_endpoint(endpoint)
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }
        Ok(())
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Transport section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct TransportToml {
    /// Endpoint specification
    endpoint: Option<String>,

    /// Whether to remove a stale socket file before binding
    cleanup_stale: Option<bool>,
}

/// Root of the TOML configuration file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct PortwayToml {
    /// `[transport]` section
    transport: TransportToml,
}

// =============================================================================
// Loading
// =============================================================================

/// Get the default configuration file path
///
/// `$XDG_CONFIG_HOME/portway/portway.toml`; `None` when no configuration
/// directory can be determined for the platform.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("portway").join("portway.toml"))
}

/// Load configuration from a specific TOML file
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] when the file cannot be read and
/// [`ConfigError::ParseError`] when it is not valid TOML.
pub fn load_config_from_path<P: AsRef<Path>>(path: P) -> Result<EndpointConfig, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: PortwayToml = toml::from_str(&text)?;

    let defaults = EndpointConfig::default();
    Ok(EndpointConfig {
        endpoint: parsed.transport.endpoint,
        cleanup_stale: parsed
            .transport
            .cleanup_stale
            .unwrap_or(defaults.cleanup_stale),
    })
}

/// Load configuration from the default file location and the environment
///
/// A missing configuration file is not an error: defaults apply, then
/// environment overrides.
///
/// # Errors
///
/// Returns an error only when a configuration file exists and cannot be
/// read or parsed.
pub fn load_config() -> Result<EndpointConfig, ConfigError> {
    let base = match default_config_path() {
        Some(path) if path.exists() => load_config_from_path(&path)?,
        _ => EndpointConfig::default(),
    };
    Ok(base.with_env_overrides())
}

/// Get the default Unix socket path
///
/// Uses `XDG_RUNTIME_DIR` if available, otherwise `/tmp/portway-$UID/`
#[must_use]
pub fn default_socket_path() -> PathBuf {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        PathBuf::from(runtime_dir)
            .join("portway")
            .join("portway.sock")
    } else {
        let uid = unsafe { libc::getuid() };
        PathBuf::from(format!("/tmp/portway-{uid}/portway.sock"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = EndpointConfig::default();
        assert!(config.endpoint.is_none());
        assert!(!config.cleanup_stale);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_endpoint_falls_back_to_socket_path() {
        let config = EndpointConfig::default();
        let endpoint = config.effective_endpoint();
        assert!(endpoint.starts_with("unix:"));
        assert!(endpoint.ends_with("portway.sock"));
    }

    #[test]
    fn test_default_socket_path() {
        let path = default_socket_path();
        assert!(path.to_string_lossy().contains("portway.sock"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[transport]\nendpoint = \"unix-abstract:portway-test\"\ncleanup_stale = true"
        )
        .unwrap();

        let config = load_config_from_path(file.path()).unwrap();
        assert_eq!(
            config.endpoint.as_deref(),
            Some("unix-abstract:portway-test")
        );
        assert!(config.cleanup_stale);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[transport]\nendpoint = \"vsock:2:1024\"").unwrap();

        let config = load_config_from_path(file.path()).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("vsock:2:1024"));
        assert!(!config.cleanup_stale);
    }

    #[test]
    fn test_load_config_malformed_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[transport\nendpoint = ").unwrap();

        let result = load_config_from_path(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path("/nonexistent/portway.toml");
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let config = EndpointConfig {
            endpoint: Some("tcp:127.0.0.1:80".to_string()),
            cleanup_stale: false,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
