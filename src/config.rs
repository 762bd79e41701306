//! Verimock configuration.

use crate::verdicts::VerdictTable;
use crate::VerimockError;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

/// Shared secret used by the mocked vendor.
pub const DEFAULT_SALT: &str = "0123456789";

/// Path of the callback endpoint. Also part of the authenticated string.
pub const DEFAULT_CALLBACK_PATH: &str = "/dv-iqc";

/// Path of the digest helper endpoint.
pub const DEFAULT_HASH_PATH: &str = "/hash";

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8090";

/// Configuration for the verification service.
///
/// Built once at startup and never mutated. Tests construct it directly to
/// substitute a different salt or verdict fixtures.
#[derive(Debug, Clone)]
pub struct VerimockConfig {
    /// Secret appended to every canonical callback string.
    pub salt: String,

    /// Callback endpoint path (e.g., "/dv-iqc").
    pub callback_path: String,

    /// Digest helper endpoint path (e.g., "/hash").
    pub hash_path: String,

    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,

    /// Canned verdicts keyed by exact URL.
    pub verdicts: VerdictTable,
}

impl Default for VerimockConfig {
    fn default() -> Self {
        Self {
            salt: DEFAULT_SALT.to_string(),
            callback_path: DEFAULT_CALLBACK_PATH.to_string(),
            hash_path: DEFAULT_HASH_PATH.to_string(),
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8090)),
            verdicts: VerdictTable::builtin(),
        }
    }
}

/// On-disk fixture file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    salt: Option<String>,
    callback_path: Option<String>,
    hash_path: Option<String>,
    listen_addr: Option<SocketAddr>,
    verdicts: Option<HashMap<String, String>>,
}

impl VerimockConfig {
    /// Parse TOML fixtures layered over the defaults.
    ///
    /// A `[verdicts]` table, when present, replaces the built-in table.
    pub fn from_toml_str(source: &str) -> Result<Self, VerimockError> {
        let file: ConfigFile = toml::from_str(source)
            .map_err(|e| VerimockError::ConfigError(format!("Invalid config file: {}", e)))?;

        let mut config = Self::default();
        if let Some(salt) = file.salt {
            config.salt = salt;
        }
        if let Some(path) = file.callback_path {
            config.callback_path = path;
        }
        if let Some(path) = file.hash_path {
            config.hash_path = path;
        }
        if let Some(addr) = file.listen_addr {
            config.listen_addr = addr;
        }
        if let Some(verdicts) = file.verdicts {
            config.verdicts = VerdictTable::from_entries(verdicts);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load TOML fixtures from `path`.
    pub fn from_file(path: &Path) -> Result<Self, VerimockError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            VerimockError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), VerimockError> {
        if self.salt.is_empty() {
            return Err(VerimockError::ConfigError(
                "salt cannot be empty".to_string(),
            ));
        }
        for (name, path) in [
            ("callback_path", &self.callback_path),
            ("hash_path", &self.hash_path),
        ] {
            if !path.starts_with('/') {
                return Err(VerimockError::ConfigError(format!(
                    "{} must start with '/', got {:?}",
                    name, path
                )));
            }
            if path.contains('?') {
                return Err(VerimockError::ConfigError(format!(
                    "{} cannot contain a query string, got {:?}",
                    name, path
                )));
            }
        }
        if self.callback_path == self.hash_path {
            return Err(VerimockError::ConfigError(
                "callback_path and hash_path must differ".to_string(),
            ));
        }
        Ok(())
    }
}
