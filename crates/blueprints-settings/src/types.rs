//! Settings types. Every struct uses `camelCase` keys and `default` so a
//! settings file only needs to list the values it changes.

use serde::{Deserialize, Serialize};

pub use blueprints_store::FilterKind;

use crate::errors::{Result, SettingsError};

/// Root settings object.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintsSettings {
    pub server: ServerSettings,
    pub source: SourceSettings,
    /// Read filter applied by the HTTP server.
    pub filter: FilterKind,
    pub logging: LoggingSettings,
}

impl BlueprintsSettings {
    /// Cross-field checks that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.source.backend == SourceBackend::Remote && self.source.remote_url.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "source.remoteUrl is required for the remote backend".into(),
            ));
        }
        if self.source.connect_timeout_ms == 0 || self.source.request_timeout_ms == 0 {
            return Err(SettingsError::InvalidValue("source timeouts must be positive".into()));
        }
        Ok(())
    }
}

/// HTTP server bind settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Which blueprint backend the process uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceBackend {
    /// Built-in demo data held in memory.
    #[default]
    Fixture,
    /// A `/blueprints` HTTP service.
    Remote,
}

/// Data source selection and remote client tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceSettings {
    pub backend: SourceBackend,
    /// Service root for the remote backend.
    pub remote_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            backend: SourceBackend::Fixture,
            remote_url: "http://127.0.0.1:8080".to_string(),
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
