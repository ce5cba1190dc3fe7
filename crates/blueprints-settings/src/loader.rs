//! Settings loading with deep merge and environment variable overrides.
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::{BlueprintsSettings, FilterKind, SourceBackend};

/// Resolve the path to the settings file (`~/.blueprints/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".blueprints").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<BlueprintsSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file means defaults; a file with invalid JSON is an error.
pub fn load_settings_from_path(path: &Path) -> Result<BlueprintsSettings> {
    let mut settings = read_layers(path)?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

/// Defaults merged with the file at `path`, without env overrides.
fn read_layers(path: &Path) -> Result<BlueprintsSettings> {
    let defaults = serde_json::to_value(BlueprintsSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `BLUEPRINTS_*` environment variable overrides.
pub fn apply_env_overrides(settings: &mut BlueprintsSettings) {
    apply_overrides(settings, |key| std::env::var(key).ok());
}

/// Apply overrides read through `lookup`. Invalid values are ignored with a
/// warning, leaving the file/default value in place.
pub fn apply_overrides(settings: &mut BlueprintsSettings, lookup: impl Fn(&str) -> Option<String>) {
    let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    // ── Server ──────────────────────────────────────────────────────
    if let Some(v) = read("BLUEPRINTS_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read("BLUEPRINTS_PORT") {
        match parse_u16_range(&v, 1, 65535) {
            Some(port) => settings.server.port = port,
            None => ignore("BLUEPRINTS_PORT", &v),
        }
    }

    // ── Source ──────────────────────────────────────────────────────
    if let Some(v) = read("BLUEPRINTS_SOURCE") {
        match parse_enum::<SourceBackend>(&v) {
            Some(backend) => settings.source.backend = backend,
            None => ignore("BLUEPRINTS_SOURCE", &v),
        }
    }
    if let Some(v) = read("BLUEPRINTS_REMOTE_URL") {
        settings.source.remote_url = v;
    }
    if let Some(v) = read("BLUEPRINTS_CONNECT_TIMEOUT_MS") {
        match parse_u64_range(&v, 100, 600_000) {
            Some(ms) => settings.source.connect_timeout_ms = ms,
            None => ignore("BLUEPRINTS_CONNECT_TIMEOUT_MS", &v),
        }
    }
    if let Some(v) = read("BLUEPRINTS_REQUEST_TIMEOUT_MS") {
        match parse_u64_range(&v, 100, 600_000) {
            Some(ms) => settings.source.request_timeout_ms = ms,
            None => ignore("BLUEPRINTS_REQUEST_TIMEOUT_MS", &v),
        }
    }

    // ── Filter & logging ────────────────────────────────────────────
    if let Some(v) = read("BLUEPRINTS_FILTER") {
        match parse_enum::<FilterKind>(&v) {
            Some(kind) => settings.filter = kind,
            None => ignore("BLUEPRINTS_FILTER", &v),
        }
    }
    if let Some(v) = read("BLUEPRINTS_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read("BLUEPRINTS_LOG_JSON") {
        match parse_bool(&v) {
            Some(json) => settings.logging.json = json,
            None => ignore("BLUEPRINTS_LOG_JSON", &v),
        }
    }
}

fn ignore(key: &str, value: &str) {
    warn!(key, value, "invalid env override, ignoring");
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a lowercase serde enum tag such as `remote` or `subsampling`.
fn parse_enum<T: serde::de::DeserializeOwned>(val: &str) -> Option<T> {
    serde_json::from_value(Value::String(val.trim().to_lowercase())).ok()
}
