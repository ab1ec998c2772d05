//! Shared configuration for the featctl CLI.
//!
//! TOML profiles naming registry endpoints, loaded through figment
//! (defaults ← file ← `FEATCTL_*` env vars) and translated into the
//! URL + transport settings the API client needs. Profiles carry no
//! credentials: registry authentication is handled outside this tool.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use featctl_api::{TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named registry profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named registry profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Registry base URL (e.g., "https://registry.internal").
    pub registry: String,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout in seconds.
    pub timeout: Option<u64>,
}

// ── Resolved settings ───────────────────────────────────────────────

/// A profile resolved down to what `RegistryClient::new` needs.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub url: url::Url,
    pub transport: TransportConfig,
}

/// Translate a profile into connection settings.
pub fn profile_to_settings(profile: &Profile) -> Result<RegistrySettings, ConfigError> {
    let url: url::Url = profile
        .registry
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "registry".into(),
            reason: format!("invalid URL: {}", profile.registry),
        })?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(default_timeout()));

    Ok(RegistrySettings {
        url,
        transport: TransportConfig { tls, timeout },
    })
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "featctl", "featctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("featctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("FEATCTL_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            registry: "https://registry.internal".into(),
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }

    #[test]
    fn default_config_has_default_profile_name() {
        let cfg = Config::default();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.timeout, 30);
    }

    #[test]
    fn profile_resolves_to_settings() {
        let settings = profile_to_settings(&sample_profile()).unwrap();
        assert_eq!(settings.url.as_str(), "https://registry.internal/");
        assert_eq!(settings.transport.timeout, Duration::from_secs(30));
        assert!(matches!(settings.transport.tls, TlsMode::System));
    }

    #[test]
    fn insecure_profile_accepts_invalid_certs() {
        let profile = Profile {
            insecure: Some(true),
            timeout: Some(5),
            ..sample_profile()
        };
        let settings = profile_to_settings(&profile).unwrap();
        assert!(matches!(
            settings.transport.tls,
            TlsMode::DangerAcceptInvalid
        ));
        assert_eq!(settings.transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_registry_url_is_a_validation_error() {
        let profile = Profile {
            registry: "not a url".into(),
            ..sample_profile()
        };
        assert!(matches!(
            profile_to_settings(&profile),
            Err(ConfigError::Validation { ref field, .. }) if field == "registry"
        ));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.profiles.insert("prod".into(), sample_profile());

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(
            parsed.profiles.get("prod").unwrap().registry,
            "https://registry.internal"
        );
    }
}
