//! Configuration module
//!
//! Sectioned TOML configuration with serde defaults, loaded from
//! `~/.config/homeshare/config.toml` unless `HOMESHARE_CONFIG` points
//! elsewhere. Every field has a default so a missing file still yields a
//! runnable dev configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub scheduler: SchedulerConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// API bind address
    pub api_host: String,
    /// API port
    pub api_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Connection URL; default is a local SQLite file
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://homeshare.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter, overridable with RUST_LOG
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime in hours
    pub jwt_expiration_hours: i64,
    /// Shared secret of the identity provider
    pub identity_secret: String,
    /// Expected issuer of identity tokens
    pub identity_issuer: String,
    /// Reject logins from a device other than the bound one. Turning this
    /// off reproduces the legacy behavior where the mismatch was only
    /// logged.
    pub enforce_single_device: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "dev-secret-change-in-production".to_string(),
            jwt_expiration_hours: 24,
            identity_secret: "dev-identity-secret".to_string(),
            identity_issuer: "identity-provider".to_string(),
            enforce_single_device: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Exit-reminder sweep interval in seconds
    pub exit_reminder_interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            exit_reminder_interval_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Maximum stay length in days
    pub max_stay_days: i64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self { max_stay_days: 30 }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Default config path: `~/.config/homeshare/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("homeshare")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.booking.max_stay_days, 30);
        assert_eq!(cfg.scheduler.exit_reminder_interval_secs, 3600);
        assert!(cfg.security.enforce_single_device);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            api_port = 9999

            [security]
            enforce_single_device = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.api_port, 9999);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert!(!cfg.security.enforce_single_device);
        assert_eq!(cfg.security.jwt_expiration_hours, 24);
    }
}
