//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub app_dir: PathBuf,
    /// Candidate documentation roots, highest priority first.
    pub documentation_roots: Vec<PathBuf>,
    pub content_types_dir: PathBuf,
    pub documentation_enabled: bool,
    pub cors_origin: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:1337".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- CMS Layout ---
        let app_dir = std::env::var("APP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let documentation_roots = match std::env::var_os("DOCUMENTATION_ROOTS") {
            Some(raw) => {
                let roots: Vec<PathBuf> = std::env::split_paths(&raw)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect();
                if roots.is_empty() {
                    return Err(ConfigError::InvalidValue(
                        "DOCUMENTATION_ROOTS".to_string(),
                        "no paths given".to_string(),
                    ));
                }
                roots
            }
            None => default_documentation_roots(&app_dir),
        };

        let content_types_dir = std::env::var("CONTENT_TYPES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| app_dir.join("src").join("api"));

        // --- Documentation Plugin ---
        let documentation_enabled = match std::env::var("DOCUMENTATION_ENABLED") {
            Ok(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "DOCUMENTATION_ENABLED".to_string(),
                    format!("'{}' is not a boolean", raw),
                )
            })?,
            Err(_) => true,
        };

        let cors_origin = std::env::var("CORS_ORIGIN").ok().filter(|o| !o.is_empty());

        Ok(Self {
            bind_address,
            log_level,
            app_dir,
            documentation_roots,
            content_types_dir,
            documentation_enabled,
            cors_origin,
        })
    }

    /// A configuration rooted at `app_dir` with every other setting at its default.
    pub fn for_app_dir(app_dir: impl Into<PathBuf>) -> Self {
        let app_dir = app_dir.into();
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 1337)),
            log_level: Level::INFO,
            documentation_roots: default_documentation_roots(&app_dir),
            content_types_dir: app_dir.join("src").join("api"),
            documentation_enabled: true,
            cors_origin: None,
            app_dir,
        }
    }
}

/// The compiled output tree is preferred over the source tree.
pub fn default_documentation_roots(app_dir: &Path) -> Vec<PathBuf> {
    let relative = Path::new("src")
        .join("extensions")
        .join("documentation")
        .join("documentation");
    vec![app_dir.join("dist").join(&relative), app_dir.join(relative)]
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
