//! Bootstrap configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line arguments (highest priority)
//! 2. TOML config file
//! 3. Compiled defaults (fallback)
//!
//! The TOML file itself is located by, in order: an explicit path, the
//! `FYYUR_CONFIG` environment variable, `./fyyur.toml`, and
//! `<user config dir>/fyyur/config.toml`. Having no config file at all is
//! normal; a file that exists but cannot be parsed is an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "FYYUR_CONFIG";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_PATH: &str = "fyyur.db";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of a TOML config file; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[logging]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
    /// Additional log file; stderr logging stays on
    pub file: Option<PathBuf>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Merge command-line overrides over an optional TOML file over defaults
    pub fn resolve(overrides: ConfigOverrides, file: Option<TomlConfig>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Config::default();

        Self {
            host: overrides.host.or(file.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            database_path: overrides
                .database_path
                .or(file.database_path)
                .unwrap_or(defaults.database_path),
            log_level: overrides
                .log_level
                .or(file.logging.level)
                .unwrap_or(defaults.log_level),
            log_file: overrides.log_file.or(file.logging.file),
        }
    }

    /// Address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse TOML config text
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

/// Locate and load the TOML config file, if any
///
/// An explicit path (command line or `FYYUR_CONFIG`) must exist; the
/// implicit locations are skipped silently when absent.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path
        }
        None => match implicit_config_paths().into_iter().find(|p| p.exists()) {
            Some(path) => path,
            None => {
                info!("No config file found, using defaults");
                return Ok(None);
            }
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config = parse_toml_config(&content).map_err(|e| {
        warn!("Rejecting config file {}", path.display());
        e
    })?;
    info!("Loaded config file: {}", path.display());
    Ok(Some(config))
}

fn implicit_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("fyyur.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("fyyur").join("config.toml"));
    }
    paths
}
