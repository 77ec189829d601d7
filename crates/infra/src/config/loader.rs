//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `EDA_URL` is not set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `EDA_URL`: Controller base URL (required)
//! - `EDA_USERNAME`: Administrative username
//! - `EDA_PASSWORD`: Administrative password
//! - `EDA_KEYCLOAK_URL`: Identity broker URL (defaults to the controller proxy)
//! - `EDA_APP_REALM`: Application realm
//! - `EDA_APP_CLIENT_ID`: Application client id
//! - `EDA_INSECURE`: Skip TLS verification (true/false)
//! - `EDA_TIMEOUT_SECS`: Request timeout in seconds
//! - `EDA_WAIT_TIMEOUT_SECS`: Wait-for-completion timeout in seconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./eda.toml`, `./eda.json` (current working directory)
//! 2. `./config.toml`, `./config.json` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use eda_domain::{Config, EdaError, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["eda.toml", "eda.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// Uses environment variables when `EDA_URL` is set; only when it is absent
/// does loading fall back to a config file. A malformed override next to
/// `EDA_URL` is an error, never a silent switch to a file.
///
/// # Errors
/// Returns `EdaError::Config` if:
/// - An environment variable is malformed while `EDA_URL` is set
/// - No config file is found when `EDA_URL` is absent
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load() -> Result<Config> {
    let config = if env_opt("EDA_URL").is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        config
    } else {
        tracing::debug!("EDA_URL not set, loading configuration from file");
        load_from_file(None)?
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `EDA_URL` is required; every other variable overrides the
/// corresponding default when set.
///
/// # Errors
/// Returns `EdaError::Config` if `EDA_URL` is missing or a numeric
/// variable cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::new(env_var("EDA_URL")?);

    if let Some(username) = env_opt("EDA_USERNAME") {
        config.broker.username = username;
    }
    if let Some(password) = env_opt("EDA_PASSWORD") {
        config.broker.password = password;
    }
    if let Some(url) = env_opt("EDA_KEYCLOAK_URL") {
        config.broker.url = Some(url);
    }
    if let Some(realm) = env_opt("EDA_APP_REALM") {
        config.broker.app_realm = realm;
    }
    if let Some(client_id) = env_opt("EDA_APP_CLIENT_ID") {
        config.broker.app_client_id = client_id;
    }
    if let Some(timeout) = env_u64("EDA_TIMEOUT_SECS")? {
        config.controller.timeout_secs = timeout;
    }
    if let Some(timeout) = env_u64("EDA_WAIT_TIMEOUT_SECS")? {
        config.controller.wait_timeout_secs = timeout;
    }
    config.controller.accept_invalid_certs =
        env_bool("EDA_INSECURE", config.controller.accept_invalid_certs);

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `EdaError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(EdaError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            EdaError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| EdaError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| EdaError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| EdaError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(EdaError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key)
        .ok_or_else(|| EdaError::Config(format!("Missing required environment variable: {}", key)))
}

/// Non-empty environment variable, if set
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    env_opt(key)
        .map(|s| {
            s.trim()
                .parse::<u64>()
                .map_err(|e| EdaError::Config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
