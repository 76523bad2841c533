//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use webmon_core::error::{Result, WebmonError};

pub use schema::{SamplerSection, ServerSection, WebmonConfig};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "WEBMON_CONFIG";
/// File looked up in the working directory when `WEBMON_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "webmon.yaml";

/// Resolve the config: explicit path must exist, the default path is optional.
pub fn load() -> Result<WebmonConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => load_from_file(&path),
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        Err(_) => {
            tracing::info!("no config file found, using built-in defaults");
            let cfg = WebmonConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}

pub fn load_from_file(path: &str) -> Result<WebmonConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| WebmonError::Internal(format!("read config {path} failed: {e}")))?;
    let cfg = load_from_str(&s)?;
    tracing::info!(path, "config loaded");
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<WebmonConfig> {
    let cfg: WebmonConfig = serde_yaml::from_str(s)
        .map_err(|e| WebmonError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
