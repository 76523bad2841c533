use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use webmon_core::error::{Result, WebmonError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebmonConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub sampler: SamplerSection,
}

impl Default for WebmonConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            sampler: SamplerSection::default(),
        }
    }
}

impl WebmonConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(WebmonError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.sampler.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            WebmonError::BadRequest(format!(
                "server.listen must be a valid socket address ({}): {e}",
                self.listen
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplerSection {
    /// CPU measurement window; one sample is taken per window.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Mount point sampled by `/status`.
    #[serde(default = "default_disk_mount")]
    pub disk_mount: String,
}

impl Default for SamplerSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            disk_mount: default_disk_mount(),
        }
    }
}

impl SamplerSection {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn disk_mount(&self) -> &Path {
        Path::new(&self.disk_mount)
    }

    pub fn validate(&self) -> Result<()> {
        if !(200..=60000).contains(&self.interval_ms) {
            return Err(WebmonError::BadRequest(
                "sampler.interval_ms must be between 200 and 60000".into(),
            ));
        }
        if !self.disk_mount().is_absolute() {
            return Err(WebmonError::BadRequest(
                "sampler.disk_mount must be an absolute path".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_interval_ms() -> u64 {
    1000
}
fn default_disk_mount() -> String {
    "/".into()
}
