use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::http::connection::SEND_BUFFER_CAPACITY;

/// Smallest send buffer that still fits a response header.
pub const MIN_SEND_BUFFER: usize = 256;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub sensor: SensorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    /// `None` selects the default HTTP port.
    pub port: Option<u16>,
    pub backlog: u32,
    pub send_buffer_capacity: usize,
    /// `None` disables the idle-connection reaper.
    pub idle_timeout_ms: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: None,
            backlog: 1,
            send_buffer_capacity: SEND_BUFFER_CAPACITY,
            idle_timeout_ms: Some(10_000),
        }
    }
}

impl ServerConfig {
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub interval_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self { interval_ms: 2_000 }
    }
}

impl SensorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Config {
    /// Loads the file named by `HYGRO_CONFIG` (defaults if unset), then
    /// applies the `HYGRO_PORT` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("HYGRO_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(port) = std::env::var("HYGRO_PORT") {
            let port = port
                .parse::<u16>()
                .with_context(|| format!("invalid HYGRO_PORT {port:?}"))?;
            cfg.server.port = Some(port);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.server.send_buffer_capacity < MIN_SEND_BUFFER {
            bail!(
                "server.send_buffer_capacity must be at least {MIN_SEND_BUFFER}, got {}",
                self.server.send_buffer_capacity
            );
        }
        if self.server.backlog == 0 {
            bail!("server.backlog must be at least 1");
        }
        if self.sensor.interval_ms == 0 {
            bail!("sensor.interval_ms must be positive");
        }
        Ok(())
    }
}
