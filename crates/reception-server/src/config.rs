//! Server Configuration
//!
//! Read from the environment (and `.env`, loaded by `main`).

use std::path::PathBuf;
use std::time::Duration;

use crate::responder::OllamaConfig;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// Directory holding the built widget (`index.html`, wasm, css)
    pub static_dir: PathBuf,

    /// Directory holding the hospital CSV tables
    pub data_dir: PathBuf,

    /// Seconds between background responder health checks
    pub health_interval_secs: u64,

    /// Give up on a single health check after this many seconds
    pub health_timeout_secs: u64,

    /// Local LLM connection
    pub ollama: OllamaConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".into(),
            static_dir: PathBuf::from("static"),
            data_dir: PathBuf::from("data"),
            health_interval_secs: 30,
            health_timeout_secs: 2,
            ollama: OllamaConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            data_dir: std::env::var("RECEPTION_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            health_interval_secs: secs_from_env("HEALTH_INTERVAL_SECS", defaults.health_interval_secs),
            health_timeout_secs: secs_from_env("HEALTH_TIMEOUT_SECS", defaults.health_timeout_secs),
            ollama: OllamaConfig::from_env(),
        }
    }

    pub const fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs)
    }

    pub const fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }
}

/// Positive whole seconds from `key`, else `default`
fn secs_from_env(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}
