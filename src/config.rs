//! ==============================================================================
//! config.rs - Runtime Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `simulator.toml`.
//!     loads configuration from file or falls back to defaults, then lets
//!     the PORT and SIMULATOR_ID environment variables override it.
//!
//! structure:
//!     - SimulatorSection: identity reported by /info.
//!     - ServerConfig: where the http facade listens.
//!     - PollingConfig: tick length of the update loop.
//!     - LoggingConfig: default log filter and per-tick sensor logging.
//!
//! ==============================================================================

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SimulatorConfig {
    #[serde(default)]
    pub simulator: SimulatorSection,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// file the config came from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulatorSection {
    pub id: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// kept as a string: /info echoes it back verbatim
    pub port: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub show_sensor_data: bool,
}

impl Default for SimulatorSection {
    fn default() -> Self {
        Self { id: "simulator-1".to_string() }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: "8080".to_string() }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), show_sensor_data: false }
    }
}

impl SimulatorConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("failed to parse config")
    }

    /// Load with default fallback, then apply environment overrides
    ///
    /// runs before logging is set up, so a broken file is reported on stderr
    pub fn load_or_default() -> Self {
        let mut config = Self::from_files();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    fn from_files() -> Self {
        let paths = [
            PathBuf::from("config").join("simulator.toml"),
            PathBuf::from("..").join("config").join("simulator.toml"),
        ];

        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(mut config) => {
                        config.source = Some(path.clone());
                        return config;
                    }
                    Err(e) => {
                        eprintln!("[CONFIG] Warning: Failed to load {}: {:#}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    /// PORT and SIMULATOR_ID win over the file when set and non-empty
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(port) = non_empty("PORT") {
            self.server.port = port;
        }
        if let Some(id) = non_empty("SIMULATOR_ID") {
            self.simulator.id = id;
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.polling.interval_ms.max(1))
    }

    /// Log configuration summary
    pub fn print_summary(&self) {
        match &self.source {
            Some(path) => tracing::info!("[CONFIG] Loaded from {}", path.display()),
            None => tracing::info!("[CONFIG] No config file found - using defaults"),
        }
        tracing::info!("[CONFIG] Simulator ID: {}", self.simulator.id);
        tracing::info!("[CONFIG] Listen: {}", self.bind_addr());
        tracing::info!("[CONFIG] Tick: {}ms", self.polling.interval_ms);
        tracing::info!("[CONFIG] Log Level: {}", self.logging.level);
    }
}
