use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::sim::PanelId;

/// Delays applied by the simulated thunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
    #[serde(default = "default_auth_delay_ms")]
    pub auth_delay_ms: u64,
}

fn default_fetch_delay_ms() -> u64 {
    1_000
}

fn default_auth_delay_ms() -> u64 {
    1_000
}

impl StoreConfig {
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }

    /// No artificial latency; used by tests and the terminal demo.
    pub fn immediate() -> Self {
        Self {
            fetch_delay_ms: 0,
            auth_delay_ms: 0,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: default_fetch_delay_ms(),
            auth_delay_ms: default_auth_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Multiplier on tick rates and action durations. 2.0 runs twice as fast.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Panels mounted when a service starts.
    #[serde(default)]
    pub autostart: Vec<PanelId>,
}

fn default_speed() -> f64 {
    1.0
}

impl SimulationConfig {
    pub fn scale(&self, period: Duration) -> Duration {
        if self.speed > 0.0 && self.speed.is_finite() {
            period.div_f64(self.speed).max(Duration::from_millis(1))
        } else {
            period
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            autostart: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data/local-storage.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_storage_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}
