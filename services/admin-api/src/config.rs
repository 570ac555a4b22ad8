use adminkit::config::{ObservabilityConfig, SimulationConfig, StorageConfig, StoreConfig};
use anyhow::Result;
use config::{Config, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminApiConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// YAML file (optional) overlaid with `ADMIN_API__SECTION__KEY` variables.
pub fn load_config(path: &str) -> Result<AdminApiConfig> {
    let config = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("ADMIN_API")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminkit::config::StorageBackend;
    use adminkit::sim::PanelId;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config("does/not/exist").unwrap();
        assert_eq!(config.store.fetch_delay_ms, 1_000);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.simulation.autostart.is_empty());
    }

    #[test]
    fn yaml_sections_are_read() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "store:\n  fetch_delay_ms: 5\nsimulation:\n  speed: 3.0\n  autostart: [quantum-lab]\nstorage:\n  backend: memory"
        )
        .unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.store.fetch_delay_ms, 5);
        assert_eq!(config.store.auth_delay_ms, 1_000);
        assert_eq!(config.simulation.speed, 3.0);
        assert_eq!(config.simulation.autostart, vec![PanelId::QuantumLab]);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }
}
