use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Directory of `<kind>.json` files replacing the bundled fixtures
    #[serde(default)]
    pub fixtures_dir: Option<PathBuf>,
    /// Capacity of the store-change broadcast channel
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_event_buffer() -> usize {
    256
}

fn default_log_filter() -> String {
    "info,application=debug".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: None,
            event_buffer: default_event_buffer(),
            log_filter: default_log_filter(),
        }
    }
}

impl DashboardConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .set_default("event_buffer", default_event_buffer() as i64)?
            .set_default("log_filter", default_log_filter())?
            // e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // e.g. PALM__EVENT_BUFFER=64
            .add_source(Environment::with_prefix("PALM").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
