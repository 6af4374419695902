use duration_str::deserialize_option_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("date-planner-harvest.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub overpass: Option<Overpass>,
    pub retry: Option<Retry>,
    pub storage: Option<Storage>,
    pub transform: Option<Transform>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Overpass {
    pub endpoint: Option<String>,
    pub user_agent: Option<String>,
}

impl Default for Overpass {
    fn default() -> Self {
        Config::default().overpass.expect("Overpass configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Retry {
    pub max_attempts: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub base_delay: Option<Duration>,
}

impl Default for Retry {
    fn default() -> Self {
        Config::default().retry.expect("Retry configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Storage {
    pub raw_dir: Option<PathBuf>,
    pub source: Option<String>,
    pub locations_file: Option<PathBuf>,
}

impl Default for Storage {
    fn default() -> Self {
        Config::default().storage.expect("Storage configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Transform {
    pub fallback_category: Option<String>,
}

impl Default for Transform {
    fn default() -> Self {
        Config::default().transform.expect("Transform configuration")
    }
}
