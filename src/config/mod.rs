use anyhow::{anyhow, Result};
use dph_core::{
    entities::Category,
    usecases::{RetryPolicy, TransformPolicy},
};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use strum::IntoEnumIterator;

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "date-planner-harvest.toml";

const ENV_NAME_OVERPASS_URL: &str = "OVERPASS_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub overpass: Overpass,
    pub retry: RetryPolicy,
    pub storage: Storage,
    pub transform: TransformPolicy,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::debug!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::debug!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(url) = env::var(ENV_NAME_OVERPASS_URL) {
            if !url.trim().is_empty() {
                cfg.overpass.endpoint = url;
            }
        }
        Ok(cfg)
    }
}

#[derive(Debug, Clone)]
pub struct Overpass {
    pub endpoint: String,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct Storage {
    /// Root directory of the raw captures.
    pub raw_dir: PathBuf,
    /// Names the upstream source, used as sub-directory of `raw_dir`.
    pub source: String,
    /// The canonical collection.
    pub locations_file: PathBuf,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            overpass,
            retry,
            storage,
            transform,
        } = from;

        let raw::Overpass {
            endpoint,
            user_agent,
        } = overpass.unwrap_or_default();
        let default = raw::Overpass::default();
        let overpass = Overpass {
            endpoint: endpoint
                .or(default.endpoint)
                .ok_or_else(|| anyhow!("Missing Overpass endpoint"))?,
            user_agent: user_agent
                .or(default.user_agent)
                .ok_or_else(|| anyhow!("Missing Overpass user agent"))?,
        };

        let raw::Retry {
            max_attempts,
            base_delay,
        } = retry.unwrap_or_default();
        let default = raw::Retry::default();
        let retry = RetryPolicy {
            max_attempts: max_attempts
                .or(default.max_attempts)
                .unwrap_or(RetryPolicy::DEFAULT_MAX_ATTEMPTS),
            base_delay: base_delay
                .or(default.base_delay)
                .unwrap_or(RetryPolicy::DEFAULT_BASE_DELAY),
        };
        if retry.max_attempts == 0 {
            return Err(anyhow!("At least one Overpass attempt is required"));
        }

        let raw::Storage {
            raw_dir,
            source,
            locations_file,
        } = storage.unwrap_or_default();
        let default = raw::Storage::default();
        let storage = Storage {
            raw_dir: raw_dir
                .or(default.raw_dir)
                .ok_or_else(|| anyhow!("Missing raw capture directory"))?,
            source: source
                .or(default.source)
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| anyhow!("Missing raw capture source name"))?,
            locations_file: locations_file
                .or(default.locations_file)
                .ok_or_else(|| anyhow!("Missing locations file"))?,
        };

        let raw::Transform { fallback_category } = transform.unwrap_or_default();
        let transform = match fallback_category.or(raw::Transform::default().fallback_category) {
            Some(name) => TransformPolicy {
                fallback_category: name
                    .parse::<Category>()
                    .map_err(|_| {
                        let known: Vec<_> = Category::iter().map(|c| c.to_string()).collect();
                        anyhow!(
                            "Unknown fallback category '{name}', expected one of: {}",
                            known.join(", ")
                        )
                    })?,
            },
            None => TransformPolicy::default(),
        };

        Ok(Self {
            overpass,
            retry,
            storage,
            transform,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = None;
        let cfg = Config::try_load_from_file_or_default(file).unwrap();
        assert_eq!(cfg.retry, RetryPolicy::default());
        assert_eq!(cfg.storage.source, "osm");
        assert_eq!(cfg.storage.locations_file, Path::new("data/locations.json"));
        assert_eq!(cfg.transform.fallback_category, Category::Dining);
        assert!(cfg.overpass.user_agent.starts_with("date-planner-harvest/"));
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let raw: raw::Config = toml::from_str(
            r#"
            [retry]
            base-delay = "250ms"

            [transform]
            fallback-category = "Museums/Exhibitions"
            "#,
        )
        .unwrap();
        let cfg = Config::try_from(raw).unwrap();
        assert_eq!(cfg.retry.max_attempts, 3);
        assert_eq!(cfg.retry.base_delay, Duration::from_millis(250));
        assert_eq!(cfg.storage.raw_dir, Path::new("harvest/output/raw"));
        assert_eq!(
            cfg.transform.fallback_category,
            Category::MuseumsExhibitions
        );
    }

    #[test]
    fn reject_invalid_values() {
        let raw: raw::Config = toml::from_str("[retry]\nmax-attempts = 0\n").unwrap();
        assert!(Config::try_from(raw).is_err());
        let raw: raw::Config =
            toml::from_str("[transform]\nfallback-category = \"Hotels\"\n").unwrap();
        let err = Config::try_from(raw).unwrap_err();
        assert!(err
            .to_string()
            .ends_with("expected one of: Dining, Movies, Museums/Exhibitions"));
        let raw: raw::Config = toml::from_str("[storage]\nsource = \"\"\n").unwrap();
        assert!(Config::try_from(raw).is_err());
    }
}
