use crate::Result;
use crate::providers::{InventoryProvider, Providers};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::sync::Arc;

const LOG_TARGET: &str = "    config";

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// The configuration file looked up when none is given explicitly
pub const CONFIG_FILE_NAME: &str = "cloudspec.toml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Deadline for a single provider call, in seconds
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// Number of resource types loaded in parallel
    #[serde(default = "default_load_concurrency")]
    pub load_concurrency: usize,

    /// Inventory files registered as providers
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,

    /// Directory against which relative provider paths are resolved
    #[serde(skip)]
    base_dir: Utf8PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    pub name: String,
    pub path: Utf8PathBuf,
}

const fn default_provider_timeout_secs() -> u64 {
    60
}

const fn default_load_concurrency() -> usize {
    4
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `cloudspec.toml` in `base_dir` is used if present.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading cloudspec configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!(target: LOG_TARGET, "No configuration file at '{path}', using defaults");
                    return Ok(Self {
                        base_dir: base_dir.to_path_buf(),
                        ..Self::default()
                    });
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading cloudspec configuration file '{path}'")),
            }
        };

        let mut config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;
        config.base_dir = final_path.parent().map_or_else(|| base_dir.to_path_buf(), Utf8Path::to_path_buf);

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    #[must_use]
    pub const fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Open every configured inventory and register it as a provider
    pub fn build_providers(&self) -> Result<Providers> {
        let mut providers = Providers::new();
        for entry in &self.providers {
            let path = if entry.path.is_absolute() {
                entry.path.clone()
            } else {
                self.base_dir.join(&entry.path)
            };

            let provider =
                InventoryProvider::open(&entry.name, &path).into_app_err_with(|| format!("opening inventory '{path}' for provider '{}'", entry.name))?;
            providers.register(Arc::new(provider));
        }

        Ok(providers)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.provider_timeout_secs == 0 {
            return Err(app_err!("provider_timeout_secs must be greater than 0"));
        }

        if self.load_concurrency == 0 {
            return Err(app_err!("load_concurrency must be greater than 0"));
        }

        let mut names = HashSet::new();
        for entry in &self.providers {
            if entry.name.is_empty() {
                return Err(app_err!("provider names must not be empty"));
            }

            if !names.insert(entry.name.as_str()) {
                return Err(app_err!("provider '{}' is configured more than once", entry.name));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str) -> ProviderConfig {
        ProviderConfig {
            name: name.to_string(),
            path: Utf8PathBuf::from(format!("{name}.json")),
        }
    }

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.provider_timeout(), Duration::from_secs(60));
        assert_eq!(config.load_concurrency, 4);
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config {
            provider_timeout_secs: 0,
            ..Config::default()
        };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_zero_concurrency() {
        let config = Config {
            load_concurrency: 0,
            ..Config::default()
        };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_duplicate_provider_names() {
        let config = Config {
            providers: vec![provider("aws"), provider("gcp"), provider("aws")],
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'aws' is configured more than once"));
    }

    #[test]
    fn test_validate_distinct_provider_names() {
        let config = Config {
            providers: vec![provider("aws"), provider("gcp")],
            ..Config::default()
        };
        config.validate().unwrap();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let (_tmp, dir) = temp_dir();
        let output_path = dir.join(CONFIG_FILE_NAME);
        Config::save_default(&output_path).unwrap();

        let loaded = Config::load(&dir, Some(&output_path)).unwrap();
        loaded.validate().unwrap();
        assert_eq!(loaded.base_dir, dir);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let (_tmp, dir) = temp_dir();
        let config = Config::load(&dir, None).unwrap();
        assert_eq!(config.load_concurrency, 4);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_rejects_unknown_fields() {
        let (_tmp, dir) = temp_dir();
        fs::write(dir.join(CONFIG_FILE_NAME), "cache_ttl = \"1h\"\n").unwrap();
        let _ = Config::load(&dir, None).unwrap_err();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_build_providers_resolves_relative_paths() {
        let (_tmp, dir) = temp_dir();
        fs::create_dir(dir.join("inventory")).unwrap();
        fs::write(
            dir.join("inventory/aws.json"),
            r#"{ "resource_defs": [{ "group": "ec2", "resource": "instance" }] }"#,
        )
        .unwrap();
        fs::write(
            dir.join(CONFIG_FILE_NAME),
            "load_concurrency = 2\n[[providers]]\nname = \"aws\"\npath = \"inventory/aws.json\"\n",
        )
        .unwrap();

        let config = Config::load(&dir, None).unwrap();
        assert_eq!(config.load_concurrency, 2);

        let providers = config.build_providers().unwrap();
        assert_eq!(providers.len(), 1);
        assert!(providers.get("aws").is_some());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_build_providers_missing_inventory_fails() {
        let (_tmp, dir) = temp_dir();
        fs::write(dir.join(CONFIG_FILE_NAME), "[[providers]]\nname = \"aws\"\npath = \"missing.json\"\n").unwrap();

        let config = Config::load(&dir, None).unwrap();
        let _ = config.build_providers().unwrap_err();
    }
}
