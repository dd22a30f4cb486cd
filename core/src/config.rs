//! Handles the configuration of the site renderer.
//!
//! this module is responsible for parsing the Ruichiji.toml file and merging it with
//! environment variables and cli arguments.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

pub static DEFAULT_CONFIG: &str = include_str!("../../Ruichiji.toml");

#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// Where the content lives and how it is linked.
    #[serde(default)]
    pub site: SiteSettings,
}

impl Settings {
    /// Load settings from the config file, environment variables, and CLI arguments.
    ///
    /// The environment variables are prefixed with `RUICHIJI_`, and nested keys are separated by `__`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the config file is not found or if the config file is
    /// invalid.
    #[inline]
    pub fn init(
        config: PathBuf,
        data_dir: Option<PathBuf>,
        log_level: Option<log::LevelFilter>,
    ) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from(config))
            .add_source(Environment::with_prefix("RUICHIJI").separator("__"))
            .build()?;

        let mut settings: Self = s.try_deserialize()?;

        settings.site.data_dir = shellexpand::tilde(&settings.site.data_dir.to_string_lossy())
            .into_owned()
            .into();

        if let Some(data_dir) = data_dir {
            settings.site.data_dir = data_dir;
        }

        if let Some(log_level) = log_level {
            settings.site.log_level = log_level;
        }

        Ok(settings)
    }

    /// Get the (default) path to the config file.
    /// If the config file does not exist at this path, it will be created with the default config.
    ///
    /// See [`crate::get_config_dir`] for more information about where this default path is located.
    ///
    /// # Errors
    ///
    /// This function will return an error if the system config directory (e.g., `~/.config` on linux) could not be found,
    /// or if the config file was missing and could not be created.
    #[inline]
    pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
        let config_dir = crate::get_config_dir()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }
        let config_file = config_dir.join("Ruichiji.toml");

        if !config_file.exists() {
            std::fs::write(&config_file, DEFAULT_CONFIG)?;
        }

        Ok(config_file)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SiteSettings {
    /// The directory holding the collection documents.
    /// Relative paths are looked up with [`SiteSettings::resolve_data_dir`].
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// URL prefix of the site's assets.
    /// Default is "assets/".
    #[serde(default = "default_asset_base")]
    pub asset_base: String,
    /// What level of logging to use.
    /// Default is "info".
    #[serde(default = "default_log_level")]
    #[serde(deserialize_with = "de_log_level")]
    pub log_level: log::LevelFilter,
}

impl SiteSettings {
    /// The data directory to read from, as seen from `cwd`.
    ///
    /// An absolute [`SiteSettings::data_dir`] is used as-is. A relative one is
    /// searched for in `cwd` and then in each of its ancestors, so the tool can
    /// be run from anywhere inside the site's repository. If no ancestor has
    /// it, it is taken relative to `cwd`.
    #[must_use]
    pub fn resolve_data_dir(&self, cwd: &Path) -> PathBuf {
        if self.data_dir.is_absolute() {
            return self.data_dir.clone();
        }

        cwd.ancestors()
            .map(|dir| dir.join(&self.data_dir))
            .find(|candidate| candidate.is_dir())
            .unwrap_or_else(|| cwd.join(&self.data_dir))
    }

    /// The rendering configuration derived from these settings.
    #[must_use]
    pub fn site_config(&self) -> SiteConfig {
        SiteConfig::new(&self.asset_base)
    }
}

impl Default for SiteSettings {
    #[inline]
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            asset_base: default_asset_base(),
            log_level: default_log_level(),
        }
    }
}

fn de_log_level<'de, D>(deserializer: D) -> Result<log::LevelFilter, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(log::LevelFilter::from_str(&s).unwrap_or_else(|_| default_log_level()))
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("assets/data")
}

fn default_asset_base() -> String {
    "assets/".into()
}

const fn default_log_level() -> log::LevelFilter {
    log::LevelFilter::Info
}

/// Configuration handed to the renderer at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    /// URL prefix of the site's assets, always ending in `/`.
    pub asset_base: String,
}

impl SiteConfig {
    #[must_use]
    pub fn new(asset_base: &str) -> Self {
        let mut asset_base = asset_base.trim().to_string();
        if asset_base.is_empty() {
            asset_base = default_asset_base();
        } else if !asset_base.ends_with('/') {
            asset_base.push('/');
        }
        Self { asset_base }
    }

    /// The image shown for items without a cover of their own.
    #[must_use]
    pub fn default_cover(&self) -> String {
        format!("{}images/default-cover.svg", self.asset_base)
    }
}

impl Default for SiteConfig {
    #[inline]
    fn default() -> Self {
        Self::new(&default_asset_base())
    }
}
