//! Settings file support.
//!
//! The file lives at `<config dir>/tansu/config.toml`. Every key is
//! optional; a missing file means defaults. Command-line flags override
//! whatever the file says.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::{debug, LevelFilter};
use serde::Deserialize;

/// Sparse on-disk layout.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub browser: BrowserSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrowserSection {
    pub confirm_delete: Option<bool>,
    pub confirm_launch: Option<bool>,
    pub start_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

/// Behaviour switches consumed by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    pub confirm_delete: bool,
    pub confirm_launch: bool,
    pub start_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            confirm_delete: false,
            confirm_launch: true,
            start_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub browser: BrowserConfig,
    pub log: LogConfig,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub start_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tansu").join("config.toml"))
}

pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("tansu").join("tansu.log"))
}

/// Read `path`, treating a missing file as an empty one.
pub fn load_file(path: &Path) -> Result<FileConfig> {
    match fs::read_to_string(path) {
        Ok(text) => parse(&text).with_context(|| format!("invalid config {}", path.display())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no config at {}, using defaults", path.display());
            Ok(FileConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("cannot read config {}", path.display())),
    }
}

pub fn parse(text: &str) -> Result<FileConfig> {
    Ok(toml::from_str(text)?)
}

fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown log level {level:?}"))
}

impl FileConfig {
    /// Fill gaps with defaults and apply `overrides`.
    pub fn resolve(self, overrides: Overrides) -> Result<Config> {
        let defaults = BrowserConfig::default();
        let browser = BrowserConfig {
            confirm_delete: self.browser.confirm_delete.unwrap_or(defaults.confirm_delete),
            confirm_launch: self.browser.confirm_launch.unwrap_or(defaults.confirm_launch),
            start_path: overrides.start_path.or(self.browser.start_path),
        };
        let level = match self.log.level.as_deref() {
            Some(level) => parse_level(level)?,
            None => LevelFilter::Info,
        };
        let log = LogConfig {
            level,
            file: overrides
                .log_file
                .or(self.log.file)
                .or_else(default_log_path),
        };
        Ok(Config { browser, log })
    }
}
