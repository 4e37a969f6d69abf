use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::Format;
use crate::state::{brokee_home, ensure_brokee_home};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub import: ImportSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportSection {
    /// User subject entries are filed under when `--user` is not given
    pub default_user: String,
    /// Category imported transactions are filed under
    pub category_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OutputSection {
    pub format: Format,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogSection {
    /// tracing filter directive, overridden by RUST_LOG
    pub level: String,
}

impl Default for ImportSection {
    fn default() -> Self {
        Self {
            default_user: "local".to_string(),
            category_name: brokee_ledger::import::DEFAULT_IMPORT_CATEGORY.to_string(),
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(brokee_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

/// Settle a load result for one command. Commands that can run on defaults
/// get them, with a warning, when the file is missing or unreadable.
pub fn resolve(loaded: Result<Config>, required: bool) -> Result<Config> {
    match loaded {
        Ok(cfg) => Ok(cfg),
        Err(e) if required => Err(e),
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "config unavailable, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_brokee_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
