use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn brokee_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BROKEE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".brokee"))
}

pub fn ensure_brokee_home() -> Result<PathBuf> {
    let dir = brokee_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
