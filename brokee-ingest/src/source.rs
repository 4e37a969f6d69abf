//! Where statement text comes from.
//!
//! Turning the bank's PDF into text happens outside this crate; a
//! [`TextSource`] only hands over the linearized result in reading order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

pub trait TextSource {
    /// Short label used in logs and error messages.
    fn name(&self) -> String;

    fn extract_text(&self) -> Result<String>;
}

/// Statement text already extracted to a file on disk.
#[derive(Debug, Clone)]
pub struct PlainTextFile {
    path: PathBuf,
}

impl PlainTextFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TextSource for PlainTextFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn extract_text(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|error| IngestError::Io {
            path: self.name(),
            error,
        })
    }
}

/// Statement text held in memory (stdin, uploads, tests).
#[derive(Debug, Clone)]
pub struct InMemoryText {
    name: String,
    text: String,
}

impl InMemoryText {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl TextSource for InMemoryText {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn extract_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}
