use crate::backend::{default_order, BackendKind};
use crate::error::{Error, Result};
use crate::software::Software;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Order in which comparison backends are probed
    #[serde(default = "default_order")]
    pub backends: Vec<BackendKind>,
    #[serde(default)]
    pub software: Vec<Software>,
}

impl Default for Config {
    fn default() -> Self {
        Self { backends: default_order(), software: Vec::new() }
    }
}

impl Config {
    /// `~/.config/toleo/config.toml`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("toleo/config.toml"))
    }

    /// Load from `path` or the default location, falling back to defaults
    /// when the file is missing or unreadable.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Self::default();
        };
        let Ok(content) = fs::read_to_string(&path) else { return Self::default() };
        Self::parse(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), "ignoring invalid config: {e}");
            Self::default()
        })
    }

    /// Parse a config file's contents. An explicit empty `backends` list is
    /// rejected, since no comparison could ever be made with it.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Definition(e.to_string()))?;
        if config.backends.is_empty() {
            return Err(Error::Definition("backends must name at least one of rpm, apt, pacman".into()));
        }
        Ok(config)
    }

    /// Find a configured software entry by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Software> {
        self.software.iter().find(|s| s.name == name)
    }
}
