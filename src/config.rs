// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor configuration.
//!
//! Read from YAML at `$HIKARI_CONFIG`, or `$XDG_CONFIG_HOME/hikari/config.yaml`
//! (falling back to `~/.config`). A missing file means built-in defaults.

use crate::models::project::{
    Project, DEFAULT_DURATION, DEFAULT_FPS, DEFAULT_HEIGHT, DEFAULT_NAME, DEFAULT_WIDTH,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Global editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas: CanvasDefaults,
    pub storage: StorageConfig,
    pub preview: PreviewConfig,
    pub logging: LoggingConfig,
    /// Extra font families for frame export, by family name.
    pub fonts: BTreeMap<String, PathBuf>,
}

/// Settings for newly created projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasDefaults {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Seconds.
    pub duration: f64,
    pub project_name: String,
}

/// Where saved projects live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub directory: PathBuf,
}

/// Preview panel appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Grey level of the area around the canvas.
    pub background_gray: u8,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter, e.g. "info" or "hikari=debug,warn". `RUST_LOG` wins.
    pub level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasDefaults::default(),
            storage: StorageConfig::default(),
            preview: PreviewConfig::default(),
            logging: LoggingConfig::default(),
            fonts: BTreeMap::new(),
        }
    }
}

impl Default for CanvasDefaults {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: DEFAULT_FPS,
            duration: DEFAULT_DURATION,
            project_name: DEFAULT_NAME.to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_storage_dir(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { background_gray: 40 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CanvasDefaults {
    /// An empty project using these defaults.
    pub fn new_project(&self) -> Project {
        Project::new(self.width, self.height, self.fps, self.duration)
            .with_name(self.project_name.clone())
    }

    /// Reject values that would produce an invalid project.
    fn sanitized(self) -> Self {
        let fallback = Self::default();
        Self {
            width: if self.width > 0 { self.width } else { fallback.width },
            height: if self.height > 0 { self.height } else { fallback.height },
            fps: if self.fps.is_finite() && self.fps > 0.0 { self.fps } else { fallback.fps },
            duration: if self.duration.is_finite() && self.duration > 0.0 {
                self.duration
            } else {
                fallback.duration
            },
            project_name: self.project_name,
        }
    }
}

impl EditorConfig {
    /// Load config from the standard location. A missing file yields the
    /// defaults; an unreadable or invalid one is an error.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_file_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
            .with_context(|| format!("failed to load config at {}", path.display()))
    }

    /// Load config from `path`.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let mut config: Self = serde_yaml::from_str(yaml)?;
        config.canvas = config.canvas.sanitized();
        Ok(config)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    if let Ok(explicit) = std::env::var("HIKARI_CONFIG") {
        return PathBuf::from(explicit);
    }
    xdg_dir("XDG_CONFIG_HOME", ".config").join("hikari").join("config.yaml")
}

/// Default saved-project directory.
fn default_storage_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share").join("hikari")
}

fn xdg_dir(var: &str, home_fallback: &str) -> PathBuf {
    std::env::var(var).map(PathBuf::from).unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        PathBuf::from(home).join(home_fallback)
    })
}
