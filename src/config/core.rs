use directories::ProjectDirs;
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::rendering::{CameraConfig, RenderConfig, ShaderConfig, WindowConfig};
use crate::utils::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "glprimer.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub shaders: ShaderConfig,
    pub camera: CameraConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            render: RenderConfig::default(),
            shaders: ShaderConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// An explicit path must exist. Otherwise the working directory and then
    /// the per-user config directory are searched, falling back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let candidates = std::iter::once(PathBuf::from(CONFIG_FILE_NAME)).chain(user_config_path());
        for candidate in candidates {
            if candidate.is_file() {
                info!("Loading config from {}", candidate.display());
                return Self::load(&candidate);
            }
        }

        info!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// Unrecognised levels fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "MetroManDevTeam", "glprimer")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
