use crate::error::{AtsError, Result};
use crate::field::confidence;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the configuration file location
pub const CONFIG_ENV: &str = "ATSFILL_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AtsfillConfig {
    #[serde(default)]
    pub debounce: DebounceConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    pub delay_ms: u64,
    pub min_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub generic_confidence: f32,
    pub custom_question_confidence: f32,
    pub include_custom_questions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_ms: 300,
            min_interval_ms: 1000,
        }
    }
}

impl DebounceConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            generic_confidence: confidence::GENERIC,
            custom_question_confidence: confidence::CUSTOM_QUESTION,
            include_custom_questions: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl AtsfillConfig {
    /// Load the user configuration. A missing file yields the defaults; a
    /// file that exists but does not parse is an error.
    pub fn load() -> Result<Self> {
        match Self::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AtsError::io(path, e))?;
        let config = toml::from_str(&content).map_err(|source| AtsError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Write to the configured location; `None` when there is no config dir.
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(path) = Self::config_file_path() else {
            return Ok(None);
        };
        self.save_to(&path)?;
        Ok(Some(path))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| AtsError::write(parent, e))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| AtsError::write(path, e))?;
        tracing::info!(path = %path.display(), "wrote configuration");
        Ok(())
    }

    /// `$ATSFILL_CONFIG`, else `<config dir>/atsfill/config.toml`.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
        Self::config_dir().map(|mut path| {
            path.push("config.toml");
            path
        })
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("atsfill");
            path
        })
    }
}
