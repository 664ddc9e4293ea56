use super::types::*;
use crate::utils::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_CONFIG_DIR: &str = "audio-pruner";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    pub languages: LanguageConfig,
    pub scan: ScanConfig,
    pub logging: LoggingConfig,
    /// File the configuration was read from; `None` for built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config_str = std::fs::read_to_string(config_path)?;
        let mut config = Self::from_yaml(&config_str)?;
        config.source = Some(config_path.to_path_buf());
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads an explicitly requested file, or walks the usual locations and
    /// falls back to built-in defaults when none exists.
    pub fn load_with_fallback(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::validation(format!(
                    "Configuration file does not exist: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        for candidate in Self::candidate_paths() {
            if candidate.is_file() {
                return Self::load(candidate);
            }
        }

        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("config.yaml"),
            PathBuf::from("config.default.yaml"),
            PathBuf::from("./config/config.default.yaml"),
        ];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join(APP_CONFIG_DIR).join("config.yaml"));
        }
        paths
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tools.mkvmerge.path.trim().is_empty() {
            return Err(Error::validation("tools.mkvmerge.path must not be empty"));
        }

        if self.tools.mkvmerge.timeout_seconds == 0 {
            return Err(Error::validation(
                "tools.mkvmerge.timeout_seconds must be greater than 0",
            ));
        }

        if self.languages.english_codes.is_empty() {
            return Err(Error::validation(
                "languages.english_codes must contain at least one code",
            ));
        }

        if let Some(code) = self
            .languages
            .english_codes
            .iter()
            .find(|c| c.trim().is_empty() || c.trim().eq_ignore_ascii_case("und"))
        {
            return Err(Error::validation(format!(
                "Invalid English code '{}': undefined languages are governed by languages.undefined_language",
                code
            )));
        }

        if self.scan.extensions.is_empty() {
            return Err(Error::validation(
                "scan.extensions must contain at least one extension",
            ));
        }

        for ext in &self.scan.extensions {
            if !ext.starts_with('.') || ext.len() < 2 || ext[1..].contains('.') {
                return Err(Error::validation(format!(
                    "Invalid extension '{}' (expected a form like '.mkv')",
                    ext
                )));
            }
        }

        Ok(())
    }
}
