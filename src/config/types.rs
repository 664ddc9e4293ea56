use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::filesystem::default_extensions;

/// How a track with an empty or `und` language tag is classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedLanguage {
    /// Keep the track, assuming it is English.
    #[default]
    AssumeEnglish,
    /// Treat the track as foreign, making it a removal candidate.
    AssumeForeign,
}

impl UndefinedLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssumeEnglish => "assume_english",
            Self::AssumeForeign => "assume_foreign",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "assume_english" | "english" | "keep" => Some(Self::AssumeEnglish),
            "assume_foreign" | "foreign" | "remove" => Some(Self::AssumeForeign),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MkvMergeConfig {
    pub path: String,
    pub timeout_seconds: u64,
}

impl Default for MkvMergeConfig {
    fn default() -> Self {
        Self {
            path: "mkvmerge".to_string(),
            timeout_seconds: 7200, // two hours
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub mkvmerge: MkvMergeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    pub english_codes: Vec<String>,
    pub undefined_language: UndefinedLanguage,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            english_codes: ["en", "eng", "english", "en-US", "en-GB"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            undefined_language: UndefinedLanguage::AssumeEnglish,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub show_timestamps: bool,
    pub colored_output: bool,
    /// Optional plain-text log file, appended to on every run.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_timestamps: true,
            colored_output: true,
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_language_round_trip_names() {
        for policy in [UndefinedLanguage::AssumeEnglish, UndefinedLanguage::AssumeForeign] {
            assert_eq!(UndefinedLanguage::from_string(policy.as_str()), Some(policy));
        }
        assert_eq!(
            UndefinedLanguage::from_string("Remove"),
            Some(UndefinedLanguage::AssumeForeign)
        );
        assert_eq!(
            UndefinedLanguage::from_string("assume-english"),
            Some(UndefinedLanguage::AssumeEnglish)
        );
        assert_eq!(UndefinedLanguage::from_string("maybe"), None);
    }

    #[test]
    fn test_default_policy_assumes_english() {
        assert_eq!(UndefinedLanguage::default(), UndefinedLanguage::AssumeEnglish);
        assert_eq!(
            LanguageConfig::default().undefined_language,
            UndefinedLanguage::AssumeEnglish
        );
    }
}
