use std::collections::{BTreeSet, HashSet};

use super::metadata::{normalize_language, TrackMetadata};
use crate::config::{LanguageConfig, UndefinedLanguage};

/// Which language tags count as English.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePolicy {
    english_codes: HashSet<String>,
    undefined: UndefinedLanguage,
}

impl LanguagePolicy {
    pub fn new<I, S>(english_codes: I, undefined: UndefinedLanguage) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            english_codes: english_codes
                .into_iter()
                .map(|c| normalize_language(c.as_ref()))
                .collect(),
            undefined,
        }
    }

    pub fn from_config(config: &LanguageConfig) -> Self {
        Self::new(&config.english_codes, config.undefined_language)
    }

    pub fn undefined(&self) -> UndefinedLanguage {
        self.undefined
    }

    pub fn is_english_code(&self, language: &str) -> bool {
        self.english_codes.contains(&normalize_language(language))
    }
}

impl Default for LanguagePolicy {
    fn default() -> Self {
        Self::from_config(&LanguageConfig::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationResult {
    /// English audio tracks in the order the tool reported them.
    pub english_tracks: Vec<TrackMetadata>,
    pub non_english_track_ids: BTreeSet<u64>,
    /// Tracks counted as English only because their language is undefined.
    pub assumed_english_track_ids: Vec<u64>,
}

impl ClassificationResult {
    pub fn first_english(&self) -> Option<&TrackMetadata> {
        self.english_tracks.first()
    }

    pub fn english_track_ids(&self) -> Vec<u64> {
        self.english_tracks.iter().map(|t| t.id).collect()
    }
}

/// Splits the audio tracks of one file into English and non-English.
///
/// Non-audio tracks are ignored. A track id is only ever placed on one side;
/// a repeated id keeps its first classification.
pub fn classify(tracks: &[TrackMetadata], policy: &LanguagePolicy) -> ClassificationResult {
    let mut result = ClassificationResult::default();
    let mut seen = HashSet::new();

    for track in tracks.iter().filter(|t| t.is_audio()) {
        if !seen.insert(track.id) {
            continue;
        }

        if track.has_undefined_language() {
            match policy.undefined() {
                UndefinedLanguage::AssumeEnglish => {
                    result.assumed_english_track_ids.push(track.id);
                    result.english_tracks.push(track.clone());
                }
                UndefinedLanguage::AssumeForeign => {
                    result.non_english_track_ids.insert(track.id);
                }
            }
        } else if policy.is_english_code(&track.language) {
            result.english_tracks.push(track.clone());
        } else {
            result.non_english_track_ids.insert(track.id);
        }
    }

    result
}
