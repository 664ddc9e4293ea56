use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
    Subtitles,
    Other(String),
}

impl TrackKind {
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "video" => Self::Video,
            "audio" => Self::Audio,
            "subtitles" => Self::Subtitles,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Subtitles => "subtitles",
            Self::Other(s) => s,
        }
    }
}

/// One track of a container, as reported by the container tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub id: u64,
    pub kind: TrackKind,
    /// Lowercased language tag, possibly empty or `und`.
    pub language: String,
    pub is_default: bool,
    pub name: Option<String>,
    pub codec: Option<String>,
}

impl TrackMetadata {
    pub fn new(id: u64, kind: TrackKind, language: &str, is_default: bool) -> Self {
        Self {
            id,
            kind,
            language: normalize_language(language),
            is_default,
            name: None,
            codec: None,
        }
    }

    pub fn audio(id: u64, language: &str, is_default: bool) -> Self {
        Self::new(id, TrackKind::Audio, language, is_default)
    }

    pub fn is_audio(&self) -> bool {
        self.kind == TrackKind::Audio
    }

    pub fn has_undefined_language(&self) -> bool {
        let language = normalize_language(&self.language);
        language.is_empty() || language == "und"
    }
}

impl fmt::Display for TrackMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let language = if self.language.is_empty() {
            "?"
        } else {
            self.language.as_str()
        };
        write!(f, "#{} {} [{}]", self.id, self.kind.as_str(), language)?;
        if let Some(codec) = &self.codec {
            write!(f, " {}", codec)?;
        }
        if let Some(name) = &self.name {
            write!(f, " \"{}\"", name)?;
        }
        if self.is_default {
            write!(f, " (default)")?;
        }
        Ok(())
    }
}

pub fn normalize_language(language: &str) -> String {
    language.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_is_normalized() {
        let track = TrackMetadata::audio(1, "  ENG ", false);
        assert_eq!(track.language, "eng");
    }

    #[test]
    fn test_undefined_language() {
        assert!(TrackMetadata::audio(0, "", false).has_undefined_language());
        assert!(TrackMetadata::audio(0, "UND", false).has_undefined_language());
        assert!(!TrackMetadata::audio(0, "jpn", false).has_undefined_language());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(TrackKind::from_string("audio"), TrackKind::Audio);
        assert_eq!(TrackKind::from_string("Video"), TrackKind::Video);
        assert_eq!(
            TrackKind::from_string("buttons"),
            TrackKind::Other("buttons".to_string())
        );
    }

    #[test]
    fn test_display() {
        let mut track = TrackMetadata::audio(2, "jpn", true);
        track.codec = Some("AAC".to_string());
        assert_eq!(track.to_string(), "#2 audio [jpn] AAC (default)");
    }
}
