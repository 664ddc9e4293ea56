//! Schema for `mkvmerge -J` (identification as JSON).

use serde::Deserialize;
use tracing::debug;

use crate::tracks::{TrackKind, TrackMetadata};
use crate::utils::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentifyOutput {
    #[serde(default)]
    pub container: Option<ContainerInfo>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub tracks: Vec<RawTrack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContainerInfo {
    #[serde(default)]
    pub recognized: Option<bool>,
    #[serde(default)]
    pub supported: Option<bool>,
    #[serde(rename = "type", default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrack {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub properties: RawTrackProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrackProperties {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub language_ietf: Option<String>,
    #[serde(default)]
    pub default_track: Option<bool>,
    #[serde(default)]
    pub track_name: Option<String>,
}

impl RawTrack {
    /// Typed view of the track; `None` when mkvmerge gave it no id.
    pub fn to_metadata(&self) -> Option<TrackMetadata> {
        let id = self.id?;

        // Older mkvmerge only reports ISO 639-2; newer ones add an IETF tag.
        let language = self
            .properties
            .language
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .or(self.properties.language_ietf.as_deref())
            .unwrap_or_default();

        let mut track = TrackMetadata::new(
            id,
            TrackKind::from_string(&self.kind),
            language,
            self.properties.default_track.unwrap_or(false),
        );
        track.name = self.properties.track_name.clone();
        track.codec = self.codec.clone();
        Some(track)
    }
}

impl IdentifyOutput {
    pub fn track_metadata(&self) -> Vec<TrackMetadata> {
        self.tracks
            .iter()
            .filter_map(|raw| {
                let track = raw.to_metadata();
                if track.is_none() {
                    debug!("Ignoring {} track without id", raw.kind);
                }
                track
            })
            .collect()
    }
}

/// Parses identification output into tracks in reported order.
pub fn parse_identify_output(json: &str) -> Result<Vec<TrackMetadata>> {
    let output: IdentifyOutput = serde_json::from_str(json)
        .map_err(|e| Error::metadata(format!("Failed to parse mkvmerge output: {}", e)))?;

    if let Some(container) = &output.container {
        if container.recognized == Some(false) {
            return Err(Error::metadata("Container format not recognized"));
        }
        if container.supported == Some(false) {
            return Err(Error::metadata(format!(
                "Container format not supported: {}",
                container.format.as_deref().unwrap_or("unknown")
            )));
        }
    }

    if !output.errors.is_empty() {
        return Err(Error::metadata(output.errors.join("; ")));
    }

    for warning in &output.warnings {
        debug!("mkvmerge warning: {}", warning);
    }

    Ok(output.track_metadata())
}
