//! In-memory stand-in for mkvmerge used by executor and batch tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::container::{ContainerTool, RemuxRequest};
use crate::tracks::TrackMetadata;
use crate::utils::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemuxBehavior {
    /// Writes the output and succeeds.
    Succeed,
    /// Writes a partial output, then fails.
    FailAfterPartialWrite,
    /// Succeeds without writing anything.
    SucceedWithoutOutput,
}

pub struct FakeTool {
    tracks: HashMap<PathBuf, Vec<TrackMetadata>>,
    broken: Vec<PathBuf>,
    behavior: RemuxBehavior,
    pub identified: Mutex<Vec<PathBuf>>,
    pub remuxed: Mutex<Vec<RemuxRequest>>,
}

impl FakeTool {
    pub fn new(behavior: RemuxBehavior) -> Self {
        Self {
            tracks: HashMap::new(),
            broken: Vec::new(),
            behavior,
            identified: Mutex::new(Vec::new()),
            remuxed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_tracks<P: AsRef<Path>>(mut self, path: P, tracks: Vec<TrackMetadata>) -> Self {
        self.tracks.insert(path.as_ref().to_path_buf(), tracks);
        self
    }

    /// Makes identification of `path` fail.
    pub fn with_broken<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.broken.push(path.as_ref().to_path_buf());
        self
    }

    pub fn remux_count(&self) -> usize {
        self.remuxed.lock().unwrap().len()
    }
}

impl ContainerTool for FakeTool {
    async fn identify(&self, path: &Path) -> Result<Vec<TrackMetadata>> {
        self.identified.lock().unwrap().push(path.to_path_buf());
        if self.broken.iter().any(|p| p == path) {
            return Err(Error::metadata("Failed to parse mkvmerge output"));
        }
        Ok(self.tracks.get(path).cloned().unwrap_or_default())
    }

    async fn remux(&self, request: &RemuxRequest) -> Result<()> {
        self.remuxed.lock().unwrap().push(request.clone());
        match self.behavior {
            RemuxBehavior::Succeed => {
                std::fs::write(&request.output, b"remuxed")?;
                Ok(())
            }
            RemuxBehavior::FailAfterPartialWrite => {
                std::fs::write(&request.output, b"partial")?;
                Err(Error::remux("mkvmerge failed with exit code 2"))
            }
            RemuxBehavior::SucceedWithoutOutput => Ok(()),
        }
    }
}
