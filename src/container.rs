//! The seam between the pruning logic and the external container tool.

use std::path::{Path, PathBuf};

use crate::planner::{DefaultFlag, MutationPlan};
use crate::tracks::TrackMetadata;
use crate::utils::Result;

/// One remux invocation: read `input`, write `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemuxRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub default_flags: Vec<DefaultFlag>,
    /// Audio tracks to keep; `None` copies every audio track.
    pub audio_tracks: Option<Vec<u64>>,
}

impl RemuxRequest {
    pub fn from_plan<P, Q>(input: P, output: Q, plan: &MutationPlan) -> Self
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            default_flags: plan.default_flags(),
            audio_tracks: plan.audio_track_selection().map(|ids| ids.to_vec()),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ContainerTool {
    /// All tracks of `path`, in the order the tool reports them.
    async fn identify(&self, path: &Path) -> Result<Vec<TrackMetadata>>;

    /// Writes `request.output`; never touches `request.input`.
    async fn remux(&self, request: &RemuxRequest) -> Result<()>;
}
