use crate::config::types::MkvMergeConfig;
use crate::container::{ContainerTool, RemuxRequest};
use crate::mkvmerge::identify::parse_identify_output;
use crate::tracks::TrackMetadata;
use crate::utils::{Error, Result, ToolRunner};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// mkvmerge exits with 1 when it finished but emitted warnings.
const WARNING_EXIT_CODE: i32 = 1;

pub struct MkvMergeTool {
    tool: ToolRunner,
}

impl MkvMergeTool {
    pub fn new(config: MkvMergeConfig) -> Self {
        Self {
            tool: ToolRunner::new(config.path, config.timeout_seconds)
                .with_warning_exit_code(WARNING_EXIT_CODE),
        }
    }

    /// Resolves the executable inside an MKVToolNix installation directory.
    pub fn executable_in<P: AsRef<Path>>(dir: P) -> PathBuf {
        let name = if cfg!(windows) { "mkvmerge.exe" } else { "mkvmerge" };
        dir.as_ref().join(name)
    }

    pub fn path(&self) -> &str {
        self.tool.tool_path()
    }

    /// Fails with a tool error when mkvmerge cannot be run.
    pub async fn check_availability(&self) -> Result<String> {
        let version = self.tool.check_availability("--version", "mkvmerge").await?;
        info!("mkvmerge found: {} ({})", self.path(), version);
        Ok(version)
    }

    pub fn identify_args(path: &Path) -> Vec<OsString> {
        vec!["-J".into(), path.as_os_str().to_os_string()]
    }

    pub fn remux_args(request: &RemuxRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-o".into(), request.output.clone().into_os_string()];

        for flag in &request.default_flags {
            args.push("--default-track".into());
            args.push(
                format!(
                    "{}:{}",
                    flag.track_id,
                    if flag.default { "yes" } else { "no" }
                )
                .into(),
            );
        }

        if let Some(tracks) = &request.audio_tracks {
            let ids: Vec<String> = tracks.iter().map(|id| id.to_string()).collect();
            args.push("--audio-tracks".into());
            args.push(ids.join(",").into());
        }

        args.push(request.input.clone().into_os_string());
        args
    }
}

impl ContainerTool for MkvMergeTool {
    async fn identify(&self, path: &Path) -> Result<Vec<TrackMetadata>> {
        let stdout = self
            .tool
            .run(&Self::identify_args(path), None)
            .await
            .map_err(|e| Error::metadata(format!("Track query failed: {}", e)))?;

        parse_identify_output(&stdout)
    }

    async fn remux(&self, request: &RemuxRequest) -> Result<()> {
        let args = Self::remux_args(request);

        info!(
            "Remuxing with mkvmerge: {} -> {}",
            request.input.display(),
            request.output.display()
        );
        debug!(
            "  mkvmerge command: {} {}",
            self.path(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        self.tool
            .run(&args, Some(&request.output))
            .await
            .map_err(|e| Error::remux(e.to_string()))?;

        Ok(())
    }
}
