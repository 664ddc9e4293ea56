use std::path::Path;

use tracing::{debug, warn};

use crate::container::{ContainerTool, RemuxRequest};
use crate::planner::{MutationPlan, PlanDecision};
use crate::report::{ProcessingEvent, Reporter};
use crate::utils::filesystem::temp_path_for;
use crate::utils::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemuxOutcome {
    /// Nothing to do; no filesystem or tool access happened.
    Unchanged,
    /// Dry run: the change was reported but not made.
    WouldModify,
    /// The original was replaced by the remuxed file.
    Replaced,
}

pub struct RemuxExecutor<'a, T, R> {
    tool: &'a T,
    reporter: &'a R,
    dry_run: bool,
}

impl<'a, T: ContainerTool, R: Reporter> RemuxExecutor<'a, T, R> {
    pub fn new(tool: &'a T, reporter: &'a R, dry_run: bool) -> Self {
        Self {
            tool,
            reporter,
            dry_run,
        }
    }

    pub async fn execute(&self, path: &Path, decision: &PlanDecision) -> Result<RemuxOutcome> {
        let Some(plan) = decision.plan() else {
            return Ok(RemuxOutcome::Unchanged);
        };

        if self.dry_run {
            self.reporter.report(&ProcessingEvent::DryRun { path, plan });
            return Ok(RemuxOutcome::WouldModify);
        }

        let temp_path = temp_path_for(path)?;

        // A temp file next to a live original is a partial write from an
        // earlier failure, never the only copy.
        if temp_path.exists() {
            tokio::fs::remove_file(&temp_path).await?;
            self.reporter
                .report(&ProcessingEvent::StaleTempRemoved { path: &temp_path });
        }

        match self.remux_and_replace(path, &temp_path, plan).await {
            Ok(()) => {
                self.reporter.report(&ProcessingEvent::Replaced { path });
                Ok(RemuxOutcome::Replaced)
            }
            Err(e) => {
                discard_temp(&temp_path).await;
                Err(e)
            }
        }
    }

    async fn remux_and_replace(
        &self,
        path: &Path,
        temp_path: &Path,
        plan: &MutationPlan,
    ) -> Result<()> {
        let request = RemuxRequest::from_plan(path, temp_path, plan);
        self.tool.remux(&request).await?;

        let written = tokio::fs::metadata(temp_path).await.map_err(|e| {
            Error::remux(format!(
                "Remux reported success but {} is missing: {}",
                temp_path.display(),
                e
            ))
        })?;

        if written.len() == 0 {
            return Err(Error::remux(format!(
                "Remux produced an empty file: {}",
                temp_path.display()
            )));
        }

        // rename replaces the destination atomically on the same filesystem,
        // so the canonical path always holds either the original or the
        // complete replacement.
        debug!("Replacing {} with {}", path.display(), temp_path.display());
        tokio::fs::rename(temp_path, path).await.map_err(|e| {
            Error::remux(format!(
                "Failed to replace {} with remuxed file: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

async fn discard_temp(temp_path: &Path) {
    match tokio::fs::remove_file(temp_path).await {
        Ok(()) => debug!("Removed temporary file {}", temp_path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            "Could not remove temporary file {}: {}",
            temp_path.display(),
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mkvmerge::fake::{FakeTool, RemuxBehavior};
    use crate::planner::plan;
    use crate::report::testing::RecordingReporter;
    use crate::tracks::{classify, LanguagePolicy, TrackMetadata};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn japanese_then_english() -> PlanDecision {
        let tracks = vec![
            TrackMetadata::audio(0, "jpn", true),
            TrackMetadata::audio(1, "eng", false),
        ];
        plan(&classify(&tracks, &LanguagePolicy::default()))
    }

    fn movie(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("movie.mkv");
        fs::write(&path, b"original").unwrap();
        path
    }

    #[tokio::test]
    async fn test_successful_remux_replaces_original() {
        let dir = TempDir::new().unwrap();
        let path = movie(&dir);
        let tool = FakeTool::new(RemuxBehavior::Succeed);
        let reporter = RecordingReporter::default();

        let outcome = RemuxExecutor::new(&tool, &reporter, false)
            .execute(&path, &japanese_then_english())
            .await
            .unwrap();

        assert_eq!(outcome, RemuxOutcome::Replaced);
        assert_eq!(fs::read(&path).unwrap(), b"remuxed");
        assert!(!temp_path_for(&path).unwrap().exists());
        assert_eq!(reporter.kinds(), vec!["replaced"]);

        let requests = tool.remuxed.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].input, path);
        assert_eq!(requests[0].output, temp_path_for(&path).unwrap());
        assert_eq!(requests[0].audio_tracks, Some(vec![1]));
    }

    #[tokio::test]
    async fn test_tool_failure_leaves_original_untouched() {
        let dir = TempDir::new().unwrap();
        let path = movie(&dir);
        let before = fs::metadata(&path).unwrap().modified().unwrap();
        let tool = FakeTool::new(RemuxBehavior::FailAfterPartialWrite);
        let reporter = RecordingReporter::default();

        let result = RemuxExecutor::new(&tool, &reporter, false)
            .execute(&path, &japanese_then_english())
            .await;

        assert!(matches!(result, Err(Error::Remux { .. })));
        assert_eq!(fs::read(&path).unwrap(), b"original");
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
        assert!(!temp_path_for(&path).unwrap().exists());
        assert!(reporter.kinds().is_empty());
    }

    #[tokio::test]
    async fn test_missing_output_is_failure() {
        let dir = TempDir::new().unwrap();
        let path = movie(&dir);
        let tool = FakeTool::new(RemuxBehavior::SucceedWithoutOutput);
        let reporter = RecordingReporter::default();

        let result = RemuxExecutor::new(&tool, &reporter, false)
            .execute(&path, &japanese_then_english())
            .await;

        assert!(result.is_err());
        assert_eq!(fs::read(&path).unwrap(), b"original");
    }

    #[tokio::test]
    async fn test_replace_failure_cleans_temp_and_keeps_original() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file rename.
        let path = dir.path().join("movie.mkv");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), b"original").unwrap();
        let tool = FakeTool::new(RemuxBehavior::Succeed);
        let reporter = RecordingReporter::default();

        let result = RemuxExecutor::new(&tool, &reporter, false)
            .execute(&path, &japanese_then_english())
            .await;

        assert!(
            matches!(result, Err(Error::Remux { message }) if message.contains("Failed to replace"))
        );
        assert_eq!(tool.remux_count(), 1);
        assert!(!temp_path_for(&path).unwrap().exists());
        assert!(path.is_dir());
        assert_eq!(fs::read(path.join("keep.txt")).unwrap(), b"original");
        assert!(reporter.kinds().is_empty());
    }

    #[tokio::test]
    async fn test_no_change_does_no_io() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist.mkv");
        let tool = FakeTool::new(RemuxBehavior::Succeed);
        let reporter = RecordingReporter::default();
        let executor = RemuxExecutor::new(&tool, &reporter, false);

        for decision in [PlanDecision::NoChange, PlanDecision::NoEnglishAudio] {
            let outcome = executor.execute(&path, &decision).await.unwrap();
            assert_eq!(outcome, RemuxOutcome::Unchanged);
        }
        assert_eq!(tool.remux_count(), 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let path = movie(&dir);
        let tool = FakeTool::new(RemuxBehavior::Succeed);
        let reporter = RecordingReporter::default();

        let outcome = RemuxExecutor::new(&tool, &reporter, true)
            .execute(&path, &japanese_then_english())
            .await
            .unwrap();

        assert_eq!(outcome, RemuxOutcome::WouldModify);
        assert_eq!(tool.remux_count(), 0);
        assert_eq!(fs::read(&path).unwrap(), b"original");
        assert!(!temp_path_for(&path).unwrap().exists());
        assert_eq!(reporter.kinds(), vec!["dry_run"]);
    }

    #[tokio::test]
    async fn test_stale_temp_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = movie(&dir);
        fs::write(temp_path_for(&path).unwrap(), b"stale partial").unwrap();
        let tool = FakeTool::new(RemuxBehavior::Succeed);
        let reporter = RecordingReporter::default();

        let outcome = RemuxExecutor::new(&tool, &reporter, false)
            .execute(&path, &japanese_then_english())
            .await
            .unwrap();

        assert_eq!(outcome, RemuxOutcome::Replaced);
        assert_eq!(fs::read(&path).unwrap(), b"remuxed");
        assert_eq!(reporter.kinds(), vec!["stale_temp_removed", "replaced"]);
    }
}
