use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::batch::RunStatistics;
use crate::container::ContainerTool;
use crate::planner::{plan, PlanDecision};
use crate::remux::{RemuxExecutor, RemuxOutcome};
use crate::report::{ProcessingEvent, Reporter};
use crate::tracks::{classify, LanguagePolicy};
use crate::utils::filesystem::{default_extensions, find_video_files};
use crate::utils::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoChangeNeeded,
    NoEnglishAudio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Modified(RemuxOutcome),
    Skipped(SkipReason),
}

/// Walks a directory tree and prunes every recognized video file in it,
/// one file at a time.
pub struct BatchWalker<T, R> {
    tool: T,
    reporter: R,
    policy: LanguagePolicy,
    extensions: Vec<String>,
    dry_run: bool,
    cancel: Arc<AtomicBool>,
}

impl<T: ContainerTool, R: Reporter> BatchWalker<T, R> {
    pub fn new(tool: T, reporter: R, policy: LanguagePolicy) -> Self {
        Self {
            tool,
            reporter,
            policy,
            extensions: default_extensions(),
            dry_run: false,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Shares `cancel` with the walker; once set, no further file is started.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Processes every video file under `root`.
    ///
    /// Only discovery errors are returned; per-file failures are counted
    /// and the batch moves on.
    pub async fn run<P: AsRef<Path>>(&self, root: P) -> Result<RunStatistics> {
        let root = root.as_ref();
        let discovery = find_video_files(root, &self.extensions)?;

        for leftover in &discovery.leftovers {
            self.reporter
                .report(&ProcessingEvent::LeftoverTempFile { path: leftover });
        }

        let files = discovery.video_files;
        let mut stats = RunStatistics::with_total(files.len());
        self.reporter.report(&ProcessingEvent::DiscoveryComplete {
            root,
            files: files.len(),
        });

        for (index, path) in files.iter().enumerate() {
            if self.cancel.load(Ordering::SeqCst) {
                stats.cancelled = true;
                self.reporter.report(&ProcessingEvent::Cancelled {
                    remaining: files.len() - index,
                });
                break;
            }

            self.reporter.report(&ProcessingEvent::FileStarted {
                path,
                index: index + 1,
                total: files.len(),
            });

            match self.process_file(path).await {
                Ok(FileOutcome::Modified(_)) => stats.record_processed(),
                Ok(FileOutcome::Skipped(_)) => stats.record_skipped(),
                Err(e) => {
                    self.reporter
                        .report(&ProcessingEvent::FileFailed { path, error: &e });
                    stats.record_error(path.clone(), &e);
                }
            }
        }

        // Set while the last file was in flight.
        if !stats.cancelled && self.cancel.load(Ordering::SeqCst) {
            stats.cancelled = true;
            self.reporter
                .report(&ProcessingEvent::Cancelled { remaining: 0 });
        }

        self.reporter
            .report(&ProcessingEvent::RunComplete { stats: &stats });
        Ok(stats)
    }

    /// Classifies, plans and rewrites a single file.
    pub async fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let tracks = self.tool.identify(path).await?;
        let classification = classify(&tracks, &self.policy);

        for &track_id in &classification.assumed_english_track_ids {
            self.reporter
                .report(&ProcessingEvent::UndefinedLanguageAssumed { path, track_id });
        }
        for track in tracks
            .iter()
            .filter(|t| classification.non_english_track_ids.contains(&t.id))
        {
            self.reporter
                .report(&ProcessingEvent::NonEnglishTrack { path, track });
        }

        let decision = plan(&classification);
        match &decision {
            PlanDecision::NoEnglishAudio => {
                self.reporter.report(&ProcessingEvent::NoEnglishAudio { path });
                return Ok(FileOutcome::Skipped(SkipReason::NoEnglishAudio));
            }
            PlanDecision::NoChange => {
                self.reporter.report(&ProcessingEvent::NoChangeNeeded { path });
                return Ok(FileOutcome::Skipped(SkipReason::NoChangeNeeded));
            }
            PlanDecision::Apply(plan) => {
                self.reporter
                    .report(&ProcessingEvent::ChangePlanned { path, plan });
            }
        }

        let outcome = RemuxExecutor::new(&self.tool, &self.reporter, self.dry_run)
            .execute(path, &decision)
            .await?;

        Ok(FileOutcome::Modified(outcome))
    }
}
