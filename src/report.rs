//! Structured processing events and the reporters that consume them.

use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::batch::RunStatistics;
use crate::planner::MutationPlan;
use crate::tracks::TrackMetadata;
use crate::utils::Error;

#[derive(Debug)]
pub enum ProcessingEvent<'a> {
    DiscoveryComplete { root: &'a Path, files: usize },
    LeftoverTempFile { path: &'a Path },
    FileStarted { path: &'a Path, index: usize, total: usize },
    UndefinedLanguageAssumed { path: &'a Path, track_id: u64 },
    NonEnglishTrack { path: &'a Path, track: &'a TrackMetadata },
    NoEnglishAudio { path: &'a Path },
    NoChangeNeeded { path: &'a Path },
    ChangePlanned { path: &'a Path, plan: &'a MutationPlan },
    DryRun { path: &'a Path, plan: &'a MutationPlan },
    StaleTempRemoved { path: &'a Path },
    Replaced { path: &'a Path },
    FileFailed { path: &'a Path, error: &'a Error },
    Cancelled { remaining: usize },
    RunComplete { stats: &'a RunStatistics },
}

impl ProcessingEvent<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DiscoveryComplete { .. } => "discovery_complete",
            Self::LeftoverTempFile { .. } => "leftover_temp_file",
            Self::FileStarted { .. } => "file_started",
            Self::UndefinedLanguageAssumed { .. } => "undefined_language_assumed",
            Self::NonEnglishTrack { .. } => "non_english_track",
            Self::NoEnglishAudio { .. } => "no_english_audio",
            Self::NoChangeNeeded { .. } => "no_change_needed",
            Self::ChangePlanned { .. } => "change_planned",
            Self::DryRun { .. } => "dry_run",
            Self::StaleTempRemoved { .. } => "stale_temp_removed",
            Self::Replaced { .. } => "replaced",
            Self::FileFailed { .. } => "file_failed",
            Self::Cancelled { .. } => "cancelled",
            Self::RunComplete { .. } => "run_complete",
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::LeftoverTempFile { path }
            | Self::FileStarted { path, .. }
            | Self::UndefinedLanguageAssumed { path, .. }
            | Self::NonEnglishTrack { path, .. }
            | Self::NoEnglishAudio { path }
            | Self::NoChangeNeeded { path }
            | Self::ChangePlanned { path, .. }
            | Self::DryRun { path, .. }
            | Self::StaleTempRemoved { path }
            | Self::Replaced { path }
            | Self::FileFailed { path, .. } => Some(*path),
            Self::DiscoveryComplete { root, .. } => Some(*root),
            Self::Cancelled { .. } | Self::RunComplete { .. } => None,
        }
    }
}

/// Receives events from the batch walker and remux executor.
pub trait Reporter {
    fn report(&self, event: &ProcessingEvent<'_>);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, event: &ProcessingEvent<'_>) {
        (**self).report(event)
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &ProcessingEvent<'_>) {
        match event {
            ProcessingEvent::DiscoveryComplete { root, files } => {
                if *files == 0 {
                    info!("No video files found in {}", root.display());
                } else {
                    info!("Found {} video file(s) to process", files);
                }
            }
            ProcessingEvent::LeftoverTempFile { path } => warn!(
                "Leftover temporary file from an interrupted run, not processed: {}",
                path.display()
            ),
            ProcessingEvent::FileStarted { path, index, total } => {
                info!("Processing file {}/{}: {}", index, total, path.display())
            }
            ProcessingEvent::UndefinedLanguageAssumed { path, track_id } => warn!(
                "Track {} has undefined language, assuming English: {}",
                track_id,
                path.display()
            ),
            ProcessingEvent::NonEnglishTrack { track, .. } => {
                info!("Found non-English audio track {}", track)
            }
            ProcessingEvent::NoEnglishAudio { path } => warn!(
                "No English audio tracks found, skipping: {}",
                path.display()
            ),
            ProcessingEvent::NoChangeNeeded { path } => {
                info!("No changes needed: {}", path.display())
            }
            ProcessingEvent::ChangePlanned { path, plan } => {
                info!("Will {} for {}", plan.describe(), path.display())
            }
            ProcessingEvent::DryRun { plan, .. } => {
                if plan.needs_track_removal() {
                    info!("DRY RUN: Would remove tracks {:?}", plan.remove_track_ids());
                }
                if let Some(id) = plan.new_default_track_id() {
                    info!("DRY RUN: Would set track {} as default", id);
                }
            }
            ProcessingEvent::StaleTempRemoved { path } => {
                warn!("Removed stale temporary file: {}", path.display())
            }
            ProcessingEvent::Replaced { path } => {
                info!("Successfully processed {}", path.display())
            }
            ProcessingEvent::FileFailed { path, error } => {
                error!("Failed to process {}: {}", path.display(), error)
            }
            ProcessingEvent::Cancelled { remaining } => warn!(
                "Cancelled by user, {} file(s) not started",
                remaining
            ),
            ProcessingEvent::RunComplete { stats } => {
                info!("Processing complete: {}", stats);
                for failure in &stats.failures {
                    debug!("  - {}: {}", failure.path.display(), failure.error);
                }
            }
        }
    }
}
