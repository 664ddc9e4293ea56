use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Counters for one run. Only the batch walker mutates them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub total_files: usize,
    /// Files modified, or that would be in a dry run.
    pub processed_files: usize,
    /// No change needed, or no English audio.
    pub skipped_files: usize,
    pub error_files: usize,
    pub failures: Vec<FailedFile>,
    pub cancelled: bool,
}

impl RunStatistics {
    pub fn with_total(total_files: usize) -> Self {
        Self {
            total_files,
            ..Self::default()
        }
    }

    pub fn record_processed(&mut self) {
        self.processed_files += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped_files += 1;
    }

    pub fn record_error<E: ToString>(&mut self, path: PathBuf, error: &E) {
        self.error_files += 1;
        self.failures.push(FailedFile {
            path,
            error: error.to_string(),
        });
    }

    pub fn completed_files(&self) -> usize {
        self.processed_files + self.skipped_files + self.error_files
    }

    pub fn has_errors(&self) -> bool {
        self.error_files > 0
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} found, {} processed, {} skipped, {} failed",
            self.total_files, self.processed_files, self.skipped_files, self.error_files
        )?;
        if self.cancelled {
            write!(
                f,
                " (cancelled, {} not started)",
                self.total_files.saturating_sub(self.completed_files())
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = RunStatistics::with_total(3);
        stats.record_processed();
        stats.record_skipped();
        stats.record_error(PathBuf::from("/v/c.mkv"), &"exit code 2");

        assert_eq!(stats.completed_files(), 3);
        assert!(stats.has_errors());
        assert_eq!(stats.failures[0].error, "exit code 2");
        assert_eq!(stats.to_string(), "3 found, 1 processed, 1 skipped, 1 failed");
    }

    #[test]
    fn test_display_when_cancelled() {
        let mut stats = RunStatistics::with_total(5);
        stats.record_skipped();
        stats.cancelled = true;
        assert_eq!(
            stats.to_string(),
            "5 found, 0 processed, 1 skipped, 0 failed (cancelled, 4 not started)"
        );
    }
}
