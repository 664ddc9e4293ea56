/// Processing level determination for hierarchical log output

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingLevel {
    Root,   // Top level operations
    Stage,  // Per-file decisions and results
    Step,   // Individual steps within a file
    Detail, // Detailed information
}

/// Determines the processing level of a log message based on its content
pub fn determine_processing_level(message: &str) -> ProcessingLevel {
    // Root level - batch progress
    if message.starts_with("Processing file")
        || message.starts_with("Processing complete")
        || (message.starts_with("Found") && message.contains("file(s) to process"))
        || message.starts_with("No video files found")
    {
        return ProcessingLevel::Root;
    }

    // Stage level - the decision taken for a file and its result
    if message.starts_with("Will ")
        || message.starts_with("DRY RUN")
        || message.starts_with("No changes needed")
        || message.starts_with("No English audio tracks found")
        || message.starts_with("Successfully processed")
    {
        return ProcessingLevel::Stage;
    }

    // Step level - classification findings and tool operations
    if message.starts_with("Found non-English audio track")
        || message.contains("has undefined language")
        || message.starts_with("Remuxing with mkvmerge")
        || message.starts_with("mkvmerge found")
        || message.starts_with("Removed stale temporary file")
    {
        return ProcessingLevel::Step;
    }

    // Detail level - supporting information
    ProcessingLevel::Detail
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_level() {
        assert_eq!(
            determine_processing_level("Processing file 1/3: /videos/a.mkv"),
            ProcessingLevel::Root
        );
        assert_eq!(
            determine_processing_level("Found 5 video file(s) to process"),
            ProcessingLevel::Root
        );
        assert_eq!(
            determine_processing_level("Processing complete: 5 found, 2 processed, 3 skipped, 0 failed"),
            ProcessingLevel::Root
        );
    }

    #[test]
    fn test_stage_level() {
        assert_eq!(
            determine_processing_level("Will remove 1 non-English track(s) for a.mkv"),
            ProcessingLevel::Stage
        );
        assert_eq!(
            determine_processing_level("DRY RUN: Would remove tracks [0]"),
            ProcessingLevel::Stage
        );
        assert_eq!(
            determine_processing_level("Successfully processed a.mkv"),
            ProcessingLevel::Stage
        );
    }

    #[test]
    fn test_step_level() {
        assert_eq!(
            determine_processing_level("Found non-English audio track #1 audio [jpn]"),
            ProcessingLevel::Step
        );
        assert_eq!(
            determine_processing_level("Track 2 has undefined language, assuming English: a.mkv"),
            ProcessingLevel::Step
        );
        assert_eq!(
            determine_processing_level("Remuxing with mkvmerge: a.mkv -> a.audio-prune-tmp.mkv"),
            ProcessingLevel::Step
        );
    }

    #[test]
    fn test_detail_level() {
        assert_eq!(
            determine_processing_level("Some detail information"),
            ProcessingLevel::Detail
        );
        assert_eq!(
            determine_processing_level("Debug output line"),
            ProcessingLevel::Detail
        );
    }
}
