//! Message filtering to remove noisy log output

/// Checks if a message should be shown based on noise patterns
/// Returns true if the message should be displayed, false if it should be filtered out
pub fn should_show_message(message: &str) -> bool {
    // mkvmerge chatter that is relayed at debug level but adds nothing
    let noise_patterns = [
        "Progress: ",
        "The file is being analyzed",
        "The changes are being written",
        "Multiplexing took",
        "The cue entries (the index) are being written",
    ];

    !noise_patterns
        .iter()
        .any(|pattern| message.contains(pattern))
}
