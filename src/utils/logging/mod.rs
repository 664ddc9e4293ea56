//! Logging setup for the audio pruner
//!
//! Console output goes through [`CleanFormatter`], which renders the
//! per-file messages as a compact tree. An optional log file receives the
//! same events in plain `tracing` format without ANSI codes.

mod formatter;
mod text_utils;

pub use formatter::CleanFormatter;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Parses a log level name, falling back to INFO for unknown names
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Sets up the logging system with the specified configuration
///
/// # Arguments
/// * `level` - Log level (trace, debug, info, warn, error)
/// * `show_timestamps` - Whether to show timestamps in console output
/// * `colored` - Whether to use colored output in console
/// * `log_file` - Optional file that receives a plain-text copy of every event
///
/// # Examples
/// ```no_run
/// use audio_pruner::utils::logging::setup_logging;
///
/// setup_logging("info", false, true, None).expect("Failed to setup logging");
/// ```
pub fn setup_logging(
    level: &str,
    show_timestamps: bool,
    colored: bool,
    log_file: Option<&Path>,
) -> crate::utils::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(parse_level(level).into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(false) // We handle level formatting in our custom formatter
        .event_format(CleanFormatter::new(show_timestamps, colored));

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::utils::Error::validation(format!("Logging already initialized: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level("warning"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
        assert_eq!(parse_level("nonsense"), Level::INFO);
    }
}
