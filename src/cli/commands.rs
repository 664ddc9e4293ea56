use crate::{cli::CliArgs, config::Config, utils::Result};
use console::{style, Term};
use std::path::Path;

/// Runs the info commands that need a loaded configuration. `--validate-config`
/// is handled before loading, see [`validate_config`].
pub async fn handle_commands(args: &CliArgs, config: &Config) -> Result<bool> {
    if args.show_config {
        show_config(config).await?;
        return Ok(true);
    }

    // No info commands executed
    Ok(false)
}

async fn show_config(config: &Config) -> Result<()> {
    match &config.source {
        Some(path) => println!("# Loaded from {}", path.display()),
        None => println!("# Built-in defaults"),
    }
    print!("{}", config.to_yaml()?);
    Ok(())
}

pub async fn validate_config(config_path: Option<&Path>) -> Result<()> {
    match Config::load_with_fallback(config_path) {
        Ok(config) => {
            match &config.source {
                Some(path) => println!("✓ Configuration file is valid: {}", path.display()),
                None => println!("✓ No configuration file found, built-in defaults are valid"),
            }
            println!();

            println!("Configuration Summary:");
            println!("{:-<40}", "");
            println!("mkvmerge: {}", config.tools.mkvmerge.path);
            println!("Timeout: {}s", config.tools.mkvmerge.timeout_seconds);
            println!(
                "English codes: {}",
                config.languages.english_codes.join(", ")
            );
            println!(
                "Undefined language: {}",
                config.languages.undefined_language.as_str()
            );
            println!("Extensions: {}", config.scan.extensions.join(", "));

            Ok(())
        }
        Err(e) => {
            println!("✗ Configuration validation failed: {}", e);
            println!();
            println!("Common issues:");
            println!("  - Check YAML syntax and indentation");
            println!("  - Extensions must start with a dot, e.g. .mkv");
            println!("  - undefined_language must be assume_english or assume_foreign");
            Err(e)
        }
    }
}

/// Asks the user to confirm before files under `folder` are rewritten.
/// Only `yes` or `y` (any case) count as consent.
pub fn confirm_modification(folder: &Path) -> Result<bool> {
    let term = Term::stdout();
    term.write_line(&format!(
        "{} This will modify the video files in {}",
        style("WARNING:").yellow().bold(),
        folder.display()
    ))?;
    term.write_line("Non-English audio tracks will be permanently removed.")?;
    term.write_str("Continue? (yes/no): ")?;

    let answer = term.read_line()?;
    Ok(is_confirmation(&answer))
}

fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}
