use crate::config::{Config, UndefinedLanguage};
use crate::mkvmerge::MkvMergeTool;
use crate::utils::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(name = "audio-pruner")]
#[command(about = "Removes non-English audio tracks from video containers using mkvmerge")]
#[command(long_about = "
Walks a folder of video files, keeps only the English audio tracks of each
container and makes the first English track the default. Files are rewritten
with mkvmerge into a temporary file that replaces the original only after the
remux succeeded.

EXAMPLES:
  # Preview what would change
  audio-pruner ~/Videos --dry-run

  # Process without the confirmation prompt
  audio-pruner ~/Videos --yes

  # Use a specific MKVToolNix installation
  audio-pruner ~/Videos --mkv-tools-path /opt/mkvtoolnix/bin

  # Treat tracks without a language tag as foreign
  audio-pruner ~/Videos --undefined-language assume_foreign
")]
pub struct CliArgs {
    /// Folder containing the video files to process (searched recursively)
    #[arg(value_name = "INPUT_FOLDER")]
    pub input_folder: Option<PathBuf>,

    /// Directory containing the mkvmerge executable
    #[arg(long, value_name = "DIR")]
    pub mkv_tools_path: Option<PathBuf>,

    /// Show what would be changed without modifying any file
    #[arg(long)]
    pub dry_run: bool,

    /// Do not ask for confirmation before modifying files
    #[arg(short, long)]
    pub yes: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write the log to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// How to treat audio tracks without a language tag: assume_english or assume_foreign
    #[arg(long, value_name = "POLICY")]
    pub undefined_language: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging (trace level, includes tool output)
    #[arg(long)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Validate configuration file
    #[arg(long)]
    pub validate_config: bool,

    /// Print the effective configuration as YAML
    #[arg(long)]
    pub show_config: bool,
}

impl CliArgs {
    /// `--debug` wins over `--verbose`; either only ever raises the level.
    pub fn get_log_level<'a>(&self, config_level: &'a str) -> &'a str {
        let level = config_level.to_lowercase();
        if self.debug {
            "trace"
        } else if self.verbose && level != "trace" {
            "debug"
        } else {
            config_level
        }
    }

    pub fn should_use_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_info_command(&self) -> bool {
        self.validate_config || self.show_config
    }

    /// The folder to prune, unless an info command was requested instead.
    pub fn folder_to_process(&self) -> Option<&Path> {
        if self.is_info_command() {
            None
        } else {
            self.input_folder.as_deref()
        }
    }

    pub fn needs_confirmation(&self) -> bool {
        !self.dry_run && !self.yes
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(policy) = &self.undefined_language {
            if UndefinedLanguage::from_string(policy).is_none() {
                return Err(crate::utils::Error::validation(format!(
                    "Invalid undefined language policy: {} (must be assume_english or assume_foreign)",
                    policy
                )));
            }
        }

        if let Some(dir) = &self.mkv_tools_path {
            if !dir.is_dir() {
                return Err(crate::utils::Error::validation(format!(
                    "MKVToolNix path is not a directory: {}",
                    dir.display()
                )));
            }
        }

        // Folder existence is checked by discovery so it is reported the same
        // way for every caller.
        Ok(())
    }

    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(dir) = &self.mkv_tools_path {
            config.tools.mkvmerge.path = MkvMergeTool::executable_in(dir).display().to_string();
        }

        if let Some(policy) = &self.undefined_language {
            config.languages.undefined_language =
                UndefinedLanguage::from_string(policy).ok_or_else(|| {
                    crate::utils::Error::validation(format!(
                        "Invalid undefined language policy: {}",
                        policy
                    ))
                })?;
        }

        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }

        config.validate()
    }
}
