use anyhow::{bail, Context};
use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

use audio_pruner::{
    batch::{BatchWalker, RunStatistics},
    cli::{confirm_modification, handle_commands, validate_config, CliArgs},
    config::Config,
    mkvmerge::MkvMergeTool,
    report::TracingReporter,
    tracks::LanguagePolicy,
    utils::setup_logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if !args.is_info_command() && args.folder_to_process().is_none() {
        use clap::CommandFactory;
        CliArgs::command().print_help()?;
        println!();
        return Ok(());
    }

    args.validate()?;

    // Validation reports its own findings and must not need a loadable config.
    if args.validate_config {
        validate_config(args.config.as_deref()).await?;
        return Ok(());
    }

    let mut config = Config::load_with_fallback(args.config.as_deref())
        .context("Failed to load configuration")?;
    args.apply_overrides(&mut config)?;

    setup_logging(
        args.get_log_level(&config.logging.level),
        config.logging.show_timestamps,
        config.logging.colored_output && args.should_use_color(),
        config.logging.file.as_deref(),
    )?;

    if handle_commands(&args, &config).await? {
        return Ok(());
    }

    if let Some(folder) = args.folder_to_process() {
        let stats = handle_processing(&args, &config, folder).await?;
        if stats.cancelled {
            bail!("Processing was cancelled");
        }
        if stats.has_errors() {
            bail!("{} file(s) could not be processed", stats.error_files);
        }
    }

    Ok(())
}

async fn handle_processing(
    args: &CliArgs,
    config: &Config,
    folder: &std::path::Path,
) -> anyhow::Result<RunStatistics> {
    let tool = MkvMergeTool::new(config.tools.mkvmerge.clone());

    match tool.check_availability().await {
        Ok(version) => info!("Using {}", version),
        Err(e) => {
            error!("mkvmerge is not available: {}", e);
            error!("Install MKVToolNix or point --mkv-tools-path at its directory");
            return Err(e).context("mkvmerge not available");
        }
    }

    if args.dry_run {
        info!("DRY RUN mode: no files will be modified");
    }
    if args.needs_confirmation() && !confirm_modification(folder)? {
        info!("Operation cancelled by user");
        return Ok(RunStatistics::default());
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let walker = BatchWalker::new(
        tool,
        TracingReporter,
        LanguagePolicy::from_config(&config.languages),
    )
    .with_extensions(config.scan.extensions.clone())
    .with_dry_run(args.dry_run)
    .with_cancel_flag(Arc::clone(&cancel));

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current file");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let stats = walker
        .run(folder)
        .await
        .with_context(|| format!("Failed to scan {}", folder.display()))?;

    print_summary(&stats);
    Ok(stats)
}

fn print_summary(stats: &RunStatistics) {
    println!();
    println!("Processing summary:");
    println!("{:-<40}", "");
    println!("Total files found: {}", stats.total_files);
    println!("Files processed:   {}", stats.processed_files);
    println!("Files skipped:     {}", stats.skipped_files);
    println!("Files with errors: {}", stats.error_files);

    if !stats.failures.is_empty() {
        println!();
        println!("Failed files:");
        for failure in &stats.failures {
            println!("  - {}: {}", failure.path.display(), failure.error);
        }
    }
}
