use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use colored::*;
use dotenv::dotenv;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use footage_tools::{config, convert, scanner, utils, AppConfig, ConvertOutcome, Error, Profile};

#[derive(Debug, Parser)]
#[command(name = "footage-convert")]
#[command(
    about = "Convert AVCHD recordings for editing (DNxHD) or viewing / sharing (MP4)",
    long_about = None
)]
struct Cli {
    /// Directory which contains .MTS recordings (searched recursively)
    dir: PathBuf,

    /// Convert to MP4 (much smaller files, e.g. for uploads)
    #[arg(short = 's', long)]
    for_sharing: bool,

    /// Add a deinterlacing step
    #[arg(long)]
    deinterlace: bool,

    /// Output directory (default: <DIR>_c, or <DIR>_s with --for-sharing)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenv().ok();

    let _guard = footage_tools::logging::init_logger();

    let config = match config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    if let Err(err) = run(&config, &args) {
        error!("Error: {}", err);
        process::exit(1);
    }

    Ok(())
}

fn run(config: &AppConfig, args: &Cli) -> Result<(), Error> {
    utils::ensure_directory(&args.dir)?;
    utils::ensure_in_path(&config.ffmpeg_command)?;

    let profile = if args.for_sharing {
        Profile::Sharing
    } else {
        Profile::Editing
    };
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| convert::default_output_dir(&args.dir, profile));

    let raw_files = scanner::find_files_with_extension(&args.dir, &config.raw_extension);
    if raw_files.is_empty() {
        info!(
            "No .{} files found under '{}'",
            config.raw_extension,
            args.dir.display()
        );
        return Ok(());
    }

    if out_dir.exists() {
        debug!("Output directory '{}' already exists", out_dir.display());
    } else {
        fs::create_dir_all(&out_dir)?;
    }

    let (jobs, skipped) = convert::plan(&raw_files, &out_dir, &config.converted_extension);
    info!(
        "{} recordings found, {} already converted, {} to convert",
        raw_files.len(),
        skipped,
        jobs.len()
    );

    let bar = ProgressBar::new(jobs.len() as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "  {spinner:.cyan} Converting [{bar:30.cyan/dim}] {pos}/{len} {msg}",
        )
        .unwrap()
        .progress_chars("━╸─")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let start = Instant::now();
    let mut outcome = ConvertOutcome {
        skipped,
        ..Default::default()
    };

    for job in &jobs {
        let name = job
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        bar.set_message(name);

        match convert::run_job(config, job, profile, args.deinterlace) {
            Ok(()) => outcome.converted += 1,
            Err(err) => {
                // One bad recording does not stop the rest of the run.
                warn!("Conversion of '{}' failed: {}", job.input.display(), err);
                outcome.failed += 1;
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    outcome.duration = start.elapsed();

    println!();
    info!(
        "Converted: {}, skipped: {}, failed: {} in {}",
        format!("{}", outcome.converted).green(),
        format!("{}", outcome.skipped).cyan(),
        format!("{}", outcome.failed).red(),
        format!("{:.2}s", outcome.duration.as_secs_f64()).green(),
    );

    Ok(())
}
