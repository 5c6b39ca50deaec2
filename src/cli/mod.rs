//! # CLI Module
//!
//! Command-line interface for pix.
//!
//! ## Usage
//! ```bash
//! # Copy photos into one directory, named by capture time
//! pix organise ~/Camera ~/Photos
//!
//! # Same, correcting a camera clock that was 1h30m fast
//! pix organise ~/Camera ~/Photos --shift=-1h30m
//!
//! # Time between two photos
//! pix timediff phone.jpg camera.jpg
//!
//! # Copy metadata onto edited exports (needs exiftool)
//! pix copymeta ~/Originals ~/Edited
//!
//! # JSON output
//! pix --output json organise ~/Camera ~/Photos
//! ```

use chrono::TimeDelta;
use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use pix::core::copymeta::{CopyMetaConfig, CopyMetaExecutor, CopyMetaResult, ExifToolCopier};
use pix::core::exif::format_exif_datetime;
use pix::core::organize::{OrganizeConfig, OrganizeExecutor, OrganizeResult};
use pix::core::shift::{format_shift, parse_shift};
use pix::core::timediff::time_diff;
use pix::error::{PixError, Result};
use std::path::{Path, PathBuf};

/// pix - A tool for organising pics from multiple devices
#[derive(Parser, Debug)]
#[command(name = "pix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store images in a destination dir with timestamped filenames.
    /// An optional time shift can be supplied.
    #[command(alias = "organize")]
    Organise {
        /// Directory to read photos from
        src_dir: PathBuf,

        /// Directory to copy renamed photos into
        dst_dir: PathBuf,

        /// Added to every capture time, e.g. 2h, -1h30m, 45s
        #[arg(long, default_value = "0", value_parser = parse_shift, allow_hyphen_values = true)]
        shift: TimeDelta,
    },

    /// Calculate the time between two images, based on their capture time
    Timediff {
        image1: PathBuf,
        image2: PathBuf,
    },

    /// Copy EXIF metadata from each photo in one directory to the file with
    /// the same name in another. Needs the exiftool program.
    Copymeta {
        /// Directory with the original photos
        src_dir: PathBuf,

        /// Directory with same-named files to receive the metadata
        dst_dir: PathBuf,

        /// exiftool executable to run
        #[arg(long, default_value = "exiftool")]
        exiftool: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    pix::init_tracing(if cli.verbose { "debug" } else { "warn" });

    match cli.command {
        Commands::Organise {
            src_dir,
            dst_dir,
            shift,
        } => run_organise(src_dir, dst_dir, shift, cli.output),
        Commands::Timediff { image1, image2 } => run_timediff(&image1, &image2, cli.output),
        Commands::Copymeta {
            src_dir,
            dst_dir,
            exiftool,
        } => run_copymeta(src_dir, dst_dir, exiftool, cli.output),
    }
}

fn progress_bar(output: OutputFormat) -> Option<ProgressBar> {
    if !matches!(output, OutputFormat::Pretty) {
        return None;
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    Some(pb)
}

fn update_progress(progress: &Option<ProgressBar>, done: usize, total: usize, path: &Path) {
    if let Some(ref pb) = progress {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
        pb.set_message(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
        );
    }
}

fn run_organise(
    src_dir: PathBuf,
    dst_dir: PathBuf,
    shift: TimeDelta,
    output: OutputFormat,
) -> Result<()> {
    let config = OrganizeConfig::new(src_dir, dst_dir).with_shift(shift);
    let progress = progress_bar(output);

    let result = OrganizeExecutor::execute(&config, |done, total, path| {
        update_progress(&progress, done, total, path)
    });

    if let Some(ref pb) = progress {
        pb.finish_and_clear();
    }
    let result = result?;

    match output {
        OutputFormat::Pretty => print_organise_pretty(&result),
        OutputFormat::Json => print_json(&result)?,
    }
    Ok(())
}

fn run_timediff(image1: &Path, image2: &Path, output: OutputFormat) -> Result<()> {
    let diff = time_diff(image1, image2)?;

    match output {
        OutputFormat::Pretty => println!("{}", format_shift(diff)),
        OutputFormat::Json => print_json(&serde_json::json!({
            "image1": image1,
            "image2": image2,
            "diff": format_shift(diff),
            "diff_ms": diff.num_milliseconds(),
        }))?,
    }
    Ok(())
}

fn run_copymeta(
    src_dir: PathBuf,
    dst_dir: PathBuf,
    exiftool: String,
    output: OutputFormat,
) -> Result<()> {
    let config = CopyMetaConfig::new(src_dir, dst_dir);
    let copier = ExifToolCopier::new(exiftool);
    let progress = progress_bar(output);

    let result = CopyMetaExecutor::execute(&config, &copier, |done, total, path| {
        update_progress(&progress, done, total, path)
    });

    if let Some(ref pb) = progress {
        pb.finish_and_clear();
    }
    let result = result?;

    match output {
        OutputFormat::Pretty => print_copymeta_pretty(&result),
        OutputFormat::Json => print_json(&result)?,
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| PixError::Output(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn print_organise_pretty(result: &OrganizeResult) {
    let term = Term::stdout();

    for file in &result.files {
        term.write_line(&format!(
            "  {} {} {} {}",
            style("✓").green(),
            file.source.display(),
            style("→").dim(),
            file.destination.display()
        ))
        .ok();
        if file.original_time != file.new_time {
            term.write_line(&format!(
                "    {} {} {} {}",
                style("time").dim(),
                format_exif_datetime(&file.original_time),
                style("→").dim(),
                format_exif_datetime(&file.new_time)
            ))
            .ok();
        }
    }

    for file in &result.skipped {
        term.write_line(&format!(
            "  {} {} ({})",
            style("○").dim(),
            file.path.display(),
            style(file.reason).yellow()
        ))
        .ok();
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "{} {} photos organised, {} skipped in {:.1}s",
        style("✓").green().bold(),
        style(result.files_processed()).cyan(),
        style(result.skipped.len()).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();
}

fn print_copymeta_pretty(result: &CopyMetaResult) {
    let term = Term::stdout();

    for pair in &result.skipped {
        term.write_line(&format!(
            "  {} Skipping unknown file: {}",
            style("○").dim(),
            pair.source.display()
        ))
        .ok();
    }

    term.write_line(&format!(
        "{} Metadata copied to {} files, {} skipped",
        style("✓").green().bold(),
        style(result.copied.len()).cyan(),
        style(result.skipped.len()).cyan()
    ))
    .ok();
}
