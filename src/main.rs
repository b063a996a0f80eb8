//! diskbroom - rank, clean, organize and deduplicate files.
//!
//! Usage:
//!   broom top [PATH]          Show the largest files
//!   broom clean [PATH]        Delete temporary files (*.tmp, *.log)
//!   broom organize [PATH]     Move top-level files into <EXT>_Files folders
//!   broom duplicates [PATH]   Find files with identical content
//!   broom --help              Show help

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use diskbroom_analyze::{DuplicateFinder, top_files};
use diskbroom_core::{CleanerConfig, format_size, validate_root};
use diskbroom_ops::{Cleaner, Organizer};

#[derive(Parser)]
#[command(
    name = "broom",
    version,
    about = "Rank, clean, organize and deduplicate files",
    long_about = "diskbroom works on a single directory per invocation.\n\n\
                  Pick an operation with a subcommand; the directory defaults \
                  to the current one."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the largest files
    Top {
        /// Directory to work on
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Number of files to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete temporary files
    Clean {
        /// Directory to work on
        #[arg(default_value = ".")]
        path: PathBuf,

        /// File name pattern to delete (repeatable, defaults to *.tmp and *.log)
        #[arg(short, long = "pattern")]
        patterns: Vec<String>,

        /// Delete without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Only list what would be deleted
        #[arg(long)]
        dry_run: bool,
    },

    /// Move top-level files into per-extension folders
    Organize {
        /// Directory to work on
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Suffix appended to the uppercase extension
        #[arg(short, long, default_value = "_Files")]
        suffix: String,
    },

    /// Find files with identical content
    Duplicates {
        /// Directory to work on
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The working directory for this invocation, validated once up front.
struct Session {
    root: PathBuf,
}

impl Session {
    fn open(path: &Path) -> Result<Self> {
        validate_root(path).context("Invalid working directory")?;
        Ok(Self {
            root: path.to_path_buf(),
        })
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Top {
            path,
            limit,
            format,
        } => run_top(&Session::open(&path)?, limit, format),
        Command::Clean {
            path,
            patterns,
            yes,
            dry_run,
        } => run_clean(&Session::open(&path)?, patterns, yes, dry_run),
        Command::Organize { path, suffix } => run_organize(&Session::open(&path)?, suffix),
        Command::Duplicates { path, format } => run_duplicates(&Session::open(&path)?, format),
    }
}

/// Install the stderr log subscriber, honouring `RUST_LOG`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

/// Show the largest files.
fn run_top(session: &Session, limit: usize, format: OutputFormat) -> Result<()> {
    eprintln!("Scanning {}...", session.root().display());

    let files = top_files(session.root(), limit).context("Scan failed")?;

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(60));
            println!(" Top {} files in {}", limit, session.root().display());
            println!("{}", "─".repeat(60));
            for stat in &files {
                println!(" {stat}");
            }
            if files.is_empty() {
                println!(" No files found.");
            }
            println!();
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&files)?);
        }
    }

    Ok(())
}

/// Delete temporary files after confirmation.
fn run_clean(session: &Session, patterns: Vec<String>, yes: bool, dry_run: bool) -> Result<()> {
    let mut builder = CleanerConfig::builder();
    if !patterns.is_empty() {
        builder.temp_patterns(patterns);
    }
    let config = builder.build().context("Invalid cleanup options")?;
    let cleaner = Cleaner::with_config(&config)?;

    let plan = cleaner.plan(session.root()).context("Scan failed")?;
    if plan.is_empty() {
        println!("No temporary files found.");
        return Ok(());
    }

    let total: u64 = plan.iter().map(|s| s.size).sum();
    for stat in &plan {
        println!("  {} ({})", stat.path.display(), format_size(stat.size));
    }
    println!("{} files, {}", plan.len(), format_size(total));

    if dry_run {
        return Ok(());
    }
    if !yes && !confirm("Delete these files permanently?")? {
        println!("Aborted.");
        return Ok(());
    }

    // Delete what was listed, not whatever matches now
    let report = cleaner.execute(&plan);
    for error in &report.errors {
        eprintln!("  {error}");
    }
    println!(
        "{}. Freed {}.",
        report.summary(),
        format_size(report.bytes_freed)
    );

    Ok(())
}

/// Move top-level files into per-extension folders.
fn run_organize(session: &Session, suffix: String) -> Result<()> {
    let config = CleanerConfig::builder()
        .organize_suffix(suffix)
        .build()
        .context("Invalid organize options")?;

    let report = Organizer::with_config(config)
        .run(session.root())
        .context("Organize failed")?;

    for (source, dest) in &report.moved {
        println!("  {} -> {}", source.display(), dest.display());
    }
    for error in &report.errors {
        eprintln!("  Could not move {error}");
    }
    println!("{}.", report.summary());

    Ok(())
}

/// Find and report duplicate files.
fn run_duplicates(session: &Session, format: OutputFormat) -> Result<()> {
    eprintln!("Finding duplicates in {}...", session.root().display());

    let report = DuplicateFinder::new()
        .find(session.root())
        .context("Scan failed")?;

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(70));
            println!(" Duplicate File Report");
            println!("{}", "─".repeat(70));
            println!();

            if report.groups.is_empty() {
                println!(" No duplicate files found.");
            } else {
                println!(
                    " Found {} duplicate groups ({} files)",
                    report.groups.len(),
                    report.total_duplicate_files()
                );
                println!(
                    " Total wasted space: {}",
                    format_size(report.total_wasted_space())
                );
                println!();

                for (i, group) in report.groups.iter().enumerate() {
                    println!(
                        " Group {} ({} files, {} each, hash {})",
                        i + 1,
                        group.count(),
                        format_size(group.size),
                        &group.hash[..12.min(group.hash.len())]
                    );
                    for path in &group.paths {
                        println!("   {}", path.display());
                    }
                    println!();
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` means no.
fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    let read = io::stdin().lock().read_line(&mut answer)?;
    if read == 0 {
        bail!("No answer on stdin; pass --yes to delete without confirmation");
    }

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
