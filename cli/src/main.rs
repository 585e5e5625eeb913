//! docbundle CLI - batch document export and packaging tool

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docbundle::{
    load_inputs, BatchOrchestrator, BatchReport, ImageRefMode, Settings, TextEngine,
};

#[derive(Parser)]
#[command(name = "docbundle")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Export documents to synchronized formats and package them into one archive", long_about = None)]
struct Cli {
    /// Input documents
    #[arg(value_name = "FILES")]
    inputs: Vec<PathBuf>,

    /// Output archive path
    #[arg(short, long, value_name = "ZIP", default_value = "bundle.zip")]
    output: PathBuf,

    /// Working directory for per-document outputs
    #[arg(long, value_name = "DIR", default_value = "docbundle_output")]
    work_dir: PathBuf,

    /// Skip table extraction
    #[arg(long)]
    no_tables: bool,

    /// Skip image extraction
    #[arg(long)]
    no_images: bool,

    /// Embed images as base64 data URIs instead of file references
    #[arg(long)]
    embed_images: bool,

    /// Write the flattened cross-document dataset (JSONL)
    #[arg(long)]
    dataset: bool,

    /// Page cap per document
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show supported input formats
    Formats,

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Formats) => {
            cmd_formats();
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if cli.inputs.is_empty() {
                println!("{}", "Usage: docbundle <FILES...> [-o bundle.zip]".yellow());
                println!("       docbundle --help for more information");
                Ok(())
            } else {
                cmd_export(&cli)
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_export(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = load_inputs(&cli.inputs)?;
    let total = inputs.len() as u64;

    let mut settings = Settings::new()
        .with_tables(!cli.no_tables)
        .with_images(!cli.no_images)
        .with_flattened_dataset(cli.dataset);
    if cli.embed_images {
        settings = settings.with_image_ref_mode(ImageRefMode::Embedded);
    }
    if let Some(pages) = cli.max_pages {
        settings = settings.with_max_pages(pages);
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Exporting...");

    let progress_bar = pb.clone();
    let orchestrator = BatchOrchestrator::new(
        Arc::new(TextEngine::new()),
        settings,
        cli.work_dir.clone(),
    )
    .with_progress(Box::new(move |completed, _| {
        progress_bar.set_position(completed as u64);
    }));

    let report = orchestrator.run(&inputs)?;
    pb.set_message("Writing archive...");

    let archive = File::create(&cli.output)?;
    report.write_archive(archive)?;
    pb.finish_with_message("Done!");

    if cli.dataset {
        if let Some(ref dataset) = report.dataset {
            let path = dataset_path(&cli.output);
            fs::write(&path, dataset.to_jsonl()?)?;
            println!("{} {}", "Dataset:".green().bold(), path.display());
        }
    }

    print_summary(&report, &cli.output);

    if report.completed_count() == 0 {
        return Err("no document was exported".into());
    }
    Ok(())
}

fn dataset_path(archive: &Path) -> PathBuf {
    let stem = archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bundle".to_string());
    archive.with_file_name(format!("{stem}_dataset.jsonl"))
}

fn print_summary(report: &BatchReport, archive: &Path) {
    println!(
        "\n{} {} completed, {} failed",
        "Summary:".green().bold(),
        report.completed_count(),
        report.failed_count()
    );

    for job in &report.jobs {
        if job.is_completed() {
            println!("  {} {}", "ok".green(), job.name);
            for warning in &job.warnings {
                println!("     {} {}", "warning:".yellow(), warning);
            }
        } else {
            println!(
                "  {} {}: {}",
                "failed".red(),
                job.name,
                job.failure.as_deref().unwrap_or("unknown cause")
            );
        }
    }

    println!("{} {}", "Archive:".green().bold(), archive.display());
}

fn cmd_formats() {
    println!("{}", "Supported input formats".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("  {} md, markdown, txt", "text".bold());
    println!("  {} xlsx, xls, xlsb, ods (per-sheet table export)", "spreadsheet".bold());
    println!();
    println!(
        "Other formats (pdf, docx, pptx, html, ...) need a custom {} implementation.",
        "ParsingEngine".bold()
    );
}

fn cmd_version() {
    println!("docbundle {}", env!("CARGO_PKG_VERSION"));
}
