//! Command-line interface for the importer.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use vocana_parser::{Regulation, Vocabulary};

use crate::error::{ImportError, Result};
use crate::import::{import_statute, ImportReport, DEFAULT_BATCH_SIZE};
use crate::loader::load_statute_text;
use crate::sink::JsonlSink;

/// Vocana Importer - Load Indonesian employment-law statutes into a search collection.
#[derive(Parser)]
#[command(name = "vocana-importer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a statute file and write its collection files.
    Import {
        /// Regulation identifier (e.g., "UU 13/2003")
        regulation_id: String,

        /// Path to the statute text file
        input: PathBuf,

        /// Official regulation title (default: the regulation id)
        #[arg(short, long)]
        title: Option<String>,

        /// Output directory (default: collections/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Documents per batch handed to the sink
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },

    /// Parse a statute file and report anomalies without writing anything.
    Check {
        /// Regulation identifier (e.g., "UU 13/2003")
        regulation_id: String,

        /// Path to the statute text file
        input: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            regulation_id,
            input,
            title,
            output,
            batch_size,
        } => import_command(
            &regulation_id,
            &input,
            title.as_deref(),
            output.as_deref(),
            batch_size,
        ),
        Commands::Check {
            regulation_id,
            input,
        } => check_command(&regulation_id, &input),
    }
}

/// Execute the import command.
fn import_command(
    regulation_id: &str,
    input: &Path,
    title: Option<&str>,
    output: Option<&Path>,
    batch_size: usize,
) -> Result<()> {
    let regulation = Regulation::new(regulation_id, title.unwrap_or(regulation_id))?;

    // Validate the output directory (if specified) before doing any work
    if let Some(output_dir) = output {
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(ImportError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Output path is not a directory: {}", output_dir.display()),
            )));
        }
    }
    let output_dir = output.unwrap_or(Path::new("collections"));

    println!(
        "{} {} from {}",
        style("Importing").bold(),
        style(&regulation.id).cyan(),
        style(input.display()).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Parsing statute text...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let text = match load_statute_text(input) {
        Ok(text) => text,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    let vocabulary = Vocabulary::employment_law();
    let mut sink = JsonlSink::create(output_dir, &regulation.to_slug())?;

    pb.set_message("Writing collection...");

    let report = match import_statute(&text, &regulation, &vocabulary, batch_size, &mut sink) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    print_report(&regulation, &report);
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        sink.documents_path().display()
    );

    Ok(())
}

/// Execute the check command: parse and report, write nothing.
fn check_command(regulation_id: &str, input: &Path) -> Result<()> {
    let regulation = Regulation::new(regulation_id, regulation_id)?;
    let text = load_statute_text(input)?;

    let vocabulary = Vocabulary::employment_law();
    let outcome = vocana_parser::parse_regulation(&text, &regulation, &vocabulary);

    println!(
        "{} {}: {} records, {} anomalies",
        style("Checked").bold(),
        style(&regulation.id).cyan(),
        outcome.records.len(),
        outcome.anomalies.len()
    );

    for anomaly in &outcome.anomalies {
        println!("  {} {}", style("!").yellow().bold(), anomaly);
    }

    Ok(())
}

/// Print the styled import summary.
fn print_report(regulation: &Regulation, report: &ImportReport) {
    println!("  Title: {}", style(&regulation.title).green());
    println!("  Collection: {}", report.collection);
    println!("  Records: {}", report.records);
    println!(
        "  Amendments: {} diubah, {} dihapus, {} disisipkan",
        report.modified(),
        report.deleted(),
        report.inserted()
    );
    println!("  Words: {}", report.total_words);
    if !report.anomalies.is_empty() {
        println!(
            "  Anomalies: {}",
            style(report.anomalies.len()).yellow().bold()
        );
        for anomaly in &report.anomalies {
            println!("    {} {}", style("!").yellow().bold(), anomaly);
        }
    }
}
