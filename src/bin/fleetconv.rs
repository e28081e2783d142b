//! fleetconv — the conversion CLI
//!
//! Converts an osquery pack (`.conf`/`.json`) or a raw SQL file (`.sql`)
//! into FleetDM-compatible multi-document YAML.
//!
//! # Usage
//!
//! ```bash
//! # Convert a pack
//! fleetconv pack.conf queries.yml
//!
//! # Convert semicolon-terminated SQL statements
//! fleetconv queries.sql queries.yml
//!
//! # Preview without writing
//! fleetconv pack.conf queries.yml --dry-run
//! ```

use anyhow::Result;
use clap::Parser;
use colored::*;
use fleetconv::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fleetconv")]
#[command(author = "Fleetconv Contributors")]
#[command(version)]
#[command(about = "Convert osquery packs to FleetDM query YAML", long_about = None)]
#[command(after_help = "EXAMPLES:
    fleetconv pack.conf queries.yml
    fleetconv queries.sql queries.yml
    fleetconv pack.conf queries.yml --dry-run --verbose")]
struct Cli {
    /// Input file: .conf/.json osquery pack, or .sql statements
    input: PathBuf,

    /// Output YAML file (overwritten if present)
    output: PathBuf,

    /// Don't write the output file, print the YAML to stdout
    #[arg(short, long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let format = Format::from_path(&cli.input)?;

    if cli.verbose {
        let kind = match format {
            Format::JsonPack => "osquery pack",
            Format::Sql => "SQL statements",
        };
        println!(
            "{} {} ({})",
            "Input:".dimmed(),
            cli.input.display(),
            kind.yellow()
        );
    }

    if cli.dry_run {
        return dry_run(cli, format);
    }

    let summary = convert_file(&cli.input, &cli.output)?;

    if cli.verbose {
        println!("{} {}", "Output:".dimmed(), summary.output.display());
    }
    warn_empty(summary.empty_queries);
    println!(
        "{} Converted {} queries to FleetDM format. Saved to {}.",
        "✓".green(),
        summary.converted,
        summary.output.display()
    );

    Ok(())
}

/// Parse and serialize, printing the stream to stdout instead of writing.
fn dry_run(cli: &Cli, format: Format) -> Result<()> {
    let content = fs::read_to_string(&cli.input).map_err(|e| ConvertError::read(&cli.input, e))?;
    let raw = parse(&content, format)?;

    if cli.verbose {
        for query in &raw {
            println!("  {} {}", "•".dimmed(), query.name.cyan());
        }
    }
    let empty = raw.iter().filter(|q| q.query.is_empty()).count();
    warn_empty(empty);

    let queries = transform(raw);
    print!("{}", serialize_documents(&queries)?);

    Ok(())
}

fn warn_empty(count: usize) {
    if count > 0 {
        eprintln!(
            "{} query text empty in {} record(s)",
            "Warning:".yellow().bold(),
            count
        );
    }
}
