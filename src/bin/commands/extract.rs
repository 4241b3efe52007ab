use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use bench_forge::datasets::{ExtractConfig, ExtractionBatch, load_pairs};

use crate::commands::{FilterArgs, print_boxed_label, run_with_spinner};

/// Walks one dataset and collects every accepted protein-ligand pair.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Dataset name (pdbbind, crossdock, dude, scPDB); close spellings are accepted.
    #[arg(value_name = "NAME")]
    pub name: String,
    /// Data root holding the extracted dataset.
    #[arg(long, value_name = "DIR")]
    pub root: PathBuf,
    /// Use pocket files, or cut pockets around the reference ligand where none are shipped.
    #[arg(long)]
    pub pocket: bool,
    /// Pocket radius around the reference ligand centroid (DUD-E).
    #[arg(long, value_name = "ANGSTROM")]
    pub threshold: Option<f64>,
    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run(args: &ExtractArgs) -> Result<ExtractionBatch> {
    let config = build_config(args)?;

    let batch = run_with_spinner(&format!("Extracting {}", args.name), || {
        load_pairs(&args.name, &args.root, &config)
            .with_context(|| format!("Failed to load dataset '{}'", args.name))
    })?;

    print_report(&batch, &config)?;
    Ok(batch)
}

fn build_config(args: &ExtractArgs) -> Result<ExtractConfig> {
    let mut config = args.filter.load_config()?;
    if args.pocket {
        config.return_pocket = true;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    Ok(config)
}

fn print_report(batch: &ExtractionBatch, config: &ExtractConfig) -> Result<()> {
    let mut stderr = io::stderr().lock();
    let report = batch.report();

    print_boxed_label(&mut stderr, "BenchForge Extraction Report")?;
    writeln!(&mut stderr)?;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Metric", "Value"]);
    table.add_row(row!["Candidates", report.candidates]);
    table.add_row(row!["Pairs", report.pairs]);
    table.add_row(row!["Rejected Ligands", report.rejected]);
    table.add_row(row!["Failed Records", report.failed]);
    table.add_row(row!["Unreferenced Index Rows", report.unreferenced]);
    table.add_row(row!["Whitelist", config.allowed_atoms]);
    table.add_row(row![
        "Protein Atoms (total)",
        batch.proteins().iter().map(|p| p.atom_count()).sum::<usize>()
    ]);
    table.add_row(row![
        "Ligand Atoms (total)",
        batch.ligands().iter().map(|l| l.atom_count()).sum::<usize>()
    ]);
    table
        .print(&mut stderr)
        .context("Failed to render extraction report")?;

    Ok(())
}
