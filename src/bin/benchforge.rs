use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::OutputTarget;
use commands::{datasets, encode, extract};

#[derive(Parser, Debug)]
#[command(
    name = "benchforge",
    about = "A command-line tool for extracting paired protein and ligand coordinates with one-hot atom types from structure-based benchmark datasets.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// Output file path. When omitted, stdout is used.
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the datasets the registry knows about.
    Datasets(datasets::DatasetsArgs),
    /// Walk a dataset tree and write the paired encodings as JSON.
    Extract(extract::ExtractArgs),
    /// Encode a single protein or ligand file and report its shape.
    Encode(encode::EncodeArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let output = OutputTarget::new(cli.output.clone());

    match cli.command {
        Command::Datasets(args) => datasets::run(&args)?,
        Command::Extract(args) => {
            output.ensure_noninteractive("extract")?;
            let batch = extract::run(&args)?;
            output.write_json(&batch)?;
        }
        Command::Encode(args) => {
            let encoded = encode::run(&args)?;
            if !output.is_interactive() {
                output.write_json(&encoded)?;
            }
        }
    }

    Ok(())
}
