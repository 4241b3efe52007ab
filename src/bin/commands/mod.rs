use std::fs::File;
use std::io::{self as stdio, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;

use bench_forge::datasets::ExtractConfig;
use bench_forge::io::write_json;
use bench_forge::{AtomNameMatch, AtomWhitelist};

pub mod datasets;
pub mod encode;
pub mod extract;

/// Atom-name matching modes exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchMode {
    /// The full atom name must be a whitelisted symbol.
    #[value(name = "exact")]
    Exact,
    /// The first letter of the atom name must be whitelisted.
    #[value(name = "element")]
    Element,
}

impl From<MatchMode> for AtomNameMatch {
    fn from(mode: MatchMode) -> Self {
        match mode {
            MatchMode::Exact => AtomNameMatch::ExactName,
            MatchMode::Element => AtomNameMatch::LeadingElement,
        }
    }
}

/// Extraction switches shared by `extract` and `encode`.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// TOML file with extraction settings; flags below override it.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Keep hydrogen atoms in proteins.
    #[arg(long)]
    pub keep_hydrogens: bool,
    /// Append heteroatom records (cofactors, ions, waters) to proteins.
    #[arg(long)]
    pub keep_het: bool,
    /// Element whitelist in one-hot order.
    #[arg(long, value_name = "SYMBOL", value_delimiter = ',')]
    pub atoms: Vec<String>,
    /// How protein atom names are tested against the whitelist.
    #[arg(long = "match", value_enum, value_name = "MODE")]
    pub atom_match: Option<MatchMode>,
}

impl FilterArgs {
    /// Builds the configuration from the optional file, then applies explicit flags.
    pub fn load_config(&self) -> Result<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_file(path)?,
            None => ExtractConfig::default(),
        };

        if self.keep_hydrogens {
            config.remove_hydrogens = false;
        }
        if self.keep_het {
            config.keep_hetero = true;
        }
        if !self.atoms.is_empty() {
            config.allowed_atoms = AtomWhitelist::new(self.atoms.iter().map(String::as_str))
                .context("Invalid --atoms whitelist")?;
        }
        if let Some(mode) = self.atom_match {
            config.atom_name_match = mode.into();
        }
        Ok(config)
    }
}

fn load_config_file(path: &Path) -> Result<ExtractConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    ExtractConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Where command results are written.
#[derive(Debug, Clone, Default)]
pub struct OutputTarget {
    path: Option<PathBuf>,
}

impl OutputTarget {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Returns true when stdout is a TTY and no explicit output file was supplied.
    pub fn is_interactive(&self) -> bool {
        self.path.is_none() && stdio::stdout().is_terminal()
    }

    /// Ensures commands do not dump JSON directly into an interactive terminal.
    pub fn ensure_noninteractive(&self, command: &str) -> Result<()> {
        if self.is_interactive() {
            bail!(
                "Refusing to stream {command} results to an interactive terminal. Use -o/--output or pipe the command into a file."
            );
        }
        Ok(())
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        match &self.path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file {}", path.display()))?;
                write_json(BufWriter::new(file), value)
                    .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
            }
            None => {
                let stdout = stdio::stdout();
                let mut writer = BufWriter::new(stdout.lock());
                write_json(&mut writer, value).context("Failed to write JSON to stdout")?;
                writeln!(writer).context("Failed to flush stdout")?;
            }
        }
        Ok(())
    }
}

/// Wraps long-running operations with a spinner rendered to stderr.
pub fn run_with_spinner<T, F>(message: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    let result = work();

    match &result {
        Ok(_) => spinner.finish_with_message(format!("{} ✓", message)),
        Err(_) => spinner.abandon_with_message(format!("{} ✗", message)),
    }

    result
}

pub fn print_boxed_label<W: Write>(writer: &mut W, title: &str) -> stdio::Result<()> {
    let inner = format!(" {title} ");
    let width = inner.chars().count();
    writeln!(writer, "╭{}╮", "─".repeat(width))?;
    writeln!(writer, "│{}│", inner)?;
    writeln!(writer, "╰{}╯", "─".repeat(width))?;
    Ok(())
}
