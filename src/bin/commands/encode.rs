use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, ValueEnum};
use prettytable::{Table, format, row};

use bench_forge::EncodedStructure;
use bench_forge::datasets::ExtractConfig;
use bench_forge::io::{LigandFormat, StructureFormat};
use bench_forge::ops::{extract_molecule, extract_protein};

use crate::commands::{FilterArgs, print_boxed_label, run_with_spinner};

/// Role of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    /// Per-atom filtered protein or pocket.
    #[value(name = "protein")]
    Protein,
    /// All-or-nothing small molecule; the first record is used.
    #[value(name = "ligand")]
    Ligand,
}

/// Runs one extractor over one file.
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Structure file (.pdb, .mol2, .sdf, optionally .gz).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// Treat the file as a protein or a ligand. Inferred for .pdb and .sdf.
    #[arg(long = "as", value_enum, value_name = "ROLE")]
    pub role: Option<Role>,
    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run(args: &EncodeArgs) -> Result<EncodedStructure> {
    let config = args.filter.load_config()?;
    let role = resolve_role(args)?;

    let encoded = run_with_spinner("Encoding structure", || encode(args, role, &config))?;

    print_summary(&encoded, role, &config)?;
    Ok(encoded)
}

fn resolve_role(args: &EncodeArgs) -> Result<Role> {
    if let Some(role) = args.role {
        return Ok(role);
    }
    match (
        StructureFormat::from_path(&args.file),
        LigandFormat::from_path(&args.file),
    ) {
        (Some(_), None) => Ok(Role::Protein),
        (None, Some(_)) => Ok(Role::Ligand),
        (Some(_), Some(_)) => bail!(
            "'{}' can hold a protein or a ligand. Please specify --as.",
            args.file.display()
        ),
        (None, None) => bail!("Unrecognized structure file '{}'.", args.file.display()),
    }
}

fn encode(args: &EncodeArgs, role: Role, config: &ExtractConfig) -> Result<EncodedStructure> {
    let path = &args.file;
    match role {
        Role::Protein => {
            let format = StructureFormat::from_path(path)
                .ok_or_else(|| anyhow!("'{}' is not a PDB or MOL2 file", path.display()))?;
            let table = format
                .read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            extract_protein(&table, &config.protein_filter(), &config.allowed_atoms)
                .context("Failed to encode protein")
        }
        Role::Ligand => {
            let format = LigandFormat::from_path(path)
                .ok_or_else(|| anyhow!("'{}' is not an SDF or MOL2 file", path.display()))?;
            let molecule = format
                .read_first(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            extract_molecule(&molecule, &config.allowed_atoms)
                .context("Failed to encode ligand")?
                .ok_or_else(|| {
                    anyhow!(
                        "Ligand '{}' contains elements outside the whitelist {}",
                        molecule.name,
                        config.allowed_atoms
                    )
                })
        }
    }
}

fn print_summary(encoded: &EncodedStructure, role: Role, config: &ExtractConfig) -> Result<()> {
    let mut stderr = io::stderr().lock();
    let title = match role {
        Role::Protein => "Protein Encoding",
        Role::Ligand => "Ligand Encoding",
    };
    print_boxed_label(&mut stderr, title)?;
    writeln!(&mut stderr)?;

    let mut counts = vec![0usize; config.allowed_atoms.len()];
    for index in encoded.type_indices().into_iter().flatten() {
        counts[index] += 1;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Element", "Atoms"]);
    for (symbol, count) in config.allowed_atoms.symbols().iter().zip(counts) {
        table.add_row(row![symbol, count]);
    }
    table.add_row(row![
        "Shape",
        format!(
            "coord {}x3, atom_type {}x{}",
            encoded.atom_count(),
            encoded.atom_count(),
            encoded.type_width()
        )
    ]);
    if let Some(center) = encoded.centroid() {
        table.add_row(row![
            "Centroid",
            format!("({:.3}, {:.3}, {:.3})", center.x, center.y, center.z)
        ]);
    }
    table
        .print(&mut stderr)
        .context("Failed to render encoding summary")?;

    Ok(())
}
