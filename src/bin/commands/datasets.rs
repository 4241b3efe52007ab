use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use bench_forge::db;

use crate::commands::print_boxed_label;

/// Prints the embedded dataset registry.
#[derive(Debug, Default, Args)]
pub struct DatasetsArgs {}

pub fn run(_args: &DatasetsArgs) -> Result<()> {
    let mut stderr = io::stderr().lock();
    print_boxed_label(&mut stderr, "Registered Datasets")?;
    writeln!(&mut stderr)?;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Name", "Layout", "Location", "Description"]);
    for dataset in db::datasets() {
        let location = if dataset.in_subdirectory() {
            format!("<root>/{}", dataset.name())
        } else {
            "<root>".to_string()
        };
        table.add_row(row![
            dataset.name(),
            dataset.layout(),
            location,
            dataset.description()
        ]);
    }
    table
        .print(&mut stderr)
        .context("Failed to render dataset registry")?;

    Ok(())
}
