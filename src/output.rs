// src/output.rs

use anyhow::{Context, Result};
use chrono::Local;
use clap::ValueEnum;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use prettytable::{format, Cell, Row, Table as PrettyTable};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::info;

use crate::config::{CSV_FILE_NAME, DATETIME_FORMAT};
use crate::modes::Mode;
use crate::table::Table;

/// Where results go when not printed line by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    Pretty,
    File,
}

/// Send `table` to the destination chosen on the command line.
pub fn control_output(
    table: &Table,
    output: Option<OutputMode>,
    mode: Mode,
    results_dir: &Path,
) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match output {
        None => default_output(table, &mut stdout)?,
        Some(OutputMode::Pretty) => pretty_output(table, &mut stdout)?,
        Some(OutputMode::File) => {
            file_output(table, mode, results_dir)?;
        }
    }
    Ok(())
}

/// One line per row, cells separated by a space.
pub fn default_output(table: &Table, out: &mut impl Write) -> io::Result<()> {
    for row in table.all_rows() {
        writeln!(out, "{}", row.join(" "))?;
    }
    Ok(())
}

/// Left-aligned bordered table.
pub fn pretty_output(table: &Table, out: &mut impl Write) -> io::Result<()> {
    let cells = |row: &[String]| {
        Row::new(
            row.iter()
                .map(|c| Cell::new_align(c, format::Alignment::LEFT))
                .collect(),
        )
    };
    let mut pretty = PrettyTable::new();
    pretty.set_format(*format::consts::FORMAT_DEFAULT);
    pretty.set_titles(cells(table.header()));
    for row in table.rows() {
        pretty.add_row(cells(row.as_slice()));
    }
    pretty.print(out)?;
    Ok(())
}

/// File name for a results CSV written at the current local time.
pub fn results_file_name(mode: Mode) -> String {
    CSV_FILE_NAME
        .replace("{mode}", mode.as_str())
        .replace("{datetime}", &Local::now().format(DATETIME_FORMAT).to_string())
}

/// Write `table` as a fully quoted, `\n`-terminated CSV under `results_dir`.
pub fn file_output(table: &Table, mode: Mode, results_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(results_dir)
        .with_context(|| format!("creating {}", results_dir.display()))?;
    let path = results_dir.join(results_file_name(mode));

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in table.all_rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;

    info!("Results file saved: {}", path.display());
    Ok(path)
}
