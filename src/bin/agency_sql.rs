// src/bin/agency_sql.rs
//! Run an ad-hoc query against the agency DB and print results, e.g.
//! `agency_sql --sql "SELECT * FROM learned_weights" --format md` for a
//! Markdown table of the current weights.

use anyhow::{anyhow, Result};
use clap::Parser;
use rusqlite::{types::ValueRef, Row};
use std::io::{self, Write};

use voyagerank::config::Credentials;
use voyagerank::db;

#[derive(Parser, Debug)]
#[command(
    name = "agency_sql",
    version,
    about = "Run an SQL query against the agency DB and print results"
)]
struct Args {
    /// SQL to execute, e.g. "SELECT * FROM learned_weights;"
    #[arg(long)]
    sql: String,

    /// Output format: tsv, csv or md
    #[arg(long, default_value = "tsv")]
    format: String,

    /// Path to the agency sqlite file
    #[arg(long, default_value = "data/agency.db")]
    db: String,
}

#[derive(Clone, Copy)]
enum Format {
    Tsv,
    Csv,
    Markdown,
}

fn display_cell(row: &Row, i: usize) -> String {
    match row.get_ref(i) {
        Ok(ValueRef::Null) => "".into(),
        Ok(ValueRef::Integer(n)) => n.to_string(),
        Ok(ValueRef::Real(x)) => x.to_string(),
        Ok(ValueRef::Text(bytes)) => String::from_utf8_lossy(bytes).to_string(),
        Ok(ValueRef::Blob(b)) => format!("<blob {} bytes>", b.len()),
        Err(e) => format!("<err {e}>"),
    }
}

fn csv_escape(cell: &str) -> String {
    let needs_quote =
        cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\t');
    if needs_quote {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn write_line(out: &mut impl Write, cells: &[String], fmt: Format) -> io::Result<()> {
    let line = match fmt {
        Format::Tsv => cells.join("\t"),
        Format::Csv => cells.iter().map(|c| csv_escape(c)).collect::<Vec<_>>().join(","),
        Format::Markdown => {
            format!("| {} |", cells.iter().map(|c| c.replace('|', "\\|")).collect::<Vec<_>>().join(" | "))
        }
    };
    writeln!(out, "{line}")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let fmt = match args.format.to_ascii_lowercase().as_str() {
        "tsv" => Format::Tsv,
        "csv" => Format::Csv,
        "md" | "markdown" => Format::Markdown,
        other => return Err(anyhow!("unknown format '{other}' (expected tsv, csv or md)")),
    };

    let creds = Credentials::from_env()?;
    let conn = db::connect(&args.db, &creds)?;
    let mut stmt = conn
        .prepare(&args.sql)
        .map_err(|e| anyhow!("prepare failed: {e}"))?;

    // capture metadata before rows() to avoid borrow conflicts
    let col_count = stmt.column_count();
    let col_names: Vec<String> = (0..col_count)
        .map(|i| stmt.column_name(i).unwrap_or("?").to_string())
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_line(&mut out, &col_names, fmt)?;
    if let Format::Markdown = fmt {
        let rule: Vec<String> = (0..col_count).map(|_| "---".to_string()).collect();
        write_line(&mut out, &rule, fmt)?;
    }

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let cells: Vec<String> = (0..col_count).map(|i| display_cell(row, i)).collect();
        write_line(&mut out, &cells, fmt)?;
    }
    Ok(())
}
