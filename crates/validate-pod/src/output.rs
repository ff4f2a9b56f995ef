//! Rendering of validation reports on stdout.

use anyhow::Result;
use clap::ValueEnum;
use pod_validation::ValidationReport;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `<file>:<line> <message>` line per diagnostic
    Text,
    /// A single JSON document with codes and document paths
    Json,
}

pub fn print_report(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, format)?;
    out.flush()?;
    Ok(())
}

fn write_report(out: &mut impl Write, report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for line in report.lines() {
                writeln!(out, "{}", line)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report.to_json())?;
            writeln!(out)?;
        }
    }
    Ok(())
}
