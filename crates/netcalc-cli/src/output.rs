//! Rendering of batch results

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use crate::batch::BatchResult;
use netcalc_cidr::SubnetRecord;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonItem<'a> {
    Record {
        input: &'a str,
        result: &'a SubnetRecord,
    },
    Error {
        input: &'a str,
        error: &'a str,
    },
}

impl<'a> From<&'a BatchResult> for JsonItem<'a> {
    fn from(item: &'a BatchResult) -> Self {
        match &item.result {
            Ok(record) => JsonItem::Record {
                input: &item.input,
                result: record,
            },
            Err(error) => JsonItem::Error {
                input: &item.input,
                error,
            },
        }
    }
}

/// Print results to stdout (and per-item errors to stderr in human mode)
pub fn print_results(results: &[BatchResult], format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => write_human(&mut out, &mut std::io::stderr(), results)?,
        OutputFormat::Json => write_json(&mut out, results, true)?,
        OutputFormat::JsonCompact => write_json(&mut out, results, false)?,
        OutputFormat::Csv => write_csv(&mut out, results)?,
    }

    out.flush()?;
    Ok(())
}

pub fn write_human<W: Write, E: Write>(out: &mut W, err: &mut E, results: &[BatchResult]) -> Result<()> {
    for item in results {
        match &item.result {
            Ok(record) => write_record_human(out, record)?,
            Err(error) => writeln!(err, "{} {}: {}", "✗".red(), item.input, error.red())?,
        }
    }
    Ok(())
}

fn write_record_human<W: Write>(out: &mut W, record: &SubnetRecord) -> Result<()> {
    let none = || "(none)".dimmed().to_string();

    writeln!(out)?;
    writeln!(out, "{}", "Subnet".bold().cyan())?;
    writeln!(out, "{}", "─".repeat(50).dimmed())?;
    writeln!(out, "{:>15}: {}", "Address".bold(), record.address)?;
    writeln!(out, "{:>15}: {}", "NetworkName".bold(), record.network_name.green())?;
    writeln!(out, "{:>15}: {}", "NetworkAddress".bold(), record.network_address)?;
    writeln!(out, "{:>15}: {}", "NetworkMask".bold(), record.network_mask)?;
    writeln!(out, "{:>15}: {}", "MaskLength".bold(), record.mask_length)?;
    writeln!(
        out,
        "{:>15}: {}",
        "FirstIPAddress".bold(),
        record.first_ip_address.map_or_else(none, |a| a.to_string())
    )?;
    writeln!(
        out,
        "{:>15}: {}",
        "LastIPAddress".bold(),
        record.last_ip_address.map_or_else(none, |a| a.to_string())
    )?;
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, results: &[BatchResult], pretty: bool) -> Result<()> {
    let items: Vec<JsonItem> = results.iter().map(JsonItem::from).collect();

    if pretty {
        serde_json::to_writer_pretty(&mut *out, &items)?;
    } else {
        serde_json::to_writer(&mut *out, &items)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_csv<W: Write>(out: &mut W, results: &[BatchResult]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    let mut header = vec!["Input"];
    header.extend(SubnetRecord::HEADERS);
    header.push("Error");
    wtr.write_record(&header)?;

    for item in results {
        let mut row = vec![item.input.clone()];
        match &item.result {
            Ok(record) => {
                row.extend(record.to_row());
                row.push(String::new());
            }
            Err(error) => {
                row.extend(std::iter::repeat(String::new()).take(SubnetRecord::HEADERS.len()));
                row.push(error.clone());
            }
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
