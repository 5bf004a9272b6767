use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;
use harvest_flow::HarvestReport;
use threadharvest_core_types::HarvestResponse;

use crate::errors::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of records
    Json,
    /// One row per record with a header line
    Csv,
    /// The success message of the wire protocol, as one JSON object
    Envelope,
}

/// Write the harvested records to `out` (or stdout when absent).
pub fn write(
    report: &HarvestReport,
    format: OutputFormat,
    out: Option<&Path>,
) -> Result<(), CliError> {
    match out {
        Some(path) => {
            let file = File::create(path)?;
            render(report, format, file)
        }
        None => {
            let stdout = io::stdout();
            render(report, format, stdout.lock())
        }
    }
}

fn render<W: Write>(
    report: &HarvestReport,
    format: OutputFormat,
    mut writer: W,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &report.records)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            csv.write_record(["name", "profile_url", "headline"])?;
            for record in &report.records {
                csv.write_record([
                    record.name.as_str(),
                    record.profile_url.as_str(),
                    record.headline.as_deref().unwrap_or(""),
                ])?;
            }
            csv.flush()?;
        }
        OutputFormat::Envelope => {
            let response = HarvestResponse::ScrapeSucceeded {
                records: report.records.clone(),
            };
            serde_json::to_writer(&mut writer, &response)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
