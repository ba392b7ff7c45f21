use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::metrics::TeamMetrics;

/// Report file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Comma-separated values with one header row
    Csv,
    /// Pretty-printed JSON array of row objects
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error writing {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Write the report to `path`, creating or truncating the file
pub fn write_report(path: &Path, format: Format, rows: &[TeamMetrics]) -> Result<(), OutputError> {
    let display = path.display().to_string();
    let io_err = |source: std::io::Error| OutputError::Io {
        path: display.clone(),
        source,
    };

    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    match format {
        Format::Csv => write_csv(&mut out, rows).map_err(|source| OutputError::Csv {
            path: display.clone(),
            source,
        })?,
        Format::Json => write_json(&mut out, rows).map_err(|source| OutputError::Json {
            path: display.clone(),
            source,
        })?,
    }
    out.flush().map_err(io_err)
}

/// Report columns, `team_id` first
pub const CSV_HEADER: [&str; 8] = [
    "team_id",
    "nickname",
    "disappointments",
    "favored_wins",
    "disappointment_percentage",
    "surprises",
    "underdog_losses",
    "surprise_percentage",
];

/// CSV with a header row even when there are no teams. Undefined ratios are
/// empty cells.
pub fn write_csv<W: Write>(w: W, rows: &[TeamMetrics]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(w);
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// JSON array; undefined ratios are `null`
pub fn write_json<W: Write>(mut w: W, rows: &[TeamMetrics]) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(&mut w, rows)?;
    w.write_all(b"\n").map_err(serde_json::Error::io)
}
