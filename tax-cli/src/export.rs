//! Summary export and section input files.
//!
//! ## Summary CSV
//!
//! One row per summary figure, in display order:
//!
//! ```csv
//! steuerjahr,position,betrag
//! 2024,Bruttoarbeitslohn,62000
//! 2024,Lohnsteuer,12500
//! ```
//!
//! ## Section input
//!
//! `submit` reads one JSON object with the section's camelCase fields, e.g.
//! `{"grossSalary": 52000, "incomeTax": 9100, "solidaritySurcharge": 0}`.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::{DeclarationSummary, Section, SectionData};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("section '{section}' input is not valid JSON: {source}")]
    Json {
        section: Section,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct SummaryRow {
    steuerjahr: i32,
    position: String,
    betrag: Decimal,
}

/// Write the summary rows as CSV to `writer`.
pub fn write_summary_csv<W: Write>(
    summary: &DeclarationSummary,
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (label, amount) in summary.rows() {
        csv_writer.serialize(SummaryRow {
            steuerjahr: summary.tax_year,
            position: label.to_string(),
            betrag: amount,
        })?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Resolve the export target: a directory gets the summary's document name.
pub fn summary_csv_path(
    summary: &DeclarationSummary,
    target: &Path,
) -> PathBuf {
    if target.is_dir() {
        target.join(format!("{}.csv", summary.document_name()))
    } else {
        target.to_path_buf()
    }
}

/// Write the summary to `target` (a file or a directory) and return the
/// path written.
pub fn export_summary_csv(
    summary: &DeclarationSummary,
    target: &Path,
) -> Result<PathBuf, ExportError> {
    let path = summary_csv_path(summary, target);
    let file = std::fs::File::create(&path).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    write_summary_csv(summary, file)?;
    Ok(path)
}

/// Decode section input from `reader`.
pub fn read_section<R: Read>(
    section: Section,
    reader: R,
) -> Result<SectionData, ExportError> {
    let value: serde_json::Value =
        serde_json::from_reader(reader).map_err(|source| ExportError::Json { section, source })?;
    SectionData::from_json(section, value).map_err(|source| ExportError::Json { section, source })
}

/// Decode section input from a file, or from stdin when `source` is `-`.
pub fn read_section_from(
    section: Section,
    source: &str,
) -> Result<SectionData, ExportError> {
    if source == "-" {
        return read_section(section, std::io::stdin().lock());
    }

    let path = Path::new(source);
    let file = std::fs::File::open(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_section(section, std::io::BufReader::new(file))
}
