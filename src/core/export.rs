// LootSleuth - core/export.rs
//
// CSV writing of match records and reading of the `Line` column back.
// Core layer: works on any Write / Read trait object; the app layer owns
// opening the files.

use crate::core::model::MatchRecord;
use crate::util::constants;
use crate::util::error::{AnalyzeError, ExtractError};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Append-only writer for the `Character,Date,Line` CSV.
///
/// The header row is written on construction, so even a run with no
/// matches leaves a valid (header-only) CSV behind.
pub struct MatchCsvWriter<W: Write> {
    writer: csv::Writer<W>,
    path: PathBuf,
    rows: usize,
}

impl<W: Write> MatchCsvWriter<W> {
    /// Wrap `writer` and emit the header. `path` is used for error context.
    pub fn new(writer: W, path: &Path) -> Result<Self, ExtractError> {
        // Header is written explicitly; serialize() must not add another.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer
            .write_record(constants::CSV_HEADER)
            .map_err(|e| ExtractError::Csv {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows: 0,
        })
    }

    /// Write one data row.
    pub fn write(&mut self, record: &MatchRecord) -> Result<(), ExtractError> {
        self.writer
            .serialize(record)
            .map_err(|e| ExtractError::Csv {
                path: self.path.clone(),
                source: e,
            })?;
        self.rows += 1;
        Ok(())
    }

    /// Flush buffered rows and return the row count.
    pub fn finish(mut self) -> Result<usize, ExtractError> {
        self.writer.flush().map_err(|e| ExtractError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(self.rows)
    }
}

/// Read every `Line` value from a loot CSV.
///
/// The header row is required and must contain a `Line` column; other
/// columns are ignored. Empty `Line` cells are skipped with a warning.
pub fn read_loot_lines<R: Read>(reader: R, path: &Path) -> Result<Vec<String>, AnalyzeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let csv_err = |e: csv::Error| AnalyzeError::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let column = csv_reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .position(|h| h.trim() == constants::LINE_COLUMN)
        .ok_or_else(|| AnalyzeError::MissingColumn {
            path: path.to_path_buf(),
            column: constants::LINE_COLUMN,
        })?;

    let mut lines = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        match record.get(column) {
            Some(line) if !line.trim().is_empty() => lines.push(line.to_string()),
            _ => {
                // +2: 1-based, and the header occupies line 1.
                tracing::warn!(
                    path = %path.display(),
                    row = row_idx + 2,
                    "Skipping row with empty Line value"
                );
            }
        }
    }
    Ok(lines)
}
