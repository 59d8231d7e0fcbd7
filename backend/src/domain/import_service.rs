use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use std::io::Cursor;
use thiserror::Error;

use crate::domain::commands::products::{
    ParseRowsResult, ParseSpreadsheetCommand, ParseTextCommand, StagedRow,
};
use crate::domain::models::product_limit::{LimitGroup, RoundGroup};

/// Errors surfaced to the user by the bulk-import parsers. Both are
/// non-fatal: the caller notifies and keeps its previous staging state.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input produced no usable rows ("invalid format")
    #[error("no usable rows found in the input")]
    EmptyInput,
    /// The uploaded bytes could not be decoded as a workbook
    #[error("failed to read spreadsheet: {0}")]
    Decode(String),
}

/// Service that turns pasted delimited text and uploaded spreadsheets into
/// staged bulk-entry rows.
#[derive(Debug, Clone, Default)]
pub struct BulkImportService;

impl BulkImportService {
    pub fn new() -> Self {
        Self
    }

    /// Parse pasted text into staged rows.
    ///
    /// Each line is split on literal commas with the fields trimmed. A line
    /// yields a row iff it has at least 3 fields; the first three are taken
    /// verbatim as code, limit group and round group; group labels are not
    /// validated against the closed sets here. Shorter lines are dropped
    /// without being reported individually.
    pub fn parse_text(&self, command: ParseTextCommand) -> Result<ParseRowsResult, ImportError> {
        let text = command.text.trim();

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping unreadable line {}: {}", index, e);
                    continue;
                }
            };
            if record.len() < 3 {
                continue;
            }
            rows.push(StagedRow {
                id: format!("bulk-{}", index),
                product_code: record[0].to_string(),
                limit_group: record[1].to_string(),
                round_group: record[2].to_string(),
            });
        }

        if rows.is_empty() {
            return Err(ImportError::EmptyInput);
        }

        info!("Parsed {} staged rows from pasted text", rows.len());
        Ok(ParseRowsResult { rows })
    }

    /// Decode the first worksheet of an `.xlsx`/`.xls` file into staged rows.
    ///
    /// Row 0 is a header and is skipped. Expected columns are
    /// [code, name, limit qty, round qty, created date]; only columns 0, 2
    /// and 3 are consumed. Quantities are bucketed into group labels by the
    /// fixed thresholds.
    pub fn parse_spreadsheet(
        &self,
        command: ParseSpreadsheetCommand,
    ) -> Result<ParseRowsResult, ImportError> {
        let cursor = Cursor::new(command.bytes);
        let mut workbook =
            open_workbook_auto_from_rs(cursor).map_err(|e| ImportError::Decode(e.to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::Decode("workbook has no sheets".to_string()))?
            .map_err(|e| ImportError::Decode(e.to_string()))?;

        let mut rows = Vec::new();
        for (index, cells) in range.rows().skip(1).enumerate() {
            if let Some(row) = Self::staged_row_from_cells(index, cells) {
                rows.push(row);
            }
        }

        if rows.is_empty() {
            return Err(ImportError::EmptyInput);
        }

        info!("Imported {} staged rows from spreadsheet", rows.len());
        Ok(ParseRowsResult { rows })
    }

    /// Map one data row of the sheet to a staged row. Rows with fewer than
    /// 4 cells or an empty product-code cell are skipped.
    fn staged_row_from_cells(index: usize, cells: &[Data]) -> Option<StagedRow> {
        // The decoded grid pads every row to the sheet width with empty
        // cells, so measure the row by its last non-empty cell.
        let cell_count = cells
            .iter()
            .rposition(|cell| !matches!(cell, Data::Empty))
            .map_or(0, |last| last + 1);
        if cell_count < 4 {
            return None;
        }

        let product_code = Self::cell_text(&cells[0])?;
        let limit_amount = Self::cell_number(&cells[2]);
        let round_amount = Self::cell_number(&cells[3]);

        Some(StagedRow {
            id: format!("bulk-{}", index),
            product_code,
            limit_group: LimitGroup::classify(limit_amount).label().to_string(),
            round_group: RoundGroup::classify(round_amount).label().to_string(),
        })
    }

    /// Stringify a product-code cell, or `None` when the cell is empty.
    /// Numeric-typed codes can read back as floats, so one trailing literal
    /// ".0" is stripped.
    fn cell_text(cell: &Data) -> Option<String> {
        let text = match cell {
            Data::Empty => String::new(),
            Data::String(s) => s.trim().to_string(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => f.to_string(),
            other => other.to_string(),
        };
        let text = text.strip_suffix(".0").unwrap_or(&text).to_string();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Numeric value of a quantity cell, defaulting to 0 when unparseable.
    fn cell_number(cell: &Data) -> f64 {
        match cell {
            Data::Int(i) => *i as f64,
            Data::Float(f) => *f,
            Data::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}
