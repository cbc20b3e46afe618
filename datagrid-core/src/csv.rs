//! CSV export of the filtered table.
//!
//! Output covers the visible accessor columns in display order and the
//! filtered rows in sorted order. Cells are written raw, without the column
//! formatter. Records end with CRLF; the header is written even when no row
//! matches.

use crate::error::ExportError;
use crate::table::DataTable;
use crate::value::Row;
use chrono::{NaiveDate, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const FIELD_DELIMITER: char = ',';
const RECORD_DELIMITER: &str = "\r\n";
const QUALIFIER: char = '"';

/// A rendered export, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub contents: String,
    pub rows: usize,
}

impl CsvExport {
    /// Write the export into `dir`, returning the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        let mut file = fs::File::create(&path)?;
        file.write_all(self.contents.as_bytes())?;
        file.flush()?;

        tracing::info!(
            path = %path.display(),
            rows = self.rows,
            bytes = self.contents.len(),
            "CSV export written"
        );
        Ok(path)
    }
}

/// `<base>-<YYYY-MM-DD>.csv`.
pub fn export_file_name(base: &str, date: NaiveDate) -> Result<String, ExportError> {
    let base = base.trim();
    if base.is_empty() {
        return Err(ExportError::EmptyBaseName);
    }
    Ok(format!("{}-{}.csv", base, date.format("%Y-%m-%d")))
}

/// Today's date for export file names, in UTC.
pub fn export_date() -> NaiveDate {
    Utc::now().date_naive()
}

/// Render the table as CSV text.
pub fn to_csv<R: Row>(table: &DataTable<R>) -> String {
    let columns = table.visible_accessor_columns();
    let mut out = String::new();

    let header = columns
        .iter()
        .map(|c| {
            if c.display_name.is_empty() {
                qualify(&c.id)
            } else {
                qualify(&c.display_name)
            }
        })
        .collect::<Vec<_>>()
        .join(&FIELD_DELIMITER.to_string());
    out.push_str(&header);
    out.push_str(RECORD_DELIMITER);

    for id in table.filtered_rows() {
        let line = columns
            .iter()
            .map(|c| qualify(&table.cell(*id, &c.id).display()))
            .collect::<Vec<_>>()
            .join(&FIELD_DELIMITER.to_string());
        out.push_str(&line);
        out.push_str(RECORD_DELIMITER);
    }
    out
}

/// Render the table and name the file for `date`.
pub fn export<R: Row>(
    table: &DataTable<R>,
    base_name: &str,
    date: NaiveDate,
) -> Result<CsvExport, ExportError> {
    let file_name = export_file_name(base_name, date)?;
    Ok(CsvExport {
        file_name,
        contents: to_csv(table),
        rows: table.filtered_len(),
    })
}

/// Quote a field when it holds a delimiter, a quote, a line break or
/// surrounding whitespace. Embedded quotes are doubled.
fn qualify(value: &str) -> String {
    let needs_quotes = value.contains(FIELD_DELIMITER)
        || value.contains(QUALIFIER)
        || value.contains('\n')
        || value.contains('\r')
        || value.starts_with(' ')
        || value.ends_with(' ');

    if !needs_quotes {
        return value.to_string();
    }
    let escaped = value.replace(QUALIFIER, "\"\"");
    format!("{QUALIFIER}{escaped}{QUALIFIER}")
}
