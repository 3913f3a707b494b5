//! CSV export of result sets.
//!
//! The first column is always `_index`, followed by the first-seen union of
//! the result columns. A record without one of those columns exports an
//! empty cell. Rows are separated by `\n` with no trailing newline, so an
//! empty result set exports the header alone.

use std::io::Write;

use casefile_types::quoting::quote_into;
use casefile_types::{ExportError, INDEX_COLUMN};
use log::debug;

use crate::index::page::result_columns;
use crate::index::{SearchResult, Store};

const FILE_PREFIX: &str = "forensic-results-";

/// Writes `results` to `out` as CSV and returns the number of data rows.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if writing to `out` fails.
pub fn export_results<W: Write>(
    results: &[SearchResult<'_>],
    mut out: W,
) -> Result<usize, ExportError> {
    let columns = result_columns(results);
    let mut line = String::with_capacity(128);

    push_header(&columns, &mut line);
    out.write_all(line.as_bytes())?;

    for result in results {
        line.clear();
        line.push('\n');
        push_row(result, &columns, &mut line);
        out.write_all(line.as_bytes())?;
    }
    out.flush()?;

    debug!("event=export rows={} columns={}", results.len(), columns.len());
    Ok(results.len())
}

/// Renders `results` as a CSV string.
pub fn export_to_string(results: &[SearchResult<'_>]) -> String {
    let columns = result_columns(results);
    let mut out = String::new();

    push_header(&columns, &mut out);
    for result in results {
        out.push('\n');
        push_row(result, &columns, &mut out);
    }
    out
}

fn push_header(columns: &[&str], out: &mut String) {
    quote_into(INDEX_COLUMN, out);
    for column in columns {
        out.push(',');
        quote_into(column, out);
    }
}

#[inline]
fn push_row(result: &SearchResult<'_>, columns: &[&str], out: &mut String) {
    quote_into(result.index, out);
    for column in columns {
        out.push(',');
        quote_into(result.record.get(column).unwrap_or_default(), out);
    }
}

/// Returns the suggested download name for an export taken at `timestamp_ms`.
pub fn export_file_name(timestamp_ms: u128) -> String {
    format!("{FILE_PREFIX}{timestamp_ms}.csv")
}

impl Store {
    /// Exports every result of the current query (not just the current page).
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if writing to `out` fails.
    pub fn export<W: Write>(&self, out: W) -> Result<usize, ExportError> {
        export_results(&self.search(), out)
    }

    /// Renders every result of the current query as a CSV string.
    pub fn export_string(&self) -> String {
        export_to_string(&self.search())
    }
}
