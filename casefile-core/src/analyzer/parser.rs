//! Delimited text parsing.
//!
//! Turns the raw text of one export file into a header and row-major cells.
//! Parsing never fails: malformed input degrades instead.
//!
//! - Lines are split on `\n` (an optional `\r` before it is dropped); blank
//!   lines are skipped everywhere, so quoted values cannot span lines.
//! - The first retained line is the header. Repeated header names collapse to
//!   one column at the first position; the last value given for that name on
//!   a line wins.
//! - Short lines are padded with empty cells, excess fields are dropped.

use memchr::memchr_iter;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::analyzer::tokenizer::{is_trim_char, tokenize_line, LineFields};
use crate::arena::CellArena;

/// Parsed content of one file.
#[derive(Debug, Default)]
pub struct Table {
    /// Distinct column names in header order.
    pub columns: Vec<String>,
    /// Cells in row-major order, `columns.len()` per row.
    pub cells: CellArena,
    /// Number of data rows.
    pub rows: usize,
}

impl Table {
    /// Returns the cells of row `row`.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &str> + '_ {
        let width = self.columns.len();
        self.cells.row(row * width, width)
    }
}

/// Iterates over the non-blank lines of `content`.
pub fn retained_lines(content: &str) -> impl Iterator<Item = &str> + '_ {
    let bytes = content.as_bytes();
    let mut start = 0usize;
    memchr_iter(b'\n', bytes)
        .map(Some)
        .chain(std::iter::once(None))
        .map(move |end| {
            let end = end.unwrap_or(bytes.len());
            let line = &content[start..end];
            start = (end + 1).min(bytes.len());
            line.strip_suffix('\r').unwrap_or(line)
        })
        .filter(|line| !line.trim_matches(is_trim_char).is_empty())
}

/// Parses delimited text into a [`Table`].
pub fn parse_table(content: &str) -> Table {
    let mut lines = retained_lines(content);
    let mut fields = LineFields::new();

    let Some(header) = lines.next() else {
        return Table::default();
    };

    tokenize_line(header, &mut fields);
    let mut columns: Vec<String> = Vec::with_capacity(fields.len());
    // for each column, the last header position carrying its name
    let mut sources: SmallVec<[usize; 32]> = SmallVec::with_capacity(fields.len());
    let mut slots_by_name: FxHashMap<&str, usize> = FxHashMap::default();
    for (pos, name) in fields.iter().enumerate() {
        match slots_by_name.get(name) {
            Some(&slot) => sources[slot] = pos,
            None => {
                slots_by_name.insert(name, columns.len());
                columns.push(name.to_owned());
                sources.push(pos);
            }
        }
    }
    drop(slots_by_name);

    let width = columns.len();
    let mut cells = CellArena::with_capacity(content.len(), width * 64);
    let mut rows = 0usize;

    for line in lines {
        tokenize_line(line, &mut fields);
        for &pos in &sources {
            cells.push(fields.get(pos).unwrap_or(""));
        }
        rows += 1;
    }

    Table {
        columns,
        cells,
        rows,
    }
}
