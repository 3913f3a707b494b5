//! Index building logic.

use rustc_hash::FxHashMap;

use crate::analyzer::fold::{fold, fold_into};
use crate::analyzer::Table;
use crate::arena::CellArena;
use crate::index::types::Index;

impl Index {
    /// Builds an index from a parsed table.
    ///
    /// Besides taking ownership of the cells, this derives everything the
    /// read side needs so that queries never fold or hash at match time:
    /// the column lookup map, lower-cased column names, and a lower-cased
    /// twin of every cell.
    pub(crate) fn build(name: String, file_name: &str, table: Table) -> Self {
        let Table {
            columns,
            cells,
            rows,
        } = table;

        let column_slots: FxHashMap<String, usize> = columns
            .iter()
            .enumerate()
            .map(|(slot, column)| (column.clone(), slot))
            .collect();
        let folded_columns = columns.iter().map(|column| fold(column)).collect();

        let mut folded = CellArena::with_capacity(cells.byte_len(), cells.len());
        for id in 0..cells.len() {
            let cell = cells.get(id).unwrap_or_default();
            folded.push_with(|buf| fold_into(cell, buf));
        }

        Self {
            name,
            file_name: file_name.to_owned(),
            columns,
            folded_columns,
            column_slots,
            cells,
            folded,
            rows,
        }
    }
}
