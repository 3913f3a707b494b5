//! Field profiles and store statistics.

use casefile_types::{FieldInfo, FieldValue, TopValues};
use rustc_hash::FxHashMap;

use crate::index::types::{Index, Store};

/// Computes the top-value profile of every column of `index`.
///
/// Per column, distinct non-empty values are counted, ordered by descending
/// count (ties keep first-seen order) and cut to `limit` entries. Column
/// order is preserved. Nothing is cached.
pub fn field_profiles(index: &Index, limit: usize) -> Vec<FieldInfo<'_>> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    let mut seen: Vec<(&str, usize)> = Vec::new();

    index
        .columns()
        .iter()
        .enumerate()
        .map(|(position, column)| {
            counts.clear();
            seen.clear();

            for row in 0..index.len() {
                let value = index.cell(row, position);
                if value.is_empty() {
                    continue;
                }
                match counts.get(value) {
                    Some(&slot) => seen[slot].1 += 1,
                    None => {
                        counts.insert(value, seen.len());
                        seen.push((value, 1));
                    }
                }
            }

            // stable: equal counts stay in first-seen order
            seen.sort_by(|a, b| b.1.cmp(&a.1));
            let top_values: TopValues<'_> = seen
                .iter()
                .take(limit)
                .map(|&(value, count)| FieldValue::new(value, count))
                .collect();

            FieldInfo {
                name: column.as_str(),
                top_values,
            }
        })
        .collect()
}

/// Row and shape summary of one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSummary<'a> {
    /// Canonical index name.
    pub name: &'a str,
    /// Source file name.
    pub file_name: &'a str,
    /// Number of columns.
    pub columns: usize,
    /// Number of records.
    pub records: usize,
}

/// A snapshot of store statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of loaded indexes.
    pub num_indexes: usize,
    /// Records across all indexes.
    pub num_records: usize,
    /// Cells across all indexes.
    pub num_cells: usize,
    /// Bytes of cell text, excluding the folded copies.
    pub cell_bytes: usize,
    /// Bytes of folded cell text.
    pub folded_bytes: usize,
}

impl StoreStats {
    /// Returns approximate memory usage of cell storage in bytes.
    pub fn memory_usage_bytes(&self) -> usize {
        let spans = self.num_cells * 2 * std::mem::size_of::<usize>() * 2;
        self.cell_bytes + self.folded_bytes + spans
    }
}

impl core::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} indexes, {} records, {} cells ({} bytes)",
            self.num_indexes, self.num_records, self.num_cells, self.cell_bytes
        )
    }
}

impl Store {
    /// Returns the field profiles of the index named `name`, in any casing.
    ///
    /// An unknown name yields an empty list.
    pub fn fields(&self, name: &str) -> Vec<FieldInfo<'_>> {
        match self.index(name) {
            Some(index) => field_profiles(index, self.config.top_values),
            None => Vec::new(),
        }
    }

    /// Returns a summary of every index in insertion order.
    pub fn summaries(&self) -> Vec<IndexSummary<'_>> {
        self.indexes
            .iter()
            .map(|index| IndexSummary {
                name: index.name(),
                file_name: index.file_name(),
                columns: index.columns().len(),
                records: index.len(),
            })
            .collect()
    }

    /// Returns store statistics.
    pub fn stats(&self) -> StoreStats {
        self.indexes.iter().fold(
            StoreStats {
                num_indexes: self.indexes.len(),
                num_records: 0,
                num_cells: 0,
                cell_bytes: 0,
                folded_bytes: 0,
            },
            |mut stats, index| {
                stats.num_records += index.len();
                stats.num_cells += index.cells.len();
                stats.cell_bytes += index.cells.byte_len();
                stats.folded_bytes += index.folded.byte_len();
                stats
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casefile_types::{StoreConfig, MAX_TOP_VALUES};

    fn pairs<'a>(info: &FieldInfo<'a>) -> Vec<(&'a str, usize)> {
        info.top_values.iter().map(|v| (v.value, v.count)).collect()
    }

    #[test]
    fn profiles_follow_column_order() {
        let mut store = Store::new();
        store.ingest("localusers.csv", "Name,Admin\nbob,true\nalice,false\nbob,true");

        let fields = store.fields("LocalUsers");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "Name");
        assert_eq!(pairs(&fields[0]), vec![("bob", 2), ("alice", 1)]);
        assert_eq!(fields[1].name, "Admin");
        assert_eq!(pairs(&fields[1]), vec![("true", 2), ("false", 1)]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let mut store = Store::new();
        store.ingest("t.csv", "v\n10\n2\nb\na\n2\na\n10\nb");
        let fields = store.fields("t");
        assert_eq!(pairs(&fields[0]), vec![("10", 2), ("2", 2), ("b", 2), ("a", 2)]);
    }

    #[test]
    fn empty_values_are_excluded() {
        let mut store = Store::new();
        store.ingest("t.csv", "a,b\n,x\n,\n1");
        let fields = store.fields("t");
        assert!(fields[0].top_values.iter().all(|v| !v.value.is_empty()));
        assert_eq!(pairs(&fields[0]), vec![("1", 1)]);
        assert_eq!(pairs(&fields[1]), vec![("x", 1)]);
    }

    #[test]
    fn truncated_to_ten_descending() {
        let mut content = String::from("n\n");
        for i in 0..15 {
            for _ in 0..=i {
                content.push_str(&format!("v{i}\n"));
            }
        }
        let mut store = Store::new();
        store.ingest("many.csv", &content);

        let fields = store.fields("many");
        let top = &fields[0].top_values;
        assert_eq!(top.len(), MAX_TOP_VALUES);
        assert_eq!(top[0].value, "v14");
        assert_eq!(top[0].count, 15);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        assert!(!top.spilled());
    }

    #[test]
    fn configured_limit_applies() {
        let mut store = Store::with_config(StoreConfig::compact()).unwrap();
        store.ingest("t.csv", "n\na\nb\nc\nd\ne\nf\ng");
        assert_eq!(store.fields("t")[0].top_values.len(), 5);
    }

    #[test]
    fn unknown_index_has_no_fields() {
        let store = Store::new();
        assert!(store.fields("Process").is_empty());
    }

    #[test]
    fn summaries_and_stats() {
        let mut store = Store::new();
        store.ingest("process.csv", "Pid,Image\n4,System\n812,SVCHOST.EXE");
        store.ingest("drivers.csv", "Name\nacpi");

        let summaries = store.summaries();
        assert_eq!(
            summaries,
            vec![
                IndexSummary {
                    name: "Process",
                    file_name: "process.csv",
                    columns: 2,
                    records: 2
                },
                IndexSummary {
                    name: "Drivers",
                    file_name: "drivers.csv",
                    columns: 1,
                    records: 1
                },
            ]
        );

        let stats = store.stats();
        assert_eq!(stats.num_indexes, 2);
        assert_eq!(stats.num_records, 3);
        assert_eq!(stats.num_cells, 5);
        assert_eq!(stats.cell_bytes, "4System812SVCHOST.EXEacpi".len());
        assert_eq!(stats.folded_bytes, stats.cell_bytes);
        assert!(stats.memory_usage_bytes() > stats.cell_bytes);
        assert_eq!(
            format!("{stats}"),
            format!("2 indexes, 3 records, 5 cells ({} bytes)", stats.cell_bytes)
        );
    }
}
