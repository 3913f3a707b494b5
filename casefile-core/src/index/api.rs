//! Public API for loading, removing and selecting indexes.

use log::{debug, info};

use crate::analyzer::fold::fold;
use crate::analyzer::parse_table;
use crate::index::types::{Index, Store};

impl Store {
    /// Parses `content` and stores it under the canonical name of `file_name`.
    ///
    /// Index names are compared case-insensitively. An existing index with the
    /// same name is replaced wholesale and keeps its position and display
    /// name. Malformed content never fails: short records are padded, long
    /// ones truncated, and blank input yields an index with no columns.
    #[inline(never)]
    pub fn ingest(&mut self, file_name: &str, content: &str) {
        let mut name = self.normalizer.normalize(file_name);
        let key = fold(&name);
        let slot = self.slots.get(&key).copied();
        if let Some(slot) = slot {
            name = self.indexes[slot].name().to_owned();
        }
        let index = Index::build(name, file_name, parse_table(content));

        info!(
            "event=index_ingest index={} file={} columns={} records={} replaced={}",
            index.name(),
            file_name,
            index.columns().len(),
            index.len(),
            slot.is_some()
        );

        match slot {
            Some(slot) => {
                debug!(
                    "event=index_replace index={} previous_file={} previous_records={}",
                    index.name(),
                    self.indexes[slot].file_name(),
                    self.indexes[slot].len()
                );
                self.indexes[slot] = index;
                self.indexes_replaced += 1;
            }
            None => {
                self.slots.insert(key, self.indexes.len());
                self.indexes.push(index);
            }
        }

        self.files_ingested += 1;
        self.revision += 1;
    }

    /// Ingests several `(file_name, content)` pairs in order.
    ///
    /// Returns the number of files ingested.
    pub fn ingest_batch<'a>(
        &mut self,
        files: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> usize {
        let mut ingested = 0;
        for (file_name, content) in files {
            self.ingest(file_name, content);
            ingested += 1;
        }
        ingested
    }

    /// Removes the index named `name`, in any casing.
    ///
    /// Returns `false` (and changes nothing) if no such index is loaded.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(slot) = self.slots.remove(&fold(name)) else {
            debug!("event=index_remove index={} status=absent", name);
            return false;
        };

        let removed = self.indexes.remove(slot);
        for later in self.slots.values_mut().filter(|s| **s > slot) {
            *later -= 1;
        }
        self.revision += 1;

        info!(
            "event=index_remove index={} records={} status=ok",
            removed.name(),
            removed.len()
        );
        true
    }

    /// Drops every index and resets the query and page.
    pub fn clear_all(&mut self) {
        let dropped = self.indexes.len();
        self.indexes.clear();
        self.slots.clear();
        self.query.clear();
        self.page = 1;
        self.revision += 1;

        info!("event=store_clear indexes={}", dropped);
    }

    /// Replaces the query text and returns to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
        debug!("event=query_set query_len={}", self.query.len());
    }

    /// Sets the current page verbatim.
    ///
    /// No clamping happens here; a page outside `1..=total_pages` simply
    /// renders as empty.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Returns the index named `name`, in any casing.
    #[inline]
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.slots.get(&fold(name)).map(|&slot| &self.indexes[slot])
    }

    /// Iterates over the loaded indexes in insertion order.
    pub fn indexes(&self) -> impl Iterator<Item = &Index> + '_ {
        self.indexes.iter()
    }

    /// Returns the names of the loaded indexes in insertion order.
    pub fn active_indexes(&self) -> Vec<&str> {
        self.indexes.iter().map(Index::name).collect()
    }
}
