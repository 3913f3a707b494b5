//! Index and store types.

use core::fmt;

use casefile_types::StoreConfig;
use rustc_hash::FxHashMap;

use crate::analyzer::IndexNameNormalizer;
use crate::arena::CellArena;

/// One ingested file: named, column-ordered, immutable once built.
pub struct Index {
    pub(crate) name: String,
    pub(crate) file_name: String,
    pub(crate) columns: Vec<String>,
    /// Lower-cased column names, parallel to `columns`
    pub(crate) folded_columns: Vec<String>,
    pub(crate) column_slots: FxHashMap<String, usize>,
    /// Row-major cell text, `columns.len()` cells per record
    pub(crate) cells: CellArena,
    /// Lower-cased twin of `cells`, only read by matching
    pub(crate) folded: CellArena,
    pub(crate) rows: usize,
}

impl Index {
    /// Canonical identifier this index is stored under.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the file the index was built from.
    #[inline(always)]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Distinct column names in header order.
    #[inline(always)]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the position of `column`, if the index has it.
    #[inline]
    pub fn column_position(&self, column: &str) -> Option<usize> {
        self.column_slots.get(column).copied()
    }

    /// Returns the number of records.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Returns `true` if the file had no data rows.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns record `row`.
    #[inline]
    pub fn record(&self, row: usize) -> Option<Record<'_>> {
        (row < self.rows).then_some(Record { index: self, row })
    }

    /// Iterates over all records in file order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        (0..self.rows).map(move |row| Record { index: self, row })
    }

    #[inline(always)]
    pub(crate) fn cell(&self, row: usize, column: usize) -> &str {
        self.cells
            .get(row * self.columns.len() + column)
            .unwrap_or_default()
    }
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .finish()
    }
}

/// Borrowed view of one record; nothing is copied.
#[derive(Clone, Copy)]
pub struct Record<'a> {
    pub(crate) index: &'a Index,
    pub(crate) row: usize,
}

impl<'a> Record<'a> {
    /// The index holding this record.
    #[inline(always)]
    pub fn index(&self) -> &'a Index {
        self.index
    }

    /// Position of this record within its index.
    #[inline(always)]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the number of values, always the index's column count.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.index.columns.len()
    }

    /// Returns `true` for a record of an index without columns.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.index.columns.is_empty()
    }

    /// Returns the value of `column`, or `None` if the index lacks it.
    #[inline]
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.index;
        index
            .column_position(column)
            .map(|position| index.cell(self.row, position))
    }

    /// Iterates over the values in column order.
    pub fn values(&self) -> impl Iterator<Item = &'a str> + 'a {
        let index = self.index;
        let width = index.columns.len();
        index.cells.row(self.row * width, width)
    }

    /// Iterates over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let index = self.index;
        index
            .columns
            .iter()
            .map(String::as_str)
            .zip(self.values())
    }

    #[inline]
    pub(crate) fn folded_values(&self) -> impl Iterator<Item = &'a str> + 'a {
        let index = self.index;
        let width = index.columns.len();
        index.folded.row(self.row * width, width)
    }
}

impl PartialEq for Record<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.index, other.index) && self.row == other.row
    }
}

impl Eq for Record<'_> {}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// One query hit: the index it came from and the matching record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult<'a> {
    /// Canonical name of the index holding the record.
    pub index: &'a str,
    /// The matching record.
    pub record: Record<'a>,
}

impl<'a> SearchResult<'a> {
    #[inline(always)]
    pub(crate) fn new(record: Record<'a>) -> Self {
        Self {
            index: record.index.name(),
            record,
        }
    }
}

/// Owner of all loaded indexes plus the query and pagination cursor.
///
/// Indexes iterate in insertion order. Replacing an index keeps its position.
/// Names are unique regardless of casing.
pub struct Store {
    pub(crate) indexes: Vec<Index>,
    /// Folded index name to position in `indexes`
    pub(crate) slots: FxHashMap<String, usize>,
    pub(crate) normalizer: IndexNameNormalizer,
    pub(crate) config: StoreConfig,
    pub(crate) query: String,
    pub(crate) page: usize,
    /// Bumped on every change to index content
    pub(crate) revision: u64,
    /// Total number of files ingested
    pub(crate) files_ingested: u64,
    /// Total number of ingestions that replaced an existing index
    pub(crate) indexes_replaced: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates a new, empty store with the default configuration.
    pub fn new() -> Self {
        Self {
            indexes: Vec::new(),
            slots: FxHashMap::default(),
            normalizer: IndexNameNormalizer::default(),
            config: StoreConfig::default(),
            query: String::new(),
            page: 1,
            revision: 0,
            files_ingested: 0,
            indexes_replaced: 0,
        }
    }

    /// Creates a new store with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`](casefile_types::ConfigError) reported by
    /// [`StoreConfig::validate`].
    pub fn with_config(config: StoreConfig) -> Result<Self, casefile_types::ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Replaces the file name normalizer used by later ingestions.
    pub fn with_normalizer(mut self, normalizer: IndexNameNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Returns the number of loaded indexes.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Returns `true` if no index is loaded.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Returns the active configuration.
    #[inline(always)]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the current query text, untrimmed.
    #[inline(always)]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the current 1-based page number, as last set.
    #[inline(always)]
    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Returns the fixed page size.
    #[inline(always)]
    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// Returns the content revision.
    ///
    /// Strictly increases whenever an index is added, replaced or removed, so
    /// `(query, revision)` identifies a result set.
    #[inline(always)]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns basic metrics about the store's operation.
    #[inline(always)]
    #[must_use]
    pub fn metrics(&self) -> StoreMetrics {
        StoreMetrics {
            files_ingested: self.files_ingested,
            indexes_replaced: self.indexes_replaced,
            current_index_count: self.indexes.len() as u64,
        }
    }
}

/// Basic operational metrics for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreMetrics {
    /// Total number of files ingested, including ones since removed or cleared.
    pub files_ingested: u64,
    /// Number of ingestions that replaced an index of the same name.
    pub indexes_replaced: u64,
    /// Current number of loaded indexes.
    pub current_index_count: u64,
}
