//! Query evaluation.

use log::trace;
use memchr::memmem::Finder;

use crate::analyzer::fold::{eq_folded, fold};
use crate::index::query::Query;
use crate::index::types::{Index, Record, SearchResult, Store};

/// Case-insensitive substring matcher over pre-folded index text.
struct Matcher<'n> {
    finder: Finder<'n>,
}

impl<'n> Matcher<'n> {
    fn new(folded_needle: &'n str) -> Self {
        Self {
            finder: Finder::new(folded_needle.as_bytes()),
        }
    }

    #[inline(always)]
    fn contains(&self, folded: &str) -> bool {
        self.finder.find(folded.as_bytes()).is_some()
    }

    /// Some column name contains the needle; then every record matches.
    #[inline]
    fn matches_columns(&self, index: &Index) -> bool {
        index.folded_columns.iter().any(|column| self.contains(column))
    }

    #[inline]
    fn matches_record(&self, record: &Record<'_>) -> bool {
        record.folded_values().any(|value| self.contains(value))
    }

    /// Appends the records of `index` that contain the needle in a value or
    /// a column name, preserving record order.
    fn collect<'a>(&self, index: &'a Index, out: &mut Vec<SearchResult<'a>>) {
        if self.matches_columns(index) {
            out.extend(index.records().map(SearchResult::new));
            return;
        }
        out.extend(
            index
                .records()
                .filter(|record| self.matches_record(record))
                .map(SearchResult::new),
        );
    }
}

/// Evaluates `query` against `indexes`, in index order then record order.
///
/// Pure: nothing is cached and nothing about `indexes` changes.
pub fn evaluate<'a>(indexes: &'a [Index], query: &str) -> Vec<SearchResult<'a>> {
    let query = Query::parse(query);
    trace!("event=query_eval query={:?}", query);

    let mut results = Vec::new();
    match query {
        Query::All => {
            for index in indexes {
                results.extend(index.records().map(SearchResult::new));
            }
        }
        Query::Scoped { index: name, filter } => {
            let selected = indexes.iter().filter(|index| eq_folded(index.name(), name));
            match filter {
                None => {
                    for index in selected {
                        results.extend(index.records().map(SearchResult::new));
                    }
                }
                Some(filter) => {
                    let needle = fold(filter);
                    let matcher = Matcher::new(&needle);
                    for index in selected {
                        matcher.collect(index, &mut results);
                    }
                }
            }
        }
        Query::FreeText(text) => {
            let needle = fold(text);
            let matcher = Matcher::new(&needle);
            for index in indexes {
                matcher.collect(index, &mut results);
            }
        }
    }
    results
}

impl Store {
    /// Evaluates the current query.
    #[inline(never)]
    pub fn search(&self) -> Vec<SearchResult<'_>> {
        evaluate(&self.indexes, &self.query)
    }

    /// Evaluates `query` without touching the stored query.
    pub fn search_for(&self, query: &str) -> Vec<SearchResult<'_>> {
        evaluate(&self.indexes, query)
    }
}
