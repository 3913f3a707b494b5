//! Pagination over query results.

use core::ops::Range;

use rustc_hash::FxHashSet;

use crate::index::types::{SearchResult, Store};

/// One page of the current result set, plus the totals needed to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    /// Results on this page, in result order.
    pub results: Vec<SearchResult<'a>>,
    /// The requested page, unclamped.
    pub page: usize,
    /// Results per page.
    pub page_size: usize,
    /// Results across all pages.
    pub total_results: usize,
    /// Number of pages; at least 1 even when there are no results.
    pub total_pages: usize,
    /// Number of distinct indexes represented across all pages.
    pub index_count: usize,
}

impl Page<'_> {
    /// Returns `true` if a page before this one exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns `true` if a page after this one exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Returns the number of pages needed for `total` results, never less than 1.
#[inline]
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Returns the result positions shown on 1-based `page`.
///
/// Page 0 and pages past the end are empty ranges.
#[inline]
pub fn page_bounds(page: usize, page_size: usize, total: usize) -> Range<usize> {
    let Some(first) = page.checked_sub(1) else {
        return 0..0;
    };
    let start = first.saturating_mul(page_size).min(total);
    let end = page.saturating_mul(page_size).min(total);
    start..end
}

/// Returns the column names present in `results`, in first-seen order.
///
/// When every result comes from one index this is that index's column list.
pub fn result_columns<'a>(results: &[SearchResult<'a>]) -> Vec<&'a str> {
    let mut columns = Vec::new();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut last_index = None;

    for result in results {
        let index = result.record.index();
        // consecutive results usually share an index
        if last_index.is_some_and(|last| core::ptr::eq(last, index)) {
            continue;
        }
        last_index = Some(index);
        for column in index.columns() {
            if seen.insert(column.as_str()) {
                columns.push(column.as_str());
            }
        }
    }
    columns
}

/// Returns the number of distinct indexes in `results`.
pub fn index_count(results: &[SearchResult<'_>]) -> usize {
    results
        .iter()
        .map(|r| r.index)
        .collect::<FxHashSet<_>>()
        .len()
}

impl Store {
    /// Evaluates the current query and returns the current page.
    pub fn page(&self) -> Page<'_> {
        self.page_at(self.page)
    }

    /// Evaluates the current query and returns page `page`.
    pub fn page_at(&self, page: usize) -> Page<'_> {
        let all = self.search();
        let page_size = self.config.page_size;
        let total_results = all.len();
        let bounds = page_bounds(page, page_size, total_results);

        Page {
            results: all[bounds].to_vec(),
            page,
            page_size,
            total_results,
            total_pages: total_pages(total_results, page_size),
            index_count: index_count(&all),
        }
    }
}
