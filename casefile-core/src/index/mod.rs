//! In-memory index store and query engine.
//!
//! A [`Store`] owns every loaded [`Index`]. Each index is one ingested file:
//! its distinct column names plus row-major cell text in a bump arena, with a
//! case-folded twin arena that only matching reads.
//!
//! Memory Layout:
//! - Cell text lives in one contiguous buffer per index, addressed by spans
//! - Records are `(index, row)` views; results never copy cell text
//! - Indexes keep insertion order in a `Vec`, with a name map for lookups
//!
//! Threading:
//! - [`Store`] has a single writer. Every read (`search`, `page`, `fields`,
//!   `export`) takes `&self` and returns data borrowed from the store.

mod api;
mod builder;
pub mod page;
pub mod query;
pub mod search;
pub mod stats;
mod types;

pub use page::Page;
pub use query::{append_filter, filter_token, index_selector, Query};
pub use stats::{IndexSummary, StoreStats};
pub use types::{Index, Record, SearchResult, Store, StoreMetrics};
