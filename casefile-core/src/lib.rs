//! In-memory index and search engine for forensic artifact exports.
//!
//! Each ingested delimited-text file becomes a named index. Queries are
//! case-insensitive substring matches, optionally scoped to one index with
//! `index=<name>`. Results can be paged, profiled per field and exported
//! back to CSV.
//!
//! ```
//! use casefile_core::Store;
//!
//! let mut store = Store::new();
//! store.ingest("localusers.csv", "Name,Admin\nbob,true\nalice,false\nbob,true");
//!
//! store.set_query("index=LocalUsers bob");
//! let page = store.page();
//! assert_eq!(page.total_results, 2);
//! assert_eq!(page.results[0].record.get("Admin"), Some("true"));
//! ```

pub mod analyzer;
pub mod arena;
pub mod export;
pub mod index;

pub use casefile_types;

pub use analyzer::IndexNameNormalizer;
pub use export::{export_file_name, export_results, export_to_string};
pub use index::{Index, Page, Query, Record, SearchResult, Store, StoreMetrics, StoreStats};
