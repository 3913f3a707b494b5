//! Core types for the Casefile artifact search engine.
//!
//! This crate holds the types shared between the engine and whatever host
//! renders its output. Keeping them separate ensures:
//!
//! - **Borrowed views**: field profiles point into engine storage, nothing is copied
//! - **Cross-crate compatibility**: the engine and its hosts share the same types
//! - **Clean boundaries**: no engine logic lives here

#![warn(missing_docs)]

use core::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Maximum number of entries in a field's top-value profile.
pub const MAX_TOP_VALUES: usize = 10;

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Name of the synthetic export column holding each result's index name.
pub const INDEX_COLUMN: &str = "_index";

/// One distinct value of a column and how many records carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldValue<'a> {
    /// The cell text. Never empty.
    pub value: &'a str,
    /// Number of records holding exactly this value.
    pub count: usize,
}

impl<'a> FieldValue<'a> {
    /// Creates a new field value entry.
    #[inline(always)]
    pub const fn new(value: &'a str, count: usize) -> Self {
        Self { value, count }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.count)
    }
}

/// Inline storage for a top-value profile; never spills for the default limit.
pub type TopValues<'a> = SmallVec<[FieldValue<'a>; MAX_TOP_VALUES]>;

/// Frequency profile of one column.
///
/// `top_values` is ordered by descending count. Equal counts keep the order
/// in which the values were first seen while scanning records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo<'a> {
    /// Column name.
    pub name: &'a str,
    /// Most frequent non-empty values, at most [`MAX_TOP_VALUES`].
    pub top_values: TopValues<'a>,
}

impl FieldInfo<'_> {
    /// Total number of records represented by the listed values.
    pub fn listed_count(&self) -> usize {
        self.top_values.iter().map(|v| v.count).sum()
    }
}

/// Errors raised when a [`StoreConfig`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A page must hold at least one result.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// Field profiles must list at least one value.
    #[error("top value limit must be at least 1")]
    ZeroTopValues,
    /// Field profiles are capped at [`MAX_TOP_VALUES`] entries.
    #[error("top value limit {requested} exceeds maximum of {max}")]
    TooManyTopValues {
        /// The configured limit.
        requested: usize,
        /// The hard maximum.
        max: usize,
    },
}

/// Errors raised while writing an export document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The sink rejected a write.
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Store configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of results per page.
    /// Default: 100
    pub page_size: usize,
    /// Number of values listed per field profile.
    /// Default: 10 (also the maximum)
    pub top_values: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            top_values: MAX_TOP_VALUES,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration with a custom page size and default profiles.
    pub const fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            top_values: MAX_TOP_VALUES,
        }
    }

    /// Creates a configuration for narrow sidebars: short profiles, small pages.
    pub const fn compact() -> Self {
        Self {
            page_size: 25,
            top_values: 5,
        }
    }

    /// Checks that every limit is usable.
    ///
    /// # Errors
    ///
    /// Returns the first limit that is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.top_values == 0 {
            return Err(ConfigError::ZeroTopValues);
        }
        if self.top_values > MAX_TOP_VALUES {
            return Err(ConfigError::TooManyTopValues {
                requested: self.top_values,
                max: MAX_TOP_VALUES,
            });
        }
        Ok(())
    }
}

/// RFC4180 quoting for exported cells.
///
/// A cell is wrapped in double quotes, with embedded quotes doubled, only
/// when it contains a comma, a double quote or a line feed. Everything else
/// is written verbatim.
pub mod quoting {
    use std::borrow::Cow;

    /// Returns `true` if `value` must be quoted to survive a round trip.
    #[inline]
    pub fn needs_quoting(value: &str) -> bool {
        value.bytes().any(|b| matches!(b, b',' | b'"' | b'\n'))
    }

    /// Appends `value` to `out`, quoting it when required.
    ///
    /// # Example
    /// ```
    /// use casefile_types::quoting::quote_into;
    ///
    /// let mut out = String::new();
    /// quote_into("say \"hi\", bob", &mut out);
    /// assert_eq!(out, "\"say \"\"hi\"\", bob\"");
    /// ```
    pub fn quote_into(value: &str, out: &mut String) {
        if !needs_quoting(value) {
            out.push_str(value);
            return;
        }

        out.reserve(value.len() + 2);
        out.push('"');
        for ch in value.chars() {
            if ch == '"' {
                out.push('"');
            }
            out.push(ch);
        }
        out.push('"');
    }

    /// Returns `value` quoted when required, borrowing it otherwise.
    ///
    /// # Example
    /// ```
    /// use casefile_types::quoting::quote;
    ///
    /// assert_eq!(quote("plain"), "plain");
    /// assert_eq!(quote("a,b"), "\"a,b\"");
    /// ```
    pub fn quote(value: &str) -> Cow<'_, str> {
        if needs_quoting(value) {
            let mut out = String::with_capacity(value.len() + 2);
            quote_into(value, &mut out);
            Cow::Owned(out)
        } else {
            Cow::Borrowed(value)
        }
    }
}
