//! Query classification.
//!
//! A query is exactly one of three shapes, decided once before evaluation:
//!
//! ```text
//! query        := "" | index-filter | free-text
//! index-filter := "index=" TOKEN [ WS remainder ]
//! free-text    := any non-empty string, no special syntax
//! ```
//!
//! There is no boolean composition and no escaping. Text that looks like a
//! fielded filter (`Name="bob"`) is plain free text. Anything that fails to
//! classify as an index filter degrades to free text instead of erroring.

use core::fmt;

use crate::analyzer::tokenizer::is_trim_char;

const INDEX_PREFIX: &str = "index=";

/// A classified query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query<'q> {
    /// Empty query; matches every record.
    All,
    /// `index=<index> [filter]`; scoped to indexes named `index` (any casing).
    Scoped {
        /// The requested index name, as typed.
        index: &'q str,
        /// Substring every returned record must contain, if any.
        filter: Option<&'q str>,
    },
    /// Substring matched against every index.
    FreeText(&'q str),
}

impl<'q> Query<'q> {
    /// Classifies `raw`. Surrounding whitespace is ignored.
    pub fn parse(raw: &'q str) -> Self {
        let query = raw.trim_matches(is_trim_char);
        if query.is_empty() {
            return Query::All;
        }
        parse_scoped(query).unwrap_or(Query::FreeText(query))
    }

    /// Returns `true` for the empty query.
    #[inline]
    pub fn is_all(&self) -> bool {
        matches!(self, Query::All)
    }
}

fn parse_scoped(query: &str) -> Option<Query<'_>> {
    let prefix = query.get(..INDEX_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(INDEX_PREFIX) {
        return None;
    }

    let rest = &query[INDEX_PREFIX.len()..];
    let token_len = rest.find(is_trim_char).unwrap_or(rest.len());
    if token_len == 0 {
        return None;
    }

    let (index, remainder) = rest.split_at(token_len);
    let remainder = remainder.trim_matches(is_trim_char);
    // the remainder is a single line of text
    if remainder.contains(is_line_break) {
        return None;
    }

    Some(Query::Scoped {
        index,
        filter: (!remainder.is_empty()).then_some(remainder),
    })
}

#[inline(always)]
fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

impl fmt::Display for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::All => Ok(()),
            Query::Scoped {
                index,
                filter: None,
            } => write!(f, "{INDEX_PREFIX}{index}"),
            Query::Scoped {
                index,
                filter: Some(filter),
            } => write!(f, "{INDEX_PREFIX}{index} {filter}"),
            Query::FreeText(text) => f.write_str(text),
        }
    }
}

/// Builds the query that selects one whole index: `index=<lower-cased name>`.
pub fn index_selector(name: &str) -> String {
    format!("{INDEX_PREFIX}{}", name.to_lowercase())
}

/// Builds a `field="value"` token.
///
/// These tokens are matched as literal substrings like any other text; no
/// stored value contains the surrounding quotes unless the data does.
pub fn filter_token(field: &str, value: &str) -> String {
    format!("{field}=\"{value}\"")
}

/// Appends a `field="value"` token to `query`, separated by one space.
pub fn append_filter(query: &str, field: &str, value: &str) -> String {
    let token = filter_token(field, value);
    if query.is_empty() {
        token
    } else {
        format!("{query} {token}")
    }
}
