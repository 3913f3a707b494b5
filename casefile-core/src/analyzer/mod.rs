//! Text analysis pipeline.
//!
//! This module provides the ingestion-side text processing components:
//! - **Tokenizer**: Splits one delimited line into fields
//! - **Parser**: Turns a whole file into a header and row-major cells
//! - **Normalizer**: Maps file names to canonical index identifiers
//! - **Fold**: Lower-cases text for case-insensitive matching

pub mod fold;
pub mod normalizer;
pub mod parser;
pub mod tokenizer;

pub use normalizer::{IndexNameNormalizer, KNOWN_INDEXES};
pub use parser::{parse_table, Table};
pub use tokenizer::{tokenize_line, LineFields};
