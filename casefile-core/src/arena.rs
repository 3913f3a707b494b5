//! Bump Allocator for Cell Storage
//!
//! Eliminates per-cell allocations by storing all cell text of an index in a
//! single contiguous buffer. Cells are referenced by (offset, length) pairs.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena Buffer: [cell0][cell1][cell2][cell3]...[free space]
//!               ^      ^      ^      ^
//!               |      |      |      |
//! Spans:       (0,5)  (5,7)  (12,0) (12,8) ...
//! ```
//!
//! A record of an index with `w` columns owns the `w` consecutive spans
//! starting at `row * w`, so a record is addressed by its row number alone.
//!
//! ## Performance
//!
//! - Allocation: O(1) - just bump pointer
//! - Retrieval: O(1) - slice from buffer
//! - Cache efficiency: cells stored row-major (good for record scans)

/// Cell reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
    offset: usize,
    len: usize,
}

impl CellSpan {
    /// Creates a new cell span.
    #[inline(always)]
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Returns the byte offset in the arena.
    #[inline(always)]
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// Returns the byte length.
    #[inline(always)]
    pub const fn len(self) -> usize {
        self.len
    }

    /// Returns `true` for an empty cell.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Bump allocator for cell text.
#[derive(Debug, Default)]
pub struct CellArena {
    /// Contiguous storage buffer
    buffer: String,
    /// Cell spans (offset, length pairs)
    spans: Vec<CellSpan>,
}

impl CellArena {
    /// Creates a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new arena with pre-allocated capacity.
    pub fn with_capacity(buffer_cap: usize, cell_cap: usize) -> Self {
        Self {
            buffer: String::with_capacity(buffer_cap),
            spans: Vec::with_capacity(cell_cap),
        }
    }

    /// Returns the number of cells stored.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns true if no cells are stored.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns the number of text bytes held.
    #[inline(always)]
    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    /// Appends a cell and returns its id.
    #[inline]
    pub fn push(&mut self, text: &str) -> usize {
        let id = self.spans.len();
        let offset = self.buffer.len();
        self.buffer.push_str(text);
        self.spans.push(CellSpan::new(offset, text.len()));
        id
    }

    /// Appends a cell whose text is produced by `write` directly into the buffer.
    ///
    /// Used to store a transformed copy of a cell (e.g. case-folded) without
    /// an intermediate allocation.
    #[inline]
    pub fn push_with(&mut self, write: impl FnOnce(&mut String)) -> usize {
        let id = self.spans.len();
        let offset = self.buffer.len();
        write(&mut self.buffer);
        self.spans.push(CellSpan::new(offset, self.buffer.len() - offset));
        id
    }

    /// Gets a cell by id.
    #[inline(always)]
    pub fn get(&self, id: usize) -> Option<&str> {
        let span = self.spans.get(id)?;
        self.buffer.get(span.offset()..span.offset() + span.len())
    }

    /// Returns the cells `start..start + count` as string slices.
    #[inline]
    pub fn row(&self, start: usize, count: usize) -> impl Iterator<Item = &str> + '_ {
        let end = (start + count).min(self.spans.len());
        let start = start.min(end);
        self.spans[start..end]
            .iter()
            .map(move |span| &self.buffer[span.offset()..span.offset() + span.len()])
    }
}
