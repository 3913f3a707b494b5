//! Line Tokenizer Module
//!
//! Splits one line of delimited text into its fields. It's the first stage of
//! the ingestion pipeline: the parser hands it each retained line and reads
//! the fields back out of a reusable [`LineFields`] buffer.
//!
//! ## What It Does
//!
//! Given `bob , "Smith, Jr." ,"say ""hi"""`, it produces:
//!
//! ```text
//! 0: bob
//! 1: Smith, Jr.
//! 2: say "hi"
//! ```
//!
//! ## Scanner States
//!
//! The scanner has two states:
//!
//! - **Unquoted**: a comma ends the field, a quote switches to Quoted.
//! - **Quoted**: a comma is literal, `""` emits one literal quote, and a lone
//!   quote switches back to Unquoted.
//!
//! The quote characters themselves are never part of a field. When a field
//! ends its text is trimmed of surrounding whitespace. An unterminated quote
//! simply runs to the end of the line.
//!
//! ## Allocation
//!
//! Field text is copied into one shared buffer and addressed by spans, so a
//! line costs no allocations once the buffer has grown to fit. Lines without
//! any quote take a fast path that only looks for commas.

use memchr::{memchr, memchr_iter};
use smallvec::SmallVec;

const DELIMITER: u8 = b',';
const QUOTE: u8 = b'"';

/// Characters removed from both ends of a field.
///
/// Unicode whitespace plus the byte order mark, which some exporters leave in
/// front of the header row.
#[inline(always)]
pub(crate) fn is_trim_char(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Reusable storage for the fields of one line.
#[derive(Debug, Default, Clone)]
pub struct LineFields {
    buf: String,
    spans: SmallVec<[(usize, usize); 32]>,
}

impl LineFields {
    /// Creates an empty field buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of fields on the line.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if no line has been tokenized into this buffer.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns field `i`, or `None` past the end of the line.
    #[inline(always)]
    pub fn get(&self, i: usize) -> Option<&str> {
        self.spans.get(i).map(|&(start, end)| &self.buf[start..end])
    }

    /// Iterates over the fields left to right.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans.iter().map(|&(start, end)| &self.buf[start..end])
    }

    fn clear(&mut self) {
        self.buf.clear();
        self.spans.clear();
    }

    /// Records `buf[field_start..]` as a field, trimmed.
    fn finish_field(&mut self, field_start: usize) {
        let raw = &self.buf[field_start..];
        let leading = raw.len() - raw.trim_start_matches(is_trim_char).len();
        let trimmed = raw.trim_matches(is_trim_char).len();
        let start = field_start + leading;
        self.spans.push((start, start + trimmed));
    }
}

/// Tokenizes `line` into `out`, replacing its previous contents.
///
/// Every line yields at least one field; an empty line yields one empty field.
pub fn tokenize_line(line: &str, out: &mut LineFields) {
    out.clear();
    let bytes = line.as_bytes();

    if memchr(QUOTE, bytes).is_none() {
        let mut start = 0usize;
        for i in memchr_iter(DELIMITER, bytes) {
            let field_start = out.buf.len();
            out.buf.push_str(&line[start..i]);
            out.finish_field(field_start);
            start = i + 1;
        }
        let field_start = out.buf.len();
        out.buf.push_str(&line[start..]);
        out.finish_field(field_start);
        return;
    }

    // Only ASCII bytes are ever split on, so every `line[a..b]` below lies on
    // character boundaries.
    let mut in_quotes = false;
    let mut field_start = out.buf.len();
    let mut run_start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if in_quotes {
            if b == QUOTE {
                if bytes.get(i + 1) == Some(&QUOTE) {
                    // keep the first quote of the pair, skip the second
                    out.buf.push_str(&line[run_start..=i]);
                    i += 2;
                } else {
                    out.buf.push_str(&line[run_start..i]);
                    in_quotes = false;
                    i += 1;
                }
                run_start = i;
                continue;
            }
        } else if b == QUOTE {
            out.buf.push_str(&line[run_start..i]);
            in_quotes = true;
            i += 1;
            run_start = i;
            continue;
        } else if b == DELIMITER {
            out.buf.push_str(&line[run_start..i]);
            out.finish_field(field_start);
            field_start = out.buf.len();
            i += 1;
            run_start = i;
            continue;
        }
        i += 1;
    }

    out.buf.push_str(&line[run_start..]);
    out.finish_field(field_start);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(line: &str) -> Vec<String> {
        let mut fields = LineFields::new();
        tokenize_line(line, &mut fields);
        fields.iter().map(str::to_owned).collect()
    }

    #[test]
    fn plain_fields() {
        assert_eq!(collect("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn unquoted_fields_are_trimmed() {
        assert_eq!(collect("  a ,\tb\t, c  "), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_fields_are_kept() {
        assert_eq!(collect("a,,c,"), vec!["a", "", "c", ""]);
        assert_eq!(collect(""), vec![""]);
        assert_eq!(collect(","), vec!["", ""]);
    }

    #[test]
    fn quoted_comma_is_literal() {
        assert_eq!(collect("\"Smith, Jr.\",42"), vec!["Smith, Jr.", "42"]);
    }

    #[test]
    fn doubled_quote_unescapes() {
        assert_eq!(collect("\"say \"\"hi\"\"\",x"), vec!["say \"hi\"", "x"]);
        assert_eq!(collect("\"\"\"\""), vec!["\""]);
    }

    #[test]
    fn empty_quoted_field() {
        assert_eq!(collect("\"\",b"), vec!["", "b"]);
    }

    #[test]
    fn quote_inside_unquoted_text_opens_quoting() {
        assert_eq!(collect("ab\"c,d\"e,f"), vec!["abc,de", "f"]);
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        assert_eq!(collect("a,\"b,c"), vec!["a", "b,c"]);
    }

    #[test]
    fn quoted_text_is_trimmed_too() {
        assert_eq!(collect(" \" padded \" ,x"), vec!["padded", "x"]);
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        assert_eq!(collect("\u{feff}Name,Admin"), vec!["Name", "Admin"]);
    }

    #[test]
    fn unicode_content_survives() {
        assert_eq!(
            collect("Zoë,\"Ünïcode, ok\",日本"),
            vec!["Zoë", "Ünïcode, ok", "日本"]
        );
    }

    #[test]
    fn buffer_is_reusable() {
        let mut fields = LineFields::new();
        tokenize_line("one,two,three", &mut fields);
        assert_eq!(fields.len(), 3);

        tokenize_line("\"x,y\"", &mut fields);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get(0), Some("x,y"));
        assert_eq!(fields.get(1), None);
    }

    #[test]
    fn windows_paths_unaffected() {
        assert_eq!(
            collect("C:\\Windows\\System32\\svchost.exe,-k netsvcs"),
            vec!["C:\\Windows\\System32\\svchost.exe", "-k netsvcs"]
        );
    }
}
