//! Case folding for substring matching.
//!
//! Cells, column names and queries are all folded with the same function so
//! that case-insensitive containment reduces to a byte-level substring test.
//! Unlike search-engine normalization, folding never touches whitespace or
//! punctuation: `"a  b"` must still only match queries containing two spaces.

#[rustfmt::skip]
const LOWERCASE_TABLE: [u8; 128] = [
    0x00,0x01,0x02,0x03,0x04,0x05,0x06,0x07,0x08,0x09,0x0a,0x0b,0x0c,0x0d,0x0e,0x0f,
    0x10,0x11,0x12,0x13,0x14,0x15,0x16,0x17,0x18,0x19,0x1a,0x1b,0x1c,0x1d,0x1e,0x1f,
    0x20,0x21,0x22,0x23,0x24,0x25,0x26,0x27,0x28,0x29,0x2a,0x2b,0x2c,0x2d,0x2e,0x2f,
    0x30,0x31,0x32,0x33,0x34,0x35,0x36,0x37,0x38,0x39,0x3a,0x3b,0x3c,0x3d,0x3e,0x3f,
    0x40,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x5b,0x5c,0x5d,0x5e,0x5f,
    0x60,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x7b,0x7c,0x7d,0x7e,0x7f,
];

/// Appends the lower-cased form of `input` to `out`.
///
/// ASCII runs go through a lookup table; other characters use Unicode
/// lower-casing, which may change their encoded length.
#[inline]
pub fn fold_into(input: &str, out: &mut String) {
    out.reserve(input.len());

    let mut rest = input;
    while !rest.is_empty() {
        let ascii_len = rest.bytes().take_while(|b| b.is_ascii()).count();
        if ascii_len > 0 {
            out.extend(
                rest.as_bytes()[..ascii_len]
                    .iter()
                    .map(|&b| LOWERCASE_TABLE[b as usize] as char),
            );
            rest = &rest[ascii_len..];
            continue;
        }

        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            // final sigma folds to the medial form, `Σ` lower-cases to `σ`
            out.extend(ch.to_lowercase().map(|c| if c == 'ς' { 'σ' } else { c }));
        }
        rest = chars.as_str();
    }
}

/// Returns the lower-cased form of `input`.
#[inline]
pub fn fold(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    fold_into(input, &mut out);
    out
}

/// Returns `true` if `a` and `b` are equal after folding.
pub fn eq_folded(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    fold(a) == fold(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_basic_lowercase() {
        assert_eq!(fold("HELLO"), "hello");
        assert_eq!(fold("HeLlO"), "hello");
        assert_eq!(fold("123 ABC!"), "123 abc!");
    }

    #[test]
    fn ascii_full_alphabet() {
        let upper: String = (b'A'..=b'Z').map(|b| b as char).collect();
        let lower: String = (b'a'..=b'z').map(|b| b as char).collect();
        assert_eq!(fold(&upper), lower);
    }

    #[test]
    fn whitespace_and_punctuation_untouched() {
        assert_eq!(fold("  A\t\tB  "), "  a\t\tb  ");
        assert_eq!(fold("C:\\Users\\Bob"), "c:\\users\\bob");
        assert_eq!(fold("name=\"Bob\""), "name=\"bob\"");
    }

    #[test]
    fn unicode_lowercase() {
        assert_eq!(fold("ÉCOLE"), "école");
        assert_eq!(fold("ΣΟΦΙΑ"), "σοφια");
        assert_eq!(fold("Straße"), "straße");
    }

    #[test]
    fn final_sigma_folds_to_medial() {
        assert_eq!(fold("ΟΔΟΣ"), "οδοσ");
        assert_eq!(fold("οδος"), "οδοσ");
        assert!(eq_folded("ΟΔΟΣ", "οδος"));
    }

    #[test]
    fn mixed_ascii_and_unicode_runs() {
        assert_eq!(fold("ABC Ünïcode DEF"), "abc ünïcode def");
    }

    #[test]
    fn fold_into_appends() {
        let mut out = String::from("x:");
        fold_into("YZ", &mut out);
        assert_eq!(out, "x:yz");
    }

    #[test]
    fn empty_input() {
        assert_eq!(fold(""), "");
    }

    #[test]
    fn folded_equality() {
        assert!(eq_folded("LocalUsers", "localusers"));
        assert!(eq_folded("DNSCache", "dnscache"));
        assert!(eq_folded("Ärger", "äRGER"));
        assert!(!eq_folded("Process", "processes"));
    }
}
