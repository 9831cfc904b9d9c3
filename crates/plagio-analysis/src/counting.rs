//! # Text Counting
//!
//! The three counts are pure functions of the decoded text and must agree
//! exactly between the analysis service and the offline CLI.
//!
//! - Paragraphs: segments between `"\r\n"` / `"\n"` break markers, empty
//!   segments discarded.
//! - Words: tokens between runs of space, tab, `\r` and `\n`. Other Unicode
//!   whitespace is part of a word.
//! - Characters: UTF-16 code units, untrimmed.
//!
//! Whitespace-only text has zero paragraphs and zero words.

use serde::{Deserialize, Serialize};

const WORD_SEPARATORS: [char; 4] = [' ', '\t', '\r', '\n'];
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// The three structural counts of one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextCounts {
    /// Non-empty line-break-delimited segments.
    pub paragraph_count: u64,
    /// Whitespace-delimited tokens.
    pub word_count: u64,
    /// UTF-16 code units.
    pub character_count: u64,
}

impl TextCounts {
    /// Count `text`.
    pub fn of(text: &str) -> Self {
        Self {
            paragraph_count: paragraph_count(text),
            word_count: word_count(text),
            character_count: character_count(text),
        }
    }
}

/// Number of paragraphs in `text`.
pub fn paragraph_count(text: &str) -> u64 {
    if text.trim().is_empty() {
        return 0;
    }
    // "\r\n" splits on '\n' and leaves a trailing '\r' on the segment; strip
    // it so "a\r\n\r\nb" sees an empty middle segment like "a\n\nb" does.
    text.split('\n')
        .map(|segment| segment.strip_suffix('\r').unwrap_or(segment))
        .filter(|segment| !segment.is_empty())
        .count() as u64
}

/// Number of words in `text`.
pub fn word_count(text: &str) -> u64 {
    if text.trim().is_empty() {
        return 0;
    }
    text.split(WORD_SEPARATORS)
        .filter(|token| !token.is_empty())
        .count() as u64
}

/// Number of UTF-16 code units in `text`.
pub fn character_count(text: &str) -> u64 {
    text.encode_utf16().count() as u64
}

/// Decode stored bytes as UTF-8, dropping a leading byte-order mark.
pub fn decode_text(bytes: &[u8]) -> Result<&str, std::str::Utf8Error> {
    let text = std::str::from_utf8(bytes)?;
    Ok(text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn counts(text: &str) -> (u64, u64, u64) {
        let c = TextCounts::of(text);
        (c.paragraph_count, c.word_count, c.character_count)
    }

    #[test]
    fn empty_text_is_all_zero() {
        assert_eq!(counts(""), (0, 0, 0));
    }

    #[test]
    fn single_line_two_words() {
        assert_eq!(counts("a b"), (1, 2, 3));
    }

    #[test]
    fn blank_line_separates_two_paragraphs() {
        assert_eq!(paragraph_count("line1\n\nline2"), 2);
        assert_eq!(paragraph_count("line1\r\n\r\nline2"), 2);
        assert_eq!(paragraph_count("line1\nline2\n"), 2);
    }

    #[test]
    fn whitespace_only_counts_only_characters() {
        assert_eq!(counts("   \n  "), (0, 0, 6));
        assert_eq!(counts("\t\r\n"), (0, 0, 3));
    }

    #[test]
    fn lines_of_spaces_still_count_as_paragraphs() {
        // Only empty segments are discarded, not blank-looking ones.
        assert_eq!(paragraph_count("a\n \nb"), 3);
    }

    #[test]
    fn word_separators_are_exactly_space_tab_cr_lf() {
        assert_eq!(word_count("one\ttwo\r\nthree  four"), 4);
        // No-break space joins words.
        assert_eq!(word_count("one\u{00A0}two"), 1);
    }

    #[test]
    fn characters_are_utf16_code_units() {
        assert_eq!(character_count("é"), 1);
        assert_eq!(character_count("😀"), 2);
        assert_eq!(character_count(" padded "), 8);
    }

    #[test]
    fn decode_drops_leading_bom_only() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFhi").unwrap(), "hi");
        assert_eq!(decode_text("hi\u{FEFF}".as_bytes()).unwrap(), "hi\u{FEFF}");
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        assert!(decode_text(&[0xff, 0xfe, 0x00]).is_err());
    }

    proptest! {
        #[test]
        fn character_count_matches_utf16_length(text in ".*") {
            prop_assert_eq!(character_count(&text), text.encode_utf16().count() as u64);
        }

        #[test]
        fn words_never_exceed_characters(text in "[a-z \t\r\n]{0,200}") {
            prop_assert!(word_count(&text) <= character_count(&text));
        }

        #[test]
        fn paragraphs_never_exceed_line_count(text in "[a-z \r\n]{0,200}") {
            let lines = text.split('\n').count() as u64;
            prop_assert!(paragraph_count(&text) <= lines);
        }

        #[test]
        fn joining_words_with_single_spaces_counts_them(words in proptest::collection::vec("[a-z]{1,8}", 1..20)) {
            let text = words.join(" ");
            prop_assert_eq!(word_count(&text), words.len() as u64);
            prop_assert_eq!(paragraph_count(&text), 1);
        }
    }
}
