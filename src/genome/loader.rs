//! Genome sources — word-format text and binary-digit text
//!
//! The word format is a whitespace separated list of signed 32-bit integers,
//! eight per gene, as produced by [`format_words`]. The binary format packs
//! the characters `'0'` and `'1'` into words, most significant bit first.

use super::sequence::{Genome, WORD_BITS};
use crate::error::{GrnError, Result};
use std::path::Path;

/// Parse whitespace separated 32-bit integers
pub fn parse_words(text: &str) -> Result<Genome> {
    let words = text
        .split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token
                .parse::<i32>()
                .map(|w| w as u32)
                .or_else(|_| token.parse::<u32>())
                .map_err(|_| GrnError::InvalidWord {
                    token: token.to_string(),
                    position,
                })
        })
        .collect::<Result<Vec<u32>>>()?;
    Ok(Genome::new(words))
}

/// Pack `'0'`/`'1'` bytes into words; other bytes are skipped.
/// A trailing partial word is padded with zero bits.
pub fn parse_bits(bytes: &[u8]) -> Genome {
    let mut words = Vec::new();
    let mut current = 0u32;
    let mut filled = 0usize;

    for &byte in bytes {
        let bit = match byte {
            b'0' => 0,
            b'1' => 1,
            _ => continue,
        };
        current |= bit << (WORD_BITS - 1 - filled);
        filled += 1;
        if filled == WORD_BITS {
            words.push(current);
            current = 0;
            filled = 0;
        }
    }
    if filled > 0 {
        words.push(current);
    }
    Genome::new(words)
}

/// Render words in the word format, as signed decimals
pub fn format_words(words: &[u32]) -> String {
    words
        .iter()
        .map(|&w| (w as i32).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read a word-format genome file
pub fn load_words_file(path: impl AsRef<Path>) -> Result<Genome> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| GrnError::unreadable(path, e))?;
    parse_words(&text)
}

/// Read a binary-digit genome file
pub fn load_bits_file(path: impl AsRef<Path>) -> Result<Genome> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| GrnError::unreadable(path, e))?;
    Ok(parse_bits(&bytes))
}

/// Write `words` to `path` in the word format
pub fn save_words_file(path: impl AsRef<Path>, words: &[u32]) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, format_words(words) + "\n").map_err(|e| GrnError::unreadable(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signed_and_unsigned() {
        let genome = parse_words("0 -1 255\n  4294967295\t-2147483648").unwrap();
        assert_eq!(genome.words(), &[0, 0xFFFF_FFFF, 255, 0xFFFF_FFFF, 0x8000_0000]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        match parse_words("1 2 x3") {
            Err(GrnError::InvalidWord { token, position }) => {
                assert_eq!(token, "x3");
                assert_eq!(position, 2);
            }
            other => panic!("expected InvalidWord, got {:?}", other),
        }
        assert!(parse_words("4294967296").is_err());
    }

    #[test]
    fn test_parse_bits_msb_first() {
        let mut text = String::from("1");
        text.push_str(&"0".repeat(30));
        text.push_str("1\n");
        text.push_str("11");
        let genome = parse_bits(text.as_bytes());
        assert_eq!(genome.words(), &[0x8000_0001, 0xC000_0000]);
    }

    #[test]
    fn test_parse_bits_skips_other_bytes() {
        let genome = parse_bits(b"1 0 1 x 1");
        assert_eq!(genome.words(), &[0xB000_0000]);
        assert!(parse_bits(b"hello").is_empty());
    }

    #[test]
    fn test_format_round_trip() {
        let words = vec![0, 1, 0xFFFF_FFFF, 0x8000_0000, 0x7FFF_FFFF];
        let text = format_words(&words);
        assert_eq!(text, "0 1 -1 -2147483648 2147483647");
        assert_eq!(parse_words(&text).unwrap().words(), words.as_slice());
    }

    #[test]
    fn test_file_sources() {
        let dir = tempfile::tempdir().unwrap();
        let words_path = dir.path().join("net.genes");
        save_words_file(&words_path, &[7, 0xFFFF_FF00]).unwrap();
        assert_eq!(load_words_file(&words_path).unwrap().words(), &[7, 0xFFFF_FF00]);

        let bits_path = dir.path().join("net.bits");
        std::fs::write(&bits_path, "01".repeat(16)).unwrap();
        assert_eq!(load_bits_file(&bits_path).unwrap().words(), &[0x5555_5555]);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_words_file(dir.path().join("absent.genes")).unwrap_err();
        assert!(matches!(err, GrnError::SourceUnreadable { .. }));
    }
}
