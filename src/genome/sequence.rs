//! Genome — an immutable sequence of 32-bit words read as one long bit string
//!
//! Bit 0 is the most significant bit of word 0. Reads of 32 bits may start at
//! any bit offset and straddle two neighbouring words.

use crate::error::{GrnError, Result};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Width of one genome word in bits
pub const WORD_BITS: usize = 32;

/// A bit-string genome backed by 32-bit words
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Genome {
    words: Vec<u32>,
}

impl Genome {
    pub fn new(words: Vec<u32>) -> Self {
        Self { words }
    }

    /// Build a genome from signed words, reinterpreting each as its bit pattern
    pub fn from_signed(words: &[i32]) -> Self {
        Self::new(words.iter().map(|&w| w as u32).collect())
    }

    /// Generate `len` uniformly random words
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        Self::new((0..len).map(|_| rng.gen::<u32>()).collect())
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Number of 32-bit words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length of the logical bit string
    pub fn bit_len(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    /// Read the 32 bits starting at `bit_offset`.
    ///
    /// An unaligned offset combines the tail of one word with the head of the
    /// next. Fails with [`GrnError::MalformedGenome`] when any of the required
    /// words lies past the end of the genome.
    pub fn window(&self, bit_offset: usize) -> Result<u32> {
        let word = bit_offset / WORD_BITS;
        let shift = (bit_offset % WORD_BITS) as u32;
        let malformed = || GrnError::MalformedGenome {
            bit_offset,
            word_count: self.words.len(),
        };

        if shift == 0 {
            return self.words.get(word).copied().ok_or_else(malformed);
        }

        match (self.words.get(word), self.words.get(word + 1)) {
            (Some(&high), Some(&low)) => Ok((high << shift) | (low >> (WORD_BITS as u32 - shift))),
            _ => Err(malformed()),
        }
    }

    /// Single bit at `index`, `None` past the end
    pub fn bit(&self, index: usize) -> Option<bool> {
        let word = *self.words.get(index / WORD_BITS)?;
        let shift = (index % WORD_BITS) as u32;
        Some((word << shift) >> 31 == 1)
    }

    /// SHA256 over the big-endian words, hex encoded
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for word in &self.words {
            hasher.update(word.to_be_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

impl From<Vec<u32>> for Genome {
    fn from(words: Vec<u32>) -> Self {
        Self::new(words)
    }
}

impl From<&[u32]> for Genome {
    fn from(words: &[u32]) -> Self {
        Self::new(words.to_vec())
    }
}
