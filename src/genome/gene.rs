//! Gene — the 8-word structure located by the scanner
//!
//! Layout in genome order: enhancer, inhibitor, promoter, then five coding words.

/// Promoter tag for transcription-factor genes
pub const TF_PROMOTER: u32 = 0x0000_0000;

/// Promoter tag for product/output genes
pub const P_PROMOTER: u32 = 0x0000_00FF;

/// Only the low byte of a promoter word carries the class tag
pub const PROMOTER_MASK: u32 = 0x0000_00FF;

/// Number of 32-bit words in the coding region
pub const CODING_WORDS: usize = 5;

/// Size of one gene in 32-bit words
pub const GENE_WORDS: usize = 3 + CODING_WORDS;

/// Gene class, decided by the promoter's low byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneClass {
    /// Transcription factor: its protein regulates other genes
    Tf,
    /// Product: its protein is a network output
    P,
}

impl GeneClass {
    /// Classify a promoter word, TF tag tested first
    pub fn from_promoter(promoter: u32) -> Option<Self> {
        match promoter & PROMOTER_MASK {
            TF_PROMOTER => Some(GeneClass::Tf),
            P_PROMOTER => Some(GeneClass::P),
            _ => None,
        }
    }
}

/// A gene extracted from a genome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gene {
    /// Enhancer regulatory site, 64 bits before the promoter
    pub enhancer: u32,
    /// Inhibitor regulatory site, 32 bits before the promoter
    pub inhibitor: u32,
    pub promoter: u32,
    /// Protein coding region following the promoter
    pub codons: [u32; CODING_WORDS],
    /// Row of this gene in the matching table, assigned on table rebuild
    pub index: usize,
    /// Bit offset of the enhancer in the source genome
    pub offset: usize,
}

impl Gene {
    pub fn class(&self) -> Option<GeneClass> {
        GeneClass::from_promoter(self.promoter)
    }

    /// Canonical serialized form: enhancer, inhibitor, promoter, codons
    pub fn to_words(&self) -> [u32; GENE_WORDS] {
        let mut words = [0u32; GENE_WORDS];
        words[0] = self.enhancer;
        words[1] = self.inhibitor;
        words[2] = self.promoter;
        words[3..].copy_from_slice(&self.codons);
        words
    }

    /// Same structure, ignoring where it was found and its table row
    pub fn same_structure(&self, other: &Gene) -> bool {
        self.to_words() == other.to_words()
    }
}
