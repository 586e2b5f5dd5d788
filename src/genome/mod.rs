//! Genome — bit-string storage, gene structure and the gene scanner
//!
//! A genome is scanned once; the genes it yields are the static topology of a
//! regulatory network.

mod sequence;
mod gene;
mod scanner;
pub mod loader;

pub use sequence::{Genome, WORD_BITS};
pub use gene::{Gene, GeneClass, CODING_WORDS, GENE_WORDS, P_PROMOTER, PROMOTER_MASK, TF_PROMOTER};
pub use scanner::{
    encode_genes, scan, BitScanner, ScanFault, ScanResult, FIRST_PROMOTER, GENE_BITS,
    STARTING_INDEX,
};
