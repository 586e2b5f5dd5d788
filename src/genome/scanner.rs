//! BitScanner — locates non-overlapping genes at single-bit granularity
//!
//! The scanner walks the genome one bit at a time looking for a 32-bit window
//! whose low byte is a promoter tag. A hit yields a full gene (two regulatory
//! sites upstream, five coding words downstream) and the walk resumes one gene
//! width past the promoter, so genes found in one pass never overlap.

use super::gene::{Gene, GeneClass, CODING_WORDS, GENE_WORDS};
use super::sequence::{Genome, WORD_BITS};
use crate::error::GrnError;
use log::{debug, warn};

/// Width of one gene in bits
pub const GENE_BITS: usize = GENE_WORDS * WORD_BITS;

/// Bits between the enhancer start and the promoter start
pub const UPSTREAM_BITS: usize = 2 * WORD_BITS;

/// Bits from the promoter start to the end of the coding region
pub const DOWNSTREAM_BITS: usize = (1 + CODING_WORDS) * WORD_BITS;

/// Virtual offset the search is anchored at, before the genome start
pub const STARTING_INDEX: isize = -(((GENE_WORDS - 2) * WORD_BITS) as isize);

/// First promoter candidate: one gene width past the virtual start
pub const FIRST_PROMOTER: usize = (STARTING_INDEX + GENE_BITS as isize) as usize;

/// A candidate promoter whose gene could not be read
#[derive(Debug)]
pub struct ScanFault {
    pub promoter_offset: usize,
    pub error: GrnError,
}

/// Genes found by one scan, in genome order per class
#[derive(Debug, Default)]
pub struct ScanResult {
    pub tf_genes: Vec<Gene>,
    pub p_genes: Vec<Gene>,
    pub faults: Vec<ScanFault>,
}

impl ScanResult {
    pub fn gene_count(&self) -> usize {
        self.tf_genes.len() + self.p_genes.len()
    }

    /// Flatten all TF genes then all P genes into their 8-word forms
    pub fn encoding(&self) -> Vec<u32> {
        encode_genes(&self.tf_genes, &self.p_genes)
    }
}

/// Concatenate the canonical words of `tf_genes` followed by `p_genes`
pub fn encode_genes(tf_genes: &[Gene], p_genes: &[Gene]) -> Vec<u32> {
    tf_genes
        .iter()
        .chain(p_genes)
        .flat_map(|g| g.to_words())
        .collect()
}

/// Scans one genome for genes
#[derive(Debug)]
pub struct BitScanner<'a> {
    genome: &'a Genome,
}

impl<'a> BitScanner<'a> {
    pub fn new(genome: &'a Genome) -> Self {
        Self { genome }
    }

    /// Walk the whole genome and collect every gene.
    ///
    /// A genome too short to hold one gene yields empty lists. A candidate
    /// whose fields cannot be read is recorded as a fault and skipped, genes
    /// already collected are kept.
    pub fn scan(&self) -> ScanResult {
        let mut result = ScanResult::default();

        let Some(last_promoter) = self.genome.bit_len().checked_sub(DOWNSTREAM_BITS) else {
            debug!("Genome of {} words too short for a gene", self.genome.len());
            return result;
        };

        let mut offset = FIRST_PROMOTER;
        while offset <= last_promoter {
            let class = match self.promoter_at(offset) {
                Ok(class) => class,
                Err(error) => {
                    self.record_fault(&mut result, offset, error);
                    offset += 1;
                    continue;
                }
            };

            let Some(class) = class else {
                offset += 1;
                continue;
            };

            match self.gene_at(offset) {
                Ok(gene) => {
                    match class {
                        GeneClass::Tf => result.tf_genes.push(gene),
                        GeneClass::P => result.p_genes.push(gene),
                    }
                    offset += GENE_BITS;
                }
                Err(error) => {
                    self.record_fault(&mut result, offset, error);
                    offset += 1;
                }
            }
        }

        result.tf_genes.shrink_to_fit();
        result.p_genes.shrink_to_fit();

        debug!(
            "Scanned {} bits: {} TF genes, {} P genes, {} faults",
            self.genome.bit_len(),
            result.tf_genes.len(),
            result.p_genes.len(),
            result.faults.len()
        );
        result
    }

    /// Class of the promoter starting at `offset`, if any
    pub fn promoter_at(&self, offset: usize) -> crate::Result<Option<GeneClass>> {
        Ok(GeneClass::from_promoter(self.genome.window(offset)?))
    }

    /// Extract the gene whose promoter starts at `promoter`
    pub fn gene_at(&self, promoter: usize) -> crate::Result<Gene> {
        let offset = promoter
            .checked_sub(UPSTREAM_BITS)
            .ok_or(GrnError::MalformedGenome {
                bit_offset: promoter,
                word_count: self.genome.len(),
            })?;

        let mut codons = [0u32; CODING_WORDS];
        for (i, codon) in codons.iter_mut().enumerate() {
            *codon = self.genome.window(promoter + (i + 1) * WORD_BITS)?;
        }

        Ok(Gene {
            enhancer: self.genome.window(offset)?,
            inhibitor: self.genome.window(offset + WORD_BITS)?,
            promoter: self.genome.window(promoter)?,
            codons,
            index: 0,
            offset,
        })
    }

    fn record_fault(&self, result: &mut ScanResult, promoter_offset: usize, error: GrnError) {
        warn!("Skipping candidate promoter at bit {}: {}", promoter_offset, error);
        result.faults.push(ScanFault { promoter_offset, error });
    }
}

/// Scan `genome` with a fresh [`BitScanner`]
pub fn scan(genome: &Genome) -> ScanResult {
    BitScanner::new(genome).scan()
}
