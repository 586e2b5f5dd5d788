//! Gene expression — coding region to protein signature
//!
//! Each signature bit is the majority vote of the five coding words, where
//! codon `i` is rotated left by `i` bits first so that the vote depends on
//! codon order.

use super::protein::{Protein, ProteinRole};
use crate::genome::{Gene, CODING_WORDS};

/// Derive a protein signature from a coding region
pub fn express(codons: &[u32; CODING_WORDS]) -> u32 {
    let mut rotated = [0u32; CODING_WORDS];
    for (i, (dst, codon)) in rotated.iter_mut().zip(codons).enumerate() {
        *dst = codon.rotate_left(i as u32);
    }

    (0..32).fold(0u32, |signature, bit| {
        let mask = 1u32 << bit;
        let votes = rotated.iter().filter(|&&c| c & mask != 0).count();
        if votes * 2 > CODING_WORDS {
            signature | mask
        } else {
            signature
        }
    })
}

/// Express one protein per gene, in gene order, with zero concentration
pub fn express_genes(genes: &[Gene], role: ProteinRole) -> Vec<Protein> {
    genes
        .iter()
        .map(|g| Protein::new(express(&g.codons), 0.0, role))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_regions() {
        assert_eq!(express(&[0; 5]), 0);
        assert_eq!(express(&[u32::MAX; 5]), u32::MAX);
    }

    #[test]
    fn test_majority_vote() {
        const F: u32 = 0xFFFF_0000;
        assert_eq!(express(&[F, F, F, 0, 0]), 0xFFFC_0000);
    }

    #[test]
    fn test_codon_order_matters() {
        const F: u32 = 0xFFFF_0000;
        let forward = express(&[F, F, F, 0, 0]);
        let backward = express(&[0, 0, F, F, F]);
        assert_eq!(backward, 0xFFF0_0003);
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_express_genes_preserves_order() {
        let gene = |codons| Gene {
            enhancer: 0,
            inhibitor: 0,
            promoter: 0,
            codons,
            index: 0,
            offset: 0,
        };
        let genes = vec![gene([u32::MAX; 5]), gene([0; 5])];
        let proteins = express_genes(&genes, ProteinRole::Output);
        assert_eq!(proteins.len(), 2);
        assert_eq!(proteins[0].signature, u32::MAX);
        assert_eq!(proteins[1].signature, 0);
        assert!(proteins.iter().all(|p| p.role == ProteinRole::Output));
    }
}
