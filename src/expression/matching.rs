//! MatchingTable — precomputed protein × gene × site affinities
//!
//! Affinity between a protein and a regulatory site is the number of
//! complementary bits between the protein signature and the site value. The
//! table stores every (site, gene, protein) count together with `umax`, the
//! largest count in the network, and a transfer table mapping each count to
//! `exp(beta * (count - umax))`.
//!
//! The table is rebuilt whenever the set of sensing proteins changes and is
//! read-only while the network iterates.

use super::protein::Protein;
use crate::genome::Gene;
use log::debug;

/// Regulatory site of a gene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Enhancer,
    Inhibitor,
}

impl Site {
    fn slot(self) -> usize {
        match self {
            Site::Enhancer => 0,
            Site::Inhibitor => 1,
        }
    }

    fn value(self, gene: &Gene) -> u32 {
        match self {
            Site::Enhancer => gene.enhancer,
            Site::Inhibitor => gene.inhibitor,
        }
    }
}

/// Number of positions where `a` holds the complement of `b`'s bit
pub fn complement_count(a: u32, b: u32) -> u32 {
    (a ^ b).count_ones()
}

/// Best match of any protein against either site of `gene`, 0 with no proteins
pub fn calculate_umax(gene: &Gene, proteins: &[Protein]) -> u32 {
    proteins
        .iter()
        .flat_map(|p| {
            [
                complement_count(p.signature, gene.enhancer),
                complement_count(p.signature, gene.inhibitor),
            ]
        })
        .max()
        .unwrap_or(0)
}

#[derive(Debug, Clone)]
pub struct MatchingTable {
    /// Flattened `[site][gene][protein]` counts
    cbits: Vec<u8>,
    genes: usize,
    proteins: usize,
    umax: u32,
    exp: Vec<f64>,
}

impl Default for MatchingTable {
    fn default() -> Self {
        Self {
            cbits: Vec::new(),
            genes: 0,
            proteins: 0,
            umax: 0,
            exp: vec![1.0],
        }
    }
}

impl MatchingTable {
    /// Build the table for `genes` (row order = iteration order) sensed by `sensors`
    pub fn build<'g>(genes: impl IntoIterator<Item = &'g Gene>, sensors: &[Protein], beta: f64) -> Self {
        let genes: Vec<&Gene> = genes.into_iter().collect();
        let n_genes = genes.len();
        let n_proteins = sensors.len();

        let mut cbits = vec![0u8; 2 * n_genes * n_proteins];
        for site in [Site::Enhancer, Site::Inhibitor] {
            for (g, gene) in genes.iter().enumerate() {
                let row = (site.slot() * n_genes + g) * n_proteins;
                for (p, protein) in sensors.iter().enumerate() {
                    cbits[row + p] = complement_count(protein.signature, site.value(gene)) as u8;
                }
            }
        }

        let umax = genes
            .iter()
            .map(|g| calculate_umax(g, sensors))
            .max()
            .unwrap_or(0);

        let exp = (0..=umax)
            .map(|s| (beta * (s as f64 - umax as f64)).exp())
            .collect();

        debug!(
            "Built matching table: {} genes x {} proteins, umax={}",
            n_genes, n_proteins, umax
        );

        Self {
            cbits,
            genes: n_genes,
            proteins: n_proteins,
            umax,
            exp,
        }
    }

    pub fn genes(&self) -> usize {
        self.genes
    }

    pub fn proteins(&self) -> usize {
        self.proteins
    }

    pub fn umax(&self) -> u32 {
        self.umax
    }

    /// Transfer table indexed by match count, `0..=umax`
    pub fn exp(&self) -> &[f64] {
        &self.exp
    }

    /// Complementary bit count for one cell
    pub fn cbits(&self, site: Site, gene: usize, protein: usize) -> u32 {
        self.cbits[(site.slot() * self.genes + gene) * self.proteins + protein] as u32
    }

    /// Signed regulatory weight of `protein` on `gene`: enhancing minus inhibiting
    pub fn signal(&self, gene: usize, protein: usize) -> f64 {
        self.exp[self.cbits(Site::Enhancer, gene, protein) as usize]
            - self.exp[self.cbits(Site::Inhibitor, gene, protein) as usize]
    }

    /// Production delta for `gene`, weighting each sensor by its concentration.
    ///
    /// `sensors` must be the protein set the table was built with, in the same
    /// order. The result is a change to add to the gene's own protein.
    pub fn produce(&self, gene: &Gene, sensors: &[Protein], rate: f64) -> f64 {
        debug_assert!(gene.index < self.genes || sensors.is_empty());
        debug_assert_eq!(sensors.len(), self.proteins);

        let sum: f64 = sensors
            .iter()
            .enumerate()
            .map(|(p, protein)| protein.concentration * self.signal(gene.index, p))
            .sum();
        rate * sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::ProteinRole;

    fn gene(enhancer: u32, inhibitor: u32, index: usize) -> Gene {
        Gene {
            enhancer,
            inhibitor,
            promoter: 0,
            codons: [0; 5],
            index,
            offset: 0,
        }
    }

    fn sensor(signature: u32, concentration: f64) -> Protein {
        Protein::new(signature, concentration, ProteinRole::Regulatory)
    }

    #[test]
    fn test_complement_count() {
        assert_eq!(complement_count(0, 0), 0);
        assert_eq!(complement_count(0, u32::MAX), 32);
        assert_eq!(complement_count(0xF0F0_F0F0, 0x0F0F_0F0F), 32);
        assert_eq!(complement_count(0b1010, 0b0110), 2);
    }

    #[test]
    fn test_calculate_umax() {
        let g = gene(0x0000_00FF, 0xFFFF_FFFF, 0);
        let proteins = vec![sensor(0, 0.5), sensor(0x0000_FFFF, 0.5)];
        // 0 vs inhibitor gives 32
        assert_eq!(calculate_umax(&g, &proteins), 32);
        assert_eq!(calculate_umax(&g, &[]), 0);
    }

    #[test]
    fn test_build_fills_every_cell() {
        let genes = vec![gene(0, u32::MAX, 0), gene(0x0000_FFFF, 0xFF00_0000, 1)];
        let sensors = vec![sensor(0, 0.3), sensor(0x0F0F_0F0F, 0.3), sensor(u32::MAX, 0.4)];
        let table = MatchingTable::build(&genes, &sensors, 1.0);

        assert_eq!(table.genes(), 2);
        assert_eq!(table.proteins(), 3);
        for (g, gene) in genes.iter().enumerate() {
            for (p, protein) in sensors.iter().enumerate() {
                assert_eq!(
                    table.cbits(Site::Enhancer, g, p),
                    complement_count(protein.signature, gene.enhancer)
                );
                assert_eq!(
                    table.cbits(Site::Inhibitor, g, p),
                    complement_count(protein.signature, gene.inhibitor)
                );
            }
        }
        assert_eq!(table.umax(), 32);
    }

    #[test]
    fn test_transfer_table_monotone() {
        let genes = vec![gene(0x0000_0FFF, 0x00FF_00FF, 0)];
        let sensors = vec![sensor(0, 1.0)];
        let table = MatchingTable::build(&genes, &sensors, 0.5);
        let exp = table.exp();
        assert_eq!(exp.len(), table.umax() as usize + 1);
        assert!((exp[table.umax() as usize] - 1.0).abs() < 1e-12);
        for pair in exp.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_produce() {
        let g = gene(0, u32::MAX, 0);
        let sensors = vec![sensor(u32::MAX, 0.5)];
        let table = MatchingTable::build([&g], &sensors, 1.0);
        let expected = 0.5 * (1.0 - (-32.0f64).exp());
        assert!((table.produce(&g, &sensors, 1.0) - expected).abs() < 1e-12);
        assert!((table.produce(&g, &sensors, 0.1) - 0.1 * expected).abs() < 1e-12);
        assert!((table.signal(0, 0) - (1.0 - (-32.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_produce_without_sensors() {
        let g = gene(0, 0, 0);
        let table = MatchingTable::build([&g], &[], 1.0);
        assert_eq!(table.umax(), 0);
        assert_eq!(table.exp(), &[1.0]);
        assert_eq!(table.produce(&g, &[], 1.0), 0.0);
    }
}
