//! Grn — the regulatory network simulator
//!
//! Construction scans the genome, expresses one protein per gene, assigns
//! initial concentrations and builds the matching table. Iteration is a
//! synchronous discrete-time recurrence:
//!
//! 1. record every concentration for the current step
//! 2. compute a production delta per gene from the recorded state
//! 3. add the deltas, flooring at `zero`
//! 4. rescale regulatory proteins to `1 - inputs` and outputs to `1`
//!
//! Input proteins are only ever changed through [`Grn::inject_inputs`].

use super::config::GrnConfig;
use super::history::History;
use crate::error::Result;
use crate::expression::{express_genes, MatchingTable, Protein, ProteinRole};
use crate::genome::{encode_genes, scan, Gene, Genome, ScanFault};
use log::{debug, info, trace};
use std::ops::Range;

/// Lifecycle of a network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkPhase {
    /// Built, never iterated
    Uninitialized,
    /// Running towards rest, bounded by `init_period`
    Stabilizing,
    /// Idle between runs
    Ready,
    /// Running a fixed number of steps
    Running,
}

#[derive(Debug)]
pub struct Grn {
    config: GrnConfig,
    tf_genes: Vec<Gene>,
    p_genes: Vec<Gene>,
    /// Regulatory proteins, then the current inputs
    tf_proteins: Vec<Protein>,
    p_proteins: Vec<Protein>,
    num_inputs: usize,
    input_concentration: f64,
    matching: MatchingTable,
    scan_faults: Vec<ScanFault>,
    phase: NetworkPhase,
    timestep: u64,
    init_history: Option<History>,
    last_history: Option<History>,
}

impl Grn {
    /// Build a network from `genome` sensing `inputs`
    pub fn new(genome: &Genome, inputs: Vec<Protein>, config: GrnConfig) -> Result<Self> {
        config.validate()?;

        let scanned = scan(genome);
        let tf_proteins = express_genes(&scanned.tf_genes, ProteinRole::Regulatory);
        let p_proteins = express_genes(&scanned.p_genes, ProteinRole::Output);

        let mut grn = Self {
            config,
            tf_genes: scanned.tf_genes,
            p_genes: scanned.p_genes,
            tf_proteins,
            p_proteins,
            num_inputs: 0,
            input_concentration: 0.0,
            matching: MatchingTable::default(),
            scan_faults: scanned.faults,
            phase: NetworkPhase::Uninitialized,
            timestep: 0,
            init_history: None,
            last_history: None,
        };

        grn.append_inputs(inputs);
        grn.set_initial_concentrations();
        grn.rebuild_tables();

        info!(
            "Built GRN from genome {} ({} words): {} TF genes, {} P genes, {} inputs",
            &genome.fingerprint()[..12],
            genome.len(),
            grn.tf_genes.len(),
            grn.p_genes.len(),
            grn.num_inputs
        );
        Ok(grn)
    }

    /// Network with default parameters and no inputs
    pub fn from_genome(genome: &Genome) -> Result<Self> {
        Self::new(genome, Vec::new(), GrnConfig::default())
    }

    /// Regulatory proteins start at `(1 - inputs) / n`, outputs at `1 / n`
    fn set_initial_concentrations(&mut self) {
        let zero = self.config.zero;
        let n = self.regulatory_count();
        let n_tf = n as f64;
        for p in &mut self.tf_proteins[..n] {
            p.concentration = ((1.0 - self.input_concentration) / n_tf).max(zero);
        }
        let n_p = self.p_proteins.len() as f64;
        for p in &mut self.p_proteins {
            p.concentration = (1.0 / n_p).max(zero);
        }
    }

    /// Inputs are floored at `zero` before they count towards the input total
    fn append_inputs(&mut self, inputs: Vec<Protein>) {
        let zero = self.config.zero;
        self.num_inputs = inputs.len();
        self.tf_proteins.extend(inputs.into_iter().map(|mut p| {
            p.role = ProteinRole::Input;
            p.concentration = p.concentration.max(zero);
            p
        }));
        self.input_concentration = total_concentration(self.input_proteins());
    }

    /// Reassign gene rows and recompute the full matching table
    fn rebuild_tables(&mut self) {
        let n_tf = self.tf_genes.len();
        for (i, gene) in self.tf_genes.iter_mut().enumerate() {
            gene.index = i;
        }
        for (i, gene) in self.p_genes.iter_mut().enumerate() {
            gene.index = n_tf + i;
        }
        self.matching = MatchingTable::build(
            self.tf_genes.iter().chain(&self.p_genes),
            &self.tf_proteins,
            self.config.beta,
        );
    }

    /// Replace the current input proteins.
    ///
    /// Regulatory proteins keep their order and identity and are rescaled to
    /// the new input total. The matching table is rebuilt from scratch, so
    /// batch input changes where possible.
    pub fn inject_inputs(&mut self, inputs: Vec<Protein>) {
        let previous = self.num_inputs;
        let regulatory = self.regulatory_count();
        self.tf_proteins.truncate(regulatory);

        self.append_inputs(inputs);
        self.normalise_regulatory();
        self.rebuild_tables();

        info!(
            "Injected inputs: {} -> {} proteins, total input concentration {:.4}",
            previous, self.num_inputs, self.input_concentration
        );
    }

    /// Run towards rest, at most `init_period` steps
    pub fn init(&mut self) -> History {
        self.transition(NetworkPhase::Stabilizing);
        let history = self.iterate(self.config.init_period, true);
        self.transition(NetworkPhase::Ready);

        if history.at_rest() {
            info!("GRN at rest after {} steps", history.steps_run());
        } else {
            info!("GRN stabilisation capped at {} steps", history.steps_run());
        }
        self.init_history = Some(history.clone());
        history
    }

    /// Run exactly `steps` steps without rest checking
    pub fn run(&mut self, steps: usize) -> History {
        if self.phase == NetworkPhase::Uninitialized {
            debug!("Running GRN without stabilisation");
        }
        self.transition(NetworkPhase::Running);
        let history = self.iterate(steps, false);
        self.transition(NetworkPhase::Ready);

        self.last_history = Some(history.clone());
        history
    }

    fn transition(&mut self, next: NetworkPhase) {
        trace!("GRN phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    fn iterate(&mut self, steps: usize, check_rest: bool) -> History {
        let detector = self.config.rest_detector();
        let skip = self.input_columns();
        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(steps.min(self.config.init_period) + 1);
        let mut at_rest = false;

        let mut t = 0;
        while t < steps {
            if check_rest && t > 0 && detector.is_at_rest(&rows, t - 1, skip.clone()) {
                at_rest = true;
                break;
            }
            rows.push(self.snapshot());
            self.step();
            t += 1;
        }
        rows.push(self.snapshot());

        History::from_rows(&rows, self.columns(), at_rest)
    }

    /// One synchronous update of every gene product
    fn step(&mut self) {
        let zero = self.config.zero;
        let rate = self.config.rate;

        let sensors = &self.tf_proteins;
        let tf_rates: Vec<f64> = self
            .tf_genes
            .iter()
            .map(|g| self.matching.produce(g, sensors, rate))
            .collect();
        let p_rates: Vec<f64> = self
            .p_genes
            .iter()
            .map(|g| self.matching.produce(g, sensors, rate))
            .collect();

        for (protein, delta) in self.tf_proteins.iter_mut().zip(&tf_rates) {
            protein.concentration = (protein.concentration + delta).max(zero);
        }
        for (protein, delta) in self.p_proteins.iter_mut().zip(&p_rates) {
            protein.concentration = (protein.concentration + delta).max(zero);
        }

        self.normalise_regulatory();
        self.normalise_outputs();
        self.timestep += 1;
    }

    /// Scale non-input regulatory proteins to sum to `1 - inputs`
    fn normalise_regulatory(&mut self) {
        let zero = self.config.zero;
        let target = 1.0 - self.input_concentration;
        let n = self.regulatory_count();
        let regulatory = &mut self.tf_proteins[..n];

        let total: f64 = regulatory.iter().map(|p| p.concentration).sum();
        if total > 0.0 {
            for p in regulatory {
                p.concentration = (p.concentration * target / total).max(zero);
            }
        }
    }

    /// Scale output proteins to sum to one
    fn normalise_outputs(&mut self) {
        let zero = self.config.zero;
        let total = total_concentration(&self.p_proteins);
        if total > 0.0 {
            for p in &mut self.p_proteins {
                p.concentration = (p.concentration / total).max(zero);
            }
        }
    }

    /// Current concentrations in history column order
    pub fn snapshot(&self) -> Vec<f64> {
        self.tf_proteins
            .iter()
            .chain(&self.p_proteins)
            .map(|p| p.concentration)
            .collect()
    }

    /// Canonical word encoding: every TF gene then every P gene
    pub fn encoding(&self) -> Vec<u32> {
        encode_genes(&self.tf_genes, &self.p_genes)
    }

    pub fn config(&self) -> &GrnConfig {
        &self.config
    }

    pub fn phase(&self) -> NetworkPhase {
        self.phase
    }

    /// Steps taken since construction, over all runs
    pub fn timestep(&self) -> u64 {
        self.timestep
    }

    pub fn tf_genes(&self) -> &[Gene] {
        &self.tf_genes
    }

    pub fn p_genes(&self) -> &[Gene] {
        &self.p_genes
    }

    /// Regulatory proteins followed by inputs, the set every gene senses
    pub fn sensors(&self) -> &[Protein] {
        &self.tf_proteins
    }

    pub fn regulatory_proteins(&self) -> &[Protein] {
        &self.tf_proteins[..self.regulatory_count()]
    }

    pub fn input_proteins(&self) -> &[Protein] {
        &self.tf_proteins[self.regulatory_count()..]
    }

    pub fn output_proteins(&self) -> &[Protein] {
        &self.p_proteins
    }

    pub fn regulatory_count(&self) -> usize {
        self.tf_proteins.len() - self.num_inputs
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn input_concentration(&self) -> f64 {
        self.input_concentration
    }

    /// History columns: regulatory, inputs, outputs
    pub fn columns(&self) -> usize {
        self.tf_proteins.len() + self.p_proteins.len()
    }

    /// Column range holding input proteins
    pub fn input_columns(&self) -> Range<usize> {
        self.regulatory_count()..self.tf_proteins.len()
    }

    pub fn matching(&self) -> &MatchingTable {
        &self.matching
    }

    pub fn umax(&self) -> u32 {
        self.matching.umax()
    }

    pub fn scan_faults(&self) -> &[ScanFault] {
        &self.scan_faults
    }

    pub fn init_history(&self) -> Option<&History> {
        self.init_history.as_ref()
    }

    pub fn last_history(&self) -> Option<&History> {
        self.last_history.as_ref()
    }

    pub fn summary(&self) -> String {
        format!(
            "GRN | {} TF | {} inputs ({:.3}) | {} P | umax={} | phase={:?} | t={}",
            self.regulatory_count(),
            self.num_inputs,
            self.input_concentration,
            self.p_proteins.len(),
            self.umax(),
            self.phase,
            self.timestep
        )
    }
}

fn total_concentration(proteins: &[Protein]) -> f64 {
    proteins.iter().map(|p| p.concentration).sum()
}
