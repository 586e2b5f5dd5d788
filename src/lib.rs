//! GRN — artificial gene regulatory networks
//!
//! A bit-string genome is scanned for genes, genes are expressed into
//! regulatory proteins, and the network is iterated as a discrete-time
//! dynamical system over protein concentrations.

pub mod error;
pub mod genome;
pub mod expression;
pub mod network;
pub mod report;

pub use error::{GrnError, Result};
pub use genome::{Gene, GeneClass, Genome, ScanResult};
pub use expression::{MatchingTable, Protein, ProteinRole};
pub use network::{Grn, GrnConfig, History, NetworkPhase};
