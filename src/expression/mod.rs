//! Expression — genes to proteins, and the regulatory matching table

mod protein;
mod producer;
mod matching;

pub use protein::{Protein, ProteinRole};
pub use producer::{express, express_genes};
pub use matching::{calculate_umax, complement_count, MatchingTable, Site};
