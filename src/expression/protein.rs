//! Protein — a 32-bit signature with a mutable concentration

use serde::{Deserialize, Serialize};

/// Where a protein comes from and what it takes part in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProteinRole {
    /// Expressed from a TF gene; senses and is sensed
    Regulatory,
    /// Supplied by the environment; only sensed, never renormalized
    Input,
    /// Expressed from a P gene; sensed by nothing
    Output,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protein {
    pub signature: u32,
    pub concentration: f64,
    pub role: ProteinRole,
}

impl Protein {
    pub fn new(signature: u32, concentration: f64, role: ProteinRole) -> Self {
        Self {
            signature,
            concentration,
            role,
        }
    }

    /// An external signal protein
    pub fn input(signature: u32, concentration: f64) -> Self {
        Self::new(signature, concentration, ProteinRole::Input)
    }

    pub fn is_input(&self) -> bool {
        self.role == ProteinRole::Input
    }
}
