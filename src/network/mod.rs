//! Network — the regulatory network simulator and its parameters
//!
//! A [`Grn`] owns its genes, proteins, matching table and concentration
//! history. Nothing here is shared between networks.

mod config;
mod rest;
mod history;
mod grn;

pub use config::{GrnConfig, INIT_PERIOD, REST_EPSILON, REST_STEP, ZERO};
pub use rest::RestDetector;
pub use history::History;
pub use grn::{Grn, NetworkPhase};
