//! Report — tabular dumps and graph descriptions of a network

pub mod table;
pub mod graph;

pub use table::{append_table_to_file, header, write_state, write_table};
pub use graph::{to_dot, write_dot_file};
