//! Graphviz rendering of regulatory weights
//!
//! Every sensing protein gets an edge to every gene it can regulate. Negative
//! (inhibiting) edges are red, the rest blue; pen width scales with |weight|.

use crate::error::{GrnError, Result};
use crate::network::Grn;
use std::path::{Path, PathBuf};

/// Multiplier from signal magnitude to pen width
pub const EDGE_SCALE: f64 = 10.0;

fn edge(from: &str, to: &str, signal: f64) -> String {
    format!(
        "  {} -> {} [color=\"{}\" penwidth=\"{}\"];\n",
        from,
        to,
        if signal < 0.0 { "red" } else { "blue" },
        (signal * EDGE_SCALE).abs()
    )
}

fn rank(kind: &str, nodes: impl Iterator<Item = String>) -> String {
    let mut line = format!("  {{ rank={}; ", kind);
    for node in nodes {
        line.push_str(&node);
        line.push(' ');
    }
    line.push_str("}\n");
    line
}

/// Render `grn` as a `digraph graph_<name>`
pub fn to_dot(grn: &Grn, name: &str) -> String {
    let table = grn.matching();
    let regulatory = grn.regulatory_count();
    let inputs = grn.num_inputs();
    let tf_genes = grn.tf_genes().len();

    let mut dot = format!("digraph graph_{} {{\n", name);

    let targets = [
        ("  // TF GENES\n", "TF", 0, tf_genes),
        ("  // P GENES\n", "P", tf_genes, grn.p_genes().len()),
    ];
    for (comment, label, first_row, count) in targets {
        dot.push_str(comment);
        for i in 0..count {
            let target = format!("{}_{}", label, i);
            for j in 0..regulatory {
                dot.push_str(&edge(&format!("TF_{}", j), &target, table.signal(first_row + i, j)));
            }
            for j in 0..inputs {
                dot.push_str(&edge(&format!("I_{}", j), &target, table.signal(first_row + i, regulatory + j)));
            }
        }
    }

    dot.push_str(&rank("source", (0..inputs).map(|i| format!("I_{}", i))));
    dot.push_str(&rank("same", (0..regulatory).map(|i| format!("TF_{}", i))));
    dot.push_str(&rank("sink", (0..grn.output_proteins().len()).map(|i| format!("P_{}", i))));
    dot.push_str("}\n");
    dot
}

/// Write `<dir>/<name>.dot`, returning its path
pub fn write_dot_file(dir: impl AsRef<Path>, grn: &Grn, name: &str) -> Result<PathBuf> {
    let path = dir.as_ref().join(format!("{}.dot", name));
    std::fs::write(&path, to_dot(grn, name)).map_err(|e| GrnError::unreadable(&path, e))?;
    Ok(path)
}
