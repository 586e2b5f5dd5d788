//! Space-delimited concentration tables
//!
//! Columns are labelled `TF{i}`, `I{i}` and `P{i}` in history column order.

use crate::error::{GrnError, Result};
use crate::network::{Grn, History};
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Column labels for `grn`'s history
pub fn header(grn: &Grn) -> String {
    let tf = (0..grn.regulatory_count()).map(|i| format!("TF{}", i));
    let inputs = (0..grn.num_inputs()).map(|i| format!("I{}", i));
    let outputs = (0..grn.output_proteins().len()).map(|i| format!("P{}", i));
    tf.chain(inputs).chain(outputs).collect::<Vec<_>>().join(" ")
}

/// At most nine decimals, trailing zeros dropped
pub fn format_value(value: f64) -> String {
    let text = format!("{:.9}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-" || text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Write one line per timestep, optionally preceded by the header
pub fn write_table<W: Write>(out: &mut W, grn: &Grn, history: &History, with_header: bool) -> io::Result<()> {
    if with_header {
        writeln!(out, "{}", header(grn))?;
    }
    for t in 0..history.rows() {
        let line = history
            .row(t)
            .into_iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Append `history` to `path`, writing the header only if the file is new
pub fn append_table_to_file(path: impl AsRef<Path>, grn: &Grn, history: &History) -> Result<()> {
    let path = path.as_ref();
    let created = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| GrnError::unreadable(path, e))?;

    let mut out = BufWriter::new(file);
    write_table(&mut out, grn, history, created)
        .and_then(|_| out.flush())
        .map_err(|e| GrnError::unreadable(path, e))
}

/// Header plus the current concentrations; regulatory values carry their index
pub fn write_state<W: Write>(out: &mut W, grn: &Grn) -> io::Result<()> {
    writeln!(out, "{}", header(grn))?;
    let regulatory = grn
        .regulatory_proteins()
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}:{}", p.concentration, i));
    let rest = grn
        .input_proteins()
        .iter()
        .chain(grn.output_proteins())
        .map(|p| p.concentration.to_string());
    writeln!(out, "{}", regulatory.chain(rest).collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Protein;
    use crate::genome::Genome;
    use crate::network::GrnConfig;

    /// Two TF genes followed by one P gene
    fn grn() -> Grn {
        let mut words = vec![0u32; 16];
        words.extend([0, 0, 0xFF, 1, 2, 3, 4, 5]);
        let inputs = vec![Protein::input(0xFFFF_0000, 0.1)];
        Grn::new(&Genome::new(words), inputs, GrnConfig::default()).unwrap()
    }

    #[test]
    fn test_header_labels() {
        assert_eq!(header(&grn()), "TF0 TF1 I0 P0");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(0.123456789123), "0.123456789");
        assert_eq!(format_value(1e-10), "0");
        assert_eq!(format_value(-0.25), "-0.25");
    }

    #[test]
    fn test_write_table() {
        let mut grn = grn();
        let history = grn.run(3);
        let mut out = Vec::new();
        write_table(&mut out, &grn, &history, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "TF0 TF1 I0 P0");
        assert!(lines[1..].iter().all(|l| l.split(' ').count() == 4));
        assert_eq!(lines[1], "0.45 0.45 0.1 1");
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.grn");
        let mut grn = grn();
        let first = grn.run(2);
        append_table_to_file(&path, &grn, &first).unwrap();
        let second = grn.run(2);
        append_table_to_file(&path, &grn, &second).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1 + 3 + 3);
        assert_eq!(text.lines().filter(|l| l.starts_with("TF0")).count(), 1);
    }

    #[test]
    fn test_write_state() {
        let mut out = Vec::new();
        write_state(&mut out, &grn()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("0.45:0 0.45:1 0.1 1"));
    }
}
