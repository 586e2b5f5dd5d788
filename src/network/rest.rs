//! Rest detection — "nothing moved lately", not a fixed-point proof

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestDetector {
    pub window: usize,
    pub epsilon: f64,
}

impl RestDetector {
    /// Whether every column of `rows[t]` is within `epsilon` of `rows[t - window]`.
    ///
    /// Columns in `skip` (externally driven inputs) are ignored. Never fires
    /// before `window` steps have elapsed.
    pub fn is_at_rest(&self, rows: &[Vec<f64>], t: usize, skip: Range<usize>) -> bool {
        if t < self.window || t >= rows.len() {
            return false;
        }

        rows[t]
            .iter()
            .zip(&rows[t - self.window])
            .enumerate()
            .filter(|(i, _)| !skip.contains(i))
            .all(|(_, (now, then))| (now - then).abs() <= self.epsilon)
    }
}
