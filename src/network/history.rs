//! Concentration time series of one run

use nalgebra::DMatrix;

/// One row per timestep, columns ordered regulatory, input, output
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    matrix: DMatrix<f64>,
    steps_run: usize,
    at_rest: bool,
}

impl History {
    pub(crate) fn from_rows(rows: &[Vec<f64>], columns: usize, at_rest: bool) -> Self {
        let matrix = DMatrix::from_fn(rows.len(), columns, |r, c| rows[r][c]);
        Self {
            matrix,
            steps_run: rows.len().saturating_sub(1),
            at_rest,
        }
    }

    /// Number of recurrence steps executed; rows = steps + 1
    pub fn steps_run(&self) -> usize {
        self.steps_run
    }

    /// Whether the run stopped because the rest detector fired
    pub fn at_rest(&self) -> bool {
        self.at_rest
    }

    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn columns(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn get(&self, t: usize, protein: usize) -> f64 {
        self.matrix[(t, protein)]
    }

    pub fn row(&self, t: usize) -> Vec<f64> {
        self.matrix.row(t).iter().copied().collect()
    }

    /// Last recorded state
    pub fn last_row(&self) -> Vec<f64> {
        self.row(self.steps_run)
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Smallest value anywhere in the series
    pub fn min_value(&self) -> Option<f64> {
        self.matrix.iter().copied().reduce(f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let rows = vec![vec![0.5, 0.5], vec![0.4, 0.6], vec![0.3, 0.7]];
        let history = History::from_rows(&rows, 2, false);
        assert_eq!(history.steps_run(), 2);
        assert_eq!(history.rows(), 3);
        assert_eq!(history.columns(), 2);
        assert_eq!(history.get(1, 1), 0.6);
        assert_eq!(history.row(2), vec![0.3, 0.7]);
        assert_eq!(history.last_row(), vec![0.3, 0.7]);
        assert_eq!(history.min_value(), Some(0.3));
    }

    #[test]
    fn test_zero_columns() {
        let rows = vec![Vec::new(); 4];
        let history = History::from_rows(&rows, 0, true);
        assert_eq!(history.steps_run(), 3);
        assert_eq!(history.columns(), 0);
        assert!(history.at_rest());
        assert_eq!(history.min_value(), None);
    }
}
