use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    quark::{Quark, StringTable},
};

/// Occurrence counts over a closed set of rows and columns.
///
/// This is a [R][C] matrix stored row-major; every cell starts at zero and is
/// only ever incremented, so rows and columns must be known up front.
#[derive(Debug, Clone)]
pub(crate) struct Counts {
    rows: Quark,
    cols: Quark,
    counts: Vec<usize>,
}

impl Counts {
    pub fn zeroed(rows: Quark, cols: Quark) -> Self {
        let counts = vec![0; rows.len() * cols.len()];
        Self { rows, cols, counts }
    }

    #[inline]
    pub fn add(&mut self, row: usize, col: usize) {
        let c = self.cols.len();
        self.counts[c * row + col] += 1;
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> usize {
        self.counts[self.cols.len() * row + col]
    }

    pub fn row_total(&self, row: usize) -> usize {
        let c = self.cols.len();
        self.counts[c * row..c * (row + 1)].iter().sum()
    }

    /// Turns every row into a distribution over the columns.
    ///
    /// With smoothing each cell gets `(count + 1) / (total + C)`; without it
    /// `count / total`, and a row that was never counted stays all zero.
    pub fn normalize(&self, smoothing: bool) -> Table {
        let r = self.rows.len();
        let c = self.cols.len();
        let mut values = vec![0.0; r * c];
        for i in 0..r {
            let total = self.row_total(i) as f64;
            for j in 0..c {
                let count = self.get(i, j) as f64;
                values[c * i + j] = if smoothing {
                    (count + 1.0) / (total + c as f64)
                } else if total > 0.0 {
                    count / total
                } else {
                    0.0
                };
            }
        }
        Table {
            rows: self.rows.clone(),
            cols: self.cols.clone(),
            values,
        }
    }
}

/// Dense probability table: a distribution over `cols` for every key in
/// `rows`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    rows: Quark,
    cols: Quark,
    values: Vec<f64>,
}

impl Table {
    pub fn rows(&self) -> &Quark {
        &self.rows
    }

    pub fn cols(&self) -> &Quark {
        &self.cols
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn row_id(&self, key: &str) -> Option<usize> {
        self.rows.to_id(key)
    }

    #[inline]
    pub fn col_id(&self, key: &str) -> Option<usize> {
        self.cols.to_id(key)
    }

    /// The stored probability for `(outer, inner)`, if both keys are known.
    pub fn get(&self, outer: &str, inner: &str) -> Option<f64> {
        let i = self.row_id(outer)?;
        let j = self.col_id(inner)?;
        Some(self.values[self.num_cols() * i + j])
    }

    /// `get`, falling back to `default` when either key is missing.
    pub fn lookup(&self, outer: &str, inner: &str, default: f64) -> f64 {
        self.get(outer, inner).unwrap_or(default)
    }

    /// `lookup` on ids that were resolved ahead of time; `None` stands for a
    /// key the table does not know.
    #[inline]
    pub fn lookup_at(&self, row: Option<usize>, col: Option<usize>, default: f64) -> f64 {
        match (row, col) {
            (Some(i), Some(j)) => self.values[self.num_cols() * i + j],
            _ => default,
        }
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let c = self.num_cols();
        &self.values[c * row..c * (row + 1)]
    }

    /// `(column, probability)` pairs of a row in column order.
    pub fn entries(&self, outer: &str) -> Option<impl Iterator<Item = (&str, f64)> + '_> {
        let i = self.row_id(outer)?;
        Some(self.cols.iter().zip(self.row(i).iter().copied()))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let expected = self.num_rows() * self.num_cols();
        if self.values.len() != expected {
            return Err(Error::InvalidModel(format!(
                "table has {} values, expected {} ({} rows x {} columns)",
                self.values.len(),
                expected,
                self.num_rows(),
                self.num_cols()
            )));
        }
        if let Some(v) = self.values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(Error::InvalidModel(format!("probability out of range: {v}")));
        }
        Ok(())
    }
}
