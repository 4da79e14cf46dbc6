// Dense, named-column feature table.
//
// Row-major f64 storage with one name per column. This is the shape the
// classifier consumes: one row per comment, one column per expected feature.

use std::collections::{HashMap, HashSet};

use anyhow::Result;

use super::traits::SparseRow;

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    n_rows: usize,
    /// Row-major, `n_rows * columns.len()` values
    data: Vec<f64>,
}

impl FeatureTable {
    /// A zero-filled table.
    pub fn zeros(columns: Vec<String>, n_rows: usize) -> Self {
        let data = vec![0.0; n_rows * columns.len()];
        Self {
            columns,
            n_rows,
            data,
        }
    }

    /// Materialize sparse rows into a dense table over `columns`.
    pub fn from_sparse(columns: Vec<String>, rows: &[SparseRow]) -> Result<Self> {
        let width = columns.len();
        let mut table = Self::zeros(columns, rows.len());

        for (r, row) in rows.iter().enumerate() {
            for &(idx, weight) in row {
                if idx >= width {
                    anyhow::bail!(
                        "Sparse feature index {idx} out of range for {width} columns (row {r})"
                    );
                }
                table.data[r * width + idx] = weight;
            }
        }

        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// All values, row-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// One row's values, in column order.
    pub fn row(&self, r: usize) -> &[f64] {
        let width = self.n_cols();
        &self.data[r * width..(r + 1) * width]
    }

    /// Look up a single cell by column name.
    pub fn value(&self, r: usize, column: &str) -> Option<f64> {
        if r >= self.n_rows {
            return None;
        }
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|c| self.data[r * self.n_cols() + c])
    }

    /// Names in `expected` that this table lacks, in `expected` order, once each.
    pub fn missing_columns(&self, expected: &[String]) -> Vec<String> {
        let present: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        let mut seen: HashSet<&str> = HashSet::new();
        expected
            .iter()
            .filter(|c| !present.contains(c.as_str()) && seen.insert(c.as_str()))
            .cloned()
            .collect()
    }

    /// Append another table's columns to the right, in a single pass.
    pub fn concat_columns(self, other: FeatureTable) -> Result<Self> {
        if self.n_rows != other.n_rows {
            anyhow::bail!(
                "Cannot concatenate tables with {} and {} rows",
                self.n_rows,
                other.n_rows
            );
        }

        let left = self.n_cols();
        let right = other.n_cols();
        let mut data = Vec::with_capacity(self.n_rows * (left + right));
        for r in 0..self.n_rows {
            data.extend_from_slice(&self.data[r * left..(r + 1) * left]);
            data.extend_from_slice(&other.data[r * right..(r + 1) * right]);
        }

        let mut columns = self.columns;
        columns.extend(other.columns);

        Ok(Self {
            columns,
            n_rows: self.n_rows,
            data,
        })
    }

    /// Project onto `columns`, in that order. Columns not listed are dropped;
    /// every listed column must exist.
    pub fn select(&self, columns: &[String]) -> Result<Self> {
        // First occurrence wins if a name repeats
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(self.n_cols());
        for (i, c) in self.columns.iter().enumerate() {
            index.entry(c.as_str()).or_insert(i);
        }

        let positions: Vec<usize> = columns
            .iter()
            .map(|c| {
                index
                    .get(c.as_str())
                    .copied()
                    .ok_or_else(|| anyhow::anyhow!("Column '{c}' not present in feature table"))
            })
            .collect::<Result<_>>()?;

        let mut data = Vec::with_capacity(self.n_rows * positions.len());
        for r in 0..self.n_rows {
            let row = self.row(r);
            data.extend(positions.iter().map(|&p| row[p]));
        }

        Ok(Self {
            columns: columns.to_vec(),
            n_rows: self.n_rows,
            data,
        })
    }
}
