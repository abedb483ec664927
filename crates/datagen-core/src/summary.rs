//! Shape statistics of generated columns.

use crate::column::{RawColumn, Table};
use crate::types::SemanticType;
use serde::Serialize;
use std::collections::HashSet;

/// Observed properties of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    pub semantic_type: SemanticType,
    pub num_rows: usize,
    pub null_count: usize,
    /// Distinct values among valid rows
    pub distinct_values: usize,
    /// Longest stretch of consecutive rows with equal value and validity
    pub max_run_length: usize,
    /// Number of maximal runs
    pub runs: usize,
    pub byte_size: usize,
}

impl ColumnSummary {
    pub fn from_column(column: &RawColumn) -> Self {
        let num_rows = column.num_rows();

        let distinct_values = (0..num_rows)
            .filter(|&row| column.is_valid(row))
            .map(|row| column.data.record_bytes(row))
            .collect::<HashSet<_>>()
            .len();

        let lengths = run_lengths(column);

        Self {
            semantic_type: column.semantic_type(),
            num_rows,
            null_count: column.null_count(),
            distinct_values,
            max_run_length: lengths.iter().copied().max().unwrap_or(0),
            runs: lengths.len(),
            byte_size: column.data.byte_size(),
        }
    }

    /// Fraction of rows that are null.
    pub fn null_fraction(&self) -> f64 {
        if self.num_rows == 0 {
            0.0
        } else {
            self.null_count as f64 / self.num_rows as f64
        }
    }
}

/// Lengths of the maximal runs of equal rows, in row order.
pub fn run_lengths(column: &RawColumn) -> Vec<usize> {
    let mut lengths = Vec::new();
    let mut start = 0;
    for row in 1..=column.num_rows() {
        if row == column.num_rows() || !column.rows_equal(start, row) {
            lengths.push(row - start);
            start = row;
        }
    }
    lengths
}

/// Observed properties of a whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub num_rows: usize,
    pub num_columns: usize,
    pub byte_size: usize,
    pub columns: Vec<ColumnSummary>,
}

impl TableSummary {
    pub fn from_table(table: &Table) -> Self {
        let columns: Vec<ColumnSummary> = table
            .columns()
            .iter()
            .map(ColumnSummary::from_column)
            .collect();
        Self {
            num_rows: table.num_rows(),
            num_columns: table.num_columns(),
            byte_size: columns.iter().map(|c| c.byte_size).sum(),
            columns,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
