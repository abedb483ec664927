//! Hand-off boundary to the columnar storage layer.
//!
//! The generator produces plain owned buffers. Whatever turns them into
//! storage-resident columns (device upload, pinned staging, file output)
//! implements [`ColumnStore`] and takes ownership of each [`RawColumn`].

use crate::bitmap::NullBitmap;
use crate::column::{ColumnData, RawColumn};
use crate::types::SemanticType;

/// Error type for storage hand-off.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Value buffer does not hold one record per row
    #[error("{semantic_type} column holds {values} values for {rows} rows")]
    LengthMismatch {
        semantic_type: SemanticType,
        values: usize,
        rows: usize,
    },

    /// Null bitmap word count does not match the row count
    #[error("null bitmap has {words} words, expected {expected} for {rows} rows")]
    BitmapSizeMismatch {
        words: usize,
        expected: usize,
        rows: usize,
    },

    /// String offsets are not a non-decreasing sequence from 0 to the byte length
    #[error("malformed string offsets: {0}")]
    MalformedOffsets(String),

    /// Table assembled from columns of different lengths
    #[error("column {index} has {rows} rows, table has {expected}")]
    RowCountMismatch {
        index: usize,
        rows: usize,
        expected: usize,
    },

    /// Handle does not refer to a stored column
    #[error("unknown column handle: {0}")]
    UnknownColumn(usize),
}

/// Collaborator that takes ownership of generated columns.
pub trait ColumnStore {
    /// Opaque reference to a stored column.
    type ColumnHandle;
    /// Opaque reference to a stored table.
    type TableHandle;

    /// Take ownership of one column's buffers.
    fn store_column(&mut self, column: RawColumn) -> Result<Self::ColumnHandle, StoreError>;

    /// Assemble a table from previously stored columns, in the given order.
    fn store_table(
        &mut self,
        columns: Vec<Self::ColumnHandle>,
    ) -> Result<Self::TableHandle, StoreError>;
}

/// Check the structural invariants of a column before it is accepted.
pub fn validate_column(column: &RawColumn) -> Result<(), StoreError> {
    let rows = column.num_rows();
    let values = column.data.len();
    if values != rows {
        return Err(StoreError::LengthMismatch {
            semantic_type: column.semantic_type(),
            values,
            rows,
        });
    }

    let expected = NullBitmap::size_in_words(rows);
    let words = column.null_mask.words().len();
    if words != expected {
        return Err(StoreError::BitmapSizeMismatch {
            words,
            expected,
            rows,
        });
    }

    if let ColumnData::String { chars, offsets } = &column.data {
        if offsets.first() != Some(&0) {
            return Err(StoreError::MalformedOffsets(
                "offsets must start at 0".to_string(),
            ));
        }
        if offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err(StoreError::MalformedOffsets(
                "offsets must be non-decreasing".to_string(),
            ));
        }
        let last = offsets.last().copied().unwrap_or(0) as usize;
        if last != chars.len() {
            return Err(StoreError::MalformedOffsets(format!(
                "final offset {last} does not match {} bytes",
                chars.len()
            )));
        }
    }

    Ok(())
}

/// Host-memory store: validates and keeps the buffers as handed over.
///
/// Column handles are indices into the stored column list; table handles are
/// indices into the stored table list.
#[derive(Debug, Default)]
pub struct HostColumnStore {
    columns: Vec<RawColumn>,
    tables: Vec<Vec<usize>>,
}

impl HostColumnStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(&self, handle: usize) -> Option<&RawColumn> {
        self.columns.get(handle)
    }

    /// Columns of a stored table, in table order.
    pub fn table_columns(&self, handle: usize) -> Option<Vec<&RawColumn>> {
        self.tables
            .get(handle)
            .map(|ids| ids.iter().map(|&id| &self.columns[id]).collect())
    }

    /// Total bytes held across all stored columns, bitmaps included.
    pub fn resident_bytes(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.data.byte_size() + std::mem::size_of_val(c.null_mask.words()))
            .sum()
    }
}

impl ColumnStore for HostColumnStore {
    type ColumnHandle = usize;
    type TableHandle = usize;

    fn store_column(&mut self, column: RawColumn) -> Result<usize, StoreError> {
        validate_column(&column)?;
        self.columns.push(column);
        Ok(self.columns.len() - 1)
    }

    fn store_table(&mut self, columns: Vec<usize>) -> Result<usize, StoreError> {
        let mut expected = None;
        for (index, &id) in columns.iter().enumerate() {
            let column = self.columns.get(id).ok_or(StoreError::UnknownColumn(id))?;
            let rows = column.num_rows();
            let expected = *expected.get_or_insert(rows);
            if rows != expected {
                return Err(StoreError::RowCountMismatch {
                    index,
                    rows,
                    expected,
                });
            }
        }
        self.tables.push(columns);
        Ok(self.tables.len() - 1)
    }
}
