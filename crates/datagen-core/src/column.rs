//! Raw generated columns and tables.
//!
//! A [`RawColumn`] is a plain owned value buffer (or, for strings, a byte
//! buffer plus an offset table) paired with a [`NullBitmap`] of matching row
//! count. Columns are populated once by a builder and then handed to the
//! storage layer unchanged.

use crate::bitmap::NullBitmap;
use crate::storage::{ColumnStore, StoreError};
use crate::types::{SemanticType, TimeUnit};
use std::borrow::Cow;

/// Value buffer of a generated column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Bool(Vec<bool>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Timestamp { unit: TimeUnit, values: Vec<i64> },
    Duration { unit: TimeUnit, values: Vec<i64> },
    Decimal32(Vec<i32>),
    Decimal64(Vec<i64>),
    /// Variable-length records: record `i` spans `chars[offsets[i]..offsets[i + 1]]`
    String { chars: Vec<u8>, offsets: Vec<i32> },
}

impl ColumnData {
    /// Number of records held by the buffer.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Bool(v) => v.len(),
            ColumnData::Int8(v) => v.len(),
            ColumnData::Int16(v) => v.len(),
            ColumnData::Int32(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::UInt8(v) => v.len(),
            ColumnData::UInt16(v) => v.len(),
            ColumnData::UInt32(v) => v.len(),
            ColumnData::UInt64(v) => v.len(),
            ColumnData::Float32(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
            ColumnData::Timestamp { values, .. } | ColumnData::Duration { values, .. } => {
                values.len()
            }
            ColumnData::Decimal32(v) => v.len(),
            ColumnData::Decimal64(v) => v.len(),
            ColumnData::String { offsets, .. } => offsets.len().saturating_sub(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The semantic type this buffer represents.
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            ColumnData::Bool(_) => SemanticType::Bool,
            ColumnData::Int8(_) => SemanticType::Int8,
            ColumnData::Int16(_) => SemanticType::Int16,
            ColumnData::Int32(_) => SemanticType::Int32,
            ColumnData::Int64(_) => SemanticType::Int64,
            ColumnData::UInt8(_) => SemanticType::UInt8,
            ColumnData::UInt16(_) => SemanticType::UInt16,
            ColumnData::UInt32(_) => SemanticType::UInt32,
            ColumnData::UInt64(_) => SemanticType::UInt64,
            ColumnData::Float32(_) => SemanticType::Float32,
            ColumnData::Float64(_) => SemanticType::Float64,
            ColumnData::Timestamp { unit, .. } => SemanticType::Timestamp(*unit),
            ColumnData::Duration { unit, .. } => SemanticType::Duration(*unit),
            ColumnData::Decimal32(_) => SemanticType::Decimal32,
            ColumnData::Decimal64(_) => SemanticType::Decimal64,
            ColumnData::String { .. } => SemanticType::String,
        }
    }

    /// Byte representation of one record, used for equality-based statistics.
    ///
    /// Floats compare by bit pattern.
    pub fn record_bytes(&self, row: usize) -> Cow<'_, [u8]> {
        match self {
            ColumnData::Bool(v) => Cow::Owned(vec![v[row] as u8]),
            ColumnData::Int8(v) => Cow::Owned(v[row].to_le_bytes().to_vec()),
            ColumnData::Int16(v) => Cow::Owned(v[row].to_le_bytes().to_vec()),
            ColumnData::Int32(v) | ColumnData::Decimal32(v) => {
                Cow::Owned(v[row].to_le_bytes().to_vec())
            }
            ColumnData::Int64(v) | ColumnData::Decimal64(v) => {
                Cow::Owned(v[row].to_le_bytes().to_vec())
            }
            ColumnData::UInt8(v) => Cow::Borrowed(&v[row..row + 1]),
            ColumnData::UInt16(v) => Cow::Owned(v[row].to_le_bytes().to_vec()),
            ColumnData::UInt32(v) => Cow::Owned(v[row].to_le_bytes().to_vec()),
            ColumnData::UInt64(v) => Cow::Owned(v[row].to_le_bytes().to_vec()),
            ColumnData::Float32(v) => Cow::Owned(v[row].to_bits().to_le_bytes().to_vec()),
            ColumnData::Float64(v) => Cow::Owned(v[row].to_bits().to_le_bytes().to_vec()),
            ColumnData::Timestamp { values, .. } | ColumnData::Duration { values, .. } => {
                Cow::Owned(values[row].to_le_bytes().to_vec())
            }
            ColumnData::String { chars, offsets } => {
                Cow::Borrowed(&chars[offsets[row] as usize..offsets[row + 1] as usize])
            }
        }
    }

    /// Bytes occupied by the value buffer (plus the offset table for strings).
    pub fn byte_size(&self) -> usize {
        match self {
            ColumnData::String { chars, offsets } => {
                chars.len() + offsets.len() * std::mem::size_of::<i32>()
            }
            other => other.len() * other.semantic_type().fixed_width().unwrap_or(0),
        }
    }
}

/// One generated column: values plus validity.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub data: ColumnData,
    pub null_mask: NullBitmap,
}

impl RawColumn {
    pub fn new(data: ColumnData, null_mask: NullBitmap) -> Self {
        Self { data, null_mask }
    }

    pub fn semantic_type(&self) -> SemanticType {
        self.data.semantic_type()
    }

    pub fn num_rows(&self) -> usize {
        self.null_mask.len()
    }

    /// Whether `row` holds a non-null value.
    pub fn is_valid(&self, row: usize) -> bool {
        self.null_mask.get(row)
    }

    pub fn null_count(&self) -> usize {
        self.null_mask.null_count()
    }

    /// Whether two rows hold the same value and the same validity.
    pub fn rows_equal(&self, a: usize, b: usize) -> bool {
        self.is_valid(a) == self.is_valid(b)
            && self.data.record_bytes(a) == self.data.record_bytes(b)
    }
}

/// Ordered set of generated columns sharing one row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<RawColumn>,
    num_rows: usize,
}

impl Table {
    pub fn new(columns: Vec<RawColumn>, num_rows: usize) -> Self {
        Self { columns, num_rows }
    }

    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&RawColumn> {
        self.columns.get(index)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Column types in position order.
    pub fn semantic_types(&self) -> Vec<SemanticType> {
        self.columns.iter().map(RawColumn::semantic_type).collect()
    }

    /// Transfer every column to `store` in position order and assemble the
    /// store's table handle from the resulting column handles.
    pub fn hand_off<S: ColumnStore>(self, store: &mut S) -> Result<S::TableHandle, StoreError> {
        let handles = self
            .columns
            .into_iter()
            .map(|column| store.store_column(column))
            .collect::<Result<Vec<_>, _>>()?;
        store.store_table(handles)
    }
}
