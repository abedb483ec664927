//! Core types for the columnar benchmark data generator.
//!
//! This crate provides the data model shared by the generator and whatever
//! consumes its output:
//!
//! - [`SemanticType`] - Logical column kinds the generator can be asked for
//! - [`NullBitmap`] - Bit-packed row validity
//! - [`RawColumn`] / [`Table`] - Owned generated buffers
//! - [`GenerationSpec`] - What table to build (types, width, byte budget, seed)
//! - [`ColumnStore`] - Hand-off seam to the columnar storage layer
//! - [`TableSummary`] - Observed shape of a generated table
//!
//! # Architecture
//!
//! ```text
//! datagen-core (this crate)
//!    │
//!    ├─── datagen-generator  (builds RawColumn/Table from a GenerationSpec)
//!    │
//!    └─── columnar-datagen   (benchmark driver binary)
//! ```

pub mod bitmap;
pub mod column;
pub mod spec;
pub mod storage;
pub mod summary;
pub mod types;

// Re-exports for convenience
pub use bitmap::{BitmaskWord, NullBitmap, BITS_PER_WORD};
pub use column::{ColumnData, RawColumn, Table};
pub use spec::{ColumnParams, GenerationSpec, SpecError, DEFAULT_SEED};
pub use storage::{ColumnStore, HostColumnStore, StoreError};
pub use summary::{ColumnSummary, TableSummary};
pub use types::{ParseTypeError, SemanticType, TimeUnit};
