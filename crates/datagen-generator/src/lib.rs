//! Deterministic synthetic column generator for columnar benchmarks.
//!
//! This crate turns a [`GenerationSpec`](datagen_core::GenerationSpec) into a
//! [`Table`](datagen_core::Table) whose columns look like real data rather than
//! uniform noise: values are drawn from a small per-column pool (bounded
//! cardinality), repeated in Gamma-distributed runs (locality), and sprinkled
//! with nulls. Every column is seeded from a single master seed, so the same
//! spec always yields the same table.
//!
//! # Architecture
//!
//! ```text
//! GenerationSpec
//!        │
//!        ▼
//! ┌──────────────────┐   one seed per column, drawn up front
//! │  TableGenerator  │──────────────────────────────┐
//! └────────┬─────────┘                              │
//!          │ contiguous column chunks, one task each│
//!          ▼                                        ▼
//!   factory::build_column ──► builders::{sampled, string} ──► generators::*
//!          │
//!          ▼
//!    Table { RawColumn... }   (reassembled in chunk order)
//! ```
//!
//! # Example
//!
//! ```rust
//! use datagen_core::{GenerationSpec, SemanticType};
//! use datagen_generator::{GeneratorConfig, TableGenerator};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let spec = GenerationSpec::new(vec![SemanticType::Int32, SemanticType::String], 4, 1 << 16)
//!     .with_seed(42);
//! let table = runtime
//!     .block_on(TableGenerator::new(GeneratorConfig::default()).generate(&spec))
//!     .unwrap();
//! assert_eq!(table.num_columns(), 4);
//! ```

pub mod builders;
pub mod engine;
pub mod factory;
pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use engine::RandomEngine;
pub use factory::build_column;
pub use generator::{GeneratorConfig, GeneratorError, TableGenerator};
pub use generators::{generate_value, GeneratedValue, ValueGenerator};
