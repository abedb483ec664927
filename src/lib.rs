//! Columnar benchmark data generator.
//!
//! Thin driver around [`datagen_generator`]: builds a
//! [`GenerationSpec`](datagen_core::GenerationSpec) from a YAML file and/or
//! command-line flags, generates the table, hands it to the host column store
//! and reports the table's shape.
//!
//! # CLI Usage
//!
//! ```bash
//! # Six columns cycling int32, string, bool within 64 MiB
//! columnar-datagen generate --types int32,string,bool --columns 6 --table-bytes 67108864
//!
//! # From a spec file, overriding the seed, as JSON
//! columnar-datagen generate --spec-file bench.yaml --seed 7 --format json
//! ```

use clap::{Args, ValueEnum};
use datagen_core::SemanticType;
use std::path::PathBuf;

pub mod generate;

pub use generate::{render_report, run_generate, GenerateReport};

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Arguments of the `generate` command.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Path to spec YAML file
    #[arg(long, short = 's')]
    pub spec_file: Option<PathBuf>,

    /// Column types, cycled to fill --columns (comma-separated, e.g. int32,string,bool)
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<SemanticType>,

    /// Number of columns (defaults to the number of types)
    #[arg(long)]
    pub columns: Option<usize>,

    /// Target table size in bytes
    #[arg(long)]
    pub table_bytes: Option<u64>,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, env = "DATAGEN_SEED")]
    pub seed: Option<u32>,

    /// Worker threads (defaults to the number of CPUs; does not change the data)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Probability that a value is null
    #[arg(long)]
    pub null_frequency: Option<f32>,

    /// Distinct values sampled per column (0 = no pooling)
    #[arg(long)]
    pub cardinality: Option<usize>,

    /// Mean length of repeated-value runs (1 = no runs)
    #[arg(long)]
    pub avg_run_length: Option<u32>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}
