//! Parallel, deterministic table generation.

use crate::builders::SamplingPlan;
use crate::engine::RandomEngine;
use crate::factory::build_column;
use datagen_core::{ColumnParams, GenerationSpec, RawColumn, SemanticType, SpecError, Table};
use std::ops::Range;
use tracing::{debug, info, warn};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Requested type has no generation strategy
    #[error("generation is not implemented for type '{0}'")]
    NotImplemented(SemanticType),

    /// A distribution rejected its parameters
    #[error("Invalid distribution parameters: {0}")]
    InvalidDistribution(String),

    /// String bytes no longer addressable by 32-bit offsets
    #[error("string column exceeds the 32-bit offset range ({0} bytes)")]
    StringBufferOverflow(usize),

    /// A worker task panicked or was cancelled
    #[error("Column generation task failed: {0}")]
    TaskFailed(String),

    /// Spec error
    #[error("Spec error: {0}")]
    Spec(#[from] SpecError),
}

/// Runtime settings that do not affect the generated data.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Worker count; defaults to the number of CPUs
    pub threads: Option<usize>,
}

/// Builds whole tables, fanning columns out across worker tasks.
///
/// Output depends only on the [`GenerationSpec`]: the worker count changes how
/// columns are grouped into tasks, never what they contain or their order.
#[derive(Debug, Clone, Default)]
pub struct TableGenerator {
    config: GeneratorConfig,
}

impl TableGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Number of worker tasks a table is split across.
    pub fn thread_count(&self) -> usize {
        self.config.threads.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Generate the table described by `spec`.
    ///
    /// Unsupported types and invalid parameters are rejected before any work
    /// is dispatched. If a worker fails, the whole build fails.
    pub async fn generate(&self, spec: &GenerationSpec) -> Result<Table, GeneratorError> {
        let types = spec.expanded_types()?;
        if let Some(ty) = types.iter().find(|ty| !ty.is_implemented()) {
            return Err(GeneratorError::NotImplemented(*ty));
        }
        SamplingPlan::new(&spec.params, 0)?;

        let avg_row_bytes = spec.avg_row_bytes()?;
        let num_rows = spec.num_rows()?;
        if num_rows == 0 && !types.is_empty() {
            warn!(
                table_bytes = spec.table_bytes,
                avg_row_bytes, "Byte budget is smaller than one row; table will be empty"
            );
        }

        let seeds = derive_column_seeds(spec.effective_seed(), types.len());
        let chunks = partition_columns(types.len(), self.thread_count());
        info!(
            columns = types.len(),
            num_rows,
            avg_row_bytes,
            chunks = chunks.len(),
            "Generating table"
        );

        let mut tasks = Vec::with_capacity(chunks.len());
        for (chunk, range) in chunks.into_iter().enumerate() {
            let chunk_types = types[range.clone()].to_vec();
            let chunk_seeds = seeds[range.clone()].to_vec();
            let params = spec.params;
            debug!(chunk, columns = ?range, "Dispatching column chunk");
            tasks.push(tokio::task::spawn_blocking(move || {
                build_chunk(&chunk_types, &chunk_seeds, num_rows, &params)
            }));
        }

        // Reassemble in chunk order, not completion order
        let mut columns = Vec::with_capacity(types.len());
        for (chunk, task) in tasks.into_iter().enumerate() {
            let built = task
                .await
                .map_err(|e| GeneratorError::TaskFailed(format!("chunk {chunk}: {e}")))??;
            columns.extend(built);
        }

        Ok(Table::new(columns, num_rows))
    }
}

/// Draw one seed per column from the master engine, in column order.
///
/// This is the only use of shared random state; it runs before any task is
/// dispatched so task scheduling cannot influence seed assignment.
pub fn derive_column_seeds(master_seed: u32, column_count: usize) -> Vec<u32> {
    let mut master = RandomEngine::seeded(master_seed);
    (0..column_count).map(|_| master.next()).collect()
}

/// Split `column_count` columns into contiguous chunks of
/// `ceil(column_count / thread_count)` columns.
pub fn partition_columns(column_count: usize, thread_count: usize) -> Vec<Range<usize>> {
    if column_count == 0 {
        return Vec::new();
    }
    let per_chunk = column_count.div_ceil(thread_count.max(1));
    (0..column_count)
        .step_by(per_chunk)
        .map(|start| start..(start + per_chunk).min(column_count))
        .collect()
}

fn build_chunk(
    types: &[SemanticType],
    seeds: &[u32],
    num_rows: usize,
    params: &ColumnParams,
) -> Result<Vec<RawColumn>, GeneratorError> {
    types
        .iter()
        .zip(seeds)
        .map(|(&ty, &seed)| {
            let mut engine = RandomEngine::seeded(seed);
            let column = build_column(ty, &mut engine, num_rows, params)?;
            debug!(semantic_type = %ty, seed, nulls = column.null_count(), "Built column");
            Ok(column)
        })
        .collect()
}
