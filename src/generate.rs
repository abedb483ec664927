//! `generate` command handler.

use crate::{GenerateArgs, OutputFormat};
use anyhow::Context;
use datagen_core::{GenerationSpec, HostColumnStore, TableSummary};
use datagen_generator::{GeneratorConfig, TableGenerator};
use serde::Serialize;
use std::time::Instant;

/// Outcome of one `generate` run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub seed: u32,
    pub threads: usize,
    pub elapsed_ms: u128,
    /// Bytes resident in the host store after hand-off, bitmaps included
    pub resident_bytes: usize,
    pub table: TableSummary,
}

impl GenerateArgs {
    /// Build the spec: start from the spec file (if any), then apply flags.
    pub fn to_spec(&self) -> anyhow::Result<GenerationSpec> {
        let mut spec = match &self.spec_file {
            Some(path) => GenerationSpec::from_file(path)
                .with_context(|| format!("Failed to load spec from {path:?}"))?,
            None => GenerationSpec::new(Vec::new(), 0, 0),
        };

        if !self.types.is_empty() {
            spec.types = self.types.clone();
        }
        if let Some(columns) = self.columns {
            spec.column_count = columns;
        } else if self.spec_file.is_none() {
            spec.column_count = spec.types.len();
        }
        if let Some(table_bytes) = self.table_bytes {
            spec.table_bytes = table_bytes;
        }
        if let Some(seed) = self.seed {
            spec.seed = Some(seed);
        }
        if let Some(null_frequency) = self.null_frequency {
            spec.params.null_frequency = null_frequency;
        }
        if let Some(cardinality) = self.cardinality {
            spec.params.cardinality = cardinality;
        }
        if let Some(avg_run_length) = self.avg_run_length {
            spec.params.avg_run_length = avg_run_length;
        }

        if spec.types.is_empty() {
            anyhow::bail!("no column types given; pass --types or --spec-file");
        }
        Ok(spec)
    }
}

/// Run the generate command and return its report.
pub async fn run_generate(args: &GenerateArgs) -> anyhow::Result<GenerateReport> {
    let spec = args.to_spec()?;
    let generator = TableGenerator::new(GeneratorConfig {
        threads: args.threads,
    });

    tracing::info!(
        "Generating {} columns of {:?} within {} bytes",
        spec.column_count,
        spec.types.iter().map(ToString::to_string).collect::<Vec<_>>(),
        spec.table_bytes
    );

    let start = Instant::now();
    let table = generator
        .generate(&spec)
        .await
        .context("Table generation failed")?;
    let elapsed = start.elapsed();

    let summary = TableSummary::from_table(&table);

    let mut store = HostColumnStore::new();
    let handle = table
        .hand_off(&mut store)
        .context("Storage hand-off failed")?;
    tracing::debug!("Stored table handle {handle}");

    Ok(GenerateReport {
        seed: spec.effective_seed(),
        threads: generator.thread_count(),
        elapsed_ms: elapsed.as_millis(),
        resident_bytes: store.resident_bytes(),
        table: summary,
    })
}

/// Render a report in the requested format.
pub fn render_report(report: &GenerateReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            let mut lines = vec![format!(
                "{} rows x {} columns, {} bytes ({} resident), seed {}, {} threads, {} ms",
                report.table.num_rows,
                report.table.num_columns,
                report.table.byte_size,
                report.resident_bytes,
                report.seed,
                report.threads,
                report.elapsed_ms
            )];
            for (index, column) in report.table.columns.iter().enumerate() {
                lines.push(format!(
                    "  [{index}] {}: nulls={} distinct={} runs={} max_run={} bytes={}",
                    column.semantic_type,
                    column.null_count,
                    column.distinct_values,
                    column.runs,
                    column.max_run_length,
                    column.byte_size
                ));
            }
            Ok(lines.join("\n"))
        }
    }
}

