//! Column builders.
//!
//! Both builders use the same two-phase strategy: generate a small pool of
//! sample values, then fill the column by drawing from the pool and repeating
//! each drawn row for a Gamma-distributed run length. This yields bounded
//! cardinality and run-length locality similar to real data.

pub mod sampled;
pub mod string;

use crate::engine::RandomEngine;
use crate::generator::GeneratorError;
use datagen_core::ColumnParams;
use rand::Rng;
use rand_distr::{Distribution, Gamma};

pub use sampled::build_sampled_column;
pub use string::{build_string_column, StringColumn};

/// Per-row validity draw.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ValidityDraw {
    null_frequency: f32,
}

impl ValidityDraw {
    pub(crate) fn new(null_frequency: f32) -> Result<Self, GeneratorError> {
        if !(0.0..=1.0).contains(&null_frequency) {
            return Err(GeneratorError::InvalidDistribution(format!(
                "null frequency {null_frequency} is not a probability"
            )));
        }
        Ok(Self { null_frequency })
    }

    /// Whether the next record is valid. Consumes no randomness when nulls
    /// are disabled.
    pub(crate) fn draw(&self, engine: &mut RandomEngine) -> bool {
        self.null_frequency == 0.0 || engine.gen::<f32>() >= self.null_frequency
    }
}

/// Run-length draw: Gamma(4, avg_run_length / 4), rounded.
#[derive(Debug, Clone)]
pub(crate) struct RunLengthDraw {
    gamma: Option<Gamma<f32>>,
}

impl RunLengthDraw {
    pub(crate) fn new(avg_run_length: u32) -> Result<Self, GeneratorError> {
        if avg_run_length <= 1 {
            return Ok(Self { gamma: None });
        }
        let gamma = Gamma::new(4.0, avg_run_length as f32 / 4.0)
            .map_err(|e| GeneratorError::InvalidDistribution(format!("gamma: {e}")))?;
        Ok(Self { gamma: Some(gamma) })
    }

    /// Length of the next run, between 1 and `remaining` rows.
    pub(crate) fn draw(&self, engine: &mut RandomEngine, remaining: usize) -> usize {
        match &self.gamma {
            Some(gamma) => (gamma.sample(engine).round() as usize).clamp(1, remaining),
            None => 1,
        }
    }
}

/// Distributions shared by a single column build.
#[derive(Debug, Clone)]
pub(crate) struct SamplingPlan {
    pub(crate) validity: ValidityDraw,
    pub(crate) runs: RunLengthDraw,
    /// Pool size for this column; 0 means every row is generated fresh
    pub(crate) pool_size: usize,
}

impl SamplingPlan {
    pub(crate) fn new(params: &ColumnParams, num_rows: usize) -> Result<Self, GeneratorError> {
        Ok(Self {
            validity: ValidityDraw::new(params.null_frequency)?,
            runs: RunLengthDraw::new(params.avg_run_length)?,
            pool_size: params.cardinality.min(num_rows),
        })
    }
}
