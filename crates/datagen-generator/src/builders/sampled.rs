//! Fixed-width column builder.

use super::SamplingPlan;
use crate::engine::RandomEngine;
use crate::generator::GeneratorError;
use crate::generators::ValueGenerator;
use datagen_core::{ColumnParams, NullBitmap};
use rand::distributions::Uniform;
use rand_distr::Distribution;

/// Build `num_rows` values of `generator`'s type with pooled cardinality and
/// run-length repetition.
///
/// Returns the value buffer and its validity. Null rows hold the type's
/// default value.
pub fn build_sampled_column<G: ValueGenerator>(
    generator: &G,
    engine: &mut RandomEngine,
    num_rows: usize,
    params: &ColumnParams,
) -> Result<(Vec<G::Value>, NullBitmap), GeneratorError> {
    let plan = SamplingPlan::new(params, num_rows)?;

    let mut values = vec![G::Value::default(); num_rows];
    let mut null_mask = NullBitmap::all_valid(num_rows);
    if num_rows == 0 {
        return Ok((values, null_mask));
    }

    // Phase 1: sample pool
    let mut samples = vec![G::Value::default(); plan.pool_size];
    let mut samples_mask = NullBitmap::all_valid(plan.pool_size);
    for slot in 0..plan.pool_size {
        if plan.validity.draw(engine) {
            samples[slot] = generator.generate(engine);
        } else {
            samples_mask.clear(slot);
        }
    }

    // Phase 2: draw from the pool, stretching each draw into a run
    let sample_dist = (plan.pool_size > 0).then(|| Uniform::new(0, plan.pool_size));
    let mut row = 0;
    while row < num_rows {
        match &sample_dist {
            Some(dist) => {
                let index = dist.sample(engine);
                if samples_mask.get(index) {
                    values[row] = samples[index];
                } else {
                    null_mask.clear(row);
                }
            }
            None => {
                if plan.validity.draw(engine) {
                    values[row] = generator.generate(engine);
                } else {
                    null_mask.clear(row);
                }
            }
        }

        let run_len = plan.runs.draw(engine, num_rows - row);
        let valid = null_mask.get(row);
        for offset in 1..run_len {
            values[row + offset] = values[row];
            if !valid {
                null_mask.clear(row + offset);
            }
        }
        row += run_len;
    }

    Ok((values, null_mask))
}
