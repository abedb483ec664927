//! Variable-length string column builder.
//!
//! Record lengths follow a Poisson distribution around 16 characters drawn
//! uniformly from printable ASCII (`'!'..='~'`). Records live in one byte
//! buffer indexed by an offset table of `num_rows + 1` entries.

use super::SamplingPlan;
use crate::engine::RandomEngine;
use crate::generator::GeneratorError;
use datagen_core::{ColumnParams, NullBitmap};
use rand::distributions::Uniform;
use rand_distr::{Distribution, Poisson};

/// Mean record length in characters.
pub const AVG_STRING_LENGTH: usize = 16;

/// Byte buffer, offsets and validity of a string column under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct StringColumn {
    pub chars: Vec<u8>,
    pub offsets: Vec<i32>,
    pub null_mask: NullBitmap,
}

impl StringColumn {
    fn with_capacity(num_rows: usize, num_chars: usize) -> Self {
        let mut offsets = Vec::with_capacity(num_rows + 1);
        offsets.push(0);
        Self {
            chars: Vec::with_capacity(num_chars),
            offsets,
            null_mask: NullBitmap::all_valid(num_rows),
        }
    }

    /// Records appended so far.
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record_range(&self, index: usize) -> std::ops::Range<usize> {
        self.offsets[index] as usize..self.offsets[index + 1] as usize
    }

    fn push_offset(&mut self) -> Result<(), GeneratorError> {
        let end = i32::try_from(self.chars.len())
            .map_err(|_| GeneratorError::StringBufferOverflow(self.chars.len()))?;
        self.offsets.push(end);
        Ok(())
    }

    /// Copy record `src_index` of `src` to the end of this column.
    ///
    /// The bytes are copied even when the source record is null.
    fn copy_from(&mut self, src: &StringColumn, src_index: usize) -> Result<(), GeneratorError> {
        let dst_index = self.len();
        if !src.null_mask.get(src_index) {
            self.null_mask.clear(dst_index);
        }
        self.chars.extend_from_slice(&src.chars[src.record_range(src_index)]);
        self.push_offset()
    }

    /// Append another copy of this column's own record `src_index`.
    fn repeat(&mut self, src_index: usize) -> Result<(), GeneratorError> {
        let dst_index = self.len();
        if !self.null_mask.get(src_index) {
            self.null_mask.clear(dst_index);
        }
        let range = self.record_range(src_index);
        self.chars.extend_from_within(range);
        self.push_offset()
    }
}

/// Draws fresh random records.
#[derive(Debug, Clone)]
struct RecordGenerator {
    length: Poisson<f64>,
    chars: Uniform<u8>,
}

impl RecordGenerator {
    fn new() -> Result<Self, GeneratorError> {
        let length = Poisson::new(AVG_STRING_LENGTH as f64)
            .map_err(|e| GeneratorError::InvalidDistribution(format!("poisson: {e}")))?;
        Ok(Self {
            length,
            chars: Uniform::new_inclusive(b'!', b'~'),
        })
    }

    /// Append one record: length, then characters, then validity.
    fn append(
        &self,
        plan: &SamplingPlan,
        engine: &mut RandomEngine,
        column: &mut StringColumn,
    ) -> Result<(), GeneratorError> {
        let index = column.len();
        let len: f64 = self.length.sample(engine);
        let len = len as usize;
        column
            .chars
            .extend((0..len).map(|_| self.chars.sample(engine)));
        column.push_offset()?;
        if !plan.validity.draw(engine) {
            column.null_mask.clear(index);
        }
        Ok(())
    }
}

/// Build a string column of `num_rows` records with pooled cardinality and
/// run-length repetition.
pub fn build_string_column(
    engine: &mut RandomEngine,
    num_rows: usize,
    params: &ColumnParams,
) -> Result<StringColumn, GeneratorError> {
    let plan = SamplingPlan::new(params, num_rows)?;
    let records = RecordGenerator::new()?;

    let mut column = StringColumn::with_capacity(num_rows, num_rows * AVG_STRING_LENGTH);
    if num_rows == 0 {
        return Ok(column);
    }

    // Phase 1: sample pool
    let mut samples =
        StringColumn::with_capacity(plan.pool_size, plan.pool_size * AVG_STRING_LENGTH);
    for _ in 0..plan.pool_size {
        records.append(&plan, engine, &mut samples)?;
    }

    // Phase 2: draw from the pool, stretching each draw into a run
    let sample_dist = (plan.pool_size > 0).then(|| Uniform::new(0, plan.pool_size));
    let mut row = 0;
    while row < num_rows {
        match &sample_dist {
            Some(dist) => column.copy_from(&samples, dist.sample(engine))?,
            None => records.append(&plan, engine, &mut column)?,
        }

        let run_len = plan.runs.draw(engine, num_rows - row);
        for _ in 1..run_len {
            column.repeat(row)?;
        }
        row += run_len;
    }

    Ok(column)
}
