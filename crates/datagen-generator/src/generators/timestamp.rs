//! Timestamp and duration value generators.
//!
//! Both draw a whole number of seconds from a Geometric distribution plus a
//! uniform sub-second remainder in nanoseconds, then truncate to the column's
//! native unit.

use super::ValueGenerator;
use crate::engine::RandomEngine;
use crate::generator::GeneratorError;
use datagen_core::TimeUnit;
use rand::distributions::Uniform;
use rand_distr::{Distribution, Geometric};

/// Reference "now" for generated timestamps: 2020-06-01, in seconds since the epoch.
pub const REFERENCE_EPOCH_SECONDS: i64 = 1_591_053_936;

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;
const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Seconds plus sub-second nanoseconds, as one nanosecond count.
#[derive(Debug, Clone)]
struct NanosSampler {
    seconds: Geometric,
    subsecond: Uniform<i64>,
}

impl NanosSampler {
    fn new(success_probability: f64) -> Result<Self, GeneratorError> {
        let seconds = Geometric::new(success_probability)
            .map_err(|e| GeneratorError::InvalidDistribution(format!("geometric: {e}")))?;
        Ok(Self {
            seconds,
            subsecond: Uniform::new_inclusive(0, NANOS_PER_SECOND),
        })
    }

    fn sample(&self, engine: &mut RandomEngine) -> i64 {
        let seconds = self.seconds.sample(engine).min(i64::MAX as u64) as i64;
        seconds
            .saturating_mul(NANOS_PER_SECOND)
            .saturating_add(self.subsecond.sample(engine))
    }
}

/// Recent timestamps: most fall within a few years before the reference instant.
#[derive(Debug, Clone)]
pub struct TimestampGenerator {
    unit: TimeUnit,
    offset: NanosSampler,
}

impl TimestampGenerator {
    pub fn new(unit: TimeUnit) -> Result<Self, GeneratorError> {
        // One-in-two-years success probability per second
        Ok(Self {
            unit,
            offset: NanosSampler::new(1.0 / (2.0 * SECONDS_PER_YEAR))?,
        })
    }
}

impl ValueGenerator for TimestampGenerator {
    type Value = i64;

    fn generate(&self, engine: &mut RandomEngine) -> i64 {
        let now_ns = REFERENCE_EPOCH_SECONDS * NANOS_PER_SECOND;
        let timestamp_ns = now_ns.saturating_sub(self.offset.sample(engine));
        timestamp_ns / self.unit.nanos_per_tick()
    }
}

/// Non-negative durations with a median of roughly one year.
#[derive(Debug, Clone)]
pub struct DurationGenerator {
    unit: TimeUnit,
    length: NanosSampler,
}

impl DurationGenerator {
    pub fn new(unit: TimeUnit) -> Result<Self, GeneratorError> {
        Ok(Self {
            unit,
            length: NanosSampler::new(1.0 / SECONDS_PER_YEAR)?,
        })
    }
}

impl ValueGenerator for DurationGenerator {
    type Value = i64;

    fn generate(&self, engine: &mut RandomEngine) -> i64 {
        self.length.sample(engine) / self.unit.nanos_per_tick()
    }
}
