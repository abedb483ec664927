//! Numeric value generators.
//!
//! Values follow a zero-mean Normal distribution whose standard deviation
//! grows with the type width (`2^(bits / 4)`), clamped to the representable
//! range. Unsigned types take the absolute value of the sample.

use super::ValueGenerator;
use crate::engine::RandomEngine;
use crate::generator::GeneratorError;
use rand_distr::{Distribution, Normal};
use std::marker::PhantomData;

/// Primitive numeric type a column can hold.
pub trait NumericValue: Copy + Default + Send + 'static {
    const BITS: u32;
    const UNSIGNED: bool;
    const LOWEST: f64;
    const HIGHEST: f64;

    /// Convert a sample already clamped to `LOWEST..=HIGHEST`.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_numeric_value {
    ($($ty:ty => $unsigned:expr),* $(,)?) => {
        $(
            impl NumericValue for $ty {
                const BITS: u32 = (std::mem::size_of::<$ty>() * 8) as u32;
                const UNSIGNED: bool = $unsigned;
                const LOWEST: f64 = <$ty>::MIN as f64;
                const HIGHEST: f64 = <$ty>::MAX as f64;

                fn from_f64(value: f64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_numeric_value!(
    i8 => false,
    i16 => false,
    i32 => false,
    i64 => false,
    u8 => true,
    u16 => true,
    u32 => true,
    u64 => true,
    f32 => false,
    f64 => false,
);

/// Standard deviation used for a type of the given bit width.
pub fn stddev_for_bits(bits: u32) -> f64 {
    2f64.powi((bits / 4) as i32)
}

/// Normal-distributed generator for one numeric type.
#[derive(Debug, Clone)]
pub struct NumericGenerator<T> {
    normal: Normal<f64>,
    _marker: PhantomData<T>,
}

impl<T: NumericValue> NumericGenerator<T> {
    pub fn new() -> Result<Self, GeneratorError> {
        let normal = Normal::new(0.0, stddev_for_bits(T::BITS))
            .map_err(|e| GeneratorError::InvalidDistribution(format!("normal: {e}")))?;
        Ok(Self {
            normal,
            _marker: PhantomData,
        })
    }
}

impl<T: NumericValue> ValueGenerator for NumericGenerator<T> {
    type Value = T;

    fn generate(&self, engine: &mut RandomEngine) -> T {
        let mut sample = self.normal.sample(engine);
        if T::UNSIGNED {
            sample = sample.abs();
        }
        T::from_f64(sample.clamp(T::LOWEST, T::HIGHEST))
    }
}
