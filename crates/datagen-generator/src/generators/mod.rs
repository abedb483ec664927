//! Individual value generators for different semantic types.
//!
//! Each generator owns its distribution and produces one value per call from a
//! [`RandomEngine`]. [`generate_value`] is the type-tag dispatcher used when a
//! single loosely-typed value is needed; the column builders use the typed
//! generators directly.

pub mod numeric;
pub mod timestamp;

use crate::engine::RandomEngine;
use crate::generator::GeneratorError;
use datagen_core::SemanticType;
use numeric::{NumericGenerator, NumericValue};
use rand::distributions::Bernoulli;
use rand_distr::Distribution;
use std::marker::PhantomData;
use timestamp::{DurationGenerator, TimestampGenerator};

/// Trait for generating values.
pub trait ValueGenerator {
    type Value: Copy + Default;

    /// Generate one value using the given engine.
    fn generate(&self, engine: &mut RandomEngine) -> Self::Value;
}

/// Fair coin.
#[derive(Debug, Clone)]
pub struct BoolGenerator {
    coin: Bernoulli,
}

impl BoolGenerator {
    pub fn new() -> Result<Self, GeneratorError> {
        let coin = Bernoulli::new(0.5)
            .map_err(|e| GeneratorError::InvalidDistribution(format!("bernoulli: {e}")))?;
        Ok(Self { coin })
    }
}

impl ValueGenerator for BoolGenerator {
    type Value = bool;

    fn generate(&self, engine: &mut RandomEngine) -> bool {
        self.coin.sample(engine)
    }
}

/// Fixed-point placeholder: always the zero value.
///
/// There is no decimal distribution yet; columns come out all zero (with
/// nulls still applied). Consumes no randomness.
#[derive(Debug, Clone, Default)]
pub struct DecimalGenerator<T> {
    _marker: PhantomData<T>,
}

impl<T: Copy + Default> ValueGenerator for DecimalGenerator<T> {
    type Value = T;

    fn generate(&self, _engine: &mut RandomEngine) -> T {
        T::default()
    }
}

/// One value of any fixed-width semantic type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratedValue {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    /// Ticks of the type's time unit since the epoch
    Timestamp(i64),
    /// Ticks of the type's time unit
    Duration(i64),
    Decimal32(i32),
    Decimal64(i64),
}

fn numeric<T: NumericValue>(engine: &mut RandomEngine) -> Result<T, GeneratorError> {
    Ok(NumericGenerator::<T>::new()?.generate(engine))
}

/// Generate one value of the requested type.
///
/// Strings are produced record-by-record by the string column builder and are
/// rejected here along with the types that have no generation strategy.
pub fn generate_value(
    semantic_type: SemanticType,
    engine: &mut RandomEngine,
) -> Result<GeneratedValue, GeneratorError> {
    let value = match semantic_type {
        SemanticType::Bool => GeneratedValue::Bool(BoolGenerator::new()?.generate(engine)),
        SemanticType::Int8 => GeneratedValue::Int8(numeric(engine)?),
        SemanticType::Int16 => GeneratedValue::Int16(numeric(engine)?),
        SemanticType::Int32 => GeneratedValue::Int32(numeric(engine)?),
        SemanticType::Int64 => GeneratedValue::Int64(numeric(engine)?),
        SemanticType::UInt8 => GeneratedValue::UInt8(numeric(engine)?),
        SemanticType::UInt16 => GeneratedValue::UInt16(numeric(engine)?),
        SemanticType::UInt32 => GeneratedValue::UInt32(numeric(engine)?),
        SemanticType::UInt64 => GeneratedValue::UInt64(numeric(engine)?),
        SemanticType::Float32 => GeneratedValue::Float32(numeric(engine)?),
        SemanticType::Float64 => GeneratedValue::Float64(numeric(engine)?),
        SemanticType::Timestamp(unit) => {
            GeneratedValue::Timestamp(TimestampGenerator::new(unit)?.generate(engine))
        }
        SemanticType::Duration(unit) => {
            GeneratedValue::Duration(DurationGenerator::new(unit)?.generate(engine))
        }
        SemanticType::Decimal32 => {
            GeneratedValue::Decimal32(DecimalGenerator::default().generate(engine))
        }
        SemanticType::Decimal64 => {
            GeneratedValue::Decimal64(DecimalGenerator::default().generate(engine))
        }
        SemanticType::String
        | SemanticType::Dictionary32
        | SemanticType::List
        | SemanticType::Struct => return Err(GeneratorError::NotImplemented(semantic_type)),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagen_core::TimeUnit;

    #[test]
    fn test_bool_is_roughly_fair() {
        let generator = BoolGenerator::new().unwrap();
        let mut engine = RandomEngine::seeded(42);
        let trues = (0..10_000)
            .filter(|_| generator.generate(&mut engine))
            .count();
        assert!((4_700..5_300).contains(&trues), "{trues} trues");
    }

    #[test]
    fn test_decimal_is_zero_and_consumes_nothing() {
        let mut engine = RandomEngine::seeded(1);
        let mut untouched = RandomEngine::seeded(1);
        let generator = DecimalGenerator::<i64>::default();
        assert_eq!(generator.generate(&mut engine), 0);
        assert_eq!(engine.next(), untouched.next());
    }

    #[test]
    fn test_generate_value_dispatch() {
        let mut engine = RandomEngine::seeded(42);
        assert!(matches!(
            generate_value(SemanticType::Bool, &mut engine).unwrap(),
            GeneratedValue::Bool(_)
        ));
        assert!(matches!(
            generate_value(SemanticType::UInt32, &mut engine).unwrap(),
            GeneratedValue::UInt32(_)
        ));
        assert!(matches!(
            generate_value(SemanticType::Timestamp(TimeUnit::Microseconds), &mut engine).unwrap(),
            GeneratedValue::Timestamp(_)
        ));
        assert_eq!(
            generate_value(SemanticType::Decimal32, &mut engine).unwrap(),
            GeneratedValue::Decimal32(0)
        );
    }

    #[test]
    fn test_generate_value_matches_typed_generator() {
        let mut a = RandomEngine::seeded(3);
        let mut b = RandomEngine::seeded(3);
        let typed = NumericGenerator::<i16>::new().unwrap().generate(&mut b);
        assert_eq!(
            generate_value(SemanticType::Int16, &mut a).unwrap(),
            GeneratedValue::Int16(typed)
        );
    }

    #[test]
    fn test_unimplemented_types_fail() {
        let mut engine = RandomEngine::seeded(42);
        for ty in [SemanticType::Dictionary32, SemanticType::List, SemanticType::Struct] {
            assert!(matches!(
                generate_value(ty, &mut engine),
                Err(GeneratorError::NotImplemented(t)) if t == ty
            ));
        }
    }
}
