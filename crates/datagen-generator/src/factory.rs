//! Dispatch from a semantic type to its column builder.

use crate::builders::{build_sampled_column, build_string_column};
use crate::engine::RandomEngine;
use crate::generator::GeneratorError;
use crate::generators::numeric::{NumericGenerator, NumericValue};
use crate::generators::timestamp::{DurationGenerator, TimestampGenerator};
use crate::generators::{BoolGenerator, DecimalGenerator, ValueGenerator};
use datagen_core::{ColumnData, ColumnParams, RawColumn, SemanticType};

fn sampled<G: ValueGenerator>(
    generator: &G,
    engine: &mut RandomEngine,
    num_rows: usize,
    params: &ColumnParams,
    wrap: impl FnOnce(Vec<G::Value>) -> ColumnData,
) -> Result<RawColumn, GeneratorError> {
    let (values, null_mask) = build_sampled_column(generator, engine, num_rows, params)?;
    Ok(RawColumn::new(wrap(values), null_mask))
}

fn numeric<T: NumericValue>(
    engine: &mut RandomEngine,
    num_rows: usize,
    params: &ColumnParams,
    wrap: impl FnOnce(Vec<T>) -> ColumnData,
) -> Result<RawColumn, GeneratorError> {
    sampled(&NumericGenerator::<T>::new()?, engine, num_rows, params, wrap)
}

/// Build one column of `semantic_type` with `num_rows` rows.
///
/// Fixed-width types go through the sampled-run builder, strings through the
/// string builder. Dictionary, list and struct columns fail with
/// [`GeneratorError::NotImplemented`].
pub fn build_column(
    semantic_type: SemanticType,
    engine: &mut RandomEngine,
    num_rows: usize,
    params: &ColumnParams,
) -> Result<RawColumn, GeneratorError> {
    match semantic_type {
        SemanticType::Bool => sampled(
            &BoolGenerator::new()?,
            engine,
            num_rows,
            params,
            ColumnData::Bool,
        ),
        SemanticType::Int8 => numeric(engine, num_rows, params, ColumnData::Int8),
        SemanticType::Int16 => numeric(engine, num_rows, params, ColumnData::Int16),
        SemanticType::Int32 => numeric(engine, num_rows, params, ColumnData::Int32),
        SemanticType::Int64 => numeric(engine, num_rows, params, ColumnData::Int64),
        SemanticType::UInt8 => numeric(engine, num_rows, params, ColumnData::UInt8),
        SemanticType::UInt16 => numeric(engine, num_rows, params, ColumnData::UInt16),
        SemanticType::UInt32 => numeric(engine, num_rows, params, ColumnData::UInt32),
        SemanticType::UInt64 => numeric(engine, num_rows, params, ColumnData::UInt64),
        SemanticType::Float32 => numeric(engine, num_rows, params, ColumnData::Float32),
        SemanticType::Float64 => numeric(engine, num_rows, params, ColumnData::Float64),
        SemanticType::Timestamp(unit) => sampled(
            &TimestampGenerator::new(unit)?,
            engine,
            num_rows,
            params,
            |values| ColumnData::Timestamp { unit, values },
        ),
        SemanticType::Duration(unit) => sampled(
            &DurationGenerator::new(unit)?,
            engine,
            num_rows,
            params,
            |values| ColumnData::Duration { unit, values },
        ),
        SemanticType::Decimal32 => sampled(
            &DecimalGenerator::<i32>::default(),
            engine,
            num_rows,
            params,
            ColumnData::Decimal32,
        ),
        SemanticType::Decimal64 => sampled(
            &DecimalGenerator::<i64>::default(),
            engine,
            num_rows,
            params,
            ColumnData::Decimal64,
        ),
        SemanticType::String => {
            let column = build_string_column(engine, num_rows, params)?;
            Ok(RawColumn::new(
                ColumnData::String {
                    chars: column.chars,
                    offsets: column.offsets,
                },
                column.null_mask,
            ))
        }
        SemanticType::Dictionary32 | SemanticType::List | SemanticType::Struct => {
            Err(GeneratorError::NotImplemented(semantic_type))
        }
    }
}
