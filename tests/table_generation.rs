//! End-to-end table generation tests.
//!
//! These exercise the whole pipeline (spec -> seeds -> chunked workers ->
//! builders -> table) and check the shape properties the generated data is
//! meant to have.

use datagen_core::summary::run_lengths;
use datagen_core::{
    ColumnData, ColumnParams, ColumnSummary, GenerationSpec, HostColumnStore, SemanticType,
    TimeUnit,
};
use datagen_generator::{GeneratorConfig, GeneratorError, TableGenerator};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("datagen_generator=debug")
        .with_test_writer()
        .try_init()
        .ok();
}

fn generator(threads: usize) -> TableGenerator {
    TableGenerator::new(GeneratorConfig {
        threads: Some(threads),
    })
}

fn mixed_spec() -> GenerationSpec {
    GenerationSpec::new(
        vec![
            SemanticType::Int32,
            SemanticType::String,
            SemanticType::Bool,
            SemanticType::Float64,
            SemanticType::Timestamp(TimeUnit::Microseconds),
            SemanticType::Duration(TimeUnit::Seconds),
            SemanticType::UInt16,
        ],
        11,
        200_000,
    )
    .with_seed(1234)
}

#[tokio::test]
async fn test_identical_tables_across_thread_counts() {
    init_tracing();
    let spec = mixed_spec();

    let single = generator(1).generate(&spec).await.unwrap();
    for threads in [2, 3, 4, 11, 32] {
        let table = generator(threads).generate(&spec).await.unwrap();
        assert_eq!(table, single, "table differs with {threads} threads");
    }
}

#[tokio::test]
async fn test_repeated_runs_identical() {
    let spec = mixed_spec();
    let first = generator(4).generate(&spec).await.unwrap();
    let second = generator(4).generate(&spec).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_different_seeds_differ() {
    let a = generator(2).generate(&mixed_spec()).await.unwrap();
    let b = generator(2)
        .generate(&mixed_spec().with_seed(4321))
        .await
        .unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_default_seed_is_stable() {
    let spec = GenerationSpec::new(vec![SemanticType::Int64], 2, 8_000);
    let a = generator(2).generate(&spec).await.unwrap();
    let b = generator(1).generate(&spec).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_column_order_follows_cycled_types() {
    let spec = GenerationSpec::new(
        vec![SemanticType::Int32, SemanticType::String, SemanticType::Bool],
        6,
        10_000,
    );
    let expected = vec![
        SemanticType::Int32,
        SemanticType::String,
        SemanticType::Bool,
        SemanticType::Int32,
        SemanticType::String,
        SemanticType::Bool,
    ];
    for threads in [1, 2, 4, 6, 8] {
        let table = generator(threads).generate(&spec).await.unwrap();
        assert_eq!(table.semantic_types(), expected);
    }
}

#[tokio::test]
async fn test_row_count_law() {
    // 4 + 14 + 1 bytes per row, twice
    let spec = GenerationSpec::new(
        vec![SemanticType::Int32, SemanticType::String, SemanticType::Bool],
        6,
        100_000,
    );
    let table = generator(3).generate(&spec).await.unwrap();
    assert_eq!(table.num_rows(), 100_000 / 38);
    assert!(table.columns().iter().all(|c| c.num_rows() == table.num_rows()));
}

#[tokio::test]
async fn test_tiny_budget_yields_empty_table() {
    for table_bytes in [0, 1, 37] {
        let spec = GenerationSpec::new(
            vec![SemanticType::Int32, SemanticType::String, SemanticType::Bool],
            6,
            table_bytes,
        );
        let table = generator(2).generate(&spec).await.unwrap();
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.num_columns(), 6);
        for column in table.columns() {
            assert!(column.data.is_empty());
            assert!(column.null_mask.words().is_empty());
        }
    }
}

#[tokio::test]
async fn test_zero_columns_yields_empty_table() {
    let spec = GenerationSpec::new(vec![SemanticType::Int32], 0, 1_000);
    let table = generator(4).generate(&spec).await.unwrap();
    assert_eq!(table.num_columns(), 0);
    assert_eq!(table.num_rows(), 0);
}

#[tokio::test]
async fn test_null_frequency_near_one_percent() {
    let spec = GenerationSpec::new(vec![SemanticType::Int64], 8, 8 * 8 * 50_000).with_seed(99);
    let table = generator(4).generate(&spec).await.unwrap();

    // Averaged over columns to smooth the per-pool variation
    let nulls: usize = table.columns().iter().map(|c| c.null_count()).sum();
    let fraction = nulls as f64 / (8 * table.num_rows()) as f64;
    assert!(
        (0.005..0.015).contains(&fraction),
        "null fraction {fraction}"
    );
}

#[tokio::test]
async fn test_cardinality_bounded_by_pool() {
    let spec = GenerationSpec::new(
        vec![
            SemanticType::Int64,
            SemanticType::Float32,
            SemanticType::String,
            SemanticType::Timestamp(TimeUnit::Nanoseconds),
        ],
        4,
        4 * 50_000,
    );
    let table = generator(2).generate(&spec).await.unwrap();
    assert!(table.num_rows() >= 1_000);
    for column in table.columns() {
        let summary = ColumnSummary::from_column(column);
        assert!(
            summary.distinct_values <= 1_000,
            "{} has {} distinct values",
            summary.semantic_type,
            summary.distinct_values
        );
    }
}

#[tokio::test]
async fn test_custom_cardinality() {
    let spec = GenerationSpec::new(vec![SemanticType::Int64], 1, 80_000).with_params(
        ColumnParams {
            cardinality: 25,
            ..ColumnParams::default()
        },
    );
    let table = generator(1).generate(&spec).await.unwrap();
    let summary = ColumnSummary::from_column(table.column(0).unwrap());
    assert!(summary.distinct_values <= 25);
    assert!(table.column(1).is_none());
}

#[tokio::test]
async fn test_runs_stay_inside_column() {
    let spec = GenerationSpec::new(vec![SemanticType::Int64, SemanticType::String], 2, 220_000);
    let table = generator(2).generate(&spec).await.unwrap();
    for column in table.columns() {
        let lengths = run_lengths(column);
        assert_eq!(lengths.iter().sum::<usize>(), column.num_rows());

        // Gamma(4, 1) rarely exceeds 15; merged neighbours can add a little
        let mean = column.num_rows() as f64 / lengths.len() as f64;
        assert!((3.0..6.0).contains(&mean), "mean run length {mean}");
    }
}

#[tokio::test]
async fn test_no_runs_when_average_is_one() {
    let spec = GenerationSpec::new(vec![SemanticType::Int64], 1, 80_000).with_params(
        ColumnParams {
            null_frequency: 0.0,
            cardinality: 0,
            avg_run_length: 1,
        },
    );
    let table = generator(1).generate(&spec).await.unwrap();
    let lengths = run_lengths(&table.columns()[0]);
    // Fresh N(0, 65536) draws: adjacent repeats are vanishingly rare
    let mean = table.num_rows() as f64 / lengths.len() as f64;
    assert!(mean < 1.01, "mean run length {mean}");
}

#[tokio::test]
async fn test_string_offsets_well_formed() {
    let spec = GenerationSpec::new(vec![SemanticType::String], 3, 3 * 14 * 2_000);
    let table = generator(3).generate(&spec).await.unwrap();
    for column in table.columns() {
        let ColumnData::String { chars, offsets } = &column.data else {
            panic!("expected a string column, got {}", column.semantic_type());
        };
        assert_eq!(offsets.len(), table.num_rows() + 1);
        assert_eq!(offsets[0], 0);
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*offsets.last().unwrap() as usize, chars.len());
    }
}

#[tokio::test]
async fn test_unimplemented_types_fail_without_table() {
    for ty in [SemanticType::Dictionary32, SemanticType::List, SemanticType::Struct] {
        let spec = GenerationSpec::new(vec![SemanticType::Int32, ty], 4, 1_000);
        let err = generator(2).generate(&spec).await.unwrap_err();
        assert!(matches!(err, GeneratorError::NotImplemented(t) if t == ty));
        assert!(err.to_string().contains(&ty.to_string()));
    }
}

#[tokio::test]
async fn test_hand_off_to_host_store() {
    let spec = mixed_spec();
    let table = generator(4).generate(&spec).await.unwrap();
    let types = table.semantic_types();

    let mut store = HostColumnStore::new();
    let handle = table.hand_off(&mut store).unwrap();
    let stored: Vec<SemanticType> = store
        .table_columns(handle)
        .unwrap()
        .iter()
        .map(|c| c.semantic_type())
        .collect();
    assert_eq!(stored, types);
    assert!(store.resident_bytes() > 0);
}

#[tokio::test]
async fn test_spec_fixture_round_trip() {
    let spec = GenerationSpec::from_file("tests/fixtures/bench_spec.yaml").unwrap();
    assert_eq!(spec.num_rows().unwrap(), 262_144 / 62);

    let table = generator(3).generate(&spec).await.unwrap();
    assert_eq!(table.num_columns(), 8);
    assert_eq!(
        table.semantic_types()[..4],
        [
            SemanticType::Int64,
            SemanticType::String,
            SemanticType::Timestamp(TimeUnit::Milliseconds),
            SemanticType::Bool,
        ]
    );
}
