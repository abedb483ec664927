//! Generation spec: what table to build.
//!
//! A `GenerationSpec` can be built in code or loaded from YAML:
//!
//! ```yaml
//! types: [int32, string, bool]
//! column_count: 6
//! table_bytes: 1048576
//! seed: 13377331
//! params:
//!   null_frequency: 0.01
//!   cardinality: 1000
//!   avg_run_length: 4
//! ```

use crate::types::SemanticType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Seed used when a spec does not name one.
pub const DEFAULT_SEED: u32 = 13377331;

/// Error type for spec operations.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// Error reading spec file
    #[error("Failed to read spec file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Columns requested but no types to cycle through
    #[error("type list is empty but {0} columns were requested")]
    EmptyTypeList(usize),

    /// Type has no generation strategy
    #[error("generation is not implemented for type '{0}'")]
    NotImplemented(SemanticType),
}

/// Builder parameters shared by every column of a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnParams {
    /// Probability that a sampled value is null
    pub null_frequency: f32,
    /// Size of the sample pool; 0 disables pooling
    pub cardinality: usize,
    /// Mean length of runs of repeated values; 1 or less disables runs
    pub avg_run_length: u32,
}

impl Default for ColumnParams {
    fn default() -> Self {
        Self {
            null_frequency: 0.01,
            cardinality: 1000,
            avg_run_length: 4,
        }
    }
}

/// Description of the table to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSpec {
    /// Requested types, cycled to fill `column_count`
    pub types: Vec<SemanticType>,

    /// Number of columns in the output table
    pub column_count: usize,

    /// Target aggregate size of the table in bytes
    pub table_bytes: u64,

    /// Seed for the master engine; `DEFAULT_SEED` when absent
    #[serde(default)]
    pub seed: Option<u32>,

    /// Column builder parameters
    #[serde(default)]
    pub params: ColumnParams,
}

impl GenerationSpec {
    /// Create a spec with the default seed and column parameters.
    pub fn new(types: Vec<SemanticType>, column_count: usize, table_bytes: u64) -> Self {
        Self {
            types,
            column_count,
            table_bytes,
            seed: None,
            params: ColumnParams::default(),
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_params(mut self, params: ColumnParams) -> Self {
        self.params = params;
        self
    }

    /// Load spec from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SpecError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse spec from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SpecError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Seed for the master engine.
    pub fn effective_seed(&self) -> u32 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// The type list cycled to exactly `column_count` entries.
    pub fn expanded_types(&self) -> Result<Vec<SemanticType>, SpecError> {
        if self.column_count == 0 {
            return Ok(Vec::new());
        }
        if self.types.is_empty() {
            return Err(SpecError::EmptyTypeList(self.column_count));
        }
        Ok(self
            .types
            .iter()
            .copied()
            .cycle()
            .take(self.column_count)
            .collect())
    }

    /// Estimated size of one row across all expanded columns.
    pub fn avg_row_bytes(&self) -> Result<usize, SpecError> {
        self.expanded_types()?
            .iter()
            .map(|ty| ty.avg_element_bytes().ok_or(SpecError::NotImplemented(*ty)))
            .sum()
    }

    /// Rows that fit the byte budget; zero when the budget is below one row.
    pub fn num_rows(&self) -> Result<usize, SpecError> {
        let avg_row_bytes = self.avg_row_bytes()?;
        if avg_row_bytes == 0 {
            return Ok(0);
        }
        Ok((self.table_bytes / avg_row_bytes as u64) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimeUnit;
    use std::io::Write;

    #[test]
    fn test_expanded_types_cycle() {
        let spec = GenerationSpec::new(
            vec![SemanticType::Int32, SemanticType::String, SemanticType::Bool],
            7,
            1024,
        );
        let expanded = spec.expanded_types().unwrap();
        assert_eq!(
            expanded,
            vec![
                SemanticType::Int32,
                SemanticType::String,
                SemanticType::Bool,
                SemanticType::Int32,
                SemanticType::String,
                SemanticType::Bool,
                SemanticType::Int32,
            ]
        );
    }

    #[test]
    fn test_expanded_types_truncates_longer_list() {
        let spec = GenerationSpec::new(vec![SemanticType::Int8, SemanticType::Int16], 1, 0);
        assert_eq!(spec.expanded_types().unwrap(), vec![SemanticType::Int8]);
    }

    #[test]
    fn test_empty_type_list() {
        let spec = GenerationSpec::new(vec![], 3, 1024);
        assert!(matches!(
            spec.expanded_types(),
            Err(SpecError::EmptyTypeList(3))
        ));

        let no_columns = GenerationSpec::new(vec![], 0, 1024);
        assert_eq!(no_columns.num_rows().unwrap(), 0);
    }

    #[test]
    fn test_row_count_law() {
        // 4 + 14 + 1 = 19 bytes per row
        let spec = GenerationSpec::new(
            vec![SemanticType::Int32, SemanticType::String, SemanticType::Bool],
            3,
            1000,
        );
        assert_eq!(spec.avg_row_bytes().unwrap(), 19);
        assert_eq!(spec.num_rows().unwrap(), 1000 / 19);
    }

    #[test]
    fn test_budget_below_one_row() {
        let spec = GenerationSpec::new(vec![SemanticType::Int64], 4, 31);
        assert_eq!(spec.num_rows().unwrap(), 0);

        let zero = GenerationSpec::new(vec![SemanticType::Int64], 4, 0);
        assert_eq!(zero.num_rows().unwrap(), 0);
    }

    #[test]
    fn test_unimplemented_type_has_no_size() {
        let spec = GenerationSpec::new(vec![SemanticType::Int32, SemanticType::List], 2, 100);
        assert!(matches!(
            spec.avg_row_bytes(),
            Err(SpecError::NotImplemented(SemanticType::List))
        ));
    }

    #[test]
    fn test_from_yaml_with_defaults() {
        let spec = GenerationSpec::from_yaml(
            r#"
types: [timestamp_ms, float64]
column_count: 4
table_bytes: 4096
"#,
        )
        .unwrap();
        assert_eq!(
            spec.types,
            vec![
                SemanticType::Timestamp(TimeUnit::Milliseconds),
                SemanticType::Float64
            ]
        );
        assert_eq!(spec.effective_seed(), DEFAULT_SEED);
        assert_eq!(spec.params, ColumnParams::default());
    }

    #[test]
    fn test_from_yaml_partial_params() {
        let spec = GenerationSpec::from_yaml(
            r#"
types: [int16]
column_count: 1
table_bytes: 64
seed: 7
params:
  cardinality: 0
"#,
        )
        .unwrap();
        assert_eq!(spec.effective_seed(), 7);
        assert_eq!(spec.params.cardinality, 0);
        assert_eq!(spec.params.avg_run_length, 4);
        assert!((spec.params.null_frequency - 0.01).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_yaml_unknown_type() {
        let result = GenerationSpec::from_yaml("types: [int128]\ncolumn_count: 1\ntable_bytes: 1\n");
        assert!(matches!(result, Err(SpecError::YamlError(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "types: [string]\ncolumn_count: 2\ntable_bytes: 280").unwrap();

        let spec = GenerationSpec::from_file(file.path()).unwrap();
        assert_eq!(spec.num_rows().unwrap(), 10);
    }
}
