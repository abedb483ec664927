//! Semantic types understood by the generator.
//!
//! `SemanticType` is the logical kind of a generated column, independent of how
//! the storage layer lays it out. It drives both the value-generation strategy
//! and the per-element size estimate used when turning a byte budget into a
//! row count.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resolution of a timestamp or duration column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Days,
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    /// Number of nanoseconds in one tick of this unit.
    pub const fn nanos_per_tick(self) -> i64 {
        match self {
            TimeUnit::Days => 86_400 * 1_000_000_000,
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Nanoseconds => 1,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Days => "days",
            TimeUnit::Seconds => "s",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Microseconds => "us",
            TimeUnit::Nanoseconds => "ns",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "days" => Some(TimeUnit::Days),
            "s" => Some(TimeUnit::Seconds),
            "ms" => Some(TimeUnit::Milliseconds),
            "us" => Some(TimeUnit::Microseconds),
            "ns" => Some(TimeUnit::Nanoseconds),
            _ => None,
        }
    }
}

/// Logical data kind requested for a generated column.
///
/// The set is closed. `Dictionary32`, `List` and `Struct` are part of the
/// type universe so they can be named in a spec, but no generation strategy
/// exists for them and requesting one fails the build.
///
/// # String form
///
/// Used by YAML spec files and the CLI:
/// ```yaml
/// types: [bool, int32, uint64, float64, timestamp_ms, duration_s, decimal64, string]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    // Boolean
    Bool,

    // Signed integers
    Int8,
    Int16,
    Int32,
    Int64,

    // Unsigned integers
    UInt8,
    UInt16,
    UInt32,
    UInt64,

    // Floating point
    Float32,
    Float64,

    // Temporal
    /// Point in time, stored as a count of `TimeUnit` since the Unix epoch
    Timestamp(TimeUnit),
    /// Elapsed time, stored as a count of `TimeUnit`
    Duration(TimeUnit),

    // Fixed point
    Decimal32,
    Decimal64,

    // Variable length
    String,

    // Nested and encoded types (no generation strategy)
    Dictionary32,
    List,
    Struct,
}

impl SemanticType {
    /// Byte width of one element for fixed-width types.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            SemanticType::Bool | SemanticType::Int8 | SemanticType::UInt8 => Some(1),
            SemanticType::Int16 | SemanticType::UInt16 => Some(2),
            SemanticType::Int32
            | SemanticType::UInt32
            | SemanticType::Float32
            | SemanticType::Decimal32 => Some(4),
            SemanticType::Int64
            | SemanticType::UInt64
            | SemanticType::Float64
            | SemanticType::Decimal64
            | SemanticType::Timestamp(_)
            | SemanticType::Duration(_) => Some(8),
            SemanticType::String
            | SemanticType::Dictionary32
            | SemanticType::List
            | SemanticType::Struct => None,
        }
    }

    /// Average number of bytes one element occupies, used for row budgeting.
    ///
    /// Strings are estimated as a 4-byte offset, a 4-byte length and a
    /// 6-byte payload. Returns `None` for types without a generation strategy.
    pub fn avg_element_bytes(&self) -> Option<usize> {
        match self {
            SemanticType::String => Some(4 + 4 + 6),
            other => other.fixed_width(),
        }
    }

    /// Whether the generator can produce columns of this type.
    pub fn is_implemented(&self) -> bool {
        !matches!(
            self,
            SemanticType::Dictionary32 | SemanticType::List | SemanticType::Struct
        )
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Bool => f.write_str("bool"),
            SemanticType::Int8 => f.write_str("int8"),
            SemanticType::Int16 => f.write_str("int16"),
            SemanticType::Int32 => f.write_str("int32"),
            SemanticType::Int64 => f.write_str("int64"),
            SemanticType::UInt8 => f.write_str("uint8"),
            SemanticType::UInt16 => f.write_str("uint16"),
            SemanticType::UInt32 => f.write_str("uint32"),
            SemanticType::UInt64 => f.write_str("uint64"),
            SemanticType::Float32 => f.write_str("float32"),
            SemanticType::Float64 => f.write_str("float64"),
            SemanticType::Timestamp(unit) => write!(f, "timestamp_{}", unit.suffix()),
            SemanticType::Duration(unit) => write!(f, "duration_{}", unit.suffix()),
            SemanticType::Decimal32 => f.write_str("decimal32"),
            SemanticType::Decimal64 => f.write_str("decimal64"),
            SemanticType::String => f.write_str("string"),
            SemanticType::Dictionary32 => f.write_str("dictionary32"),
            SemanticType::List => f.write_str("list"),
            SemanticType::Struct => f.write_str("struct"),
        }
    }
}

/// Error returned when a type name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown semantic type: {0}")]
pub struct ParseTypeError(pub String);

impl FromStr for SemanticType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let ty = match name.as_str() {
            "bool" | "boolean" => SemanticType::Bool,
            "int8" => SemanticType::Int8,
            "int16" => SemanticType::Int16,
            "int32" => SemanticType::Int32,
            "int64" => SemanticType::Int64,
            "uint8" => SemanticType::UInt8,
            "uint16" => SemanticType::UInt16,
            "uint32" => SemanticType::UInt32,
            "uint64" => SemanticType::UInt64,
            "float32" => SemanticType::Float32,
            "float64" => SemanticType::Float64,
            "decimal32" => SemanticType::Decimal32,
            "decimal64" => SemanticType::Decimal64,
            "string" => SemanticType::String,
            "dictionary32" => SemanticType::Dictionary32,
            "list" => SemanticType::List,
            "struct" => SemanticType::Struct,
            other => {
                if let Some(suffix) = other.strip_prefix("timestamp_") {
                    TimeUnit::from_suffix(suffix)
                        .map(SemanticType::Timestamp)
                        .ok_or_else(|| ParseTypeError(s.to_string()))?
                } else if let Some(suffix) = other.strip_prefix("duration_") {
                    TimeUnit::from_suffix(suffix)
                        .map(SemanticType::Duration)
                        .ok_or_else(|| ParseTypeError(s.to_string()))?
                } else {
                    return Err(ParseTypeError(s.to_string()));
                }
            }
        };
        Ok(ty)
    }
}

// Serialized as the same snake_case names used by `Display`/`FromStr`.
impl Serialize for SemanticType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemanticType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
