use super::ids::PointId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Point has {actual} value(s) but its column set has dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Column set mismatch: expected {expected:?}, found {actual:?}")]
    ColumnSetMismatch {
        expected: Vec<u64>,
        actual: Vec<u64>,
    },

    #[error("Column '{label}' (#{index}) is not part of the target column set")]
    ColumnNotFound { index: u64, label: String },

    #[error("Index {index} is out of bounds for a container of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Point {0:?} does not belong to this point set")]
    UnknownPoint(PointId),

    #[error("Point set '{0}' is locked")]
    Locked(String),

    #[error("Row {row} has {actual} value(s), expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
