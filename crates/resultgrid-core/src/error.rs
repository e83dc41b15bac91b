//! Error types.
//!
//! Shaping problems are recoverable by design: a bad row is dropped, a bad
//! batch is rejected, and the rest of the result still renders. The error
//! values here exist so those recoveries can be reported, not so they can
//! abort anything.

use std::fmt;

use crate::lifecycle::QueryToken;

/// A recoverable defect found while shaping or accumulating response data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A row's cell count did not match the column count. The row was
    /// dropped; remaining rows still shape.
    RowArityMismatch {
        /// Index of the row within its batch.
        row_index: usize,
        /// Expected cell count (the column count).
        expected: usize,
        /// Actual cell count.
        actual: usize,
    },
    /// A later batch's column set diverged from the set fixed at reset.
    /// The batch was rejected; accumulated rows are untouched.
    ColumnSetChanged {
        /// Column names fixed at reset.
        expected: Vec<String>,
        /// Column names the offending batch arrived with.
        actual: Vec<String>,
    },
    /// A batch arrived for a query that has been superseded. The batch
    /// was discarded.
    StaleBatch {
        /// Token of the query currently owning the accumulator.
        expected: QueryToken,
        /// Token the batch was stamped with.
        actual: QueryToken,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::RowArityMismatch {
                row_index,
                expected,
                actual,
            } => write!(
                f,
                "row {row_index} has {actual} cells, expected {expected}"
            ),
            ShapeError::ColumnSetChanged { expected, actual } => write!(
                f,
                "batch columns [{}] diverge from fixed columns [{}]",
                actual.join(", "),
                expected.join(", ")
            ),
            ShapeError::StaleBatch { expected, actual } => write!(
                f,
                "batch for superseded query {actual} discarded (current query is {expected})"
            ),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Top-level error type for resultgrid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A recoverable shaping defect (carried for reporting).
    Shape(ShapeError),
    /// A payload that could not be decoded at all.
    MalformedResponse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Shape(e) => write!(f, "shaping error: {e}"),
            Error::MalformedResponse(detail) => write!(f, "malformed response: {detail}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Shape(e) => Some(e),
            Error::MalformedResponse(_) => None,
        }
    }
}

impl From<ShapeError> for Error {
    fn from(e: ShapeError) -> Self {
        Error::Shape(e)
    }
}

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_arity_display() {
        let e = ShapeError::RowArityMismatch {
            row_index: 3,
            expected: 2,
            actual: 5,
        };
        assert_eq!(e.to_string(), "row 3 has 5 cells, expected 2");
    }

    #[test]
    fn test_column_set_display() {
        let e = ShapeError::ColumnSetChanged {
            expected: vec!["a".to_string(), "b".to_string()],
            actual: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        };
        assert_eq!(
            e.to_string(),
            "batch columns [a, b, c] diverge from fixed columns [a, b]"
        );
    }

    #[test]
    fn test_error_wraps_shape() {
        let shape = ShapeError::RowArityMismatch {
            row_index: 0,
            expected: 1,
            actual: 0,
        };
        let error: Error = shape.clone().into();
        assert_eq!(error, Error::Shape(shape));
        assert!(error.to_string().starts_with("shaping error:"));
    }
}
