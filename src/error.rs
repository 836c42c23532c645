//! Error types for trueno-facet operations.

use thiserror::Error;

use crate::config::Axis;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing faceted plot data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The trailing attribute of an empty axis was requested.
    ///
    /// Recoverable: callers treat the axis as having no coordinates.
    #[error("No attribute on the {axis} axis")]
    NoSuchAttribute {
        /// The empty axis.
        axis: Axis,
    },

    /// A measure was placed before the last position of an axis.
    #[error("Measure {attribute} must be the last attribute on the {axis} axis")]
    MisplacedMeasure {
        /// Name of the offending measure.
        attribute: String,
        /// Axis the measure was placed on.
        axis: Axis,
    },

    /// An aggregated row lacks an attribute the config places on an axis.
    #[error("Attribute {0} is not present in the aggregated row")]
    MissingAttribute(String),

    /// The tabular source has no column with this name.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A measure column holds values that cannot be reduced numerically.
    #[error("Column {0} contains non-numeric values")]
    NonNumericColumn(String),

    /// A column was added with a length different from the table's.
    #[error("Column {column} has {found} values, table has {expected} rows")]
    ColumnLength {
        /// Column name.
        column: String,
        /// Number of rows in the table.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },

    /// Unknown aggregation function name.
    #[error("Unknown aggregation: {0}")]
    UnknownAggregation(String),

    /// Unknown mark type name.
    #[error("Unknown mark type: {0}")]
    UnknownMarkType(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Scale domain error (e.g., empty or zero-width domain).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoSuchAttribute { axis: Axis::X };
        assert_eq!(err.to_string(), "No attribute on the x axis");
    }

    #[test]
    fn test_column_length_display() {
        let err = Error::ColumnLength {
            column: "Sales".to_string(),
            expected: 10,
            found: 20,
        };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("20"));
        assert!(err.to_string().contains("Sales"));
    }

    #[test]
    fn test_misplaced_measure_display() {
        let err = Error::MisplacedMeasure {
            attribute: "Profit".to_string(),
            axis: Axis::Y,
        };
        assert!(err.to_string().contains("Profit"));
        assert!(err.to_string().contains("y axis"));
    }
}
