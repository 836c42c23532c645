//! Attribute model: categorical dimensions and aggregatable measures.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use trueno::Vector;

use super::value::DataValue;
use crate::error::{Error, Result};

/// Reduction applied to a measure column within one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Aggregation {
    /// Sum of the values.
    #[default]
    Sum,
    /// Arithmetic mean.
    Mean,
    /// Median (mean of the two middle values for even counts).
    Median,
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
    /// Number of non-missing values.
    Count,
}

impl Aggregation {
    /// Lowercase function name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Mean => "mean",
            Aggregation::Median => "median",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::Count => "count",
        }
    }

    /// Reduce a group's numeric values.
    ///
    /// Empty groups reduce to `0` for `Sum` and `Count` and to
    /// [`DataValue::Null`] otherwise.
    #[must_use]
    pub fn reduce(self, values: &[f32]) -> DataValue {
        if values.is_empty() {
            return match self {
                Aggregation::Sum | Aggregation::Count => DataValue::Number(0.0),
                _ => DataValue::Null,
            };
        }

        let vec = Vector::from_slice(values);
        let reduced = match self {
            Aggregation::Sum => vec.sum().ok(),
            Aggregation::Mean => vec.mean().ok(),
            Aggregation::Min => vec.min().ok(),
            Aggregation::Max => vec.max().ok(),
            Aggregation::Count => Some(values.len() as f32),
            Aggregation::Median => Some(median(values)),
        };
        reduced.map_or(DataValue::Null, DataValue::Number)
    }
}

fn median(values: &[f32]) -> f32 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Aggregation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Aggregation::Sum),
            "mean" | "avg" => Ok(Aggregation::Mean),
            "median" => Ok(Aggregation::Median),
            "min" => Ok(Aggregation::Min),
            "max" => Ok(Aggregation::Max),
            "count" => Ok(Aggregation::Count),
            _ => Err(Error::UnknownAggregation(s.to_string())),
        }
    }
}

/// A categorical column used to split data into groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    name: String,
}

impl Dimension {
    /// Create a dimension for the named column.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A numeric column reduced by an [`Aggregation`] within each group.
///
/// Identity is the column name alone: `Sum(Profit)` and `Mean(Profit)`
/// name the same attribute.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measure {
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    aggregation: Aggregation,
}

impl Measure {
    /// Create a summed measure for the named column.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_aggregation(name, Aggregation::Sum)
    }

    /// Create a measure with an explicit aggregation.
    #[must_use]
    pub fn with_aggregation(name: &str, aggregation: Aggregation) -> Self {
        Self {
            name: name.to_string(),
            aggregation,
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aggregation applied per group.
    #[must_use]
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Human-readable label, e.g. `Sum(Quantity)`.
    #[must_use]
    pub fn label(&self) -> String {
        let name = self.aggregation.name();
        let mut chars = name.chars();
        let capitalized: String = chars
            .next()
            .map(|c| c.to_ascii_uppercase())
            .into_iter()
            .chain(chars)
            .collect();
        format!("{capitalized}({})", self.name)
    }
}

impl PartialEq for Measure {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Measure {}

impl Hash for Measure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A column reference: either a [`Dimension`] or a [`Measure`].
///
/// Attributes are identifiers, not data. Equality and hashing use the
/// kind and the column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    /// Categorical split key.
    Dimension(Dimension),
    /// Aggregated numeric column.
    Measure(Measure),
}

impl Attribute {
    /// Shorthand for `Attribute::Dimension(Dimension::new(name))`.
    #[must_use]
    pub fn dimension(name: &str) -> Self {
        Attribute::Dimension(Dimension::new(name))
    }

    /// Shorthand for a summed measure.
    #[must_use]
    pub fn measure(name: &str) -> Self {
        Attribute::Measure(Measure::new(name))
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Attribute::Dimension(d) => d.name(),
            Attribute::Measure(m) => m.name(),
        }
    }

    /// Whether this attribute is a dimension.
    #[must_use]
    pub fn is_dimension(&self) -> bool {
        matches!(self, Attribute::Dimension(_))
    }

    /// Whether this attribute is a measure.
    #[must_use]
    pub fn is_measure(&self) -> bool {
        matches!(self, Attribute::Measure(_))
    }

    /// Single-letter kind marker used in config signatures.
    pub(crate) fn kind_initial(&self) -> char {
        match self {
            Attribute::Dimension(_) => 'D',
            Attribute::Measure(_) => 'M',
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Dimension> for Attribute {
    fn from(d: Dimension) -> Self {
        Attribute::Dimension(d)
    }
}

impl From<Measure> for Attribute {
    fn from(m: Measure) -> Self {
        Attribute::Measure(m)
    }
}
