//! Scalar values held by tables and attribute-value pairs.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A value in a table cell or an aggregated result.
///
/// Values are totally ordered (`Null < Number < Text`) so they can key
/// ordered maps, be deduplicated and sort facets deterministically.
/// Numbers compare by IEEE-754 total order, which also drives equality
/// and hashing.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DataValue {
    /// A numeric value.
    Number(f32),
    /// A text value.
    Text(String),
    /// A missing value.
    #[default]
    Null,
}

impl DataValue {
    /// Get as f32, or None if not a number.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether this value is a number.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, DataValue::Number(_))
    }

    /// Whether this value is missing.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            DataValue::Null => 0,
            DataValue::Number(_) => 1,
            DataValue::Text(_) => 2,
        }
    }
}

impl PartialEq for DataValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DataValue {}

impl PartialOrd for DataValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DataValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (DataValue::Number(a), DataValue::Number(b)) => a.total_cmp(b),
            (DataValue::Text(a), DataValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for DataValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            DataValue::Number(n) => n.to_bits().hash(state),
            DataValue::Text(s) => s.hash(state),
            DataValue::Null => {}
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Number(n) => write!(f, "{n}"),
            DataValue::Text(s) => f.write_str(s),
            DataValue::Null => Ok(()),
        }
    }
}

impl From<f32> for DataValue {
    fn from(v: f32) -> Self {
        DataValue::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}
