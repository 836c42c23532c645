//! The tabular source interface consumed by the aggregation pipeline.

use std::collections::BTreeSet;

use super::attribute::{Attribute, Dimension, Measure};
use super::value::DataValue;
use crate::error::Result;

/// Group key as produced by a group-by implementation.
///
/// Group-by engines disagree on the key shape for zero or one grouping
/// columns; [`GroupKey::into_values`] normalizes all shapes to a tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    /// One value per grouping dimension.
    Tuple(Vec<DataValue>),
    /// Bare value of a single grouping dimension.
    Scalar(DataValue),
    /// The whole dataset (no grouping dimensions).
    Total,
}

impl GroupKey {
    /// Normalize into one value per grouping dimension.
    #[must_use]
    pub fn into_values(self) -> Vec<DataValue> {
        match self {
            GroupKey::Tuple(values) => values,
            GroupKey::Scalar(value) => vec![value],
            GroupKey::Total => Vec::new(),
        }
    }
}

/// Aggregated groups: one key per group with one reduced value per measure,
/// in the order the measures were requested.
pub type GroupedData = Vec<(GroupKey, Vec<DataValue>)>;

/// A dataset that can answer the two queries the pipeline needs.
///
/// Implementations never get mutated by the pipeline and may be backed by
/// any storage.
pub trait TabularSource {
    /// Group rows by `dimensions` and reduce each measure per group.
    ///
    /// With no dimensions the whole dataset forms one group. With no
    /// measures every group maps to an empty value list.
    fn group_and_aggregate(
        &self,
        dimensions: &[Dimension],
        measures: &[Measure],
    ) -> Result<GroupedData>;

    /// All distinct values of an attribute's column.
    fn distinct_values(&self, attribute: &Attribute) -> Result<BTreeSet<DataValue>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_normalization() {
        let tuple = GroupKey::Tuple(vec!["East".into(), "Furniture".into()]);
        assert_eq!(tuple.into_values().len(), 2);

        let scalar = GroupKey::Scalar("East".into());
        assert_eq!(scalar.into_values(), vec![DataValue::from("East")]);

        assert!(GroupKey::Total.into_values().is_empty());
    }
}
