//! In-memory columnar table implementing [`TabularSource`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::trace;

use super::attribute::{Aggregation, Attribute, Dimension, Measure};
use super::source::{GroupKey, GroupedData, TabularSource};
use super::value::DataValue;
use crate::error::{Error, Result};

/// Name of the synthetic column added by [`Table::with_record_count`].
pub const RECORD_COUNT_COLUMN: &str = "Number of records";

/// A simple columnar table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column data keyed by column name.
    columns: HashMap<String, Vec<DataValue>>,
    /// Column names in insertion order.
    order: Vec<String>,
    /// Number of rows.
    n_rows: usize,
}

impl Table {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column of arbitrary values.
    ///
    /// The first column fixes the row count; later columns must match it.
    /// Re-adding a name replaces that column.
    pub fn add_column(&mut self, name: &str, values: Vec<DataValue>) -> Result<()> {
        if !self.order.is_empty() && values.len() != self.n_rows {
            return Err(Error::ColumnLength {
                column: name.to_string(),
                expected: self.n_rows,
                found: values.len(),
            });
        }
        self.n_rows = values.len();
        if self.columns.insert(name.to_string(), values).is_none() {
            self.order.push(name.to_string());
        }
        Ok(())
    }

    /// Add a numeric column.
    pub fn add_column_f32(&mut self, name: &str, data: &[f32]) -> Result<()> {
        self.add_column(name, data.iter().map(|&v| DataValue::Number(v)).collect())
    }

    /// Add a text column.
    pub fn add_column_str(&mut self, name: &str, data: &[&str]) -> Result<()> {
        self.add_column(name, data.iter().map(|&s| DataValue::from(s)).collect())
    }

    /// Add a column computed from each existing row.
    ///
    /// The formula sees the columns present before the call. Re-adding a
    /// name replaces that column.
    ///
    /// ```rust
    /// use trueno_facet::data::{DataValue, Table};
    ///
    /// let mut table = Table::new();
    /// table.add_column_f32("Sales", &[10.0, 20.0]).unwrap();
    /// table.add_column_f32("Cost", &[4.0, 25.0]).unwrap();
    /// table.add_computed_column("Profit", |row| {
    ///     match (row.number("Sales"), row.number("Cost")) {
    ///         (Some(sales), Some(cost)) => DataValue::Number(sales - cost),
    ///         _ => DataValue::Null,
    ///     }
    /// });
    ///
    /// assert_eq!(table.get("Profit").unwrap()[1], DataValue::Number(-5.0));
    /// ```
    pub fn add_computed_column<F>(&mut self, name: &str, formula: F)
    where
        F: Fn(TableRow<'_>) -> DataValue,
    {
        let values: Vec<DataValue> = (0..self.n_rows)
            .map(|index| formula(TableRow { table: self, index }))
            .collect();
        if self.columns.insert(name.to_string(), values).is_none() {
            self.order.push(name.to_string());
        }
    }

    /// Add the [`RECORD_COUNT_COLUMN`] column holding `1` for every row,
    /// so that summing it counts the records of a group.
    #[must_use]
    pub fn with_record_count(mut self) -> Self {
        self.add_computed_column(RECORD_COUNT_COLUMN, |_| DataValue::Number(1.0));
        self
    }

    /// One row of the table.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<TableRow<'_>> {
        (index < self.n_rows).then_some(TableRow { table: self, index })
    }

    /// Get a column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[DataValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Get number of rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Get number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.order.len()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in insertion order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    fn column(&self, name: &str) -> Result<&[DataValue]> {
        self.get(name).ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    fn reduce_rows(measure: &Measure, column: &[DataValue], rows: &[usize]) -> Result<DataValue> {
        let cells = rows.iter().map(|&r| &column[r]).filter(|v| !v.is_null());

        if measure.aggregation() == Aggregation::Count {
            return Ok(DataValue::Number(cells.count() as f32));
        }

        let numbers = cells
            .map(|v| v.as_f32().ok_or_else(|| Error::NonNumericColumn(measure.name().to_string())))
            .collect::<Result<Vec<f32>>>()?;
        Ok(measure.aggregation().reduce(&numbers))
    }
}

/// Read access to one row of a [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'t> {
    table: &'t Table,
    index: usize,
}

impl<'t> TableRow<'t> {
    /// Position of the row.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of a column in this row.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'t DataValue> {
        self.table.get(column).and_then(|values| values.get(self.index))
    }

    /// Numeric value of a column in this row.
    #[must_use]
    pub fn number(&self, column: &str) -> Option<f32> {
        self.get(column).and_then(DataValue::as_f32)
    }
}

impl TabularSource for Table {
    fn group_and_aggregate(
        &self,
        dimensions: &[Dimension],
        measures: &[Measure],
    ) -> Result<GroupedData> {
        let dim_columns = dimensions
            .iter()
            .map(|d| self.column(d.name()))
            .collect::<Result<Vec<_>>>()?;
        let measure_columns = measures
            .iter()
            .map(|m| self.column(m.name()))
            .collect::<Result<Vec<_>>>()?;

        // Ordered keys keep the group order deterministic.
        let mut groups: BTreeMap<Vec<DataValue>, Vec<usize>> = BTreeMap::new();
        for row in 0..self.n_rows {
            let key = dim_columns.iter().map(|col| col[row].clone()).collect();
            groups.entry(key).or_default().push(row);
        }
        trace!(groups = groups.len(), rows = self.n_rows, "grouped table");

        let mut out = GroupedData::with_capacity(groups.len());
        for (key, rows) in groups {
            let values = measures
                .iter()
                .zip(&measure_columns)
                .map(|(measure, column)| Self::reduce_rows(measure, column, &rows))
                .collect::<Result<Vec<_>>>()?;

            let key = match dimensions.len() {
                0 => GroupKey::Total,
                1 => key.into_iter().next().map_or(GroupKey::Total, GroupKey::Scalar),
                _ => GroupKey::Tuple(key),
            };
            out.push((key, values));
        }
        Ok(out)
    }

    fn distinct_values(&self, attribute: &Attribute) -> Result<BTreeSet<DataValue>> {
        Ok(self.column(attribute.name())?.iter().cloned().collect())
    }
}
