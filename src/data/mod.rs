//! Data model: attributes, values, attribute-value pairs and tabular sources.
//!
//! # Components
//!
//! - **Attributes**: [`Dimension`]s split data, [`Measure`]s are reduced per group
//! - **Values**: [`DataValue`] with a total order so values can key maps
//! - **AVPs**: [`Avp`], one attribute resolved to one value for one row
//! - **Sources**: the [`TabularSource`] trait and the in-memory [`Table`]

mod attribute;
mod avp;
mod source;
mod table;
mod value;

pub use attribute::{Aggregation, Attribute, Dimension, Measure};
pub use avp::Avp;
pub use source::{GroupKey, GroupedData, TabularSource};
pub use table::{Table, TableRow, RECORD_COUNT_COLUMN};
pub use value::DataValue;
