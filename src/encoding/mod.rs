//! Color and size encodings.
//!
//! An encoding maps each glyph of a facet to a visual value. Which mapping
//! applies depends on the configured attribute; see [`EncodingKind::classify`].
//!
//! # Components
//!
//! - **Classification**: [`EncodingKind`]
//! - **Color**: [`ColorEncoding`], palette lookup or brightness shading
//! - **Size**: [`SizeEncoding`], symmetric spread or linear scaling
//!
//! Encodings are resolved once the facet list is final and never touch the
//! facets themselves.

mod color;
mod size;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub use color::ColorEncoding;
pub use size::{spread_sizes, SizeEncoding};

use crate::config::VizConfig;
use crate::data::{Attribute, DataValue};
use crate::facet::Facet;
use crate::scale::ValueRange;

/// Synthetic dimension carrying constant colors.
pub const DEFAULT_COLOR: &str = "Default Color";

/// Synthetic dimension carrying constant sizes.
pub const DEFAULT_SIZE: &str = "Default Size";

/// How a visual channel is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingKind {
    /// No attribute configured: one value for every glyph.
    Constant,
    /// A dimension that also sits on an axis. Mapped globally so the same
    /// value looks the same in every facet.
    ExistingDimension,
    /// A dimension used only for this channel. Mapped per facet.
    NewDimension,
    /// A measure, mapped through its observed value range.
    MeasureRange,
}

impl EncodingKind {
    /// Select the encoding for an optional channel attribute.
    #[must_use]
    pub fn classify(attribute: Option<&Attribute>, config: &VizConfig) -> Self {
        match attribute {
            None => Self::Constant,
            Some(attr) if attr.is_measure() => Self::MeasureRange,
            Some(attr) if config.is_on_axis(attr) => Self::ExistingDimension,
            Some(_) => Self::NewDimension,
        }
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Constant => "constant",
            Self::ExistingDimension => "existing-dimension",
            Self::NewDimension => "new-dimension",
            Self::MeasureRange => "measure-range",
        })
    }
}

/// Sorted distinct values of an attribute across all facets.
fn global_values(facets: &[Facet], attribute: &Attribute) -> BTreeSet<DataValue> {
    facets.iter().flat_map(|facet| facet.variations_of(attribute)).collect()
}

/// Ordinal position of each value in sorted order.
fn ordinal_index(values: impl IntoIterator<Item = DataValue>) -> BTreeMap<DataValue, usize> {
    let distinct: BTreeSet<DataValue> = values.into_iter().collect();
    distinct.into_iter().enumerate().map(|(i, v)| (v, i)).collect()
}

/// Numeric range of an attribute across all facets.
fn global_range(facets: &[Facet], attribute: &Attribute) -> Option<ValueRange> {
    ValueRange::from_values(
        global_values(facets, attribute)
            .iter()
            .filter_map(DataValue::as_f32),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> VizConfig {
        VizConfig::new()
            .column(Attribute::dimension("Region"))
            .row(Attribute::measure("Quantity"))
    }

    #[test]
    fn test_classify() {
        let config = config();
        assert_eq!(EncodingKind::classify(None, &config), EncodingKind::Constant);
        assert_eq!(
            EncodingKind::classify(Some(&Attribute::dimension("Region")), &config),
            EncodingKind::ExistingDimension
        );
        assert_eq!(
            EncodingKind::classify(Some(&Attribute::dimension("State")), &config),
            EncodingKind::NewDimension
        );
        assert_eq!(
            EncodingKind::classify(Some(&Attribute::measure("Quantity")), &config),
            EncodingKind::MeasureRange
        );
        assert_eq!(
            EncodingKind::classify(Some(&Attribute::measure("Profit")), &config),
            EncodingKind::MeasureRange
        );
    }

    #[test]
    fn test_ordinal_index_sorts() {
        let index = ordinal_index(["West", "East", "West", "Central"].map(DataValue::from));
        assert_eq!(index.len(), 3);
        assert_eq!(index[&DataValue::from("Central")], 0);
        assert_eq!(index[&DataValue::from("East")], 1);
        assert_eq!(index[&DataValue::from("West")], 2);
    }
}
