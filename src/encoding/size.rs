//! Glyph size encoding.

use std::collections::BTreeMap;

use tracing::debug;

use super::{global_range, global_values, ordinal_index, EncodingKind, DEFAULT_SIZE};
use crate::config::VizConfig;
use crate::data::{Attribute, Avp, DataValue};
use crate::facet::Facet;
use crate::scale::{LinearScale, Scale, ValueRange};

/// Resolved size mapping for one aggregation result.
#[derive(Debug, Clone, PartialEq)]
pub enum SizeEncoding {
    /// Every glyph uses the mark's base size.
    Constant {
        /// Base size of the mark.
        size: f32,
    },
    /// Size per value, shared by all facets.
    ExistingDimension {
        /// Encoded dimension.
        attribute: Attribute,
        /// Size of every value seen in any facet.
        sizes: BTreeMap<DataValue, f32>,
        /// Size for values outside the map.
        base: f32,
    },
    /// Size per value, spread over each facet's own values.
    NewDimension {
        /// Encoded dimension.
        attribute: Attribute,
        /// Base size of the mark.
        base: f32,
    },
    /// Size scaled between half and one and a half times the base.
    MeasureRange {
        /// Encoded measure.
        attribute: Attribute,
        /// Numeric range across all facets; `None` if nothing numeric was seen.
        range: Option<ValueRange>,
        /// Maps the relative position onto a size.
        scale: LinearScale,
    },
}

/// Sizes for `n` ordered values, spread symmetrically around `base`.
///
/// The first value gets `base / 2`, the last `base * 1.5`. A single value
/// gets `base`.
#[must_use]
pub fn spread_sizes(n: usize, base: f32) -> Vec<f32> {
    if n <= 1 {
        return vec![base; n];
    }
    let steps = (n - 1) as f32;
    (0..n)
        .map(|i| base + (i as f32 - steps / 2.0) * base / steps)
        .collect()
}

impl SizeEncoding {
    /// Resolve the size encoding of `config` over the final facet list.
    #[must_use]
    pub fn resolve(config: &VizConfig, facets: &[Facet]) -> Self {
        let attribute = config.size();
        let kind = EncodingKind::classify(attribute, config);
        let base = config.mark_type().size_factor();
        debug!(%kind, attribute = ?attribute.map(Attribute::name), base, "resolving size encoding");

        match (kind, attribute) {
            (EncodingKind::ExistingDimension, Some(attr)) => {
                let index = ordinal_index(global_values(facets, attr));
                let spread = spread_sizes(index.len(), base);
                let sizes = index.into_iter().map(|(value, i)| (value, spread[i])).collect();
                Self::ExistingDimension {
                    attribute: attr.clone(),
                    sizes,
                    base,
                }
            }
            (EncodingKind::NewDimension, Some(attr)) => Self::NewDimension {
                attribute: attr.clone(),
                base,
            },
            (EncodingKind::MeasureRange, Some(attr)) => Self::MeasureRange {
                attribute: attr.clone(),
                range: global_range(facets, attr),
                scale: LinearScale::unit((0.5 * base, 1.5 * base)),
            },
            _ => Self::Constant { size: base },
        }
    }

    /// Which kind of mapping this is.
    #[must_use]
    pub fn kind(&self) -> EncodingKind {
        match self {
            Self::Constant { .. } => EncodingKind::Constant,
            Self::ExistingDimension { .. } => EncodingKind::ExistingDimension,
            Self::NewDimension { .. } => EncodingKind::NewDimension,
            Self::MeasureRange { .. } => EncodingKind::MeasureRange,
        }
    }

    /// Encoded attribute, `None` for a constant size.
    #[must_use]
    pub fn attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Constant { .. } => None,
            Self::ExistingDimension { attribute, .. }
            | Self::NewDimension { attribute, .. }
            | Self::MeasureRange { attribute, .. } => Some(attribute),
        }
    }

    /// Size of every glyph of `facet`.
    #[must_use]
    pub fn encode(&self, facet: &Facet) -> Vec<Avp> {
        let sizes: Vec<f32> = match self {
            Self::Constant { size } => vec![*size; facet.glyph_count()],
            Self::ExistingDimension {
                attribute,
                sizes,
                base,
            } => facet
                .glyph_values(attribute)
                .iter()
                .map(|value| sizes.get(value).copied().unwrap_or(*base))
                .collect(),
            Self::NewDimension { attribute, base } => {
                let values = facet.glyph_values(attribute);
                let index = ordinal_index(values.iter().cloned());
                let spread = spread_sizes(index.len(), *base);
                values
                    .iter()
                    .map(|value| index.get(value).map_or(*base, |&i| spread[i]))
                    .collect()
            }
            Self::MeasureRange {
                attribute,
                range,
                scale,
            } => facet
                .glyph_values(attribute)
                .iter()
                .map(|value| match (value.as_f32(), range) {
                    (Some(v), Some(range)) => scale.scale(range.relative(v)),
                    _ => scale.scale(0.5),
                })
                .collect(),
        };

        let channel = match self.attribute() {
            Some(attr) => attr.clone(),
            None => Attribute::dimension(DEFAULT_SIZE),
        };
        sizes
            .into_iter()
            .map(|size| Avp::new(channel.clone(), size))
            .collect()
    }
}
