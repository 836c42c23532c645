//! Glyph color encoding.

use std::collections::BTreeMap;

use tracing::debug;

use super::{global_range, global_values, ordinal_index, EncodingKind, DEFAULT_COLOR};
use crate::color::{Palette, Rgba};
use crate::config::VizConfig;
use crate::data::{Attribute, Avp, DataValue};
use crate::facet::Facet;
use crate::scale::ValueRange;

/// Resolved color mapping for one aggregation result.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorEncoding {
    /// Every glyph uses the palette default.
    Constant {
        /// The default color.
        color: Rgba,
    },
    /// Palette color per value, shared by all facets.
    ExistingDimension {
        /// Encoded dimension.
        attribute: Attribute,
        /// Color of every value seen in any facet.
        colors: BTreeMap<DataValue, Rgba>,
        /// Color for values outside the map.
        fallback: Rgba,
    },
    /// Palette color per value, assigned within each facet.
    NewDimension {
        /// Encoded dimension.
        attribute: Attribute,
        /// Colors cycled over the facet's sorted values.
        palette: Palette,
    },
    /// Default color lightened or darkened by the value's place in the range.
    MeasureRange {
        /// Encoded measure.
        attribute: Attribute,
        /// Numeric range across all facets; `None` if nothing numeric was seen.
        range: Option<ValueRange>,
        /// Color at the middle of the range.
        base: Rgba,
    },
}

impl ColorEncoding {
    /// Resolve the color encoding of `config` over the final facet list.
    #[must_use]
    pub fn resolve(config: &VizConfig, facets: &[Facet], palette: &Palette) -> Self {
        let attribute = config.color();
        let kind = EncodingKind::classify(attribute, config);
        debug!(%kind, attribute = ?attribute.map(Attribute::name), "resolving color encoding");

        match (kind, attribute) {
            (EncodingKind::ExistingDimension, Some(attr)) => {
                let colors = ordinal_index(global_values(facets, attr))
                    .into_iter()
                    .map(|(value, i)| (value, palette.color_at(i)))
                    .collect();
                Self::ExistingDimension {
                    attribute: attr.clone(),
                    colors,
                    fallback: palette.default_color(),
                }
            }
            (EncodingKind::NewDimension, Some(attr)) => Self::NewDimension {
                attribute: attr.clone(),
                palette: palette.clone(),
            },
            (EncodingKind::MeasureRange, Some(attr)) => Self::MeasureRange {
                attribute: attr.clone(),
                range: global_range(facets, attr),
                base: palette.default_color(),
            },
            _ => Self::Constant {
                color: palette.default_color(),
            },
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

    /// Encoded attribute, `None` for a constant color.
    #[must_use]
    pub fn attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Constant { .. } => None,
            Self::ExistingDimension { attribute, .. }
            | Self::NewDimension { attribute, .. }
            | Self::MeasureRange { attribute, .. } => Some(attribute),
        }
    }

    /// Color of every glyph of `facet`, as `#rrggbb` text values.
    #[must_use]
    pub fn encode(&self, facet: &Facet) -> Vec<Avp> {
        let colors: Vec<Rgba> = match self {
            Self::Constant { color } => vec![*color; facet.glyph_count()],
            Self::ExistingDimension {
                attribute,
                colors,
                fallback,
            } => facet
                .glyph_values(attribute)
                .iter()
                .map(|value| colors.get(value).copied().unwrap_or(*fallback))
                .collect(),
            Self::NewDimension { attribute, palette } => {
                let values = facet.glyph_values(attribute);
                let index = ordinal_index(values.iter().cloned());
                values
                    .iter()
                    .map(|value| index.get(value).map_or(palette.default_color(), |&i| palette.color_at(i)))
                    .collect()
            }
            Self::MeasureRange {
                attribute,
                range,
                base,
            } => facet
                .glyph_values(attribute)
                .iter()
                .map(|value| match (value.as_f32(), range) {
                    (Some(v), Some(range)) => base.adjust_brightness(0.5 - range.relative(v)),
                    _ => *base,
                })
                .collect(),
        };

        let channel = match self.attribute() {
            Some(attr) => attr.clone(),
            None => Attribute::dimension(DEFAULT_COLOR),
        };
        colors
            .into_iter()
            .map(|color| Avp::new(channel.clone(), color.to_hex()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facet(ship_mode: &str, regions: &[&str], quantities: &[f32], extra: Vec<Avp>) -> Facet {
        let x = regions
            .iter()
            .map(|r| Avp::new(Attribute::dimension("Region"), *r))
            .collect();
        let y = quantities
            .iter()
            .map(|q| Avp::new(Attribute::measure("Quantity"), *q))
            .collect();
        let sep = vec![Avp::new(Attribute::dimension("Ship Mode"), ship_mode)];
        Facet::new(x, y, Vec::new(), sep, extra)
    }

    fn config() -> VizConfig {
        VizConfig::new()
            .column(Attribute::dimension("Region"))
            .row(Attribute::dimension("Ship Mode"))
            .row(Attribute::measure("Quantity"))
    }

    fn hexes(avps: &[Avp]) -> Vec<String> {
        avps.iter().map(|avp| avp.value().to_string()).collect()
    }

    #[test]
    fn test_constant() {
        let facets = vec![facet("First Class", &["East", "West"], &[1.0, 2.0], vec![])];
        let encoding = ColorEncoding::resolve(&config(), &facets, &Palette::default());
        assert_eq!(encoding.kind(), EncodingKind::Constant);

        let colors = encoding.encode(&facets[0]);
        assert_eq!(hexes(&colors), vec!["#1f77b4", "#1f77b4"]);
        assert_eq!(colors[0].attribute(), &Attribute::dimension(DEFAULT_COLOR));
    }

    #[test]
    fn test_existing_dimension_is_global() {
        let facets = vec![
            facet("First Class", &["West"], &[1.0], vec![]),
            facet("Same Day", &["Central", "East", "West"], &[1.0, 2.0, 3.0], vec![]),
        ];
        let config = config().color_by(Attribute::dimension("Region"));
        let encoding = ColorEncoding::resolve(&config, &facets, &Palette::default());
        assert_eq!(encoding.kind(), EncodingKind::ExistingDimension);

        assert_eq!(hexes(&encoding.encode(&facets[0])), vec!["#2ca02c"]);
        assert_eq!(
            hexes(&encoding.encode(&facets[1])),
            vec!["#1f77b4", "#ff7f0e", "#2ca02c"]
        );
    }

    #[test]
    fn test_existing_dimension_from_separator() {
        let facets = vec![
            facet("Same Day", &["East", "West"], &[1.0, 2.0], vec![]),
            facet("First Class", &["East"], &[1.0], vec![]),
        ];
        let config = config().color_by(Attribute::dimension("Ship Mode"));
        let encoding = ColorEncoding::resolve(&config, &facets, &Palette::default());

        assert_eq!(hexes(&encoding.encode(&facets[0])), vec!["#ff7f0e", "#ff7f0e"]);
        assert_eq!(hexes(&encoding.encode(&facets[1])), vec!["#1f77b4"]);
    }

    #[test]
    fn test_new_dimension_is_facet_local() {
        let state = |s: &str| Avp::new(Attribute::dimension("State"), s);
        let facets = vec![
            facet("First Class", &["East", "West"], &[1.0, 2.0], vec![state("Utah"), state("Ohio")]),
            facet("Same Day", &["East"], &[1.0], vec![state("Utah")]),
        ];
        let config = config().color_by(Attribute::dimension("State"));
        let encoding = ColorEncoding::resolve(&config, &facets, &Palette::default());
        assert_eq!(encoding.kind(), EncodingKind::NewDimension);

        assert_eq!(hexes(&encoding.encode(&facets[0])), vec!["#ff7f0e", "#1f77b4"]);
        assert_eq!(hexes(&encoding.encode(&facets[1])), vec!["#1f77b4"]);
    }

    #[test]
    fn test_measure_range_shades_default() {
        let facets = vec![facet("First Class", &["East", "West", "South"], &[0.0, 5.0, 10.0], vec![])];
        let config = config().color_by(Attribute::measure("Quantity"));
        let encoding = ColorEncoding::resolve(&config, &facets, &Palette::default());
        assert_eq!(encoding.kind(), EncodingKind::MeasureRange);

        let colors = hexes(&encoding.encode(&facets[0]));
        assert_eq!(colors[0], adjust("#1f77b4", 0.5));
        assert_eq!(colors[1], "#1f77b4");
        assert_eq!(colors[2], adjust("#1f77b4", -0.5));
    }

    #[test]
    fn test_measure_single_value_is_darker_half() {
        let facets = vec![facet("First Class", &["East", "West"], &[4.0, 4.0], vec![])];
        let config = config().color_by(Attribute::measure("Quantity"));
        let encoding = ColorEncoding::resolve(&config, &facets, &Palette::default());

        let colors = hexes(&encoding.encode(&facets[0]));
        assert_eq!(colors, vec![adjust("#1f77b4", -0.5); 2]);
    }

    fn adjust(hex: &str, amount: f32) -> String {
        crate::color::adjust_brightness(hex, amount).unwrap()
    }
}
