//! Aggregation pipeline: source data in, facet grid out.
//!
//! [`Aggregator::update`] runs one full cycle:
//!
//! 1. group and reduce the source by the config's dimensions and measures
//! 2. turn every group into a row of [`Avp`]s
//! 3. build facets and sort them into grid order
//! 4. compute the grid shape and padded axis ranges
//! 5. resolve color and size encodings and apply them to every facet
//!
//! Nothing is carried from one cycle to the next.

use tracing::{debug, warn};
use trueno::Vector;

use crate::color::Palette;
use crate::config::{Axis, VizConfig};
use crate::data::{Avp, DataValue, TabularSource};
use crate::encoding::{ColorEncoding, SizeEncoding};
use crate::error::Result;
use crate::facet::{Facet, FacetBuilder};

/// Extent of the values plotted on one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisRange {
    /// Lower bound, padded for numeric axes.
    pub min: DataValue,
    /// Upper bound, padded for numeric axes.
    pub max: DataValue,
}

impl AxisRange {
    /// Range of the coordinate values of an axis across all facets.
    ///
    /// Numeric ranges are widened by a tenth of their width on both ends. A
    /// zero-width numeric range spans from 0 to `value * 1.1`, ordered so
    /// that min stays below max; a lone 0 becomes `[0, 1]`. Categorical
    /// ranges are the smallest and largest values in [`DataValue`] order.
    #[must_use]
    pub fn of(facets: &[Facet], axis: Axis) -> Option<Self> {
        let values: Vec<&DataValue> = facets
            .iter()
            .flat_map(|facet| facet.coords(axis))
            .map(Avp::value)
            .collect();

        let numbers: Vec<f32> = values.iter().filter_map(|v| v.as_f32()).collect();
        if !numbers.is_empty() && numbers.len() == values.len() {
            let vec = Vector::from_slice(&numbers);
            if let (Ok(min), Ok(max)) = (vec.min(), vec.max()) {
                return Some(Self::padded(min, max));
            }
        }

        let min = values.iter().min()?;
        let max = values.iter().max()?;
        Some(Self {
            min: (*min).clone(),
            max: (*max).clone(),
        })
    }

    fn padded(min: f32, max: f32) -> Self {
        let pad = (max - min) / 10.0;
        let (mut lo, mut hi) = (min - pad, max + pad);
        if lo >= hi {
            let edge = max + max * 0.1;
            (lo, hi) = if edge.abs() < f32::EPSILON {
                (0.0, 1.0)
            } else {
                (edge.min(0.0), edge.max(0.0))
            };
        }
        Self {
            min: DataValue::Number(lo),
            max: DataValue::Number(hi),
        }
    }
}

/// Output of one aggregation cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    facets: Vec<Facet>,
    ncols: usize,
    nrows: usize,
    x_range: Option<AxisRange>,
    y_range: Option<AxisRange>,
    color: ColorEncoding,
    size: SizeEncoding,
}

impl AggregationResult {
    /// Facets in grid order: left to right, then top to bottom.
    #[must_use]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Number of grid columns, at least 1.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of grid rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Horizontal axis range, `None` without x coordinates.
    #[must_use]
    pub fn x_range(&self) -> Option<&AxisRange> {
        self.x_range.as_ref()
    }

    /// Vertical axis range, `None` without y coordinates.
    #[must_use]
    pub fn y_range(&self) -> Option<&AxisRange> {
        self.y_range.as_ref()
    }

    /// Range of an axis.
    #[must_use]
    pub fn range(&self, axis: Axis) -> Option<&AxisRange> {
        match axis {
            Axis::X => self.x_range(),
            Axis::Y => self.y_range(),
        }
    }

    /// Color encoding applied to the facets.
    #[must_use]
    pub fn color_encoding(&self) -> &ColorEncoding {
        &self.color
    }

    /// Size encoding applied to the facets.
    #[must_use]
    pub fn size_encoding(&self) -> &SizeEncoding {
        &self.size
    }

    /// Grid cell `(row, column)` of the facet at `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.ncols, index % self.ncols)
    }

    /// Whether the facet at `index` starts a grid row.
    #[must_use]
    pub fn is_in_first_column(&self, index: usize) -> bool {
        index % self.ncols == 0
    }

    /// Whether the facet at `index` is in the top grid row.
    #[must_use]
    pub fn is_in_first_row(&self, index: usize) -> bool {
        index < self.ncols
    }

    /// Whether the facet at `index` is in the bottom grid row.
    #[must_use]
    pub fn is_in_last_row(&self, index: usize) -> bool {
        index + self.ncols >= self.facets.len()
    }

    /// Whether the facet at `index` is the middle cell of the top row.
    #[must_use]
    pub fn is_in_center_top_column(&self, index: usize) -> bool {
        index == (self.ncols - 1) / 2
    }
}

/// Runs aggregation cycles of one config against one source.
///
/// # Example
///
/// ```rust
/// use trueno_facet::prelude::*;
///
/// let mut table = Table::new();
/// table.add_column_str("Region", &["East", "West", "East"]).unwrap();
/// table.add_column_str("Segment", &["Consumer", "Consumer", "Corporate"]).unwrap();
/// table.add_column_f32("Quantity", &[2.0, 3.0, 4.0]).unwrap();
///
/// let config = VizConfig::new()
///     .column(Attribute::dimension("Segment"))
///     .column(Attribute::dimension("Region"))
///     .row(Attribute::measure("Quantity"));
///
/// let mut aggregator = Aggregator::new(&table, config).unwrap();
/// let result = aggregator.update().unwrap();
/// assert_eq!(result.facets().len(), 2);
/// assert_eq!(result.ncols(), 2);
/// assert_eq!(result.nrows(), 1);
/// ```
#[derive(Debug)]
pub struct Aggregator<'a, S: TabularSource + ?Sized> {
    source: &'a S,
    config: VizConfig,
    palette: Palette,
    result: Option<AggregationResult>,
}

impl<'a, S: TabularSource + ?Sized> Aggregator<'a, S> {
    /// Create an aggregator using the Category10 palette.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MisplacedMeasure`] if the config is invalid.
    pub fn new(source: &'a S, config: VizConfig) -> Result<Self> {
        config.validate()?;
        debug!(config = %config, "created aggregator");
        Ok(Self {
            source,
            config,
            palette: Palette::default(),
            result: None,
        })
    }

    /// Use a different palette for color encodings.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// The config being aggregated.
    #[must_use]
    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    /// The palette used for color encodings.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Result of the latest [`update`](Self::update), if any.
    #[must_use]
    pub fn result(&self) -> Option<&AggregationResult> {
        self.result.as_ref()
    }

    /// Recompute the facet grid from the source.
    ///
    /// # Errors
    ///
    /// Propagates source errors and [`crate::Error::MissingAttribute`] from
    /// facet building. On error the previous result is kept.
    pub fn update(&mut self) -> Result<&AggregationResult> {
        let dimensions = self.config.dimensions();
        let measures = self.config.measures();
        let attributes = self.config.attributes();
        debug!(
            config = %self.config,
            dimensions = dimensions.len(),
            measures = measures.len(),
            "updating aggregation"
        );

        let grouped = self.source.group_and_aggregate(&dimensions, &measures)?;
        let rows = grouped.into_iter().map(|(key, values)| {
            attributes
                .iter()
                .cloned()
                .zip(key.into_values().into_iter().chain(values))
                .map(|(attr, value)| Avp::new(attr, value))
                .collect::<Vec<_>>()
        });

        let mut facets = FacetBuilder::build(rows, &self.config)?;
        sort_facets(&mut facets);

        let ncols = self.column_count()?;
        let nrows = facets.len() / ncols;
        if facets.len() % ncols != 0 {
            warn!(
                facets = facets.len(),
                ncols, "facets do not fill the grid; missing separator combinations"
            );
        }

        let x_range = AxisRange::of(&facets, Axis::X);
        let y_range = AxisRange::of(&facets, Axis::Y);

        let color = ColorEncoding::resolve(&self.config, &facets, &self.palette);
        let size = SizeEncoding::resolve(&self.config, &facets);
        for facet in &mut facets {
            let colors = color.encode(facet);
            let sizes = size.encode(facet);
            facet.set_encodings(colors, sizes);
        }

        debug!(
            facets = facets.len(),
            ncols,
            nrows,
            x_range = ?x_range,
            y_range = ?y_range,
            "updated aggregation"
        );

        Ok(&*self.result.insert(AggregationResult {
            facets,
            ncols,
            nrows,
            x_range,
            y_range,
            color,
            size,
        }))
    }

    /// Product of the distinct-value counts of the column separators.
    fn column_count(&self) -> Result<usize> {
        let mut ncols = 1usize;
        for attribute in self.config.x_separators() {
            ncols *= self.source.distinct_values(attribute)?.len();
        }
        Ok(ncols.max(1))
    }
}

/// Order facets row-major: row separators vary slowest, outermost first,
/// then column separators. The sort is stable.
fn sort_facets(facets: &mut [Facet]) {
    fn key(facet: &Facet) -> impl Iterator<Item = &DataValue> {
        facet
            .y_separators()
            .iter()
            .chain(facet.x_separators())
            .map(Avp::value)
    }
    facets.sort_by(|a, b| key(a).cmp(key(b)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Attribute, Table};
    use crate::encoding::EncodingKind;
    use crate::error::Error;
    use approx::assert_relative_eq;

    fn table() -> Table {
        let mut table = Table::new();
        table
            .add_column_str("Region", &["East", "West", "East", "West", "South"])
            .unwrap();
        table
            .add_column_str("Segment", &["Consumer", "Consumer", "Corporate", "Corporate", "Consumer"])
            .unwrap();
        table.add_column_f32("Quantity", &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        table
    }

    fn number(value: &DataValue) -> f32 {
        value.as_f32().unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let table = table();
        let config = VizConfig::new()
            .row(Attribute::measure("Quantity"))
            .row(Attribute::dimension("Region"));
        assert!(matches!(
            Aggregator::new(&table, config),
            Err(Error::MisplacedMeasure { .. })
        ));
    }

    #[test]
    fn test_update_populates_result() {
        let table = table();
        let config = VizConfig::new()
            .column(Attribute::dimension("Segment"))
            .column(Attribute::dimension("Region"))
            .row(Attribute::measure("Quantity"));
        let mut aggregator = Aggregator::new(&table, config).unwrap();
        assert!(aggregator.result().is_none());

        let result = aggregator.update().unwrap().clone();
        assert_eq!(result.facets().len(), 2);
        assert_eq!(result.ncols(), 2);
        assert_eq!(result.nrows(), 1);
        assert_eq!(aggregator.result(), Some(&result));

        // Consumer sorts before Corporate.
        assert_eq!(
            result.facets()[0].x_separators()[0].value(),
            &DataValue::from("Consumer")
        );
        assert_eq!(result.facets()[0].glyph_count(), 3);
        assert_eq!(result.facets()[1].glyph_count(), 2);
    }

    #[test]
    fn test_numeric_range_is_padded() {
        let table = table();
        let config = VizConfig::new()
            .column(Attribute::dimension("Region"))
            .row(Attribute::measure("Quantity"));
        let mut aggregator = Aggregator::new(&table, config).unwrap();
        let result = aggregator.update().unwrap();

        // Sums per region: East 4, South 5, West 6.
        let y = result.y_range().unwrap();
        assert_relative_eq!(number(&y.min), 3.8, epsilon = 1e-5);
        assert_relative_eq!(number(&y.max), 6.2, epsilon = 1e-5);

        let x = result.x_range().unwrap();
        assert_eq!(x.min, DataValue::from("East"));
        assert_eq!(x.max, DataValue::from("West"));
    }

    #[test]
    fn test_degenerate_numeric_range_is_pinned() {
        let range = AxisRange::padded(5.0, 5.0);
        assert_eq!(range.min, DataValue::Number(0.0));
        assert_relative_eq!(number(&range.max), 5.5);
    }

    #[test]
    fn test_degenerate_negative_range_is_ordered() {
        let range = AxisRange::padded(-5.0, -5.0);
        assert_relative_eq!(number(&range.min), -5.5);
        assert_eq!(range.max, DataValue::Number(0.0));
    }

    #[test]
    fn test_degenerate_zero_range_has_width() {
        let range = AxisRange::padded(0.0, 0.0);
        assert_eq!(range.min, DataValue::Number(0.0));
        assert_eq!(range.max, DataValue::Number(1.0));
    }

    #[test]
    fn test_channels_align_without_axes() {
        let table = table();
        let configs = [
            VizConfig::new().color_by(Attribute::measure("Quantity")),
            VizConfig::new().size_by(Attribute::dimension("Region")),
        ];
        for config in configs {
            let mut aggregator = Aggregator::new(&table, config).unwrap();
            let result = aggregator.update().unwrap();
            assert_eq!(result.facets().len(), 1);

            let facet = &result.facets()[0];
            assert!(facet.glyph_count() > 0);
            assert_eq!(facet.colors().len(), facet.glyph_count());
            assert_eq!(facet.sizes().len(), facet.glyph_count());
        }
    }

    #[test]
    fn test_no_coordinates_no_range() {
        let table = table();
        let mut aggregator = Aggregator::new(&table, VizConfig::new()).unwrap();
        let result = aggregator.update().unwrap();
        assert_eq!(result.facets().len(), 1);
        assert!(result.x_range().is_none());
        assert!(result.range(Axis::Y).is_none());
        assert_eq!((result.ncols(), result.nrows()), (1, 1));
    }

    #[test]
    fn test_grid_helpers() {
        let table = table();
        let config = VizConfig::new()
            .column(Attribute::dimension("Region"))
            .column(Attribute::dimension("Segment"))
            .row(Attribute::measure("Quantity"));
        let mut aggregator = Aggregator::new(&table, config).unwrap();
        let result = aggregator.update().unwrap();

        assert_eq!(result.ncols(), 3);
        assert_eq!(result.nrows(), 1);
        assert_eq!(result.position(2), (0, 2));
        assert!(result.is_in_first_column(0));
        assert!(!result.is_in_first_column(1));
        assert!(result.is_in_first_row(2));
        assert!(result.is_in_last_row(0));
        assert!(result.is_in_center_top_column(1));
        assert!(!result.is_in_center_top_column(0));
    }

    #[test]
    fn test_encodings_are_applied() {
        let table = table();
        let config = VizConfig::new()
            .column(Attribute::dimension("Region"))
            .row(Attribute::measure("Quantity"))
            .color_by(Attribute::dimension("Region"))
            .size_by(Attribute::measure("Quantity"));
        let mut aggregator = Aggregator::new(&table, config).unwrap();
        let result = aggregator.update().unwrap();

        assert_eq!(result.color_encoding().kind(), EncodingKind::ExistingDimension);
        assert_eq!(result.size_encoding().kind(), EncodingKind::MeasureRange);

        let facet = &result.facets()[0];
        assert_eq!(facet.colors().len(), facet.glyph_count());
        assert_eq!(facet.sizes().len(), facet.glyph_count());
        assert_eq!(facet.colors()[0].value(), &DataValue::from("#1f77b4"));
    }

    #[test]
    fn test_custom_palette() {
        let table = table();
        let palette = Palette::new(
            vec![crate::color::Rgba::rgb(1, 2, 3)],
            crate::color::Rgba::rgb(9, 9, 9),
        )
        .unwrap();
        let config = VizConfig::new()
            .column(Attribute::dimension("Region"))
            .row(Attribute::measure("Quantity"));
        let mut aggregator = Aggregator::new(&table, config).unwrap().with_palette(palette);
        let result = aggregator.update().unwrap();
        assert_eq!(result.facets()[0].colors()[0].value(), &DataValue::from("#090909"));
    }

    #[test]
    fn test_update_unknown_column() {
        let table = table();
        let config = VizConfig::new().column(Attribute::dimension("Missing"));
        let mut aggregator = Aggregator::new(&table, config).unwrap();
        assert_eq!(
            aggregator.update().unwrap_err(),
            Error::UnknownColumn("Missing".to_string())
        );
        assert!(aggregator.result().is_none());
    }
}
